//! One-shot list command (print captured requests and exit)

use crate::api::ApiClient;
use anyhow::Result;
use reqlens_core::{filter_requests, format_bytes};

/// Print the captured-request list to stdout
pub async fn run(client: &ApiClient, limit: usize, query: Option<&str>) -> Result<()> {
    let items = client.fetch_requests(limit).await?;
    let visible = filter_requests(&items, query.unwrap_or(""));

    if visible.is_empty() {
        println!("No captured requests.");
        return Ok(());
    }

    println!(
        "{:<34} {:<7} {:<40} {:<16} {:<9} {}",
        "ID", "METHOD", "TARGET", "IP", "SIZE", "RECEIVED"
    );
    println!("{}", "-".repeat(120));

    for item in visible.iter() {
        let mut target = format!("{}{}", item.host, item.path);
        if !item.query.is_empty() {
            target.push('?');
            target.push_str(&item.query);
        }

        println!(
            "{:<34} {:<7} {:<40} {:<16} {:<9} {}",
            item.request_id,
            item.method,
            truncate(&target, 38),
            item.ip,
            format_bytes(item.body_size),
            item.received_at.format("%Y-%m-%d %H:%M:%S"),
        );
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-ten", 11), "exactly-ten");
        assert_eq!(truncate("a-rather-long-target", 10), "a-rather-…");
    }
}
