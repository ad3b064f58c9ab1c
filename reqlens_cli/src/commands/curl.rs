//! One-shot curl reconstruction command

use crate::api::{ApiClient, ApiError};
use anyhow::Result;
use reqlens_core::build_curl;

/// Fetch one request's detail and print its replay command
pub async fn run(client: &ApiClient, id: &str) -> Result<()> {
    let detail = match client.fetch_request(id).await {
        Ok(detail) => detail,
        Err(ApiError::NotFound) => {
            anyhow::bail!("Request {} not found on the backend", id);
        }
        Err(err) => return Err(err.into()),
    };

    println!("{}", build_curl(&detail));
    Ok(())
}
