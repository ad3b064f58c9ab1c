//! Wire model for captured HTTP transactions
//!
//! These types mirror the JSON the capture backend serves. Mapping-valued
//! fields (headers, cookies, forms, trailers) arrive as objects whose values
//! are either a single string or an array of strings; `ValueMap` normalizes
//! both shapes. Absent and `null` mappings are treated as empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One row in the captured-request list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// Opaque unique identifier, stable within one list snapshot
    pub request_id: String,
    pub method: String,
    pub host: String,
    pub path: String,
    /// Raw query string without the leading `?` (empty when none)
    #[serde(default)]
    pub query: String,
    pub ip: String,
    #[serde(default)]
    pub content_type: String,
    /// Request body size in bytes
    #[serde(default)]
    pub body_size: u64,
    #[serde(default)]
    pub tls_enabled: bool,
    /// Present only when the backend exposes it at list granularity
    #[serde(default)]
    pub user_agent: Option<String>,
    pub received_at: DateTime<Utc>,
}

/// Full detail for one captured request, fetched on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub request_id: String,
    pub received_at: DateTime<Utc>,
    pub method: String,
    #[serde(default)]
    pub scheme: String,
    #[serde(default)]
    pub http_version: String,
    pub host: String,
    pub path: String,
    #[serde(default)]
    pub query: String,
    pub ip: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub body_size: u64,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub referer: String,
    #[serde(default)]
    pub tls_enabled: bool,
    /// Meaningful only when `tls_enabled` is set
    #[serde(default)]
    pub tls_version: String,
    #[serde(default)]
    pub header: ValueMap,
    #[serde(default)]
    pub cookies: ValueMap,
    #[serde(default)]
    pub form: ValueMap,
    #[serde(default)]
    pub post_form: ValueMap,
    #[serde(default)]
    pub multipart_form: ValueMap,
    #[serde(default)]
    pub trailer: ValueMap,
    /// Truncated textual capture of the body; a faithful prefix, not
    /// guaranteed exhaustive
    #[serde(default)]
    pub body_preview: String,
}

impl TransactionDetail {
    /// Reconstruct the request URL as `scheme://host + path [?query]`
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            format!("{}://{}{}", self.scheme, self.host, self.path)
        } else {
            format!("{}://{}{}?{}", self.scheme, self.host, self.path, self.query)
        }
    }
}

/// Ordered mapping from a name to one or more string values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValueMap(BTreeMap<String, Vec<String>>);

impl ValueMap {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.0.insert(name.into(), values);
    }

    /// Merge `other` over `self`: colliding names take `other`'s values
    pub fn merged_with(&self, other: &ValueMap) -> ValueMap {
        let mut out = self.0.clone();
        for (k, v) in &other.0 {
            out.insert(k.clone(), v.clone());
        }
        ValueMap(out)
    }

    /// Join a name's values with `", "` for compact single-line display.
    /// Lossy by design; the raw multi-valued mapping stays intact.
    pub fn display_value(values: &[String]) -> String {
        values.join(", ")
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        ValueMap(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'de> Deserialize<'de> for ValueMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept null, missing values, single strings, and arrays of scalars
        let raw: Option<BTreeMap<String, serde_json::Value>> =
            Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(ValueMap::default());
        };

        let mut out = BTreeMap::new();
        for (name, value) in raw {
            let values = match value {
                serde_json::Value::Null => Vec::new(),
                serde_json::Value::String(s) => vec![s],
                serde_json::Value::Array(items) => {
                    items.into_iter().map(scalar_to_string).collect()
                }
                other => vec![scalar_to_string(other)],
            };
            out.insert(name, values);
        }
        Ok(ValueMap(out))
    }
}

fn scalar_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Render a byte count in human units, one decimal above bytes
pub fn format_bytes(n: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = n as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", n, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_from(json: &str) -> TransactionDetail {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_value_map_accepts_string_and_array_values() {
        let d = detail_from(
            r#"{
                "request_id": "r1",
                "received_at": "2026-08-25T10:00:00Z",
                "method": "GET",
                "host": "example.com",
                "path": "/",
                "ip": "127.0.0.1",
                "header": {
                    "Accept": "text/html",
                    "Set-Cookie": ["a=1", "b=2"]
                }
            }"#,
        );

        let entries: Vec<_> = d.header.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("Accept", &["text/html".to_string()][..]));
        assert_eq!(
            entries[1],
            ("Set-Cookie", &["a=1".to_string(), "b=2".to_string()][..])
        );
    }

    #[test]
    fn test_value_map_null_and_absent_are_empty() {
        let d = detail_from(
            r#"{
                "request_id": "r1",
                "received_at": "2026-08-25T10:00:00Z",
                "method": "GET",
                "host": "example.com",
                "path": "/",
                "ip": "127.0.0.1",
                "cookies": null
            }"#,
        );
        assert!(d.cookies.is_empty());
        assert!(d.trailer.is_empty());
    }

    #[test]
    fn test_merged_with_later_source_wins() {
        let form: ValueMap = [("a", vec!["1".to_string()]), ("b", vec!["2".to_string()])]
            .into_iter()
            .collect();
        let post_form: ValueMap = [("b", vec!["override".to_string()])].into_iter().collect();

        let merged = form.merged_with(&post_form);
        let entries: Vec<_> = merged.iter().collect();
        assert_eq!(entries[0], ("a", &["1".to_string()][..]));
        assert_eq!(entries[1], ("b", &["override".to_string()][..]));
    }

    #[test]
    fn test_url_reconstruction() {
        let mut d = detail_from(
            r#"{
                "request_id": "r1",
                "received_at": "2026-08-25T10:00:00Z",
                "method": "GET",
                "scheme": "https",
                "host": "api.example.com",
                "path": "/v1/items",
                "ip": "10.0.0.1"
            }"#,
        );
        assert_eq!(d.url(), "https://api.example.com/v1/items");

        d.query = "x=1&y=2".to_string();
        assert_eq!(d.url(), "https://api.example.com/v1/items?x=1&y=2");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
