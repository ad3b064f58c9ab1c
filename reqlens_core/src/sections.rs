//! Assembly of the detail view from one transaction's payload
//!
//! Sections are transient view artifacts rebuilt from the raw detail on
//! every render; which ones exist, and in what order, is decided here and
//! nowhere else.

use crate::highlight::{highlight_json, looks_like_json, Highlighted, JsonToken};
use crate::model::{format_bytes, TransactionDetail, ValueMap};

/// Methods for which a captured body is surfaced
pub const BODY_METHODS: [&str; 4] = ["POST", "PUT", "PATCH", "DELETE"];

/// One titled, collapsible region of the detail view
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub content: SectionContent,
    pub action: Option<SectionAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    /// One row per name, multi-valued names flattened for display
    KeyValues(Vec<(String, String)>),
    /// Verbatim preformatted text
    Text(String),
    /// Syntax-highlighted JSON spans
    Json(Vec<JsonToken>),
    /// "no data" placeholder
    Empty,
}

/// Header action a section may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionAction {
    CopyCurl,
    CopyJson,
}

pub fn allow_body_for_method(method: &str) -> bool {
    let method = method.to_uppercase();
    BODY_METHODS.contains(&method.as_str())
}

/// Build the ordered display sections for one transaction detail.
///
/// Overview and Headers are always present; Cookies, the merged
/// Form/PostForm set, Multipart, and Trailer appear only when non-empty;
/// the body appears only for body-typical methods with a captured preview.
pub fn assemble_sections(detail: &TransactionDetail) -> Vec<Section> {
    let mut sections = vec![overview_section(detail)];

    sections.push(Section {
        title: "Headers".to_string(),
        content: key_values_or_empty(&detail.header),
        action: None,
    });

    if !detail.cookies.is_empty() {
        sections.push(Section {
            title: "Cookies".to_string(),
            content: key_values_or_empty(&detail.cookies),
            action: None,
        });
    }

    let form_combined = detail.form.merged_with(&detail.post_form);
    if !form_combined.is_empty() {
        sections.push(Section {
            title: "Form / PostForm".to_string(),
            content: key_values_or_empty(&form_combined),
            action: None,
        });
    }

    if !detail.multipart_form.is_empty() {
        sections.push(Section {
            title: "Multipart".to_string(),
            content: key_values_or_empty(&detail.multipart_form),
            action: None,
        });
    }

    if !detail.trailer.is_empty() {
        sections.push(Section {
            title: "Trailer".to_string(),
            content: key_values_or_empty(&detail.trailer),
            action: None,
        });
    }

    if let Some(body) = body_section(detail) {
        sections.push(body);
    }

    sections
}

fn overview_section(detail: &TransactionDetail) -> Section {
    let tls = if detail.tls_enabled {
        if detail.tls_version.is_empty() {
            "Yes".to_string()
        } else {
            format!("Yes {}", detail.tls_version)
        }
    } else {
        "No".to_string()
    };

    // Absent optionals render as empty values; the row itself stays
    let rows = vec![
        ("Request ID".to_string(), detail.request_id.clone()),
        (
            "Time".to_string(),
            detail.received_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        ),
        ("Method".to_string(), detail.method.clone()),
        ("URL".to_string(), detail.url()),
        ("IP".to_string(), detail.ip.clone()),
        ("TLS".to_string(), tls),
        ("Content-Type".to_string(), detail.content_type.clone()),
        ("Body".to_string(), format_bytes(detail.body_size)),
        ("User-Agent".to_string(), detail.user_agent.clone()),
        ("Referer".to_string(), detail.referer.clone()),
    ];

    Section {
        title: "Overview".to_string(),
        content: SectionContent::KeyValues(rows),
        action: Some(SectionAction::CopyCurl),
    }
}

fn body_section(detail: &TransactionDetail) -> Option<Section> {
    if !allow_body_for_method(&detail.method)
        || detail.body_size == 0
        || detail.body_preview.is_empty()
    {
        return None;
    }

    if looks_like_json(&detail.content_type, &detail.body_preview) {
        match highlight_json(&detail.body_preview) {
            Highlighted::Tokens(tokens) => Some(Section {
                title: "Body (JSON)".to_string(),
                content: SectionContent::Json(tokens),
                action: Some(SectionAction::CopyJson),
            }),
            Highlighted::Plain(text) => Some(Section {
                title: "Body (JSON)".to_string(),
                content: SectionContent::Text(text),
                action: Some(SectionAction::CopyJson),
            }),
        }
    } else {
        Some(Section {
            title: "Body (preview)".to_string(),
            content: SectionContent::Text(detail.body_preview.clone()),
            action: None,
        })
    }
}

fn key_values_or_empty(map: &ValueMap) -> SectionContent {
    if map.is_empty() {
        return SectionContent::Empty;
    }
    let rows = map
        .iter()
        .map(|(name, values)| (name.to_string(), ValueMap::display_value(values)))
        .collect();
    SectionContent::KeyValues(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn base_detail(method: &str) -> TransactionDetail {
        TransactionDetail {
            request_id: "req-1".to_string(),
            received_at: Utc.with_ymd_and_hms(2026, 8, 25, 10, 0, 0).unwrap(),
            method: method.to_string(),
            scheme: "https".to_string(),
            http_version: "HTTP/1.1".to_string(),
            host: "api.example.com".to_string(),
            path: "/v1/items".to_string(),
            query: String::new(),
            ip: "10.0.0.1".to_string(),
            content_type: String::new(),
            body_size: 0,
            user_agent: String::new(),
            referer: String::new(),
            tls_enabled: false,
            tls_version: String::new(),
            header: ValueMap::default(),
            cookies: ValueMap::default(),
            form: ValueMap::default(),
            post_form: ValueMap::default(),
            multipart_form: ValueMap::default(),
            trailer: ValueMap::default(),
            body_preview: String::new(),
        }
    }

    fn titles(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_overview_and_headers_always_present() {
        let sections = assemble_sections(&base_detail("GET"));
        assert_eq!(titles(&sections), ["Overview", "Headers"]);
        assert_eq!(sections[1].content, SectionContent::Empty);
    }

    #[test]
    fn test_overview_rows_keep_absent_optionals() {
        let sections = assemble_sections(&base_detail("GET"));
        let SectionContent::KeyValues(rows) = &sections[0].content else {
            panic!("overview must be key/values");
        };
        assert_eq!(rows.len(), 10);
        let ua = rows.iter().find(|(k, _)| k == "User-Agent").unwrap();
        assert_eq!(ua.1, "");
        assert_eq!(sections[0].action, Some(SectionAction::CopyCurl));
    }

    #[test]
    fn test_tls_row_rendering() {
        let mut detail = base_detail("GET");
        detail.tls_enabled = true;
        detail.tls_version = "TLS1.3".to_string();
        let sections = assemble_sections(&detail);
        let SectionContent::KeyValues(rows) = &sections[0].content else {
            panic!("overview must be key/values");
        };
        let tls = rows.iter().find(|(k, _)| k == "TLS").unwrap();
        assert_eq!(tls.1, "Yes TLS1.3");

        detail.tls_version = String::new();
        let sections = assemble_sections(&detail);
        let SectionContent::KeyValues(rows) = &sections[0].content else {
            panic!("overview must be key/values");
        };
        assert_eq!(rows.iter().find(|(k, _)| k == "TLS").unwrap().1, "Yes");
    }

    #[test]
    fn test_optional_sections_require_data() {
        let mut detail = base_detail("GET");
        detail.cookies.insert("session", vec!["abc".to_string()]);
        detail.trailer.insert("X-Checksum", vec!["1".to_string()]);
        let sections = assemble_sections(&detail);
        assert_eq!(
            titles(&sections),
            ["Overview", "Headers", "Cookies", "Trailer"]
        );
    }

    #[test]
    fn test_form_and_post_form_merge_post_form_wins() {
        let mut detail = base_detail("POST");
        detail.form.insert("a", vec!["form".to_string()]);
        detail.form.insert("b", vec!["form".to_string()]);
        detail.post_form.insert("b", vec!["post".to_string()]);
        let sections = assemble_sections(&detail);

        let merged = sections
            .iter()
            .find(|s| s.title == "Form / PostForm")
            .unwrap();
        let SectionContent::KeyValues(rows) = &merged.content else {
            panic!("form section must be key/values");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.iter().find(|(k, _)| k == "b").unwrap().1, "post");
    }

    #[test]
    fn test_multi_valued_header_display_join() {
        let mut detail = base_detail("GET");
        detail
            .header
            .insert("Set-Cookie", vec!["a=1".to_string(), "b=2".to_string()]);
        let sections = assemble_sections(&detail);
        let SectionContent::KeyValues(rows) = &sections[1].content else {
            panic!("headers must be key/values");
        };
        assert_eq!(rows[0], ("Set-Cookie".to_string(), "a=1, b=2".to_string()));
    }

    #[test]
    fn test_body_requires_method_size_and_preview() {
        let mut detail = base_detail("POST");
        detail.body_size = 10;
        detail.body_preview = "hello body".to_string();
        assert!(titles(&assemble_sections(&detail)).contains(&"Body (preview)"));

        detail.body_size = 0;
        assert!(!titles(&assemble_sections(&detail))
            .iter()
            .any(|t| t.starts_with("Body")));

        detail.body_size = 10;
        detail.body_preview = String::new();
        assert!(!titles(&assemble_sections(&detail))
            .iter()
            .any(|t| t.starts_with("Body")));
    }

    #[test]
    fn test_body_never_shown_for_get_even_with_preview() {
        let mut detail = base_detail("GET");
        detail.body_size = 10;
        detail.body_preview = "unexpected".to_string();
        assert!(!titles(&assemble_sections(&detail))
            .iter()
            .any(|t| t.starts_with("Body")));
    }

    #[test]
    fn test_put_with_zero_size_shows_no_body() {
        let mut detail = base_detail("PUT");
        detail.body_preview = "something".to_string();
        assert!(!titles(&assemble_sections(&detail))
            .iter()
            .any(|t| t.starts_with("Body")));
    }

    #[test]
    fn test_json_body_goes_through_highlighter() {
        let mut detail = base_detail("POST");
        detail.content_type = "application/json".to_string();
        detail.body_size = 9;
        detail.body_preview = r#"{"q": 1}"#.to_string();
        let sections = assemble_sections(&detail);
        let body = sections.last().unwrap();
        assert_eq!(body.title, "Body (JSON)");
        assert!(matches!(body.content, SectionContent::Json(_)));
        assert_eq!(body.action, Some(SectionAction::CopyJson));
    }

    #[test]
    fn test_bracket_sniffing_without_content_type() {
        let mut detail = base_detail("PATCH");
        detail.body_size = 7;
        detail.body_preview = "  [1,2]".to_string();
        let body = assemble_sections(&detail).pop().unwrap();
        assert_eq!(body.title, "Body (JSON)");
    }

    #[test]
    fn test_malformed_json_body_renders_as_text() {
        let mut detail = base_detail("POST");
        detail.content_type = "application/json".to_string();
        detail.body_size = 8;
        detail.body_preview = "{not json".to_string();
        let body = assemble_sections(&detail).pop().unwrap();
        assert_eq!(body.title, "Body (JSON)");
        assert_eq!(body.content, SectionContent::Text("{not json".to_string()));
    }
}
