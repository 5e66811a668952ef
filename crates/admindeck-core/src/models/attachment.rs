use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptor returned by `POST /api/attachments/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub attachment_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attachment_descriptor() {
        let json = r#"{
            "id": 42,
            "file_name": "report.pdf",
            "file_size": 10240,
            "entity_type": "common",
            "attachment_type": "file",
            "url": "/uploads/report.pdf",
            "created_at": "2025-06-01T12:00:00Z"
        }"#;

        let att: Attachment = serde_json::from_str(json)
            .expect("Failed to parse attachment descriptor");
        assert_eq!(att.id, 42);
        assert_eq!(att.file_name, "report.pdf");
        assert_eq!(att.file_size, Some(10240));
        assert_eq!(att.entity_type.as_deref(), Some("common"));
    }

    #[test]
    fn test_parse_attachment_with_sparse_fields() {
        let json = r#"{"id": 7, "file_name": "a.png"}"#;
        let att: Attachment = serde_json::from_str(json)
            .expect("Failed to parse sparse attachment");
        assert_eq!(att.id, 7);
        assert_eq!(att.url, None);
        assert_eq!(att.created_at, None);
    }
}
