//! Notes attached to applications by managers and clients.

use crate::domain::ValidationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    #[default]
    Internal,
    Comment,
    System,
    ChangeLog,
}

impl FromStr for NoteType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(NoteType::Internal),
            "comment" => Ok(NoteType::Comment),
            "system" => Ok(NoteType::System),
            "change_log" => Ok(NoteType::ChangeLog),
            other => Err(ValidationError::UnknownVariant {
                kind: "note type",
                value: other.to_string(),
            }),
        }
    }
}

/// A note on an application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ApplicationNote {
    pub id: String,
    pub application_id: String,
    pub content: String,
    pub note_type: NoteType,
    pub is_pinned: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,

    /// RFC 3339 timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Payload for creating a note.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateNoteRequest {
    pub content: String,
    pub note_type: NoteType,
}

/// Order notes the way the notes panel shows them: pinned first, then newest
/// first. Notes without a parseable timestamp sort last within their group.
pub fn sort_for_display(notes: &mut [ApplicationNote]) {
    fn timestamp(note: &ApplicationNote) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        note.created_at
            .as_deref()
            .and_then(|t| chrono::DateTime::parse_from_rfc3339(t).ok())
    }

    notes.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| timestamp(b).cmp(&timestamp(a)))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, pinned: bool, created_at: Option<&str>) -> ApplicationNote {
        ApplicationNote {
            id: id.to_string(),
            is_pinned: pinned,
            created_at: created_at.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_sort_pinned_then_newest() {
        let mut notes = vec![
            note("old", false, Some("2024-01-01T10:00:00Z")),
            note("undated", false, None),
            note("new", false, Some("2024-03-01T10:00:00Z")),
            note("pinned-old", true, Some("2023-12-01T10:00:00Z")),
        ];
        sort_for_display(&mut notes);

        let ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["pinned-old", "new", "old", "undated"]);
    }

    #[test]
    fn test_note_type_parse() {
        assert_eq!("change_log".parse::<NoteType>().unwrap(), NoteType::ChangeLog);
        assert!("memo".parse::<NoteType>().is_err());
    }
}
