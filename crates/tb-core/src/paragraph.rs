//! Paragraph kinds as classified by the note host.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a note paragraph, using the host's type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParagraphType {
    Title,
    Open,
    Done,
    Scheduled,
    Cancelled,
    Checklist,
    ChecklistDone,
    ChecklistScheduled,
    ChecklistCancelled,
    List,
    Quote,
    Text,
    Empty,
    Separator,
    Code,
}

impl ParagraphType {
    /// Host type name, e.g. `checklistDone`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Open => "open",
            Self::Done => "done",
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
            Self::Checklist => "checklist",
            Self::ChecklistDone => "checklistDone",
            Self::ChecklistScheduled => "checklistScheduled",
            Self::ChecklistCancelled => "checklistCancelled",
            Self::List => "list",
            Self::Quote => "quote",
            Self::Text => "text",
            Self::Empty => "empty",
            Self::Separator => "separator",
            Self::Code => "code",
        }
    }

    /// Whether a paragraph of this kind may carry a time block.
    ///
    /// Only headings, tasks, checklists and list items qualify. Quotes, plain
    /// text and scheduled or cancelled lines never do.
    pub const fn can_have_time_block(&self) -> bool {
        matches!(
            self,
            Self::Title
                | Self::Open
                | Self::Done
                | Self::List
                | Self::Checklist
                | Self::ChecklistDone
        )
    }

    /// Completed or cancelled task or checklist item.
    pub const fn is_closed(&self) -> bool {
        matches!(
            self,
            Self::Done | Self::Cancelled | Self::ChecklistDone | Self::ChecklistCancelled
        )
    }
}

/// [`ParagraphType::can_have_time_block`] for a raw host type name.
///
/// Unknown names are never eligible.
pub fn is_type_that_can_have_a_time_block(paragraph_type: &str) -> bool {
    paragraph_type
        .parse::<ParagraphType>()
        .is_ok_and(|t| t.can_have_time_block())
}

impl fmt::Display for ParagraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParagraphType {
    type Err = UnknownParagraphType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "open" => Ok(Self::Open),
            "done" => Ok(Self::Done),
            "scheduled" => Ok(Self::Scheduled),
            "cancelled" => Ok(Self::Cancelled),
            "checklist" => Ok(Self::Checklist),
            "checklistDone" => Ok(Self::ChecklistDone),
            "checklistScheduled" => Ok(Self::ChecklistScheduled),
            "checklistCancelled" => Ok(Self::ChecklistCancelled),
            "list" => Ok(Self::List),
            "quote" => Ok(Self::Quote),
            "text" => Ok(Self::Text),
            "empty" => Ok(Self::Empty),
            "separator" => Ok(Self::Separator),
            "code" => Ok(Self::Code),
            _ => Err(UnknownParagraphType(s.to_string())),
        }
    }
}

impl Serialize for ParagraphType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParagraphType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown paragraph type names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown paragraph type: {0}")]
pub struct UnknownParagraphType(String);

/// A single line of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Line text with any list or task marker removed.
    pub content: String,
    /// Kind of line.
    #[serde(rename = "type")]
    pub para_type: ParagraphType,
    /// Zero-based line number within the note.
    pub line_index: usize,
}

impl Paragraph {
    pub fn new(content: impl Into<String>, para_type: ParagraphType, line_index: usize) -> Self {
        Self {
            content: content.into(),
            para_type,
            line_index,
        }
    }
}

/// A note as an ordered list of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub paragraphs: Vec<Paragraph>,
}
