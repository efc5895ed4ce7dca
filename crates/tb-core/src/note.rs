//! Reading note text into typed paragraphs.

use std::sync::LazyLock;

use regex::Regex;

use crate::paragraph::{Note, Paragraph, ParagraphType};

static TASK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<marker>[*+\-])\s+(?:\[(?P<state>[ xX>\-])\]\s*)?(?P<content>.*)$")
        .expect("valid task pattern")
});

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#{1,6}\s+(?P<content>.*)$").expect("valid heading pattern")
});

static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+[.)]\s+(?P<content>.*)$").expect("valid numbered list pattern")
});

fn is_separator(line: &str) -> bool {
    let line: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    line.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|&mark| line.chars().all(|c| c == mark))
}

fn task_type(marker: &str, state: Option<&str>) -> ParagraphType {
    match (marker, state) {
        ("+", None | Some(" ")) => ParagraphType::Checklist,
        ("+", Some("x" | "X")) => ParagraphType::ChecklistDone,
        ("+", Some("-")) => ParagraphType::ChecklistCancelled,
        ("+", Some(_)) => ParagraphType::ChecklistScheduled,
        ("-", None) => ParagraphType::List,
        (_, None | Some(" ")) => ParagraphType::Open,
        (_, Some("x" | "X")) => ParagraphType::Done,
        (_, Some("-")) => ParagraphType::Cancelled,
        (_, Some(_)) => ParagraphType::Scheduled,
    }
}

fn classify(line: &str) -> (ParagraphType, String) {
    let trimmed = line.trim_start();
    if trimmed.trim_end().is_empty() {
        return (ParagraphType::Empty, String::new());
    }
    if is_separator(trimmed) {
        return (ParagraphType::Separator, trimmed.trim_end().to_string());
    }
    if let Some(caps) = HEADING_RE.captures(trimmed) {
        return (ParagraphType::Title, caps["content"].to_string());
    }
    if let Some(rest) = trimmed.strip_prefix('>') {
        return (ParagraphType::Quote, rest.trim_start().to_string());
    }
    if let Some(caps) = TASK_RE.captures(trimmed) {
        let state = caps.name("state").map(|m| m.as_str());
        return (task_type(&caps["marker"], state), caps["content"].to_string());
    }
    if let Some(caps) = NUMBERED_RE.captures(trimmed) {
        return (ParagraphType::List, caps["content"].to_string());
    }
    (ParagraphType::Text, trimmed.to_string())
}

impl Note {
    /// Splits markdown note text into paragraphs, one per line.
    ///
    /// `*` starts a task and `+` a checklist item, each with an optional
    /// `[ ]`, `[x]`, `[-]` or `[>]` state box; `-` starts a bullet unless it
    /// has a box. Lines inside fenced code blocks are `code`.
    pub fn parse(text: &str) -> Self {
        let mut in_code = false;
        let paragraphs = text
            .lines()
            .enumerate()
            .map(|(line_index, line)| {
                let fence = line.trim_start().starts_with("```");
                let (para_type, content) = if fence || in_code {
                    (ParagraphType::Code, line.to_string())
                } else {
                    classify(line)
                };
                if fence {
                    in_code = !in_code;
                }
                Paragraph::new(content, para_type, line_index)
            })
            .collect();
        Self { paragraphs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(ParagraphType, String)> {
        Note::parse(text)
            .paragraphs
            .into_iter()
            .map(|p| (p.para_type, p.content))
            .collect()
    }

    #[test]
    fn classifies_lines() {
        let text = "# Monday\n\
                    * Standup 9:00-9:15\n\
                    * [x] Email 8:00-8:30\n\
                    * [-] Gym 7:00-8:00\n\
                    * [>] Dentist 11:00-12:00\n\
                    - [ ] Call at 5pm\n\
                    - note 12:30\n\
                    + Pack 2-3PM\n\
                    + [x] Packed\n\
                    1. first\n\
                    > quoted 10:00-11:00\n\
                    ---\n\
                    \n\
                    plain text";
        let expected = [
            (ParagraphType::Title, "Monday"),
            (ParagraphType::Open, "Standup 9:00-9:15"),
            (ParagraphType::Done, "Email 8:00-8:30"),
            (ParagraphType::Cancelled, "Gym 7:00-8:00"),
            (ParagraphType::Scheduled, "Dentist 11:00-12:00"),
            (ParagraphType::Open, "Call at 5pm"),
            (ParagraphType::List, "note 12:30"),
            (ParagraphType::Checklist, "Pack 2-3PM"),
            (ParagraphType::ChecklistDone, "Packed"),
            (ParagraphType::List, "first"),
            (ParagraphType::Quote, "quoted 10:00-11:00"),
            (ParagraphType::Separator, "---"),
            (ParagraphType::Empty, ""),
            (ParagraphType::Text, "plain text"),
        ];
        let parsed = kinds(text);
        assert_eq!(parsed.len(), expected.len());
        for ((t, content), (want_t, want_content)) in parsed.iter().zip(expected) {
            assert_eq!((*t, content.as_str()), (want_t, want_content));
        }
    }

    #[test]
    fn code_fences_are_code() {
        let note = Note::parse("```\n* 12:30 not a task\n```\n* 12:30 task");
        let types: Vec<ParagraphType> = note.paragraphs.iter().map(|p| p.para_type).collect();
        assert_eq!(
            types,
            [
                ParagraphType::Code,
                ParagraphType::Code,
                ParagraphType::Code,
                ParagraphType::Open
            ]
        );
    }

    #[test]
    fn keeps_line_indexes_and_indentation() {
        let note = Note::parse("# Plan\n\t* nested 9:00-10:00");
        assert_eq!(note.paragraphs[1].line_index, 1);
        assert_eq!(note.paragraphs[1].para_type, ParagraphType::Open);
        assert_eq!(note.paragraphs[1].content, "nested 9:00-10:00");
    }
}
