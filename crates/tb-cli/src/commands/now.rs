//! Now command for showing the time block that covers the current time.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use tb_core::Note;

/// Parses `HH:MM` for `--at`.
pub fn parse_clock_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|e| format!("invalid time {s:?}, expected HH:MM (e.g., 14:30): {e}"))
}

/// Options for the now command.
#[derive(Debug, Clone, Default)]
pub struct NowOptions<'a> {
    /// Time to test against; the local clock when `None`.
    pub at: Option<NaiveTime>,
    pub exclude_closed: bool,
    pub details: bool,
    pub must_contain: Option<&'a str>,
}

/// Runs the now command.
pub fn run<W: Write>(writer: &mut W, path: &Path, options: &NowOptions<'_>) -> Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let note = Note::parse(&text);
    let now = options.at.unwrap_or_else(|| Local::now().time());
    tracing::debug!(path = %path.display(), %now, "looking for current time block");

    if options.details {
        let (time_block, content) =
            tb_core::current_time_block_details_at(&note, now, options.must_contain);
        if !time_block.is_empty() {
            writeln!(writer, "{time_block}\t{content}")?;
        }
        return Ok(());
    }

    let Some(para) = tb_core::current_time_block_para_at(
        &note,
        now,
        options.exclude_closed,
        options.must_contain,
    ) else {
        writeln!(writer, "No current time block.")?;
        return Ok(());
    };

    writeln!(writer, "Line {}: {}", para.line_index + 1, para.content)?;
    writeln!(writer, "Type:       {}", para.para_type)?;
    if let Some((time_block, _)) = tb_core::time_block_details(para, options.must_contain) {
        writeln!(writer, "Time block: {time_block}")?;
        if let Ok(interval) = tb_core::parse_time_block(&time_block) {
            writeln!(writer, "Interval:   {interval}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    const DAY: &str = "# Day\n\
                       * Meeting 1:00PM-2:00PM\n\
                       * Lunch 12:00-1:00PM\n\
                       * Review 14:00-15:00\n\
                       * Gaming 3:00PM-4:00PM\n\
                       * [x] Done early 16:00-17:00\n\
                       * Wrap up 16:00-17:00\n";

    fn now_output(options: &NowOptions<'_>) -> String {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("day.md");
        fs::write(&path, DAY).unwrap();
        let mut output = Vec::new();
        run(&mut output, &path, options).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn at(s: &str) -> Option<NaiveTime> {
        Some(parse_clock_time(s).unwrap())
    }

    #[test]
    fn shows_current_block() {
        let output = now_output(&NowOptions {
            at: at("14:30"),
            ..NowOptions::default()
        });
        assert_snapshot!(output, @r"
        Line 4: Review 14:00-15:00
        Type:       open
        Time block: 14:00-15:00
        Interval:   14:00-15:00
        ");
    }

    #[test]
    fn block_end_belongs_to_next_block() {
        let output = now_output(&NowOptions {
            at: at("15:00"),
            ..NowOptions::default()
        });
        assert!(output.starts_with("Line 5: Gaming 3:00PM-4:00PM\n"));
        assert!(output.contains("Interval:   15:00-16:00"));
    }

    #[test]
    fn exclude_closed_and_details() {
        let open_only = NowOptions {
            at: at("16:30"),
            exclude_closed: true,
            ..NowOptions::default()
        };
        assert!(now_output(&open_only).starts_with("Line 7: Wrap up"));

        let everything = NowOptions {
            at: at("16:30"),
            ..NowOptions::default()
        };
        assert!(now_output(&everything).starts_with("Line 6: Done early"));

        let details = NowOptions {
            at: at("16:30"),
            details: true,
            ..NowOptions::default()
        };
        assert_eq!(now_output(&details), "16:00-17:00\tWrap up\n");
    }

    #[test]
    fn reports_block_outside_link_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("links.md");
        fs::write(&path, "* Call 14:00-15:00 see [doc](a 10:00 AM - 11:00 AM b.md)\n").unwrap();
        let mut output = Vec::new();
        let options = NowOptions {
            at: at("14:30"),
            ..NowOptions::default()
        };
        run(&mut output, &path, &options).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Line 1: Call 14:00-15:00 see [doc](a 10:00 AM - 11:00 AM b.md)
        Type:       open
        Time block: 14:00-15:00
        Interval:   14:00-15:00
        ");
    }

    #[test]
    fn nothing_current() {
        let output = now_output(&NowOptions {
            at: at("08:00"),
            ..NowOptions::default()
        });
        assert_eq!(output, "No current time block.\n");
    }

    #[test]
    fn clock_time_parsing() {
        assert_eq!(parse_clock_time("09:05"), Ok(NaiveTime::from_hms_opt(9, 5, 0).unwrap()));
        assert!(parse_clock_time("9am").is_err());
    }
}
