//! Extract command for pulling the time block out of a line.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveTime;
use serde::Serialize;

/// JSON shape of an extraction.
#[derive(Debug, Serialize)]
struct Extraction {
    time_block: String,
    content: String,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Prints the time block of `text`; nothing when there is none.
pub fn run<W: Write>(writer: &mut W, text: &str, json: bool) -> Result<()> {
    let time_block = tb_core::time_block_string(text);

    if !json {
        if !time_block.is_empty() {
            writeln!(writer, "{time_block}")?;
        }
        return Ok(());
    }

    let (start, end, error) = if time_block.is_empty() {
        (None, None, None)
    } else {
        match tb_core::parse_time_block(&time_block) {
            Ok(interval) => (Some(interval.start), interval.end, None),
            Err(err) => (None, None, Some(err.to_string())),
        }
    };
    let extraction = Extraction {
        content: tb_core::content_without_time_block(text),
        time_block,
        start,
        end,
        error,
    };
    writeln!(writer, "{}", serde_json::to_string(&extraction)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn extract(text: &str, json: bool) -> String {
        let mut output = Vec::new();
        run(&mut output, text, json).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn prints_block_text() {
        assert_eq!(
            extract(">2022-01-01 at 2:00am - 3:00PM here", false),
            "2:00am - 3:00PM\n"
        );
        assert_eq!(extract("no time here", false), "");
    }

    #[test]
    fn json_includes_parsed_times() {
        let output = extract("Lunch 12:00-1:00PM with Sam", true);
        assert_snapshot!(
            output.trim_end().to_string(),
            @r#"{"time_block":"12:00-1:00PM","content":"Lunch with Sam","start":"12:00:00","end":"13:00:00"}"#
        );
    }

    #[test]
    fn json_reports_unreadable_hours() {
        let output: serde_json::Value =
            serde_json::from_str(&extract("Broken 25:00-26:00", true)).unwrap();
        assert_eq!(output["time_block"], "25:00-26:00");
        assert!(output["start"].is_null());
        assert_eq!(output["error"], "hour 25 is out of range for a 24-hour clock");
    }

    #[test]
    fn json_without_block() {
        let output: serde_json::Value =
            serde_json::from_str(&extract("no time here", true)).unwrap();
        assert_eq!(output["time_block"], "");
        assert_eq!(output["content"], "no time here");
        assert!(output.get("error").is_none());
    }
}
