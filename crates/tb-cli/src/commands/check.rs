//! Check command for testing a single line.

use std::io::Write;

use anyhow::Result;

/// Prints `true` or `false` for whether `text` contains a time block.
pub fn run<W: Write>(
    writer: &mut W,
    text: &str,
    must_contain: Option<&str>,
    themes: bool,
) -> Result<()> {
    let matched = if themes {
        tb_core::is_themes_time_block_line(text)
    } else {
        tb_core::is_time_block_line(text, must_contain)
    };
    tracing::debug!(text, ?must_contain, themes, matched, "checked line");
    writeln!(writer, "{matched}")?;
    Ok(())
}
