//! Pattern command for exporting the time-block regular expressions.

use std::io::Write;

use anyhow::Result;
use tb_core::grammar;

/// Prints the app pattern, or the theme pattern when `themes` is set.
pub fn run<W: Write>(writer: &mut W, themes: bool) -> Result<()> {
    let pattern = if themes {
        grammar::themes_pattern()
    } else {
        grammar::app_pattern()
    };
    writeln!(writer, "{pattern}")?;
    Ok(())
}
