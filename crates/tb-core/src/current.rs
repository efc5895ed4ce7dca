//! Finding the time block that covers the current time.

use chrono::{Local, NaiveTime};

use crate::interval::parse_time_block;
use crate::paragraph::{Note, Paragraph};
use crate::recognize::{self, Candidate};

/// First paragraph in line order whose block covers `now`, with its block.
fn current_block<'a>(
    note: &'a Note,
    now: NaiveTime,
    exclude_closed: bool,
    must_contain: Option<&str>,
) -> Option<(&'a Paragraph, Candidate)> {
    note.paragraphs
        .iter()
        .filter(|para| !(exclude_closed && para.para_type.is_closed()))
        .find_map(|para| {
            let candidate = recognize::para_candidate(para, must_contain)?;
            let text = recognize::candidate_text(&para.content, &candidate);
            match parse_time_block(&text) {
                Ok(interval) if interval.contains(now) => Some((para, candidate)),
                Ok(_) => None,
                Err(err) => {
                    tracing::debug!(line = para.line_index, %err, "skipping time block");
                    None
                }
            }
        })
}

/// The paragraph whose time block contains `now`.
///
/// Blocks are half-open: at exactly 15:00 a `14:00-15:00` block is over and a
/// `15:00-16:00` block has begun. If blocks overlap, the first one in the
/// note wins. Lines whose block cannot be read as clock times are skipped.
pub fn current_time_block_para_at<'a>(
    note: &'a Note,
    now: NaiveTime,
    exclude_closed: bool,
    must_contain: Option<&str>,
) -> Option<&'a Paragraph> {
    current_block(note, now, exclude_closed, must_contain).map(|(para, _)| para)
}

/// [`current_time_block_para_at`] using the local wall clock.
pub fn current_time_block_para<'a>(
    note: &'a Note,
    exclude_closed: bool,
    must_contain: Option<&str>,
) -> Option<&'a Paragraph> {
    current_time_block_para_at(note, Local::now().time(), exclude_closed, must_contain)
}

/// The current block's text and the rest of its line.
///
/// Returns `(block, remaining_content)`, where the remaining content has the
/// block and any `at`/`from` before it removed. Completed and cancelled
/// lines are not considered. Both strings are empty when nothing is current.
pub fn current_time_block_details_at(
    note: &Note,
    now: NaiveTime,
    must_contain: Option<&str>,
) -> (String, String) {
    current_block(note, now, true, must_contain).map_or_else(
        || (String::new(), String::new()),
        |(para, candidate)| {
            (
                recognize::candidate_text(&para.content, &candidate),
                recognize::remove_range(&para.content, &candidate.range),
            )
        },
    )
}

/// [`current_time_block_details_at`] using the local wall clock.
pub fn current_time_block_details(note: &Note, must_contain: Option<&str>) -> (String, String) {
    current_time_block_details_at(note, Local::now().time(), must_contain)
}
