//! Time-block recognition for NotePlan-style notes.
//!
//! This crate contains the pure, synchronous logic for:
//! - Grammar: the app and themes time-block patterns
//! - Recognition: deciding whether a line or paragraph carries a time block
//! - Extraction: pulling the block text out of a line
//! - Selection: finding the block that covers the current time

mod current;
pub mod grammar;
mod interval;
pub mod markup;
mod note;
pub mod paragraph;
pub mod prefs;
mod recognize;

pub use current::{
    current_time_block_details, current_time_block_details_at, current_time_block_para,
    current_time_block_para_at,
};
pub use interval::{TimeBlockError, TimeInterval, parse_time_block};
pub use paragraph::{
    Note, Paragraph, ParagraphType, UnknownParagraphType, is_type_that_can_have_a_time_block,
};
pub use prefs::{
    MUST_CONTAIN_PREF_KEY, PreferenceError, PreferenceStore, must_contain_from_store,
    resolve_must_contain,
};
pub use recognize::{
    content_without_time_block, is_time_block_line, is_time_block_para, time_block_details,
    time_block_paras, time_block_string,
};

/// Whether a raw line is a time block as theme highlighting sees it.
///
/// Unlike [`is_time_block_line`] this needs no paragraph type: the line must
/// start with a list, heading or task marker. `@done(...)` stamps never count.
pub fn is_themes_time_block_line(line: &str) -> bool {
    grammar::themes_regex().is_match(&markup::mask_done_markers(line))
}
