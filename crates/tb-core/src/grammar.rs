//! Time-block grammar.
//!
//! A time block is one of three alternatives built from shared sub-patterns:
//!
//! - **Lead-in** (`at 5pm`, `from 2:30-3:45`): `at`/`from`, then an hour with
//!   optional minutes and AM/PM, optionally a range. Minutes are optional
//!   because the lead-in word already signals a time.
//! - **Bare range** (`2-3PM`, `12:00-1:00PM`): a range whose end carries a
//!   required AM/PM marker. `2-3` alone is not a time block.
//! - **Strict** (`12:30`, `16:00 - 16:45`): `H:MM`, optionally a range of two
//!   `H:MM` times.
//!
//! An AM/PM marker written directly after a bare hour cannot open a range, so
//! `at 5PM` is a time block while `at 2PM-3PM` and `2PM-3PM` are not.
//!
//! Hours accept 0-29. Real clock bounds are only checked when a block is
//! turned into a [`TimeInterval`](crate::TimeInterval).
//!
//! The `regex` crate has no look-around, so block boundaries (start of line or
//! whitespace before, end of line or whitespace after) are consumed by the
//! pattern and the block itself is the named group `tb`.

use std::sync::LazyLock;

use regex::Regex;

/// Name of the capture group holding the block text in every exported pattern.
pub const BLOCK_GROUP: &str = "tb";

/// One or two digits, 0-29.
pub(crate) const HOURS: &str = r"[0-2]?\d";
pub(crate) const HOURS_EXT: &str = r"(?:[0-2]?\d|noon|NOON|midnight|MIDNIGHT)";
pub(crate) const MINUTES: &str = r"[0-5]\d";
pub(crate) const MERIDIEM: &str = r"AM|am|PM|pm";
const AMPM: &str = r"\s?(?:AM|am|PM|pm)";
/// `-`, en-dash, `~` and fullwidth `〜` with optional spacing; `to` needs spaces.
pub(crate) const SEPARATOR: &str = r"(?:\s*(?:-|–|~|〜)\s*|\s+to\s+)";
pub(crate) const LEAD_IN: &str = r"(?:[Aa][Tt]|[Ff][Rr][Oo][Mm])";
const BLOCK_START: &str = r"(?:^|\s)";
const BLOCK_END: &str = r"(?:\s|$)";
/// List, heading or task marker at the start of a raw line.
const THEMES_LINE_START: &str = r"^\s*(?:[*+\-]|\d+\.|#{1,5})\s+(?:\[ \]\s+)?(?:[^\[\s].*?\s)?";

/// Which grammar alternative recognized a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alternative {
    /// `at`/`from` followed by a time or range.
    LeadIn,
    /// A range ending in a required AM/PM marker.
    BareRange,
    /// `H:MM`, optionally ranged.
    Strict,
}

impl Alternative {
    /// All alternatives in the order they are tried.
    pub const ALL: [Self; 3] = [Self::LeadIn, Self::BareRange, Self::Strict];

    /// The unanchored pattern for this alternative.
    pub fn pattern(self) -> String {
        match self {
            Self::LeadIn => lead_in_pattern(),
            Self::BareRange => bare_range_pattern(),
            Self::Strict => strict_pattern(),
        }
    }
}

fn lead_in_pattern() -> String {
    let range_start = format!("{HOURS_EXT}(?::{MINUTES}(?:{AMPM})?)?");
    let range_end = format!("{HOURS}(?::{MINUTES})?(?:{AMPM})?");
    let single = format!("{HOURS_EXT}(?::{MINUTES})?(?:{AMPM})?");
    format!(r"{LEAD_IN}\s+(?:{range_start}{SEPARATOR}{range_end}|{single})")
}

fn bare_range_pattern() -> String {
    format!(
        "{HOURS_EXT}(?::{MINUTES}(?:{AMPM})?)?{SEPARATOR}{HOURS_EXT}(?::{MINUTES})?{AMPM}"
    )
}

fn strict_pattern() -> String {
    let time_ext = format!("{HOURS_EXT}:{MINUTES}");
    format!("{time_ext}(?:{AMPM})?(?:{SEPARATOR}{time_ext}(?:{AMPM})?)?")
}

fn any_alternative() -> String {
    Alternative::ALL
        .iter()
        .map(|alt| format!("(?:{})", alt.pattern()))
        .collect::<Vec<_>>()
        .join("|")
}

fn bounded(inner: &str) -> String {
    format!("{BLOCK_START}(?P<{BLOCK_GROUP}>{inner}){BLOCK_END}")
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("time-block grammar is a valid pattern")
}

static APP_PATTERN: LazyLock<String> = LazyLock::new(|| bounded(&any_alternative()));

static THEMES_PATTERN: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{THEMES_LINE_START}(?P<{BLOCK_GROUP}>{}){BLOCK_END}",
        any_alternative()
    )
});

static APP_RE: LazyLock<Regex> = LazyLock::new(|| compile(&APP_PATTERN));

static THEMES_RE: LazyLock<Regex> = LazyLock::new(|| compile(&THEMES_PATTERN));

static ALTERNATIVE_RES: LazyLock<[(Alternative, Regex); 3]> = LazyLock::new(|| {
    Alternative::ALL.map(|alt| (alt, compile(&bounded(&alt.pattern()))))
});

/// A whole string that is a block without a lead-in word.
static STANDALONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        "^(?:(?:{})|(?:{}))$",
        Alternative::BareRange.pattern(),
        Alternative::Strict.pattern()
    ))
});

/// Pattern used by code that knows each line's paragraph type.
pub fn app_pattern() -> &'static str {
    &APP_PATTERN
}

/// Compiled [`app_pattern`].
pub fn app_regex() -> &'static Regex {
    &APP_RE
}

/// Pattern for theme/syntax-highlighting consumers that only see raw text.
///
/// On top of the app grammar it requires the line to start with a list,
/// heading or task marker (`*`, `-`, `+`, `1.`, or one to five `#`),
/// optionally followed by an unchecked `[ ]` box.
pub fn themes_pattern() -> &'static str {
    &THEMES_PATTERN
}

/// Compiled [`themes_pattern`].
pub fn themes_regex() -> &'static Regex {
    &THEMES_RE
}

/// One bounded regex per alternative, in [`Alternative::ALL`] order.
pub(crate) fn alternative_regexes() -> &'static [(Alternative, Regex)] {
    ALTERNATIVE_RES.as_slice()
}

pub(crate) fn standalone_regex() -> &'static Regex {
    &STANDALONE_RE
}
