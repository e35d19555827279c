//! Parsing of pasted answer options for the admin panel.
//!
//! Accepted shapes, after trimming the whole block:
//!
//! * quoted: `"a) Brave" "b) Calm" ...`. When the block contains a `"`, the
//!   options are the non-empty fragments between quote characters.
//! * lines: one option per line, blank lines ignored.
//!
//! Each option may carry a leading label `a)` .. `d)` (any case), which is
//! removed together with the whitespace after it. The first four options become
//! A, B, C and D; anything after them is ignored.

use crate::models::{Letter, Options};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("option {0} is missing")]
    MissingOption(Letter),
}

pub fn parse_options(raw: &str) -> Result<Options, IntakeError> {
    let text = raw.trim();

    let fragments: Vec<&str> = if text.contains('"') {
        text.split('"')
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .collect()
    } else {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    };

    let mut options = fragments.into_iter().map(strip_label);
    let mut next = |letter: Letter| {
        options
            .next()
            .filter(|option| !option.is_empty())
            .ok_or(IntakeError::MissingOption(letter))
    };

    Ok(Options {
        a: next(Letter::A)?,
        b: next(Letter::B)?,
        c: next(Letter::C)?,
        d: next(Letter::D)?,
    })
}

// Only `<a-d>)` is a label, so "Atılgan" and "A good listener" stay whole.
fn strip_label(option: &str) -> String {
    let mut chars = option.chars();
    let labelled = matches!(chars.next(), Some('a'..='d' | 'A'..='D'))
        && matches!(chars.next(), Some(')'));

    if labelled {
        // both label characters are ASCII
        option[2..].trim().to_string()
    } else {
        option.trim().to_string()
    }
}
