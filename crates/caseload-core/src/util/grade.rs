//! Grade display/storage mapping.
//!
//! Storage is an integer 0-12 where 0 is kindergarten; display is `"K"` or
//! `"1"`..`"12"`.

/// Highest storable grade.
pub const MAX_GRADE: u8 = 12;

/// Display text when a student has no grade.
pub const GRADE_NOT_SPECIFIED: &str = "not specified";

pub fn grade_to_display(grade: Option<u8>) -> String {
    match grade {
        None => GRADE_NOT_SPECIFIED.to_string(),
        Some(0) => "K".to_string(),
        Some(g) => g.to_string(),
    }
}

/// Parses display text back to storage. Only `"K"` and canonical
/// `"0"`..`"12"` are accepted; anything else yields `None`.
pub fn grade_to_storage(display: &str) -> Option<u8> {
    if display == "K" {
        return Some(0);
    }
    let canonical = !display.is_empty()
        && display.bytes().all(|b| b.is_ascii_digit())
        && (display.len() == 1 || !display.starts_with('0'));
    if !canonical {
        return None;
    }
    display.parse::<u8>().ok().filter(|g| *g <= MAX_GRADE)
}

/// Every selectable grade as display text, kindergarten first.
pub fn grade_options() -> Vec<String> {
    (0..=MAX_GRADE).map(|g| grade_to_display(Some(g))).collect()
}
