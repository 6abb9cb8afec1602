//! Cache keys for server-backed reads.
//!
//! A key is an ordered tuple of parts. Two reads with structurally equal keys
//! share one cache entry, so every constructor here must be a pure function of
//! its inputs. Parameter maps are normalized (sorted by name, absent values
//! dropped) before they become part of a key.

use std::collections::BTreeMap;
use std::fmt;

/// One element of a cache key tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyPart {
    Str(String),
    Int(i64),
    Params(KeyParams),
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        KeyPart::Str(value.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(value: String) -> Self {
        KeyPart::Str(value)
    }
}

impl From<i64> for KeyPart {
    fn from(value: i64) -> Self {
        KeyPart::Int(value)
    }
}

impl From<KeyParams> for KeyPart {
    fn from(value: KeyParams) -> Self {
        KeyPart::Params(value)
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Str(s) => write!(f, "{:?}", s),
            KeyPart::Int(i) => write!(f, "{}", i),
            KeyPart::Params(p) => write!(f, "{}", p),
        }
    }
}

/// Normalized request parameters embedded in a key.
///
/// Backed by a `BTreeMap`, so insertion order never affects equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyParams(BTreeMap<String, String>);

impl KeyParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter when it has a value. `None` and blank strings are
    /// dropped so that "unset" and "empty" produce the same key.
    pub fn with<V: ToString>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.trim().is_empty() {
                self.0.insert(name.to_string(), value);
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeyParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{:?}:{:?}", k, v)?;
        }
        write!(f, "}}")
    }
}

/// An ordered tuple identifying one cached read result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(Vec<KeyPart>);

impl CacheKey {
    /// Starts a key with the resource name.
    pub fn new(resource: &str) -> Self {
        Self(vec![KeyPart::from(resource)])
    }

    /// Appends one part.
    pub fn push(mut self, part: impl Into<KeyPart>) -> Self {
        self.0.push(part.into());
        self
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// True when `prefix` is a leading sub-tuple of this key.
    ///
    /// Invalidation works on prefixes: `[sessions]` covers every key that
    /// starts with `"sessions"`.
    pub fn starts_with(&self, prefix: &CacheKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", part)?;
        }
        write!(f, "]")
    }
}

/// Resource names used as the first key part.
pub mod family {
    pub const STUDENTS: &str = "students";
    pub const STUDENT: &str = "student";
    pub const STUDENT_SESSIONS: &str = "studentSessions";
    pub const STUDENT_ATTENDANCE: &str = "studentAttendance";
    pub const SESSIONS: &str = "sessions";
    pub const SESSION: &str = "session";
    pub const THERAPIST: &str = "therapist";
    pub const THEMES: &str = "themes";
    pub const SCHOOLS: &str = "schools";
    pub const DISTRICTS: &str = "districts";
    pub const GAME_CONTENT: &str = "gameContent";
    pub const GAME_RESULTS: &str = "gameResults";
    pub const HEALTH: &str = "health";
}

/// Key constructors for every cached read.
pub mod keys {
    use super::{CacheKey, KeyParams, family};

    /// Blanket family key, e.g. `[sessions]`.
    pub fn family(name: &str) -> CacheKey {
        CacheKey::new(name)
    }

    pub fn students(therapist_id: &str) -> CacheKey {
        CacheKey::new(family::STUDENTS).push(therapist_id)
    }

    pub fn student(student_id: &str) -> CacheKey {
        CacheKey::new(family::STUDENT).push(student_id)
    }

    pub fn student_sessions(student_id: &str) -> CacheKey {
        CacheKey::new(family::STUDENT_SESSIONS).push(student_id)
    }

    pub fn student_attendance(student_id: &str, params: KeyParams) -> CacheKey {
        CacheKey::new(family::STUDENT_ATTENDANCE)
            .push(student_id)
            .push(params)
    }

    pub fn sessions(therapist_id: &str, params: KeyParams) -> CacheKey {
        CacheKey::new(family::SESSIONS)
            .push(therapist_id)
            .push(params)
    }

    pub fn session(session_id: &str) -> CacheKey {
        CacheKey::new(family::SESSION).push(session_id)
    }

    pub fn session_students(session_id: &str) -> CacheKey {
        CacheKey::new(family::SESSIONS)
            .push(session_id)
            .push("students")
    }

    pub fn therapist(therapist_id: &str) -> CacheKey {
        CacheKey::new(family::THERAPIST).push(therapist_id)
    }

    pub fn themes() -> CacheKey {
        CacheKey::new(family::THEMES)
    }

    pub fn theme(theme_id: &str) -> CacheKey {
        CacheKey::new(family::THEMES).push(theme_id)
    }

    pub fn schools(params: KeyParams) -> CacheKey {
        CacheKey::new(family::SCHOOLS).push(params)
    }

    pub fn districts() -> CacheKey {
        CacheKey::new(family::DISTRICTS)
    }

    pub fn game_content(params: KeyParams) -> CacheKey {
        CacheKey::new(family::GAME_CONTENT).push(params)
    }

    pub fn game_results(params: KeyParams) -> CacheKey {
        CacheKey::new(family::GAME_RESULTS).push(params)
    }

    pub fn health() -> CacheKey {
        CacheKey::new(family::HEALTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_params_in_any_order_give_equal_keys() {
        let a = KeyParams::new()
            .with("date_from", Some("2025-01-01"))
            .with("date_to", Some("2025-01-31"));
        let b = KeyParams::new()
            .with("date_to", Some("2025-01-31"))
            .with("date_from", Some("2025-01-01"));

        assert_eq!(
            keys::student_attendance("stu-1", a),
            keys::student_attendance("stu-1", b)
        );
    }

    #[test]
    fn test_different_params_give_different_keys() {
        let a = KeyParams::new().with("date_from", Some("2025-01-01"));
        let b = KeyParams::new().with("date_from", Some("2025-02-01"));
        assert_ne!(keys::sessions("t-1", a.clone()), keys::sessions("t-1", b));
        assert_ne!(keys::sessions("t-1", a.clone()), keys::sessions("t-2", a));
    }

    #[test]
    fn test_absent_and_blank_params_are_dropped() {
        let a = KeyParams::new()
            .with("limit", None::<u32>)
            .with("district_id", Some(""));
        assert!(a.is_empty());
        assert_eq!(keys::schools(a), keys::schools(KeyParams::new()));
    }

    #[test]
    fn test_key_order_is_significant() {
        let a = CacheKey::new("sessions").push("x").push("y");
        let b = CacheKey::new("sessions").push("y").push("x");
        assert_ne!(a, b);
    }

    #[test]
    fn test_prefix_matching() {
        let roster = keys::session_students("s-1");
        assert!(roster.starts_with(&keys::family(family::SESSIONS)));
        assert!(roster.starts_with(&CacheKey::new("sessions").push("s-1")));
        assert!(!roster.starts_with(&keys::session("s-1")));
        assert!(!keys::themes().starts_with(&keys::theme("t-1")));
    }

    #[test]
    fn test_display() {
        let key = keys::sessions("t-1", KeyParams::new().with("limit", Some(10)));
        assert_eq!(key.to_string(), r#"["sessions","t-1",{"limit":"10"}]"#);
    }
}
