//! Which cached reads each successful write makes stale.
//!
//! | write | invalidated prefixes |
//! |---|---|
//! | student create | `[students]` |
//! | student update | `[students]`, `[student, id]`, `[sessions]`, `[session]`, `[studentSessions]` |
//! | student delete | update set, `[studentAttendance, id]` |
//! | add student to sessions | `[sessions, S, students]` per session, `[sessions]`, `[session]`, `[studentSessions]`, `[studentAttendance, id]` |
//! | remove student from session | `[sessions, S, students]`, `[sessions]`, `[session, S]`, `[studentSessions]`, `[studentAttendance, id]` |
//! | update session student | same as remove |
//! | session create | `[sessions]`, `[studentSessions]` |
//! | session update | `[sessions]`, `[session, id]`, `[studentSessions]`, `[studentAttendance]` |
//! | session delete | same as update |
//! | therapist update | `[therapist, id]` |
//! | theme create / update | `[themes]` |
//! | theme delete | `[themes]`, `[gameContent]` |
//! | game result | `[gameResults]` |
//! | newsletter subscribe | nothing |
//!
//! Session payloads embed roster summaries, both in session lists and in
//! every enrolled student's session list. Roster and student changes
//! therefore take the blanket `[sessions]` and `[studentSessions]` families.
//! Attendance records carry the session date.

use caseload_core::CacheKey;
use caseload_core::cache_key::{family, keys};

pub fn student_created() -> Vec<CacheKey> {
    vec![keys::family(family::STUDENTS)]
}

pub fn student_updated(student_id: &str) -> Vec<CacheKey> {
    vec![
        keys::family(family::STUDENTS),
        keys::student(student_id),
        keys::family(family::SESSIONS),
        keys::family(family::SESSION),
        keys::family(family::STUDENT_SESSIONS),
    ]
}

pub fn student_deleted(student_id: &str) -> Vec<CacheKey> {
    let mut prefixes = student_updated(student_id);
    prefixes.push(student_attendance_family(student_id));
    prefixes
}

pub fn students_enrolled(student_id: &str, session_ids: &[String]) -> Vec<CacheKey> {
    let mut prefixes: Vec<CacheKey> = session_ids
        .iter()
        .map(|id| keys::session_students(id))
        .collect();
    prefixes.extend([
        keys::family(family::SESSIONS),
        keys::family(family::SESSION),
        keys::family(family::STUDENT_SESSIONS),
        student_attendance_family(student_id),
    ]);
    prefixes
}

pub fn session_student_changed(session_id: &str, student_id: &str) -> Vec<CacheKey> {
    vec![
        keys::session_students(session_id),
        keys::family(family::SESSIONS),
        keys::session(session_id),
        keys::family(family::STUDENT_SESSIONS),
        student_attendance_family(student_id),
    ]
}

pub fn session_created() -> Vec<CacheKey> {
    vec![
        keys::family(family::SESSIONS),
        keys::family(family::STUDENT_SESSIONS),
    ]
}

pub fn session_updated(session_id: &str) -> Vec<CacheKey> {
    vec![
        keys::family(family::SESSIONS),
        keys::session(session_id),
        keys::family(family::STUDENT_SESSIONS),
        keys::family(family::STUDENT_ATTENDANCE),
    ]
}

pub fn session_deleted(session_id: &str) -> Vec<CacheKey> {
    session_updated(session_id)
}

pub fn therapist_updated(therapist_id: &str) -> Vec<CacheKey> {
    vec![keys::therapist(therapist_id)]
}

pub fn theme_changed() -> Vec<CacheKey> {
    vec![keys::themes()]
}

pub fn theme_deleted() -> Vec<CacheKey> {
    vec![keys::themes(), keys::family(family::GAME_CONTENT)]
}

pub fn game_result_recorded() -> Vec<CacheKey> {
    vec![keys::family(family::GAME_RESULTS)]
}

/// `[studentAttendance, id]`, covering every date range.
fn student_attendance_family(student_id: &str) -> CacheKey {
    keys::family(family::STUDENT_ATTENDANCE).push(student_id)
}
