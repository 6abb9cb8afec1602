//! Student domain module.
//!
//! # Module Structure
//!
//! - `model`: student records, request payloads and attendance
//! - `client`: the adapter trait for the students resource
//!
//! # Usage
//!
//! ```ignore
//! use caseload_core::student::{Student, StudentSummary, StudentClient};
//! ```

mod model;
pub mod client;

// Re-export public API
pub use client::StudentClient;
pub use model::{
    AttendanceRecord, AttendanceStatus, DateRange, NewStudent, Student, StudentSummary,
    StudentUpdate,
};
