pub mod auth;
pub mod avatar;
pub mod calendar;
pub mod grade;
pub mod health;
pub mod recent;
pub mod sessions;
pub mod students;
