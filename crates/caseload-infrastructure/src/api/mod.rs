//! reqwest implementations of the resource adapter traits.

mod auth;
mod client;
mod games;
mod misc;
mod schools;
mod sessions;
mod students;
mod themes;
mod therapists;

pub use auth::{AUTH_SESSION_KEY, HttpIdentityProvider};
pub use client::{ApiClient, decode, error_message};
pub use games::HttpGameClient;
pub use misc::{HttpHealthClient, HttpNewsletterClient};
pub use schools::HttpSchoolClient;
pub use sessions::HttpSessionClient;
pub use students::HttpStudentClient;
pub use themes::HttpThemeClient;
pub use therapists::HttpTherapistClient;
