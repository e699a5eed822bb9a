/// Business services
///
/// - `email`: transactional email gateway (Resend HTTP API)
/// - `slug`: URL slug normalization and uniqueness assignment
pub mod email;
pub mod slug;

pub use email::EmailService;
pub use slug::{slugify, unique_slug};
