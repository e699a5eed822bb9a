/// HTTP request handlers, one module per resource
pub mod admin;
pub mod categories;
pub mod comments;
pub mod guides;
pub mod newsletter;
pub mod newsletter_admin;
pub mod posts;
pub mod products;
