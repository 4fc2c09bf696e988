//! Clients for external services.

pub mod mailer;

pub use mailer::{MailerClient, MailerError};
