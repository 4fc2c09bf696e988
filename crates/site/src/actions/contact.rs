//! Contact form action.
//!
//! The only public mutation: validates the submission and delivers it via
//! the mailer. With no mailer configured the action returns a fixed failure
//! value; the form shows the message and nothing retries.

use serde::Deserialize;

use driftwood_core::Email;

use crate::state::AppState;

use super::ActionResponse;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Message shown when email delivery is not set up for the site.
pub const UNCONFIGURED_MESSAGE: &str =
    "The contact form is not configured for this site yet. Please try another channel.";

struct ValidatedContact {
    name: String,
    email: Email,
    message: String,
}

fn validate(input: &ContactInput) -> Result<ValidatedContact, String> {
    let name = input.name.trim();
    let message = input.message.trim();

    if name.is_empty() || message.is_empty() {
        return Err("Name and message are required.".to_owned());
    }

    let email = Email::parse(input.email.trim())
        .map_err(|_| "Please enter a valid email address.".to_owned())?;

    Ok(ValidatedContact {
        name: name.to_owned(),
        email,
        message: message.to_owned(),
    })
}

/// Submit a contact-form message.
pub async fn submit(state: &AppState, input: ContactInput) -> ActionResponse<()> {
    let validated = match validate(&input) {
        Ok(v) => v,
        Err(e) => return ActionResponse::fail(e),
    };

    let Some(mailer) = state.mailer() else {
        tracing::warn!("contact submission rejected: mailer not configured");
        return ActionResponse::fail(UNCONFIGURED_MESSAGE.to_owned());
    };

    let subject = format!("Contact form: {}", validated.name);
    let body = format!(
        "From: {} <{}>\n\n{}",
        validated.name, validated.email, validated.message
    );

    match mailer
        .send_contact_message(validated.email.as_str(), &subject, &body)
        .await
    {
        Ok(()) => {
            tracing::info!(email = %validated.email, "contact message accepted");
            ActionResponse::ok_empty()
        }
        Err(e) => {
            tracing::error!(error = %e, "contact delivery failed");
            ActionResponse::fail("Something went wrong. Please try again.".to_owned())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_fields() {
        let input = ContactInput {
            name: String::new(),
            email: "a@b.c".to_owned(),
            message: "hi".to_owned(),
        };
        assert!(validate(&input).is_err());

        let input = ContactInput {
            name: "Ada".to_owned(),
            email: "a@b.c".to_owned(),
            message: "  ".to_owned(),
        };
        assert!(validate(&input).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let input = ContactInput {
            name: "Ada".to_owned(),
            email: "not-an-email".to_owned(),
            message: "hi".to_owned(),
        };
        assert!(validate(&input).is_err());
    }

    #[test]
    fn test_validate_trims_input() {
        let input = ContactInput {
            name: "  Ada ".to_owned(),
            email: " ada@example.com ".to_owned(),
            message: " hello ".to_owned(),
        };
        let validated = validate(&input).unwrap();
        assert_eq!(validated.name, "Ada");
        assert_eq!(validated.email.as_str(), "ada@example.com");
        assert_eq!(validated.message, "hello");
    }
}
