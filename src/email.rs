//! Email delivery abstraction for verification codes.
//!
//! The account service treats delivery as fire-and-forget: a sender either
//! accepts the message or returns an error, and a failure degrades to the
//! generic infrastructure error without rolling back already-persisted state
//! or retrying. The default [`LogEmailSender`] logs instead of sending,
//! which is the local-dev delivery stub; an SMTP or API-backed sender plugs
//! in behind the same trait.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

/// Delivery abstraction injected into the account service.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error; the caller maps an error to a
    /// generic failure without retrying.
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Local dev sender that logs the envelope instead of sending real email.
/// The body is kept at debug level since it contains the OTP.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to_email = %message.to_email,
            subject = %message.subject,
            "email send stub"
        );
        debug!(body = %message.body, "email send stub body");
        Ok(())
    }
}

/// Build the OTP email for an account holder.
///
/// The code sits on its own line so plain-text clients render it clearly.
#[must_use]
pub fn verification_email(to_email: &str, first_name: &str, otp: &str) -> EmailMessage {
    EmailMessage {
        to_email: to_email.to_string(),
        subject: "Verification of Your Email Account".to_string(),
        body: format!(
            "Hi, {first_name}\n\n\
             Use the following OTP to complete your sign up procedures. \
             OTP is valid for 10 minutes.\n\n\
             {otp}\n"
        ),
    }
}
