//! Outgoing email: the [`Mailer`] seam, SMTP and logging transports,
//! the invitation and confirmation messages, and bulk dispatch.

pub mod compose;
pub mod dispatch;
pub mod smtp;

use anyhow::Result;
use tracing::info;

pub use compose::{confirmation_email, invitation_email, invitation_url};
pub use dispatch::{DispatchReport, Outcome, send_bulk_invitations};
pub use smtp::{SmtpMailer, SmtpSettings};

/// A fully rendered message for a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Delivers one message. Implementations block; callers on the async
/// runtime go through `spawn_blocking`.
pub trait Mailer: Send + Sync {
    fn send(&self, email: &OutgoingEmail) -> Result<()>;
}

/// Used when no SMTP relay is configured: the message is only logged.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<()> {
        info!("Would send e-mail to {}: {}", email.to, email.subject);
        Ok(())
    }
}
