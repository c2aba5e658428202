use invitr_types::api::{DispatchStats, EventResponse, GuestResponse};
use tracing::{info, warn};

use crate::{Mailer, compose};

/// What happened to one guest during a bulk send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sent { guest_id: String, recipient: String },
    Failed { guest_id: String, recipient: String },
    Skipped { guest_id: String },
}

#[derive(Debug, Default)]
pub struct DispatchReport {
    pub stats: DispatchStats,
    pub outcomes: Vec<Outcome>,
}

/// Sends one invitation per guest, serially. Guests without an address are
/// skipped and a failed send never stops the batch.
pub fn send_bulk_invitations(
    mailer: &dyn Mailer,
    event: &EventResponse,
    guests: &[GuestResponse],
    base_url: &str,
) -> DispatchReport {
    let mut report = DispatchReport {
        stats: DispatchStats {
            total: guests.len(),
            ..Default::default()
        },
        outcomes: Vec::with_capacity(guests.len()),
    };

    for guest in guests {
        let url = compose::invitation_url(base_url, &event.id, &guest.unique_token);
        let email = match compose::invitation_email(event, guest, &url) {
            Ok(Some(email)) => email,
            Ok(None) => {
                report.stats.skipped += 1;
                report.outcomes.push(Outcome::Skipped {
                    guest_id: guest.id.clone(),
                });
                continue;
            }
            Err(e) => {
                warn!("Error rendering invitation for guest {}: {:#}", guest.id, e);
                report.stats.failed += 1;
                report.outcomes.push(Outcome::Failed {
                    guest_id: guest.id.clone(),
                    recipient: guest.email.clone().unwrap_or_default(),
                });
                continue;
            }
        };

        match mailer.send(&email) {
            Ok(()) => {
                report.stats.sent += 1;
                report.outcomes.push(Outcome::Sent {
                    guest_id: guest.id.clone(),
                    recipient: email.to,
                });
            }
            Err(e) => {
                warn!("Error sending invitation to {}: {:#}", email.to, e);
                report.stats.failed += 1;
                report.outcomes.push(Outcome::Failed {
                    guest_id: guest.id.clone(),
                    recipient: email.to,
                });
            }
        }
    }

    info!(
        "Invitations for event {}: {} sent, {} failed, {} skipped of {}",
        event.id, report.stats.sent, report.stats.failed, report.stats.skipped, report.stats.total
    );
    report
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::OutgoingEmail;
    use crate::compose::tests::{event, guest};

    #[derive(Default)]
    struct Recording {
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    impl Mailer for Recording {
        fn send(&self, email: &OutgoingEmail) -> anyhow::Result<()> {
            if email.to.ends_with("@bounce.test") {
                anyhow::bail!("mailbox unavailable");
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    #[test]
    fn counts_add_up() {
        let mailer = Recording::default();
        let guests = vec![
            guest("Ada", Some("ada@example.com")),
            guest("Grace", None),
            guest("Alan", Some("alan@bounce.test")),
            guest("Edsger", Some("")),
            guest("Barbara", Some("barbara@example.com")),
        ];

        let report = send_bulk_invitations(&mailer, &event(), &guests, "http://localhost:5000");
        let stats = report.stats;

        assert_eq!(stats.total, 5);
        assert_eq!(stats.sent, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.sent + stats.failed + stats.skipped, stats.total);
        assert_eq!(report.outcomes.len(), 5);

        let sent = mailer.sent.lock().unwrap();
        assert!(sent[0].text.contains("http://localhost:5000/event/e1?guest=tok-Ada"));
    }

    #[test]
    fn empty_batch() {
        let report = send_bulk_invitations(&crate::LogMailer, &event(), &[], "http://x");
        assert_eq!(report.stats, DispatchStats::default());
    }
}
