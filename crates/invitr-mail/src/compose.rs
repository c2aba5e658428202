use anyhow::Result;
use askama::Template;
use invitr_types::api::{EventResponse, GuestResponse};

use crate::OutgoingEmail;

const TO_BE_ANNOUNCED: &str = "TBA";

/// Public link a guest follows to view and answer the invitation.
pub fn invitation_url(base_url: &str, event_id: &str, token: &str) -> String {
    format!("{}/event/{}?guest={}", base_url.trim_end_matches('/'), event_id, token)
}

/// Everything the message templates can mention. Missing event details read
/// as "TBA".
struct Letter<'a> {
    name: &'a str,
    title: &'a str,
    date: &'a str,
    time: &'a str,
    venue: &'a str,
    host: &'a str,
    url: &'a str,
    status: &'static str,
}

impl<'a> Letter<'a> {
    fn new(event: &'a EventResponse, guest: &'a GuestResponse, url: &'a str) -> Self {
        let or_tba = |v: &'a Option<String>| v.as_deref().filter(|s| !s.is_empty()).unwrap_or(TO_BE_ANNOUNCED);
        Self {
            name: &guest.name,
            title: &event.title,
            date: or_tba(&event.event_date),
            time: or_tba(&event.event_time),
            venue: or_tba(&event.venue),
            host: event
                .host_name
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or("Your host"),
            url,
            status: guest.rsvp_status.as_str(),
        }
    }
}

#[derive(Template)]
#[template(path = "invitation.txt")]
struct InvitationText<'a> {
    letter: &'a Letter<'a>,
}

#[derive(Template)]
#[template(path = "invitation.html")]
struct InvitationHtml<'a> {
    letter: &'a Letter<'a>,
}

#[derive(Template)]
#[template(path = "confirmation.txt")]
struct ConfirmationText<'a> {
    letter: &'a Letter<'a>,
}

#[derive(Template)]
#[template(path = "confirmation.html")]
struct ConfirmationHtml<'a> {
    letter: &'a Letter<'a>,
}

/// `None` when the guest has no usable address.
pub fn invitation_email(
    event: &EventResponse,
    guest: &GuestResponse,
    invitation_url: &str,
) -> Result<Option<OutgoingEmail>> {
    let Some(to) = recipient(guest) else {
        return Ok(None);
    };
    let letter = Letter::new(event, guest, invitation_url);

    Ok(Some(OutgoingEmail {
        to,
        subject: format!("You're Invited: {}", event.title),
        text: InvitationText { letter: &letter }.render()?,
        html: InvitationHtml { letter: &letter }.render()?,
    }))
}

/// Sent after a guest answers. `None` when the guest has no usable address.
pub fn confirmation_email(event: &EventResponse, guest: &GuestResponse) -> Result<Option<OutgoingEmail>> {
    let Some(to) = recipient(guest) else {
        return Ok(None);
    };
    let letter = Letter::new(event, guest, "");

    Ok(Some(OutgoingEmail {
        to,
        subject: format!("RSVP Confirmed: {}", event.title),
        text: ConfirmationText { letter: &letter }.render()?,
        html: ConfirmationHtml { letter: &letter }.render()?,
    }))
}

fn recipient(guest: &GuestResponse) -> Option<String> {
    guest
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use invitr_types::RsvpStatus;

    pub(crate) fn event() -> EventResponse {
        EventResponse {
            id: "e1".into(),
            title: "Ada's 30th".into(),
            event_type: "Birthday".into(),
            template_id: "bir_0_clean_minimalist".into(),
            host_name: Some("Charles".into()),
            partner_name: None,
            event_date: Some("2025-06-01".into()),
            event_time: None,
            venue: Some("The <Hall>".into()),
            dress_code: None,
            message: None,
            background_image_url: None,
            background_style: None,
            contact_email: None,
            contact_phone: None,
            venue_latitude: None,
            venue_longitude: None,
            created_at: Default::default(),
        }
    }

    pub(crate) fn guest(name: &str, email: Option<&str>) -> GuestResponse {
        GuestResponse {
            id: format!("g-{name}"),
            name: name.into(),
            email: email.map(Into::into),
            phone: None,
            rsvp_status: RsvpStatus::Pending,
            plus_one_count: 0,
            dietary_restrictions: None,
            notes: None,
            unique_token: format!("tok-{name}"),
            invitation_sent: None,
            invitation_opened: None,
            rsvp_time: None,
        }
    }

    #[test]
    fn builds_invitation_url() {
        assert_eq!(
            invitation_url("http://localhost:5000/", "e1", "abc"),
            "http://localhost:5000/event/e1?guest=abc"
        );
    }

    #[test]
    fn invitation_has_both_alternatives() {
        let url = invitation_url("http://x", "e1", "tok-Ada");
        let email = invitation_email(&event(), &guest("Ada", Some(" ada@example.com ")), &url)
            .unwrap()
            .unwrap();

        assert_eq!(email.to, "ada@example.com");
        assert_eq!(email.subject, "You're Invited: Ada's 30th");
        assert!(email.text.contains("When: 2025-06-01 at TBA"));
        assert!(email.text.contains(&url));
        assert!(email.text.contains("Where: The <Hall>"));
        assert!(email.html.contains("The &lt;Hall&gt;"));
        assert!(!email.html.contains("<Hall>"));
        assert!(email.html.contains("tok-Ada"));
    }

    #[test]
    fn no_email_without_address() {
        assert!(invitation_email(&event(), &guest("Ada", None), "u").unwrap().is_none());
        assert!(confirmation_email(&event(), &guest("Ada", Some("  "))).unwrap().is_none());
    }

    #[test]
    fn confirmation_reports_response() {
        let mut g = guest("Ada", Some("ada@example.com"));
        g.rsvp_status = RsvpStatus::Yes;
        let email = confirmation_email(&event(), &g).unwrap().unwrap();
        assert_eq!(email.subject, "RSVP Confirmed: Ada's 30th");
        assert!(email.text.contains("Your Response: Yes"));
        assert!(email.html.contains("<strong>Your Response:</strong> Yes"));
        assert!(email.html.contains("The &lt;Hall&gt;"));
    }
}
