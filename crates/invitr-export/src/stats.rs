use std::collections::BTreeMap;

use invitr_types::RsvpStatus;
use invitr_types::api::{EventStatistics, GuestResponse};

/// Aggregates replies, head count and dietary needs for an event. Email
/// counters come from the email log and are passed through.
pub fn event_statistics(guests: &[GuestResponse], emails_sent: u64, emails_opened: u64) -> EventStatistics {
    let count = |status: RsvpStatus| guests.iter().filter(|g| g.rsvp_status == status).count();

    let total_guests = guests.len();
    let rsvp_yes = count(RsvpStatus::Yes);
    let answered = guests.iter().filter(|g| g.rsvp_status.is_answered()).count();

    let total_attendees = guests
        .iter()
        .filter(|g| g.rsvp_status == RsvpStatus::Yes)
        .map(|g| 1 + u64::from(g.plus_one_count))
        .sum();

    let response_rate = if total_guests > 0 {
        let rate = answered as f64 / total_guests as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    } else {
        0.0
    };

    let mut dietary_restrictions = BTreeMap::new();
    for entry in guests
        .iter()
        .filter_map(|g| g.dietary_restrictions.as_deref())
        .flat_map(|d| d.split(','))
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        *dietary_restrictions.entry(entry.to_string()).or_insert(0) += 1;
    }

    EventStatistics {
        total_guests,
        rsvp_yes,
        rsvp_no: count(RsvpStatus::No),
        rsvp_maybe: count(RsvpStatus::Maybe),
        rsvp_pending: total_guests - answered,
        total_attendees,
        response_rate,
        dietary_restrictions,
        emails_sent,
        emails_opened,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guests::tests::guest;

    #[test]
    fn empty_event() {
        let stats = event_statistics(&[], 0, 0);
        assert_eq!(stats.total_guests, 0);
        assert_eq!(stats.response_rate, 0.0);
        assert!(stats.dietary_restrictions.is_empty());
    }

    #[test]
    fn counts_attendees_and_dietary_needs() {
        let mut ada = guest("Ada", None);
        ada.rsvp_status = RsvpStatus::Yes;
        ada.plus_one_count = 2;
        ada.dietary_restrictions = Some("Vegan, Nut allergy".into());

        let mut grace = guest("Grace", None);
        grace.rsvp_status = RsvpStatus::Yes;
        grace.dietary_restrictions = Some("vegan,,Vegan ".into());

        let mut alan = guest("Alan", None);
        alan.rsvp_status = RsvpStatus::No;
        alan.plus_one_count = 3;

        let stats = event_statistics(&[ada, grace, alan, guest("Edsger", None)], 3, 1);

        assert_eq!(stats.rsvp_yes, 2);
        assert_eq!(stats.rsvp_no, 1);
        assert_eq!(stats.rsvp_pending, 1);
        assert_eq!(stats.total_attendees, 4);
        assert_eq!(stats.response_rate, 75.0);
        assert_eq!(stats.dietary_restrictions.get("Vegan"), Some(&2));
        assert_eq!(stats.dietary_restrictions.get("vegan"), Some(&1));
        assert_eq!(stats.dietary_restrictions.get("Nut allergy"), Some(&1));
        assert_eq!((stats.emails_sent, stats.emails_opened), (3, 1));
    }

    #[test]
    fn response_rate_has_one_decimal() {
        let mut answered = guest("Ada", None);
        answered.rsvp_status = RsvpStatus::Maybe;
        let stats = event_statistics(&[answered, guest("B", None), guest("C", None)], 0, 0);
        assert_eq!(stats.response_rate, 33.3);
    }
}
