mod activity;
mod designs;
mod email_log;
mod events;
mod guests;
mod users;
mod venues;

pub use designs::UNTITLED_DESIGN;

#[cfg(test)]
mod tests {
    use invitr_types::RsvpStatus;
    use invitr_types::api::{CreateEventRequest, NewGuest, VenueRequest};
    use invitr_types::models::{EmailKind, EmailStatus};

    use crate::Database;

    fn seeded() -> (Database, String) {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "host@example.com", "hash", "Host", None).unwrap();
        let req = CreateEventRequest {
            event_type: "Birthday".into(),
            template_id: "bir_0_elegant_white".into(),
            ..Default::default()
        };
        let event = db.create_event("e1", "u1", req).unwrap();
        (db, event.id)
    }

    fn guest(name: &str, email: Option<&str>) -> NewGuest {
        NewGuest {
            name: name.into(),
            email: email.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn event_defaults_title() {
        let (db, event_id) = seeded();
        let event = db.get_event(&event_id).unwrap().unwrap();
        assert_eq!(event.title, "My Event");
        assert!(event.is_owned_by("u1"));
        assert_eq!(db.list_events_for_user("u1").unwrap().len(), 1);
    }

    #[test]
    fn guests_get_unique_tokens() {
        let (db, event_id) = seeded();
        let guests = db
            .insert_guests(&event_id, &[guest("Ada", None), guest("Grace", None)])
            .unwrap();
        assert_eq!(guests.len(), 2);
        assert_ne!(guests[0].unique_token, guests[1].unique_token);
        assert!(guests.iter().all(|g| g.rsvp_status == RsvpStatus::Pending));

        let by_token = db.get_guest_by_token(&guests[1].unique_token).unwrap().unwrap();
        assert_eq!(by_token.name, "Grace");
    }

    #[test]
    fn deleting_event_cascades() {
        let (db, event_id) = seeded();
        let guests = db.insert_guests(&event_id, &[guest("Ada", Some("ada@example.com"))]).unwrap();
        db.add_comment(&event_id, None, "See you there").unwrap();
        db.record_view(&event_id).unwrap();
        db.record_share(&event_id, Some("whatsapp")).unwrap();
        db.log_email(&event_id, Some(guests[0].id.as_str()), EmailKind::Invitation, "ada@example.com", EmailStatus::Sent)
            .unwrap();

        let count = |table: &str| {
            db.with_conn(|c| Ok(c.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get::<_, i64>(0))?))
                .unwrap()
        };
        assert_eq!((count("shares"), count("views")), (1, 1));

        assert!(db.delete_event(&event_id).unwrap());
        assert_eq!((count("shares"), count("views")), (0, 0));
        assert_eq!(count("email_logs"), 0);
        assert!(db.get_guest(&guests[0].id).unwrap().is_none());
        assert!(db.list_comments(&event_id).unwrap().is_empty());
        assert_eq!(db.email_counts(&event_id).unwrap(), (0, 0));
        assert!(!db.delete_event(&event_id).unwrap());
    }

    #[test]
    fn rsvp_overwrites_previous_reply() {
        let (db, event_id) = seeded();
        let id = db.insert_guests(&event_id, &[guest("Ada", None)]).unwrap().remove(0).id;

        db.record_rsvp(&id, RsvpStatus::Maybe, 1, "", "").unwrap();
        let updated = db.record_rsvp(&id, RsvpStatus::Yes, 2, "Excited", "Vegan").unwrap().unwrap();
        assert_eq!(updated.rsvp_status, RsvpStatus::Yes);
        assert_eq!(updated.plus_one_count, 2);
        assert_eq!(updated.dietary_restrictions.as_deref(), Some("Vegan"));
        assert!(updated.rsvp_time.is_some());

        assert!(db.record_rsvp("missing", RsvpStatus::No, 0, "", "").unwrap().is_none());
    }

    #[test]
    fn awaiting_invitation_skips_sent_and_blank_emails() {
        let (db, event_id) = seeded();
        let guests = db
            .insert_guests(
                &event_id,
                &[guest("Ada", Some("ada@example.com")), guest("Grace", Some("  ")), guest("Alan", Some("alan@example.com"))],
            )
            .unwrap();
        db.mark_invitation_sent(&guests[0].id).unwrap();

        let awaiting = db.guests_awaiting_invitation(&event_id).unwrap();
        assert_eq!(awaiting.len(), 1);
        assert_eq!(awaiting[0].name, "Alan");

        let picked = db
            .get_guests_by_ids(&event_id, &[guests[1].id.clone(), "other".into()])
            .unwrap();
        assert_eq!(picked.len(), 1);
    }

    #[test]
    fn first_open_is_recorded_once() {
        let (db, event_id) = seeded();
        let g = db.insert_guests(&event_id, &[guest("Ada", Some("ada@example.com"))]).unwrap().remove(0);
        db.log_email(&event_id, Some(g.id.as_str()), EmailKind::Invitation, "ada@example.com", EmailStatus::Sent)
            .unwrap();
        db.mark_invitation_sent(&g.id).unwrap();

        let opened = db.mark_invitation_opened(&event_id, &g.unique_token).unwrap().unwrap();
        let first = opened.invitation_opened_at.clone();
        assert!(first.is_some());

        let again = db.mark_invitation_opened(&event_id, &g.unique_token).unwrap().unwrap();
        assert_eq!(again.invitation_opened_at, first);
        assert_eq!(db.email_counts(&event_id).unwrap(), (1, 1));

        assert!(db.mark_invitation_opened("other", &g.unique_token).unwrap().is_none());
    }

    #[test]
    fn dashboard_counts_replies_views_and_comments() {
        let (db, event_id) = seeded();
        let guests = db
            .insert_guests(&event_id, &[guest("Ada", None), guest("Grace", None), guest("Alan", None)])
            .unwrap();
        db.record_rsvp(&guests[0].id, RsvpStatus::Yes, 0, "", "").unwrap();
        db.record_rsvp(&guests[1].id, RsvpStatus::No, 0, "", "").unwrap();
        db.record_view(&event_id).unwrap();
        db.record_view(&event_id).unwrap();
        db.add_comment(&event_id, Some("Ada"), "Yay").unwrap();

        let stats = db.dashboard_stats(&event_id).unwrap();
        assert_eq!(stats.total_guests, 3);
        assert_eq!(stats.rsvp_yes, 1);
        assert_eq!(stats.rsvp_no, 1);
        assert_eq!(stats.rsvp_maybe, 0);
        assert_eq!(stats.views, 2);
        assert_eq!(stats.comments, 1);
    }

    #[test]
    fn comments_default_to_anonymous_newest_first() {
        let (db, event_id) = seeded();
        db.add_comment(&event_id, Some("  "), "first").unwrap();
        db.add_comment(&event_id, Some("Ada"), "second").unwrap();

        let comments = db.list_comments(&event_id).unwrap();
        assert_eq!(comments[0].content, "second");
        assert_eq!(comments[1].name, "Anonymous");
    }

    #[test]
    fn shares_get_sequential_ids() {
        let (db, event_id) = seeded();
        let a = db.record_share(&event_id, Some("whatsapp")).unwrap();
        let b = db.record_share(&event_id, None).unwrap();
        assert_eq!(b.id, a.id + 1);
    }

    #[test]
    fn venue_upsert_replaces_details() {
        let (db, event_id) = seeded();
        let mut req = VenueRequest {
            place_id: None,
            name: Some("Hall".into()),
            address: "1 Main St".into(),
            latitude: Some(1.0),
            longitude: Some(2.0),
            venue_type: None,
            parking_info: None,
            accessibility_notes: None,
        };
        let first = db.upsert_venue(&event_id, &req).unwrap();
        req.address = "2 Side St".into();
        let second = db.upsert_venue(&event_id, &req).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.address, "2 Side St");
        let event = db.get_event(&event_id).unwrap().unwrap();
        assert_eq!(event.venue.as_deref(), Some("2 Side St"));
        assert_eq!(event.venue_latitude, Some(1.0));
    }

    #[test]
    fn design_updates_are_scoped_to_owner() {
        let (db, _) = seeded();
        db.create_user("u2", "other@example.com", "hash", "Other", None).unwrap();

        let first = db.create_design("u1", "A", "{}", None).unwrap();
        let second = db.create_design("u1", "B", "{}", None).unwrap();
        assert!(db.update_design(&first, "u1", "A2", "{\"v\":2}", None).unwrap());
        assert!(!db.update_design(&first, "u2", "X", "{}", None).unwrap());

        let listed = db.list_designs("u1").unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first);
        assert_eq!(listed[1].id, second);

        assert_eq!(db.get_design(&first).unwrap().unwrap().title, "A2");
        assert!(db.list_designs("u2").unwrap().is_empty());
        assert!(db.delete_design(&first).unwrap());
        assert!(!db.delete_design(&first).unwrap());
    }
}
