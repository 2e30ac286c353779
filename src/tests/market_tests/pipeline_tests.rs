use crate::domain::account::Role;
use crate::domain::interest::{InterestFilter, InterestStatus};
use crate::domain::lead::LeadStatus;
use crate::errors::PipelineError;
use crate::market::pipeline::LEAD_CREATED_NOTE;
use crate::market::ADMIN_ID;
use crate::tests::utils::{fixture, lead_for, login, login_admin, signup_as};

#[test]
fn interest_requires_a_session() {
    let mut fx = fixture();
    let err = fx.market.submit_interest(&fx.property.id, "hi").unwrap_err();
    assert_eq!(err, PipelineError::NotAuthenticated);
}

#[test]
fn interest_snapshots_buyer_contact() {
    let mut fx = fixture();
    login(&mut fx.market, &fx.buyer);
    let interest = fx.market.submit_interest(&fx.property.id, "Is it available?").unwrap();

    assert_eq!(interest.status, InterestStatus::New);
    assert_eq!(interest.source, "website");
    assert_eq!(interest.buyer_id, fx.buyer.id);
    assert_eq!(interest.buyer_contact.email, fx.buyer.email);
    assert_eq!(interest.buyer_contact.phone, fx.buyer.phone);
}

#[test]
fn duplicate_interest_is_refused_until_rejected() {
    let mut fx = fixture();
    login(&mut fx.market, &fx.buyer);
    let first = fx.market.submit_interest(&fx.property.id, "one").unwrap();
    assert_eq!(
        fx.market.submit_interest(&fx.property.id, "two").unwrap_err(),
        PipelineError::DuplicateInterest
    );

    login_admin(&mut fx.market);
    fx.market.send_back_interest(&first.id, "Need budget").unwrap();

    // Sent back still counts as active
    login(&mut fx.market, &fx.buyer);
    assert_eq!(
        fx.market.submit_interest(&fx.property.id, "three").unwrap_err(),
        PipelineError::DuplicateInterest
    );

    login_admin(&mut fx.market);
    let rejected = fx.market.reject_interest(&first.id, "Spam").unwrap();
    assert_eq!(rejected.status, InterestStatus::Rejected);
    assert_eq!(rejected.decision_reason.as_deref(), Some("Spam"));
    assert!(rejected.decision_at.is_some());

    login(&mut fx.market, &fx.buyer);
    fx.market.submit_interest(&fx.property.id, "four").unwrap();
}

#[test]
fn approval_creates_exactly_one_lead_and_history_entry() {
    let mut fx = fixture();
    login(&mut fx.market, &fx.buyer);
    let interest = fx.market.submit_interest(&fx.property.id, "hi").unwrap();

    login_admin(&mut fx.market);
    let lead = fx.market.approve_interest(&interest.id).unwrap();

    assert_eq!(lead.interest_id, interest.id);
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.marketer_id, fx.agent.id);
    assert_eq!(lead.developer_id, fx.agent.id);
    assert_eq!(lead.buyer_contact, interest.buyer_contact);

    let leads: Vec<_> = fx
        .market
        .leads()
        .iter()
        .filter(|l| l.interest_id == interest.id)
        .collect();
    assert_eq!(leads.len(), 1);

    let timeline = fx.market.get_lead_timeline(&lead.id);
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].status, LeadStatus::New);
    assert_eq!(timeline[0].notes, LEAD_CREATED_NOTE);
    assert_eq!(timeline[0].updated_by, ADMIN_ID);

    let stored = &fx.market.interests()[0];
    assert_eq!(stored.status, InterestStatus::Approved);

    assert_eq!(
        fx.market.approve_interest(&interest.id).unwrap_err(),
        PipelineError::InterestAlreadyApproved(interest.id.clone())
    );
    assert_eq!(fx.market.leads().len(), 1);
}

#[test]
fn approval_is_published_as_one_batch() {
    let mut fx = fixture();
    login(&mut fx.market, &fx.buyer);
    let interest = fx.market.submit_interest(&fx.property.id, "hi").unwrap();

    let rx = fx.market.store().bus().subscribe();
    login_admin(&mut fx.market);
    fx.market.approve_interest(&interest.id).unwrap();

    let msg = rx.try_recv().unwrap();
    assert_eq!(msg.origin, fx.market.store().origin());
    assert_eq!(msg.updates.len(), 3);
    assert!(rx.try_recv().is_err());
}

#[test]
fn approving_unknown_interest_or_property_fails() {
    let mut fx = fixture();
    login_admin(&mut fx.market);
    assert_eq!(
        fx.market.approve_interest("missing").unwrap_err(),
        PipelineError::InterestNotFound("missing".into())
    );
    assert_eq!(
        fx.market.reject_interest("missing", "x").unwrap_err(),
        PipelineError::InterestNotFound("missing".into())
    );

    login(&mut fx.market, &fx.buyer);
    let interest = fx.market.submit_interest("ghost-listing", "hi").unwrap();
    login_admin(&mut fx.market);
    assert_eq!(
        fx.market.approve_interest(&interest.id).unwrap_err(),
        PipelineError::PropertyNotFound("ghost-listing".into())
    );
    assert!(fx.market.leads().is_empty());
}

#[test]
fn assigned_agent_moves_the_lead() {
    let mut fx = fixture();
    let lead = lead_for(&mut fx);

    login(&mut fx.market, &fx.agent);
    let updated = fx
        .market
        .update_lead_status(&lead.id, LeadStatus::Contacted, "Called")
        .unwrap();
    assert_eq!(updated.status, LeadStatus::Contacted);
    assert!(updated.last_updated_at.is_some());

    // Free-form labels are kept as typed
    fx.market
        .update_lead_status(&lead.id, "Waiting on bank", "")
        .unwrap();

    let timeline = fx.market.get_lead_timeline(&lead.id);
    let statuses: Vec<&str> = timeline.iter().map(|h| h.status.as_str()).collect();
    assert_eq!(statuses, vec!["New", "Contacted", "Waiting on bank"]);
    assert_eq!(timeline[1].updated_by, fx.agent.id);
}

#[test]
fn strangers_cannot_touch_a_lead() {
    let mut fx = fixture();
    let lead = lead_for(&mut fx);

    assert_eq!(
        fx.market
            .update_lead_status(&lead.id, LeadStatus::Contacted, "")
            .unwrap_err(),
        PipelineError::NotAuthenticated
    );

    let stranger = signup_as(&mut fx.market, "Other Agent", Role::Marketer);
    login(&mut fx.market, &stranger);
    assert_eq!(
        fx.market
            .update_lead_status(&lead.id, LeadStatus::Contacted, "")
            .unwrap_err(),
        PipelineError::NotAuthorized
    );
    assert_eq!(
        fx.market
            .update_lead_status("missing", LeadStatus::Contacted, "")
            .unwrap_err(),
        PipelineError::LeadNotFound("missing".into())
    );

    login_admin(&mut fx.market);
    fx.market
        .update_lead_status(&lead.id, LeadStatus::Negotiation, "admin override")
        .unwrap();
}

#[test]
fn timeline_is_idempotent() {
    let mut fx = fixture();
    let lead = lead_for(&mut fx);
    login(&mut fx.market, &fx.agent);
    fx.market
        .update_lead_status(&lead.id, LeadStatus::SiteVisit, "")
        .unwrap();

    let first = fx.market.get_lead_timeline(&lead.id);
    let second = fx.market.get_lead_timeline(&lead.id);
    assert_eq!(first, second);
    assert!(fx.market.get_lead_timeline("missing").is_empty());
}

#[test]
fn interest_queue_and_my_leads() {
    let mut fx = fixture();
    let lead = lead_for(&mut fx);

    let approved = fx.market.get_interests(&InterestFilter {
        status: Some(InterestStatus::Approved),
    });
    assert_eq!(approved.len(), 1);
    assert!(fx
        .market
        .get_interests(&InterestFilter {
            status: Some(InterestStatus::New),
        })
        .is_empty());

    login(&mut fx.market, &fx.agent);
    assert_eq!(fx.market.get_my_leads(), vec![lead.clone()]);

    login(&mut fx.market, &fx.buyer);
    assert!(fx.market.get_my_leads().is_empty());

    login_admin(&mut fx.market);
    assert_eq!(fx.market.get_my_leads().len(), 1);
}
