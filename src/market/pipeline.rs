// src/market/pipeline.rs
//
// Interest -> lead conversion and lead progression.
use chrono::Utc;

use crate::auth::token::new_id;
use crate::domain::account::Account;
use crate::domain::interest::{BuyerContact, Interest, InterestFilter, InterestStatus};
use crate::domain::lead::{Lead, LeadHistoryEntry, LeadStatus};
use crate::errors::{PipelineError, PipelineResult};
use crate::market::Market;
use crate::sync::CollectionUpdate;

pub(crate) const LEAD_CREATED_NOTE: &str = "Lead created from approved interest";

impl Market {
    pub fn interests(&self) -> &[Interest] {
        &self.data().interests
    }

    pub fn leads(&self) -> &[Lead] {
        &self.data().leads
    }

    pub fn find_lead(&self, id: &str) -> Option<&Lead> {
        self.data().leads.iter().find(|l| l.id == id)
    }

    /// Signed-in user plus the lead they may touch.
    ///
    /// Checks run in order: session, lead exists, admin or assigned agent.
    pub(crate) fn authorize_lead(&self, lead_id: &str) -> PipelineResult<(Account, Lead)> {
        let user = self
            .current_user()
            .cloned()
            .ok_or(PipelineError::NotAuthenticated)?;
        let lead = self
            .find_lead(lead_id)
            .cloned()
            .ok_or_else(|| PipelineError::LeadNotFound(lead_id.to_string()))?;

        if !user.is_admin() && !lead.is_assigned_to(&user.id) {
            tracing::warn!(account_id = %user.id, lead_id, "unauthorized lead update");
            return Err(PipelineError::NotAuthorized);
        }
        Ok((user, lead))
    }

    /// Buyer expresses interest in a listing.
    ///
    /// Any earlier interest from the same buyer on the same listing that was
    /// not rejected blocks a new one, `Sent Back` included.
    pub fn submit_interest(&mut self, property_id: &str, message: &str) -> PipelineResult<Interest> {
        let user = self
            .current_user()
            .cloned()
            .ok_or(PipelineError::NotAuthenticated)?;

        let interests = &self.data().interests;
        if interests
            .iter()
            .any(|i| i.buyer_id == user.id && i.property_id == property_id && i.status.is_active())
        {
            return Err(PipelineError::DuplicateInterest);
        }

        let interest = Interest {
            id: new_id(),
            buyer_id: user.id.clone(),
            property_id: property_id.to_string(),
            message: message.to_string(),
            buyer_contact: BuyerContact::snapshot(&user),
            source: "website".to_string(),
            status: InterestStatus::New,
            created_at: Utc::now(),
            decision_at: None,
            decision_reason: None,
        };

        let mut updated = interests.clone();
        updated.push(interest.clone());
        self.store.commit(vec![CollectionUpdate::Interests(updated)]);

        tracing::info!(interest_id = %interest.id, property_id, buyer_id = %user.id, "interest submitted");
        Ok(interest)
    }

    /// Admin approves an interest: the interest, its new lead and the
    /// lead's first history entry are stored and broadcast together.
    pub fn approve_interest(&mut self, interest_id: &str) -> PipelineResult<Lead> {
        let interest = self
            .data()
            .interests
            .iter()
            .find(|i| i.id == interest_id)
            .cloned()
            .ok_or_else(|| PipelineError::InterestNotFound(interest_id.to_string()))?;

        if interest.status == InterestStatus::Approved {
            return Err(PipelineError::InterestAlreadyApproved(interest_id.to_string()));
        }

        let property = self
            .find_property(&interest.property_id)
            .cloned()
            .ok_or_else(|| PipelineError::PropertyNotFound(interest.property_id.clone()))?;

        let now = Utc::now();
        let actor = self.actor_id();

        let interests: Vec<Interest> = self
            .data()
            .interests
            .iter()
            .map(|i| {
                let mut i = i.clone();
                if i.id == interest_id {
                    i.decide(InterestStatus::Approved, None, now);
                }
                i
            })
            .collect();

        let lead = Lead {
            id: new_id(),
            interest_id: interest.id.clone(),
            property_id: interest.property_id.clone(),
            buyer_id: interest.buyer_id.clone(),
            marketer_id: property.agent_id.clone(),
            developer_id: property.agent_id,
            status: LeadStatus::New,
            buyer_contact: interest.buyer_contact,
            approved_at: now,
            assigned_at: now,
            last_updated_at: None,
            closed_at: None,
            deal_value: None,
        };

        let mut leads = self.data().leads.clone();
        leads.push(lead.clone());

        let mut history = self.data().lead_history.clone();
        history.push(LeadHistoryEntry {
            id: new_id(),
            lead_id: lead.id.clone(),
            status: LeadStatus::New,
            updated_by: actor,
            timestamp: now,
            notes: LEAD_CREATED_NOTE.to_string(),
        });

        self.store.commit(vec![
            CollectionUpdate::Interests(interests),
            CollectionUpdate::Leads(leads),
            CollectionUpdate::LeadHistory(history),
        ]);

        tracing::info!(interest_id, lead_id = %lead.id, agent_id = %lead.marketer_id, "interest approved, lead created");
        Ok(lead)
    }

    pub fn reject_interest(&mut self, interest_id: &str, reason: &str) -> PipelineResult<Interest> {
        self.decide_interest(interest_id, InterestStatus::Rejected, reason)
    }

    /// Return an interest to the buyer for more detail. The pair stays
    /// blocked for new submissions.
    pub fn send_back_interest(&mut self, interest_id: &str, reason: &str) -> PipelineResult<Interest> {
        self.decide_interest(interest_id, InterestStatus::SentBack, reason)
    }

    fn decide_interest(
        &mut self,
        interest_id: &str,
        status: InterestStatus,
        reason: &str,
    ) -> PipelineResult<Interest> {
        let now = Utc::now();
        let mut decided = None;
        let interests: Vec<Interest> = self
            .data()
            .interests
            .iter()
            .map(|i| {
                let mut i = i.clone();
                if i.id == interest_id {
                    i.decide(status, Some(reason.to_string()), now);
                    decided = Some(i.clone());
                }
                i
            })
            .collect();

        let decided = decided.ok_or_else(|| PipelineError::InterestNotFound(interest_id.to_string()))?;
        self.store.commit(vec![CollectionUpdate::Interests(interests)]);

        tracing::info!(interest_id, status = status.as_str(), "interest decided");
        Ok(decided)
    }

    /// Move a lead to `status` and record the transition.
    ///
    /// Any label is accepted; the canonical ones are in [`LeadStatus::CANONICAL`].
    pub fn update_lead_status(
        &mut self,
        lead_id: &str,
        status: impl Into<LeadStatus>,
        notes: &str,
    ) -> PipelineResult<Lead> {
        let (user, lead) = self.authorize_lead(lead_id)?;
        let status = status.into();
        let now = Utc::now();

        let updated = Lead {
            status: status.clone(),
            last_updated_at: Some(now),
            ..lead
        };

        let leads: Vec<Lead> = self
            .data()
            .leads
            .iter()
            .map(|l| if l.id == lead_id { updated.clone() } else { l.clone() })
            .collect();

        let mut history = self.data().lead_history.clone();
        history.push(LeadHistoryEntry {
            id: new_id(),
            lead_id: lead_id.to_string(),
            status: status.clone(),
            updated_by: user.id.clone(),
            timestamp: now,
            notes: notes.to_string(),
        });

        self.store.commit(vec![
            CollectionUpdate::Leads(leads),
            CollectionUpdate::LeadHistory(history),
        ]);

        tracing::info!(lead_id, status = %status, updated_by = %user.id, "lead status updated");
        Ok(updated)
    }

    /// History of one lead, oldest first. Entries with equal timestamps
    /// keep their insertion order.
    pub fn get_lead_timeline(&self, lead_id: &str) -> Vec<LeadHistoryEntry> {
        let mut entries: Vec<LeadHistoryEntry> = self
            .data()
            .lead_history
            .iter()
            .filter(|h| h.lead_id == lead_id)
            .cloned()
            .collect();
        entries.sort_by_key(|h| h.timestamp);
        entries
    }

    /// Interests for the admin review queue, newest first.
    pub fn get_interests(&self, filter: &InterestFilter) -> Vec<Interest> {
        let mut out: Vec<Interest> = self
            .data()
            .interests
            .iter()
            .filter(|i| filter.status.map_or(true, |s| i.status == s))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    /// Leads the signed-in user works on. Admins see all of them.
    pub fn get_my_leads(&self) -> Vec<Lead> {
        let Some(user) = self.current_user() else {
            return Vec::new();
        };
        self.data()
            .leads
            .iter()
            .filter(|l| user.is_admin() || l.is_assigned_to(&user.id))
            .cloned()
            .collect()
    }
}
