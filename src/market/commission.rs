// src/market/commission.rs
use chrono::Utc;

use crate::auth::token::new_id;
use crate::domain::commission::{ClaimFilter, ClaimStatus, CommissionClaim, CommissionSettings};
use crate::domain::lead::{Lead, LeadHistoryEntry, LeadStatus};
use crate::errors::{PipelineError, PipelineResult};
use crate::market::Market;
use crate::sync::CollectionUpdate;

/// How `close_deal` ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Closed {
    /// `Closed Won`: a claim now waits for admin review.
    Won(CommissionClaim),
    /// Any other closing status; no claim is raised.
    Other,
}

impl Market {
    /// Close a lead with a deal value.
    ///
    /// Only the exact status `Closed Won` raises a commission claim, priced
    /// with the settings in force right now. A lead closes once: a closed
    /// lead, or one that already has a claim, is refused.
    pub fn close_deal(
        &mut self,
        lead_id: &str,
        deal_value: f64,
        status: impl Into<LeadStatus>,
    ) -> PipelineResult<Closed> {
        if self.current_user().is_none() {
            return Err(PipelineError::NotAuthenticated);
        }
        if !(deal_value.is_finite() && deal_value > 0.0) {
            return Err(PipelineError::InvalidDealValue);
        }
        let (user, lead) = self.authorize_lead(lead_id)?;
        if lead.status.is_closed() || self.data().claims.iter().any(|c| c.lead_id == lead_id) {
            return Err(PipelineError::LeadAlreadyClosed(lead_id.to_string()));
        }

        let status = status.into();
        let now = Utc::now();

        let closed = Lead {
            status: status.clone(),
            closed_at: Some(now),
            last_updated_at: Some(now),
            deal_value: Some(deal_value),
            ..lead
        };

        let leads: Vec<Lead> = self
            .data()
            .leads
            .iter()
            .map(|l| if l.id == lead_id { closed.clone() } else { l.clone() })
            .collect();

        let mut history = self.data().lead_history.clone();
        history.push(LeadHistoryEntry {
            id: new_id(),
            lead_id: lead_id.to_string(),
            status: status.clone(),
            updated_by: user.id.clone(),
            timestamp: now,
            notes: format!("Deal closed with value: {deal_value}"),
        });

        let mut updates = vec![
            CollectionUpdate::Leads(leads),
            CollectionUpdate::LeadHistory(history),
        ];

        let outcome = if status == LeadStatus::ClosedWon {
            let settings = self.commission;
            let claim = CommissionClaim {
                id: new_id(),
                lead_id: lead_id.to_string(),
                property_id: closed.property_id.clone(),
                marketer_id: closed.marketer_id.clone(),
                buyer_id: closed.buyer_id.clone(),
                deal_value,
                commission_percentage: settings.percentage,
                commission_amount: settings.amount_for(deal_value),
                status: ClaimStatus::PendingAdminReview,
                created_at: now,
                decision_at: None,
                decision_reason: None,
            };
            let mut claims = self.data().claims.clone();
            claims.push(claim.clone());
            updates.push(CollectionUpdate::CommissionClaims(claims));
            Closed::Won(claim)
        } else {
            Closed::Other
        };

        self.store.commit(updates);

        match &outcome {
            Closed::Won(claim) => tracing::info!(
                lead_id,
                claim_id = %claim.id,
                deal_value,
                amount = claim.commission_amount,
                "deal won, commission claim raised"
            ),
            Closed::Other => tracing::info!(lead_id, status = %status, deal_value, "deal closed"),
        }
        Ok(outcome)
    }

    pub fn approve_commission(&mut self, claim_id: &str) -> PipelineResult<CommissionClaim> {
        self.decide_claim(claim_id, ClaimStatus::Approved, None)
    }

    pub fn reject_commission(&mut self, claim_id: &str, reason: &str) -> PipelineResult<CommissionClaim> {
        self.decide_claim(claim_id, ClaimStatus::Rejected, Some(reason.to_string()))
    }

    fn decide_claim(
        &mut self,
        claim_id: &str,
        status: ClaimStatus,
        reason: Option<String>,
    ) -> PipelineResult<CommissionClaim> {
        let now = Utc::now();
        let mut decided = None;
        let claims: Vec<CommissionClaim> = self
            .data()
            .claims
            .iter()
            .map(|c| {
                let mut c = c.clone();
                if c.id == claim_id {
                    c.status = status;
                    c.decision_at = Some(now);
                    if reason.is_some() {
                        c.decision_reason = reason.clone();
                    }
                    decided = Some(c.clone());
                }
                c
            })
            .collect();

        let decided = decided.ok_or_else(|| PipelineError::ClaimNotFound(claim_id.to_string()))?;
        self.store.commit(vec![CollectionUpdate::CommissionClaims(claims)]);

        tracing::info!(claim_id, status = ?status, "commission claim decided");
        Ok(decided)
    }

    /// Claims matching `filter`, newest first.
    pub fn get_commission_claims(&self, filter: &ClaimFilter) -> Vec<CommissionClaim> {
        let mut out: Vec<CommissionClaim> = self
            .data()
            .claims
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    /// Claims raised after this call use `settings`; existing claims keep
    /// the amount they were created with.
    pub fn set_commission_settings(&mut self, settings: CommissionSettings) -> PipelineResult<()> {
        if !settings.is_valid() {
            return Err(PipelineError::InvalidCommissionRate(settings.percentage));
        }
        tracing::info!(percentage = settings.percentage, policy = ?settings.policy, "commission settings changed");
        self.commission = settings;
        Ok(())
    }
}
