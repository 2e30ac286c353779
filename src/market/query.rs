// src/market/query.rs
//
// Read-only views over the catalog, directory and pipeline.
use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::domain::account::{Account, Role};
use crate::domain::areas::{find_by_slug, Area, AREAS};
use crate::domain::commission::ClaimStatus;
use crate::domain::lead::LeadSummary;
use crate::domain::property::{Property, PropertyStatus, PropertyType};
use crate::market::Market;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Property(PropertyType),
    /// Only people: listings are filtered out entirely.
    Agent,
}

#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Defaults to approved listings only.
    pub status: Option<PropertyStatus>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub kind: Option<SearchKind>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub properties: Vec<Property>,
    pub agents: Vec<Account>,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertySort {
    #[default]
    Newest,
    Oldest,
    PriceHigh,
    PriceLow,
}

/// Filters of the admin listings table.
#[derive(Debug, Clone, Default)]
pub struct PropertyViewFilter {
    /// Matched against address and agent name.
    pub search: String,
    pub status: Option<PropertyStatus>,
    pub kind: Option<PropertyType>,
    pub sort: PropertySort,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaCount {
    pub area: Area,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub marketer_id: String,
    pub name: String,
    pub deals: usize,
    pub total_commission: f64,
}

/// Last comma-separated segment of an address, when there is more than one.
fn location_token(address: &str) -> Option<&str> {
    let (_, last) = address.rsplit_once(',')?;
    Some(last.trim())
}

impl Market {
    /// Site-wide search across listings and agents.
    pub fn search_global(&self, query: &str, filters: &SearchFilters) -> SearchResults {
        let q = query.to_lowercase();
        let wanted_status = filters.status.unwrap_or(PropertyStatus::Approved);

        let properties: Vec<Property> = self
            .data()
            .properties
            .iter()
            .filter(|p| p.status == wanted_status)
            .filter(|p| filters.min_price.map_or(true, |min| p.price >= min))
            .filter(|p| filters.max_price.map_or(true, |max| p.price <= max))
            .filter(|p| match filters.kind {
                None => true,
                Some(SearchKind::Property(kind)) => p.kind == kind,
                Some(SearchKind::Agent) => false,
            })
            .filter(|p| p.address.to_lowercase().contains(&q) || p.kind.as_str().contains(&q))
            .cloned()
            .collect();

        let agents: Vec<Account> = match filters.kind {
            None | Some(SearchKind::Agent) => self
                .data()
                .accounts
                .iter()
                .filter(|u| u.role.is_agent() || u.role == Role::Admin)
                .filter(|u| u.name.to_lowercase().contains(&q) || u.email.to_lowercase().contains(&q))
                .cloned()
                .collect(),
            Some(SearchKind::Property(_)) => Vec::new(),
        };

        let mut locations: Vec<String> = Vec::new();
        for p in &properties {
            if let Some(loc) = location_token(&p.address) {
                if !locations.iter().any(|l| l == loc) {
                    locations.push(loc.to_string());
                }
            }
        }

        SearchResults {
            properties,
            agents,
            locations,
        }
    }

    /// Who is interested in a listing, without contact details.
    pub fn get_leads_for_property(&self, property_id: &str) -> Vec<LeadSummary> {
        self.data()
            .leads
            .iter()
            .filter(|l| l.property_id == property_id)
            .map(|l| LeadSummary {
                name: l.buyer_contact.name.clone(),
                score: self.find_account(&l.buyer_id).map_or(0, |a| a.buyer_score),
                timestamp: l.approved_at,
            })
            .collect()
    }

    pub fn admin_property_view(&self, filter: &PropertyViewFilter) -> Vec<Property> {
        let q = filter.search.to_lowercase();
        let mut out: Vec<Property> = self
            .data()
            .properties
            .iter()
            .filter(|p| {
                q.is_empty()
                    || p.address.to_lowercase().contains(&q)
                    || p.agent_name.to_lowercase().contains(&q)
            })
            .filter(|p| filter.status.map_or(true, |s| p.status == s))
            .filter(|p| filter.kind.map_or(true, |k| p.kind == k))
            .cloned()
            .collect();

        match filter.sort {
            PropertySort::Newest => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            PropertySort::Oldest => out.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            PropertySort::PriceHigh => out.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal)),
            PropertySort::PriceLow => out.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)),
        }
        out
    }

    /// Every listing an agent owns, whatever its status.
    pub fn properties_by_agent(&self, agent_id: &str) -> Vec<Property> {
        self.data()
            .properties
            .iter()
            .filter(|p| p.agent_id == agent_id)
            .cloned()
            .collect()
    }

    /// Approved listings tagged with the area `slug`. Unknown slugs give nothing.
    pub fn properties_in_area(&self, slug: &str) -> Vec<Property> {
        let Some(area) = find_by_slug(slug) else {
            return Vec::new();
        };
        self.data()
            .properties
            .iter()
            .filter(|p| p.is_approved() && p.area_id == Some(area.id))
            .cloned()
            .collect()
    }

    /// Approved listing count per area, catalog order, empty areas left out.
    pub fn area_counts(&self) -> Vec<AreaCount> {
        let mut counts: HashMap<u32, usize> = HashMap::new();
        for p in self.data().properties.iter().filter(|p| p.is_approved()) {
            if let Some(id) = p.area_id {
                *counts.entry(id).or_default() += 1;
            }
        }
        AREAS
            .iter()
            .filter_map(|a| counts.get(&a.id).map(|&count| AreaCount { area: *a, count }))
            .collect()
    }

    pub fn special_offers(&self) -> Vec<Property> {
        self.data()
            .properties
            .iter()
            .filter(|p| p.is_approved() && p.discount_percentage > 0.0)
            .cloned()
            .collect()
    }

    /// The `n` most recently created approved listings.
    pub fn latest_properties(&self, n: usize) -> Vec<Property> {
        let mut out: Vec<Property> = self
            .data()
            .properties
            .iter()
            .filter(|p| p.is_approved())
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out.truncate(n);
        out
    }

    /// Approved commission per marketer, highest earner first.
    pub fn commission_leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut board: Vec<LeaderboardEntry> = Vec::new();
        for claim in self
            .data()
            .claims
            .iter()
            .filter(|c| c.status == ClaimStatus::Approved)
        {
            match board.iter_mut().find(|e| e.marketer_id == claim.marketer_id) {
                Some(entry) => {
                    entry.deals += 1;
                    entry.total_commission += claim.commission_amount;
                }
                None => board.push(LeaderboardEntry {
                    marketer_id: claim.marketer_id.clone(),
                    name: self
                        .find_account(&claim.marketer_id)
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| claim.marketer_id.clone()),
                    deals: 1,
                    total_commission: claim.commission_amount,
                }),
            }
        }
        board.sort_by(|a, b| {
            b.total_commission
                .partial_cmp(&a.total_commission)
                .unwrap_or(Ordering::Equal)
        });
        board
    }
}
