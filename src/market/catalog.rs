// src/market/catalog.rs
use chrono::{Duration, Utc};

use crate::auth::token::new_id;
use crate::domain::property::{Property, PropertyDraft, PropertyStatus, MAX_IMAGES};
use crate::errors::CatalogError;
use crate::market::{Market, SYSTEM_ACTOR};
use crate::store::StorageWarning;
use crate::sync::CollectionUpdate;

const SAMPLE_IMAGE_1: &str = "https://images.unsplash.com/photo-1560518883-ce09059eeffa?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
const SAMPLE_IMAGE_2: &str = "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";

/// Result of a catalog write: the operation succeeded, possibly with
/// degraded persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub warning: Option<StorageWarning>,
}

fn validate(draft: &PropertyDraft) -> Result<f64, CatalogError> {
    if !(draft.price.is_finite() && draft.price > 0.0) {
        return Err(CatalogError::InvalidPrice(draft.price));
    }
    if !(draft.sqft.is_finite() && draft.sqft >= 0.0) {
        return Err(CatalogError::InvalidSqft(draft.sqft));
    }
    if draft.images.len() > MAX_IMAGES {
        return Err(CatalogError::TooManyImages {
            got: draft.images.len(),
            max: MAX_IMAGES,
        });
    }
    let discount = draft.discount_percentage.unwrap_or(0.0);
    if !(0.0..=100.0).contains(&discount) {
        return Err(CatalogError::InvalidDiscount(discount));
    }
    Ok(discount)
}

impl Market {
    pub fn properties(&self) -> &[Property] {
        &self.data().properties
    }

    pub fn find_property(&self, id: &str) -> Option<&Property> {
        self.data().properties.iter().find(|p| p.id == id)
    }

    /// Create a listing, or re-submit an existing one when `draft.id` is set.
    ///
    /// Either way the listing goes (back) to `pending`. Re-submission does not
    /// check who owns the listing.
    pub fn add_property(&mut self, draft: PropertyDraft) -> Result<Outcome<Property>, CatalogError> {
        let discount = validate(&draft)?;
        let now = Utc::now();

        let (saved, updated) = match draft.id.clone() {
            Some(id) => {
                let Some(existing) = self.find_property(&id).cloned() else {
                    return Err(CatalogError::PropertyNotFound(id));
                };

                let mut p = Property {
                    id: existing.id.clone(),
                    agent_id: existing.agent_id.clone(),
                    agent_name: existing.agent_name.clone(),
                    address: draft.address,
                    description: draft.description,
                    price: draft.price,
                    beds: draft.beds,
                    baths: draft.baths,
                    sqft: draft.sqft,
                    kind: draft.kind.unwrap_or(existing.kind),
                    images: draft.images.into_iter().map(Some).collect(),
                    discount_percentage: discount,
                    status: PropertyStatus::Pending,
                    area_id: existing.area_id,
                    area_name: existing.area_name.clone(),
                    area_city: existing.area_city.clone(),
                    area_slug: existing.area_slug.clone(),
                    created_at: existing.created_at,
                    updated_at: now,
                };
                if let Some(area) = &draft.area {
                    p.set_area(area);
                }

                let updated: Vec<Property> = self
                    .data()
                    .properties
                    .iter()
                    .map(|x| if x.id == p.id { p.clone() } else { x.clone() })
                    .collect();
                (p, updated)
            }
            None => {
                let Some(user) = self.current_user() else {
                    return Err(CatalogError::NotAuthenticated);
                };

                let mut p = Property {
                    id: new_id(),
                    agent_id: user.id.clone(),
                    agent_name: user.name.clone(),
                    address: draft.address,
                    description: draft.description,
                    price: draft.price,
                    beds: draft.beds,
                    baths: draft.baths,
                    sqft: draft.sqft,
                    kind: draft.kind.unwrap_or_default(),
                    images: draft.images.into_iter().map(Some).collect(),
                    discount_percentage: discount,
                    status: PropertyStatus::Pending,
                    area_id: None,
                    area_name: String::new(),
                    area_city: String::new(),
                    area_slug: String::new(),
                    created_at: now,
                    updated_at: now,
                };
                if let Some(area) = &draft.area {
                    p.set_area(area);
                }

                let mut updated = self.data().properties.clone();
                updated.push(p.clone());
                (p, updated)
            }
        };

        let warning = self.store.commit(vec![CollectionUpdate::Properties(updated)]);
        tracing::info!(property_id = %saved.id, agent_id = %saved.agent_id, "property submitted for review");
        Ok(Outcome {
            value: saved,
            warning,
        })
    }

    fn set_property_status(
        &mut self,
        id: &str,
        status: PropertyStatus,
    ) -> Result<Outcome<()>, CatalogError> {
        if self.find_property(id).is_none() {
            return Err(CatalogError::PropertyNotFound(id.to_string()));
        }

        let updated: Vec<Property> = self
            .data()
            .properties
            .iter()
            .map(|p| {
                if p.id == id {
                    Property {
                        status,
                        ..p.clone()
                    }
                } else {
                    p.clone()
                }
            })
            .collect();

        let warning = self.store.commit(vec![CollectionUpdate::Properties(updated)]);
        tracing::info!(property_id = %id, status = ?status, "property status changed");
        Ok(Outcome { value: (), warning })
    }

    pub fn approve_property(&mut self, id: &str) -> Result<Outcome<()>, CatalogError> {
        self.set_property_status(id, PropertyStatus::Approved)
    }

    pub fn send_back_property(&mut self, id: &str) -> Result<Outcome<()>, CatalogError> {
        self.set_property_status(id, PropertyStatus::NeedsRevision)
    }

    /// Rejection removes the listing outright; nothing is ever stored as
    /// `rejected`.
    pub fn reject_property(&mut self, id: &str) -> Result<Outcome<()>, CatalogError> {
        self.remove_property(id)
    }

    pub fn delete_property(&mut self, id: &str) -> Result<Outcome<()>, CatalogError> {
        self.remove_property(id)
    }

    fn remove_property(&mut self, id: &str) -> Result<Outcome<()>, CatalogError> {
        if self.find_property(id).is_none() {
            return Err(CatalogError::PropertyNotFound(id.to_string()));
        }

        let updated: Vec<Property> = self
            .data()
            .properties
            .iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();

        let warning = self.store.commit(vec![CollectionUpdate::Properties(updated)]);
        tracing::info!(property_id = %id, "property removed");
        Ok(Outcome { value: (), warning })
    }

    /// Append two pending sample listings for demos.
    pub fn generate_test_data(&mut self) -> Outcome<Vec<Property>> {
        let now = Utc::now();
        let agent_id = self.actor_id();
        let sample = |address: &str, price: f64, beds: u32, baths: u32, sqft: f64, image: &str, offset: i64| {
            let at = now + Duration::milliseconds(offset);
            Property {
                id: new_id(),
                agent_id: agent_id.clone(),
                agent_name: "Test Agent".to_string(),
                address: address.to_string(),
                description: None,
                price,
                beds,
                baths,
                sqft,
                kind: Default::default(),
                images: vec![Some(image.to_string())],
                discount_percentage: 0.0,
                status: PropertyStatus::Pending,
                area_id: None,
                area_name: String::new(),
                area_city: String::new(),
                area_slug: String::new(),
                created_at: at,
                updated_at: at,
            }
        };

        let added = vec![
            sample("Test Property 1", 500_000.0, 3, 2, 1500.0, SAMPLE_IMAGE_1, 0),
            sample("Test Property 2", 750_000.0, 4, 3, 2200.0, SAMPLE_IMAGE_2, 1),
        ];

        let mut updated = self.data().properties.clone();
        updated.extend(added.iter().cloned());
        let warning = self.store.commit(vec![CollectionUpdate::Properties(updated)]);

        if agent_id == SYSTEM_ACTOR {
            tracing::debug!("test data added without a signed-in agent");
        }
        Outcome {
            value: added,
            warning,
        }
    }
}
