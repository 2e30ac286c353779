// src/domain/property.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::areas::Area;
use crate::domain::scoring::calculate_score;

pub const MAX_IMAGES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    Apartment,
    Villa,
    Office,
    Land,
}

impl PropertyType {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::Villa => "villa",
            PropertyType::Office => "office",
            PropertyType::Land => "land",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    #[default]
    Pending,
    Approved,
    NeedsRevision,
    Rejected,
}

/// A listing as stored under the `properties` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub agent_id: String,
    #[serde(default)]
    pub agent_name: String,
    pub address: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub beds: u32,
    pub baths: u32,
    pub sqft: f64,
    #[serde(rename = "type", default)]
    pub kind: PropertyType,
    /// Http(s) URLs or inline `data:` payloads; `None` once a payload was
    /// dropped to fit the storage quota.
    #[serde(default)]
    pub images: Vec<Option<String>>,
    #[serde(default)]
    pub discount_percentage: f64,
    pub status: PropertyStatus,
    #[serde(default)]
    pub area_id: Option<u32>,
    #[serde(default)]
    pub area_name: String,
    #[serde(default)]
    pub area_city: String,
    #[serde(default)]
    pub area_slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn is_approved(&self) -> bool {
        self.status == PropertyStatus::Approved
    }

    /// Smart Score for this listing.
    pub fn smart_score(&self) -> u32 {
        calculate_score(self.price, self.sqft, self.beds, self.baths)
    }

    pub fn set_area(&mut self, area: &Area) {
        self.area_id = Some(area.id);
        self.area_name = area.name.to_string();
        self.area_city = area.city.to_string();
        self.area_slug = area.slug.to_string();
    }

    /// Copy of this property with every inline `data:` image replaced by `None`.
    /// URLs are kept.
    pub fn without_inline_images(&self) -> Property {
        let mut stripped = self.clone();
        stripped.images = self
            .images
            .iter()
            .map(|img| img.clone().filter(|src| !is_inline_image(src)))
            .collect();
        stripped
    }
}

pub fn is_inline_image(src: &str) -> bool {
    src.starts_with("data:")
}

/// Form input for creating or editing a listing.
///
/// With `id` set the draft replaces that listing's editable fields.
#[derive(Debug, Clone, Default)]
pub struct PropertyDraft {
    pub id: Option<String>,
    pub address: String,
    pub description: Option<String>,
    pub price: f64,
    pub beds: u32,
    pub baths: u32,
    pub sqft: f64,
    pub kind: Option<PropertyType>,
    pub images: Vec<String>,
    pub discount_percentage: Option<f64>,
    pub area: Option<Area>,
}
