// src/domain/listing.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Internal user id (rowid in `users`).
pub type UserId = i64;

/// Opaque listing identifier. Random v4, so a deleted id never comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListingId(Uuid);

impl ListingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Route params that don't parse are treated the same as unknown ids.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl From<Uuid> for ListingId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// GeoJSON point: `{"type": "Point", "coordinates": [lon, lat]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl Geometry {
    #[cfg(test)]
    pub fn point(lon: f64, lat: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [lon, lat],
        }
    }

    pub fn lon(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

/// A media asset as returned by the media host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub url: String,
    pub filename: String,
}

impl StoredImage {
    /// Width-limited variant of the hosted image, used as the edit-form preview.
    /// Only the first `/upload` segment is rewritten.
    pub fn thumbnail_url(&self) -> String {
        self.url.replacen("/upload", "/upload/w_250", 1)
    }
}

/// The user-editable part of a listing, as accepted by the validation gate.
/// Server-derived fields (geometry, image, owner) have no place here.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFields {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub country: String,
    pub geometry: Geometry,
    pub image: StoredImage,
    pub owner: UserId,
}

impl Listing {
    /// Builds a fresh listing with a newly assigned id.
    pub fn new(fields: ListingFields, geometry: Geometry, image: StoredImage, owner: UserId) -> Self {
        let ListingFields {
            title,
            description,
            price,
            location,
            country,
        } = fields;

        Self {
            id: ListingId::new(),
            title,
            description,
            price,
            location,
            country,
            geometry,
            image,
            owner,
        }
    }

    /// Field-by-field overwrite. Geometry is left alone on purpose: it is
    /// only ever derived at creation.
    pub fn apply(&mut self, fields: ListingFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.price = fields.price;
        self.location = fields.location;
        self.country = fields.country;
    }

    /// Wholesale image replacement (url and filename together).
    pub fn replace_image(&mut self, image: StoredImage) {
        self.image = image;
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner == user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewView {
    pub id: i64,
    pub rating: i64,
    pub comment: String,
    pub created_at: i64,
    pub author: String,
}

/// A listing with its owner and reviews (plus review authors) resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetail {
    pub listing: Listing,
    pub owner: User,
    pub reviews: Vec<ReviewView>,
}
