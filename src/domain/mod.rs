pub mod listing;
pub mod validation;

pub use listing::{
    Geometry, Listing, ListingDetail, ListingFields, ListingId, ReviewView, StoredImage, User,
    UserId,
};
pub use validation::validate_listing;
