// src/workflow/listings.rs
use std::sync::Arc;

use crate::db::ListingStore;
use crate::domain::{Geometry, Listing, ListingFields, ListingId, StoredImage, UserId};
use crate::errors::ServerError;
use crate::flash::Notice;
use crate::geocoding::{GeocodeError, Geocoder};
use crate::workflow::{
    edit_listing_path, listing_path, Fallback, Outcome, Page, Success, HOME_PATH, LISTINGS_PATH,
    NEW_LISTING_PATH,
};

/// Orchestrates listing CRUD over injected storage and geocoding.
///
/// Every operation is single-pass and fail-fast: collaborators are called in a
/// fixed sequence, the first error aborts, and the caller gets back a
/// [`Fallback`] instead of the error. Writes that already happened are not
/// rolled back.
///
/// Image upload is not called from here; the upload gate runs it before the
/// workflow and hands over the resulting [`StoredImage`].
pub struct ListingWorkflow {
    store: Arc<dyn ListingStore>,
    geocoder: Arc<dyn Geocoder>,
}

fn logged(fallback: Fallback, op: &str, err: &ServerError) -> Fallback {
    tracing::error!(op, error = %err, redirect = %fallback.to, "listing operation failed");
    fallback
}

impl ListingWorkflow {
    pub fn new(store: Arc<dyn ListingStore>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { store, geocoder }
    }

    pub fn index(&self) -> Outcome {
        match self.store.find_all() {
            Ok(listings) => Ok(Success::Render(Page::Index { listings })),
            Err(e) => Err(logged(
                Fallback::collaborator(HOME_PATH, "Failed to fetch listings"),
                "index",
                &e,
            )),
        }
    }

    pub fn new_form(&self) -> Outcome {
        Ok(Success::Render(Page::New))
    }

    pub fn show(&self, id: &ListingId) -> Outcome {
        match self.store.find_detail(id) {
            Ok(Some(detail)) => Ok(Success::Render(Page::Show { detail })),
            Ok(None) => Err(Fallback::listing_not_found()),
            Err(e) => Err(logged(
                Fallback::collaborator(LISTINGS_PATH, "Failed to fetch listing"),
                "show",
                &e,
            )),
        }
    }

    /// Geometry of the first feature only; an empty result is a failure.
    fn geocode(&self, location: &str) -> Result<Geometry, ServerError> {
        let features = self.geocoder.forward_geocode(location, 1)?;
        features
            .into_iter()
            .next()
            .map(|f| f.geometry)
            .ok_or_else(|| GeocodeError::NoFeatures(location.to_string()).into())
    }

    fn try_create(
        &self,
        fields: ListingFields,
        image: Option<StoredImage>,
        owner: UserId,
    ) -> Result<Listing, ServerError> {
        let image =
            image.ok_or_else(|| ServerError::BadRequest("an image is required".into()))?;
        let geometry = self.geocode(&fields.location)?;
        self.store.create(Listing::new(fields, geometry, image, owner))
    }

    pub fn create(
        &self,
        fields: ListingFields,
        image: Option<StoredImage>,
        owner: UserId,
    ) -> Outcome {
        match self.try_create(fields, image, owner) {
            Ok(listing) => {
                tracing::info!(id = %listing.id, owner, "listing created");
                Ok(Success::Redirect {
                    to: LISTINGS_PATH.to_string(),
                    notice: Notice::success("New listing created!"),
                })
            }
            Err(e) => Err(logged(
                Fallback::collaborator(NEW_LISTING_PATH, "Failed to create listing"),
                "create",
                &e,
            )),
        }
    }

    pub fn edit_form(&self, id: &ListingId) -> Outcome {
        match self.store.find_by_id(id) {
            Ok(Some(listing)) => {
                let original_image_url = listing.image.thumbnail_url();
                Ok(Success::Render(Page::Edit {
                    listing,
                    original_image_url,
                }))
            }
            Ok(None) => Err(Fallback::listing_not_found()),
            Err(e) => Err(logged(
                Fallback::collaborator(LISTINGS_PATH, "Failed to render edit form"),
                "edit_form",
                &e,
            )),
        }
    }

    /// Overwrites the editable fields, and the image only when a new one was
    /// uploaded. Geometry stays as geocoded at creation even if `location`
    /// changes.
    pub fn update(
        &self,
        id: &ListingId,
        fields: ListingFields,
        image: Option<StoredImage>,
    ) -> Outcome {
        // Captured before anything can fail, so the fallback always has it.
        let edit_path = edit_listing_path(id);

        let mut listing = match self.store.find_by_id(id) {
            Ok(Some(listing)) => listing,
            Ok(None) => return Err(Fallback::listing_not_found()),
            Err(e) => {
                return Err(logged(
                    Fallback::collaborator(edit_path, "Failed to update listing"),
                    "update",
                    &e,
                ))
            }
        };

        if let Some(image) = image {
            listing.replace_image(image);
        }
        listing.apply(fields);

        match self.store.save(&listing) {
            Ok(()) => {
                tracing::info!(id = %id, "listing updated");
                Ok(Success::Redirect {
                    to: listing_path(id),
                    notice: Notice::success("Listing updated!"),
                })
            }
            Err(e) => Err(logged(
                Fallback::collaborator(edit_path, "Failed to update listing"),
                "update",
                &e,
            )),
        }
    }

    /// No existence check: deleting twice succeeds twice.
    pub fn delete(&self, id: &ListingId) -> Outcome {
        match self.store.delete_by_id(id) {
            Ok(()) => {
                tracing::info!(id = %id, "listing deleted");
                Ok(Success::Redirect {
                    to: LISTINGS_PATH.to_string(),
                    notice: Notice::success("Listing deleted!"),
                })
            }
            Err(e) => Err(logged(
                Fallback::collaborator(LISTINGS_PATH, "Failed to delete listing"),
                "delete",
                &e,
            )),
        }
    }
}
