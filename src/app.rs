use std::sync::Arc;

use crate::db::{Database, ListingStore};
use crate::geocoding::Geocoder;
use crate::media::MediaStore;
use crate::workflow::ListingWorkflow;

/// Everything a request handler needs, shared by all workers.
pub struct App {
    pub db: Database,
    pub store: Arc<dyn ListingStore>,
    pub media: Arc<dyn MediaStore>,
    pub workflow: ListingWorkflow,
    /// Public token for the client-side map on the show page.
    pub map_token: String,
    pub max_upload_bytes: usize,
}

impl App {
    pub fn new(
        db: Database,
        store: Arc<dyn ListingStore>,
        geocoder: Arc<dyn Geocoder>,
        media: Arc<dyn MediaStore>,
        map_token: String,
        max_upload_bytes: usize,
    ) -> Self {
        let workflow = ListingWorkflow::new(Arc::clone(&store), geocoder);
        Self {
            db,
            store,
            media,
            workflow,
            map_token,
            max_upload_bytes,
        }
    }
}
