// src/workflow/mod.rs
//! The listing lifecycle: what each operation does, in which order it calls
//! its collaborators, and where it sends the user when something goes wrong.
use crate::domain::{Listing, ListingDetail, ListingId};
use crate::flash::Notice;

mod listings;

pub use listings::ListingWorkflow;

pub const HOME_PATH: &str = "/";
pub const LISTINGS_PATH: &str = "/listings";
pub const NEW_LISTING_PATH: &str = "/listings/new";

pub fn listing_path(id: &ListingId) -> String {
    format!("{LISTINGS_PATH}/{id}")
}

pub fn edit_listing_path(id: &ListingId) -> String {
    format!("{LISTINGS_PATH}/{id}/edit")
}

/// View payloads handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Index { listings: Vec<Listing> },
    Show { detail: ListingDetail },
    New,
    Edit {
        listing: Listing,
        original_image_url: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Success {
    Render(Page),
    Redirect { to: String, notice: Notice },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    CollaboratorFailure,
}

/// Where a failed operation sends the user, and what it tells them.
#[derive(Debug, Clone, PartialEq)]
pub struct Fallback {
    pub kind: FailureKind,
    pub to: String,
    pub notice: Notice,
}

impl Fallback {
    pub fn listing_not_found() -> Self {
        Self {
            kind: FailureKind::NotFound,
            to: LISTINGS_PATH.to_string(),
            notice: Notice::error("Listing not found"),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == FailureKind::NotFound
    }

    pub fn collaborator(to: impl Into<String>, message: &str) -> Self {
        Self {
            kind: FailureKind::CollaboratorFailure,
            to: to.into(),
            notice: Notice::error(message),
        }
    }
}

/// Result of one workflow operation. Nothing escapes past it.
pub type Outcome = Result<Success, Fallback>;
