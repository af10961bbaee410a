// src/middleware.rs
//! Request gates that run ahead of the listing workflow, in route order:
//! logged in, owner, image upload, validation.
use astra::Request;

use crate::auth::{load_user_from_session, CurrentUser};
use crate::clock::now_unix;
use crate::cookies::{get_cookie, SESSION_COOKIE};
use crate::db::{Database, ListingStore};
use crate::domain::{validate_listing, Listing, ListingFields, ListingId, StoredImage};
use crate::errors::{ResultResp, ServerError};
use crate::flash::Notice;
use crate::forms::{FormData, ParsedForm};
use crate::media::MediaStore;
use crate::responses::redirect_response;
use crate::workflow::{listing_path, Fallback, LISTINGS_PATH};

pub const LOGIN_PATH: &str = "/login";
pub const IMAGE_FIELD: &str = "listing[image]";

/// Why a gate stopped the request.
#[derive(Debug)]
pub enum Halt {
    Redirect { to: String, notice: Notice },
    Error(ServerError),
}

impl From<ServerError> for Halt {
    fn from(err: ServerError) -> Self {
        Halt::Error(err)
    }
}

impl From<Fallback> for Halt {
    fn from(fallback: Fallback) -> Self {
        Halt::Redirect {
            to: fallback.to,
            notice: fallback.notice,
        }
    }
}

impl Halt {
    pub fn into_response(self) -> ResultResp {
        match self {
            Halt::Redirect { to, notice } => redirect_response(&to, Some(&notice)),
            Halt::Error(err) => Err(err),
        }
    }
}

pub type Gate<T> = Result<T, Halt>;

/// Resolves the `session` cookie. No cookie, or a stale one, is anonymous.
pub fn current_user(req: &Request, db: &Database) -> Result<Option<CurrentUser>, ServerError> {
    let Some(token) = get_cookie(req, SESSION_COOKIE) else {
        return Ok(None);
    };
    db.with_conn(|conn| load_user_from_session(conn, &token, now_unix()))
}

pub fn require_login(user: Option<CurrentUser>) -> Gate<CurrentUser> {
    user.ok_or_else(|| {
        tracing::warn!("anonymous request to a listing management route");
        Halt::Redirect {
            to: LOGIN_PATH.to_string(),
            notice: Notice::error("You must be logged in to manage listings!"),
        }
    })
}

/// Ids that don't parse can't name a stored listing.
pub fn parse_id(raw: &str) -> Gate<ListingId> {
    ListingId::parse(raw).ok_or_else(|| Fallback::listing_not_found().into())
}

pub fn require_owner(store: &dyn ListingStore, id: &ListingId, user: &CurrentUser) -> Gate<Listing> {
    let listing = match store.find_by_id(id) {
        Ok(Some(listing)) => listing,
        Ok(None) => return Err(Fallback::listing_not_found().into()),
        Err(e) => {
            tracing::error!(id = %id, error = %e, "owner check could not load listing");
            return Err(Fallback::collaborator(LISTINGS_PATH, "Failed to fetch listing").into());
        }
    };

    if !listing.is_owned_by(user.id) {
        tracing::warn!(id = %id, user = user.id, owner = listing.owner, "not the owner");
        return Err(Halt::Redirect {
            to: listing_path(id),
            notice: Notice::error("You are not the owner of this listing"),
        });
    }
    Ok(listing)
}

/// Uploads the `listing[image]` file when one was sent. A failed upload halts
/// with `on_failure`.
pub fn upload_image(
    media: &dyn MediaStore,
    form: &mut ParsedForm,
    on_failure: Fallback,
) -> Gate<Option<StoredImage>> {
    let Some(file) = form.take_file(IMAGE_FIELD) else {
        return Ok(None);
    };

    match media.upload(&file) {
        Ok(image) => {
            tracing::info!(filename = %image.filename, bytes = file.data.len(), "image uploaded");
            Ok(Some(image))
        }
        Err(e) => {
            tracing::error!(file = %file.file_name, error = %e, "image upload failed");
            Err(on_failure.into())
        }
    }
}

pub fn validate(fields: &FormData) -> Gate<ListingFields> {
    validate_listing(fields).map_err(|e| {
        tracing::warn!(error = %e, "listing form rejected");
        Halt::Error(e)
    })
}
