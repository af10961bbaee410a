use crate::errors::{ResultResp, ServerError};
use crate::flash::{set_flash_cookie, Notice};
use astra::{Body, ResponseBuilder};

/// 302 to `to`, carrying `notice` to the next page when given.
pub fn redirect_response(to: &str, notice: Option<&Notice>) -> ResultResp {
    let mut builder = ResponseBuilder::new().status(302).header("Location", to);

    if let Some(notice) = notice {
        builder = builder.header("Set-Cookie", set_flash_cookie(notice));
    }

    builder
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
