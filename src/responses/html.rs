use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    html_response_with_cookies(markup, &[])
}

/// 200 HTML page, attaching any `Set-Cookie` values given.
pub fn html_response_with_cookies(markup: Markup, cookies: &[String]) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8");

    for cookie in cookies {
        builder = builder.header("Set-Cookie", cookie.as_str());
    }

    builder
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}
