use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};

fn status_and_message(err: &ServerError) -> (u16, String) {
    match err {
        ServerError::NotFound => (404, "Page Not Found".to_string()),
        ServerError::BadRequest(msg) => (400, msg.clone()),
        ServerError::PayloadTooLarge(msg) => (413, msg.clone()),
        ServerError::Geocoding(_) | ServerError::Media(_) => {
            (502, "An upstream service failed".to_string())
        }
        ServerError::DbError(_) | ServerError::InternalError => {
            (500, "Something went wrong".to_string())
        }
    }
}

/// Convert a ServerError into a proper HTML response page.
/// Internal details are logged, never shown.
pub fn html_error_response(err: ServerError) -> Response {
    let (status, message) = status_and_message(&err);

    if status >= 500 {
        tracing::error!(status, error = %err, "request failed");
    } else {
        tracing::warn!(status, error = %err, "request rejected");
    }

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(error_page(status, &message).into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
