pub mod errors;
pub mod html;
pub mod redirect;

pub use errors::html_error_response;
pub use html::{html_response, html_response_with_cookies};
pub use redirect::redirect_response;
