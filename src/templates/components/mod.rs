pub mod card;
pub mod error;
pub mod flash;
pub mod listing_form;

pub use card::{format_price, listing_card};
pub use error::error_page;
pub use flash::flash_banner;
pub use listing_form::listing_fields;
