pub mod connection;
pub mod listings;
#[cfg(test)]
pub mod users;

pub use connection::{init_db, Database};
pub use listings::{ListingStore, SqliteListingStore};
