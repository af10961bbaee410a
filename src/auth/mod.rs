pub mod sessions;
pub mod token;

#[cfg(test)]
pub use sessions::create_session;
pub use sessions::{load_user_from_session, CurrentUser};
