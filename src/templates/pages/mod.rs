pub mod edit;
pub mod home;
pub mod index;
pub mod new;
pub mod show;

pub use edit::edit_page;
pub use home::home_page;
pub use index::index_page;
pub use new::new_page;
pub use show::show_page;
