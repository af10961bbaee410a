pub mod components;
pub mod layouts;
pub mod pages;

use crate::auth::CurrentUser;
use crate::flash::Notice;

// Re-exports for convenience
pub use layouts::desktop::desktop_layout;

/// Per-request data every full page needs: who is looking and what to tell them.
#[derive(Debug, Clone, Default)]
pub struct PageCtx {
    pub user: Option<CurrentUser>,
    pub flash: Option<Notice>,
}

impl PageCtx {
    pub fn is_current_user(&self, user_id: i64) -> bool {
        self.user.as_ref().is_some_and(|u| u.id == user_id)
    }
}
