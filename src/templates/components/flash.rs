use crate::flash::{Notice, NoticeKind};
use maud::{html, Markup};

fn class_for(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "flash flash-success",
        NoticeKind::Error => "flash flash-error",
    }
}

pub fn flash_banner(notice: Option<&Notice>) -> Markup {
    html! {
        @if let Some(n) = notice {
            div class=(class_for(n.kind)) role="alert" { (n.message) }
        }
    }
}
