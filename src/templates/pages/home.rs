// templates/pages/home.rs

use crate::templates::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub fn home_page(ctx: &PageCtx) -> Markup {
    desktop_layout(
        "Home",
        ctx,
        html! {
            h1 { "Find your next stay" }
            p { "Browse places listed by hosts, or list your own." }
            a class="btn" href="/listings" { "Explore listings" }
        },
    )
}
