use crate::domain::Listing;
use crate::templates::components::listing_card;
use crate::templates::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub fn index_page(ctx: &PageCtx, all_listings: &[Listing]) -> Markup {
    desktop_layout(
        "All Listings",
        ctx,
        html! {
            h3 { "All Listings" }
            @if all_listings.is_empty() {
                p class="empty" { "No listings yet." }
            } @else {
                div class="listing-grid" {
                    @for listing in all_listings {
                        (listing_card(listing))
                    }
                }
            }
        },
    )
}
