use crate::domain::ListingDetail;
use crate::templates::components::format_price;
use crate::templates::{desktop_layout, PageCtx};
use crate::workflow::{edit_listing_path, listing_path};
use maud::{html, Markup};

/// Detail view. Edit/delete controls only show for the owner; the map is
/// drawn client-side from the data attributes.
pub fn show_page(ctx: &PageCtx, detail: &ListingDetail, map_token: &str) -> Markup {
    let listing = &detail.listing;
    let is_owner = ctx.is_current_user(listing.owner);

    desktop_layout(
        &listing.title,
        ctx,
        html! {
            article class="listing-detail" {
                h3 { (listing.title) }
                div class="card show-card" {
                    img class="card-img-top show-img" src=(listing.image.url) alt=(listing.title);
                    div class="card-body" {
                        p class="owner" { "Owned by " i { (detail.owner.username) } }
                        p { (listing.description) }
                        p { (format_price(listing.price)) }
                        p { (listing.location) }
                        p { (listing.country) }
                    }
                }

                @if is_owner {
                    div class="btns" {
                        a class="btn edit-btn" href=(edit_listing_path(&listing.id)) { "Edit" }
                        form method="POST" action=(format!("{}?_method=DELETE", listing_path(&listing.id))) {
                            button class="btn btn-dark" { "Delete" }
                        }
                    }
                }

                section class="reviews" {
                    @if !detail.reviews.is_empty() {
                        h4 { "All Reviews" }
                        div class="review-list" {
                            @for review in &detail.reviews {
                                div class="card review-card" {
                                    h5 class="card-title" { "@" (review.author) }
                                    p class="starability-result" data-rating=(review.rating) {
                                        "Rated: " (review.rating) " stars"
                                    }
                                    p class="card-text" { (review.comment) }
                                }
                            }
                        }
                    }
                }

                section class="map" {
                    h3 { "Where you'll be" }
                    div
                        id="map"
                        data-token=(map_token)
                        data-lon=(listing.geometry.lon())
                        data-lat=(listing.geometry.lat())
                        data-location=(listing.location) {}
                    script src="/static/map.js" defer {}
                }
            }
        },
    )
}
