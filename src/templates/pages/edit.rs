use crate::domain::Listing;
use crate::templates::components::listing_fields;
use crate::templates::{desktop_layout, PageCtx};
use crate::workflow::listing_path;
use maud::{html, Markup};

pub fn edit_page(ctx: &PageCtx, listing: &Listing, original_image_url: &str) -> Markup {
    desktop_layout(
        "Edit Listing",
        ctx,
        html! {
            h3 { "Edit your Listing" }
            form
                method="POST"
                action=(format!("{}?_method=PUT", listing_path(&listing.id)))
                enctype="multipart/form-data"
                class="listing-form"
            {
                (listing_fields(Some(listing)))
                div class="field" {
                    p { "Original Listing Image" }
                    img class="preview" src=(original_image_url) alt=(listing.title);
                }
                div class="field" {
                    label for="image" { "Upload New Image" }
                    input id="image" name="listing[image]" type="file" accept=".png,.jpg,.jpeg";
                }
                button class="btn edit-btn" { "Edit" }
            }
        },
    )
}
