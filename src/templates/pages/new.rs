use crate::templates::components::listing_fields;
use crate::templates::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub fn new_page(ctx: &PageCtx) -> Markup {
    desktop_layout(
        "New Listing",
        ctx,
        html! {
            h3 { "Create a New Listing" }
            form method="POST" action="/listings" enctype="multipart/form-data" class="listing-form" {
                (listing_fields(None))
                div class="field" {
                    label for="image" { "Upload Listing Image" }
                    input id="image" name="listing[image]" type="file" accept=".png,.jpg,.jpeg" required;
                }
                button class="btn add-btn" { "Add" }
            }
        },
    )
}
