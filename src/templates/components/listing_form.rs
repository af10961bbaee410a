use crate::domain::Listing;
use maud::{html, Markup};

/// Shared text inputs of the new and edit forms. `existing` pre-fills them.
pub fn listing_fields(existing: Option<&Listing>) -> Markup {
    let title = existing.map(|l| l.title.as_str()).unwrap_or_default();
    let description = existing.map(|l| l.description.as_str()).unwrap_or_default();
    let price = existing.map(|l| l.price.to_string()).unwrap_or_default();
    let location = existing.map(|l| l.location.as_str()).unwrap_or_default();
    let country = existing.map(|l| l.country.as_str()).unwrap_or_default();

    html! {
        div class="field" {
            label for="title" { "Title" }
            input id="title" name="listing[title]" type="text" value=(title) required;
        }
        div class="field" {
            label for="description" { "Description" }
            textarea id="description" name="listing[description]" required { (description) }
        }
        div class="field-row" {
            div class="field" {
                label for="price" { "Price" }
                input id="price" name="listing[price]" type="number" min="0" step="any" value=(price) required;
            }
            div class="field" {
                label for="country" { "Country" }
                input id="country" name="listing[country]" type="text" value=(country) required;
            }
        }
        div class="field" {
            label for="location" { "Location" }
            input id="location" name="listing[location]" type="text" value=(location) required;
        }
    }
}
