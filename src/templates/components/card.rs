use crate::domain::Listing;
use crate::workflow::listing_path;
use maud::{html, Markup};

/// Price as shown to guests, e.g. "₹ 1,200 / night".
pub fn format_price(price: f64) -> String {
    let whole = format!("{:.0}", price.round());
    let mut out = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("₹ {out} / night")
}

pub fn listing_card(listing: &Listing) -> Markup {
    html! {
        a class="listing-link" href=(listing_path(&listing.id)) {
            div class="card listing-card" {
                img class="card-img-top" src=(listing.image.url) alt=(listing.title) style="height: 20rem;";
                div class="card-body" {
                    p class="card-text" {
                        b { (listing.title) }
                        br;
                        (format_price(listing.price))
                    }
                }
            }
        }
    }
}
