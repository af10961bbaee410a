// src/domain/validation.rs
use crate::domain::listing::ListingFields;
use crate::errors::ServerError;
use crate::forms::FormData;

fn required<'a>(form: &'a FormData, key: &str, errors: &mut Vec<String>) -> &'a str {
    match form.get(key).map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => {
            errors.push(format!("\"{key}\" is required"));
            ""
        }
    }
}

/// Checks a submitted listing payload and extracts the editable fields.
///
/// Anything else under `listing[...]` (image, geometry, owner) is ignored,
/// those are derived server-side.
pub fn validate_listing(form: &FormData) -> Result<ListingFields, ServerError> {
    let mut errors = Vec::new();

    let title = required(form, "listing[title]", &mut errors).to_string();
    let description = required(form, "listing[description]", &mut errors).to_string();
    let location = required(form, "listing[location]", &mut errors).to_string();
    let country = required(form, "listing[country]", &mut errors).to_string();
    let raw_price = required(form, "listing[price]", &mut errors);

    let mut price = 0.0;
    if !raw_price.is_empty() {
        match raw_price.parse::<f64>() {
            Ok(p) if p.is_finite() && p >= 0.0 => price = p,
            Ok(_) => errors.push("\"listing[price]\" must be greater than or equal to 0".into()),
            Err(_) => errors.push("\"listing[price]\" must be a number".into()),
        }
    }

    if !errors.is_empty() {
        return Err(ServerError::BadRequest(errors.join(", ")));
    }

    Ok(ListingFields {
        title,
        description,
        price,
        location,
        country,
    })
}
