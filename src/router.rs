use crate::app::App;
use crate::auth::CurrentUser;
use crate::errors::{ResultResp, ServerError};
use crate::flash::{clear_flash_cookie, read_flash};
use crate::forms::{parse_form, parse_query, ParsedForm};
use crate::middleware::{
    current_user, parse_id, require_login, require_owner, upload_image, validate, Gate,
};
use crate::responses::{html_response, html_response_with_cookies, redirect_response};
use crate::templates::{pages, PageCtx};
use crate::workflow::{edit_listing_path, Fallback, Outcome, Page, Success, NEW_LISTING_PATH};
use astra::Request;
use maud::Markup;

/// HTML forms can only GET or POST; `_method` in the query or the body
/// stands in for PUT and DELETE.
fn effective_method(req: &Request, form: &ParsedForm) -> String {
    let method = req.method().as_str().to_ascii_uppercase();
    if method != "POST" {
        return method;
    }

    let query = parse_query(req);
    match query.get("_method").or_else(|| form.fields.get("_method")) {
        Some(m) if m.eq_ignore_ascii_case("PUT") => "PUT".to_string(),
        Some(m) if m.eq_ignore_ascii_case("DELETE") => "DELETE".to_string(),
        _ => method,
    }
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let form = if req.method().as_str() == "POST" {
        parse_form(&mut req, app.max_upload_bytes)?
    } else {
        ParsedForm::default()
    };
    let method = effective_method(&req, &form);

    let ctx = PageCtx {
        user: current_user(&req, &app.db)?,
        flash: read_flash(&req),
    };

    tracing::debug!(%method, %path, user = ?ctx.user.as_ref().map(|u| u.id), "request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => page_response(&ctx, pages::home_page(&ctx)),

        ("GET", ["listings"]) => respond(app, &ctx, app.workflow.index()),
        ("POST", ["listings"]) => finish(app, &ctx, create_listing(app, ctx.user.clone(), form)),
        ("GET", ["listings", "new"]) => finish(app, &ctx, new_listing(app, ctx.user.clone())),

        ("GET", ["listings", id]) => finish(app, &ctx, show_listing(app, id)),
        ("PUT", ["listings", id]) => {
            finish(app, &ctx, update_listing(app, ctx.user.clone(), id, form))
        }
        ("DELETE", ["listings", id]) => {
            finish(app, &ctx, delete_listing(app, ctx.user.clone(), id))
        }
        ("GET", ["listings", id, "edit"]) => {
            finish(app, &ctx, edit_listing(app, ctx.user.clone(), id))
        }

        _ => Err(ServerError::NotFound),
    }
}

fn new_listing(app: &App, user: Option<CurrentUser>) -> Gate<Outcome> {
    require_login(user)?;
    Ok(app.workflow.new_form())
}

fn create_listing(app: &App, user: Option<CurrentUser>, mut form: ParsedForm) -> Gate<Outcome> {
    let user = require_login(user)?;
    let image = upload_image(
        app.media.as_ref(),
        &mut form,
        Fallback::collaborator(NEW_LISTING_PATH, "Failed to create listing"),
    )?;
    let fields = validate(&form.fields)?;
    Ok(app.workflow.create(fields, image, user.id))
}

fn show_listing(app: &App, raw_id: &str) -> Gate<Outcome> {
    let id = parse_id(raw_id)?;
    Ok(app.workflow.show(&id))
}

fn edit_listing(app: &App, user: Option<CurrentUser>, raw_id: &str) -> Gate<Outcome> {
    let user = require_login(user)?;
    let id = parse_id(raw_id)?;
    require_owner(app.store.as_ref(), &id, &user)?;
    Ok(app.workflow.edit_form(&id))
}

fn update_listing(
    app: &App,
    user: Option<CurrentUser>,
    raw_id: &str,
    mut form: ParsedForm,
) -> Gate<Outcome> {
    let user = require_login(user)?;
    let id = parse_id(raw_id)?;
    require_owner(app.store.as_ref(), &id, &user)?;
    let image = upload_image(
        app.media.as_ref(),
        &mut form,
        Fallback::collaborator(edit_listing_path(&id), "Failed to update listing"),
    )?;
    let fields = validate(&form.fields)?;
    Ok(app.workflow.update(&id, fields, image))
}

fn delete_listing(app: &App, user: Option<CurrentUser>, raw_id: &str) -> Gate<Outcome> {
    let user = require_login(user)?;
    let id = parse_id(raw_id)?;
    require_owner(app.store.as_ref(), &id, &user)?;
    Ok(app.workflow.delete(&id))
}

fn finish(app: &App, ctx: &PageCtx, gated: Gate<Outcome>) -> ResultResp {
    match gated {
        Ok(outcome) => respond(app, ctx, outcome),
        Err(halt) => halt.into_response(),
    }
}

fn respond(app: &App, ctx: &PageCtx, outcome: Outcome) -> ResultResp {
    match outcome {
        Ok(Success::Render(page)) => page_response(ctx, render(app, ctx, &page)),
        Ok(Success::Redirect { to, notice }) => redirect_response(&to, Some(&notice)),
        Err(fallback) => {
            if fallback.is_not_found() {
                tracing::info!(to = %fallback.to, "listing not found");
            }
            redirect_response(&fallback.to, Some(&fallback.notice))
        }
    }
}

fn render(app: &App, ctx: &PageCtx, page: &Page) -> Markup {
    match page {
        Page::Index { listings } => pages::index_page(ctx, listings),
        Page::Show { detail } => pages::show_page(ctx, detail, &app.map_token),
        Page::New => pages::new_page(ctx),
        Page::Edit {
            listing,
            original_image_url,
        } => pages::edit_page(ctx, listing, original_image_url),
    }
}

/// A shown notice is spent; clear its cookie.
fn page_response(ctx: &PageCtx, markup: Markup) -> ResultResp {
    if ctx.flash.is_some() {
        html_response_with_cookies(markup, &[clear_flash_cookie()])
    } else {
        html_response(markup)
    }
}
