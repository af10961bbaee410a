use crate::flash::{set_flash_cookie, Notice};
use crate::router::handle;
use crate::tests::utils::*;

fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().to_string()
}

#[test]
fn notice_is_shown_once_then_cleared() {
    let t = test_app();
    let flash = cookie_pair(&set_flash_cookie(&Notice::success("Listing deleted!")));

    let resp = handle(get("/listings", Some(&flash)), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    let cleared = set_cookies(&resp)
        .iter()
        .any(|c| c.starts_with("flash=;") && c.contains("Max-Age=0"));
    assert!(cleared);
    assert!(body_string(resp).contains("Listing deleted!"));

    let resp = handle(get("/listings", None), &t.app).unwrap();
    assert!(set_cookies(&resp).is_empty());
    assert!(!body_string(resp).contains("Listing deleted!"));
}

#[test]
fn garbled_flash_cookie_is_ignored() {
    let t = test_app();
    let resp = handle(get("/", Some("flash=%%%not-base64")), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(set_cookies(&resp).is_empty());
}

#[test]
fn logged_in_user_appears_in_nav() {
    let t = test_app();
    let (_, cookie) = login(&t.db, "wanderer");
    let body = body_string(handle(get("/listings", Some(&cookie)), &t.app).unwrap());
    assert!(body.contains("wanderer"));
}

#[test]
fn stale_session_cookie_is_anonymous() {
    let t = test_app();
    let resp = handle(get("/listings/new", Some("session=bogus")), &t.app).unwrap();
    assert_eq!(location(&resp), "/login");
}
