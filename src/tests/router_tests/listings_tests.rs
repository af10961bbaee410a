// src/tests/router_tests/listings_tests.rs
use crate::domain::{Listing, ListingFields, ListingId, StoredImage};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::fakes::{FakeGeocoder, FakeMedia};
use crate::tests::utils::*;

fn create_listing(t: &TestApp, cookie: &str, title: &str) -> Listing {
    let resp = handle(
        post_multipart(
            "/listings",
            Some(cookie),
            &listing_fields(title, "Paris, France"),
            Some(("loft.jpg", b"jpeg bytes".as_slice())),
        ),
        &t.app,
    )
    .unwrap();
    assert_eq!(location(&resp), "/listings");

    t.app
        .store
        .find_all()
        .unwrap()
        .into_iter()
        .find(|l| l.title == title)
        .unwrap()
}

#[test]
fn home_page_renders() {
    let t = test_app();
    let resp = handle(get("/", None), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Find your next stay"));
}

#[test]
fn unknown_routes_are_404() {
    let t = test_app();
    assert!(matches!(
        handle(get("/nowhere", None), &t.app),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn create_places_listing_on_the_map() {
    let t = test_app_with(
        FakeGeocoder::returning(vec![paris()]),
        FakeMedia::returning(StoredImage {
            url: "https://cdn/x.jpg".into(),
            filename: "x.jpg".into(),
        }),
    );
    let (owner, cookie) = login(&t.db, "host");

    let resp = handle(
        post_multipart(
            "/listings",
            Some(&cookie),
            &listing_fields("Loft", "Paris, France"),
            Some(("x.jpg", b"jpeg bytes".as_slice())),
        ),
        &t.app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/listings");
    assert_eq!(flash_message(&resp).as_deref(), Some("New listing created!"));

    let all = t.app.store.find_all().unwrap();
    assert_eq!(all.len(), 1);
    let listing = &all[0];
    assert_eq!(listing.title, "Loft");
    assert_eq!(listing.price, 1200.0);
    assert_eq!(listing.owner, owner);
    assert_eq!(listing.geometry.kind, "Point");
    assert_eq!(listing.geometry.coordinates, [2.3522, 48.8566]);
    assert_eq!(listing.image.url, "https://cdn/x.jpg");
    assert_eq!(listing.image.filename, "x.jpg");

    assert_eq!(t.geocoder.calls(), vec![("Paris, France".to_string(), 1)]);
    assert_eq!(t.media.uploads(), vec!["x.jpg".to_string()]);
}

#[test]
fn client_supplied_image_and_geometry_are_ignored() {
    let t = test_app();
    let (_, cookie) = login(&t.db, "host");

    let mut fields = listing_fields("Loft", "Paris, France");
    fields.push(("listing[image][url]", "https://evil.example/x.jpg"));
    fields.push(("listing[geometry][coordinates]", "0,0"));
    fields.push(("listing[owner]", "999"));

    handle(
        post_multipart("/listings", Some(&cookie), &fields, Some(("loft.jpg", b"data".as_slice()))),
        &t.app,
    )
    .unwrap();

    let listing = &t.app.store.find_all().unwrap()[0];
    assert!(listing.image.url.starts_with("https://res.cloudinary.com/"));
    assert_eq!(listing.geometry.coordinates, [2.3522, 48.8566]);
    assert_ne!(listing.owner, 999);
}

#[test]
fn create_needs_login() {
    let t = test_app();
    let resp = handle(
        post_multipart(
            "/listings",
            None,
            &listing_fields("Loft", "Paris, France"),
            Some(("loft.jpg", b"data".as_slice())),
        ),
        &t.app,
    )
    .unwrap();

    assert_eq!(location(&resp), "/login");
    assert_eq!(
        flash_message(&resp).as_deref(),
        Some("You must be logged in to manage listings!")
    );
    assert!(t.media.uploads().is_empty());
    assert!(t.app.store.find_all().unwrap().is_empty());
}

#[test]
fn new_form_needs_login() {
    let t = test_app();
    let resp = handle(get("/listings/new", None), &t.app).unwrap();
    assert_eq!(location(&resp), "/login");

    let (_, cookie) = login(&t.db, "host");
    let resp = handle(get("/listings/new", Some(&cookie)), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("listing[image]"));
}

#[test]
fn geocoding_failure_sends_back_to_the_form() {
    let t = test_app_with(FakeGeocoder::failing(), FakeMedia::default());
    let (_, cookie) = login(&t.db, "host");

    let resp = handle(
        post_multipart(
            "/listings",
            Some(&cookie),
            &listing_fields("Loft", "Atlantis"),
            Some(("loft.jpg", b"data".as_slice())),
        ),
        &t.app,
    )
    .unwrap();

    assert_eq!(location(&resp), "/listings/new");
    assert_eq!(flash_message(&resp).as_deref(), Some("Failed to create listing"));
    assert!(t.app.store.find_all().unwrap().is_empty());
}

#[test]
fn location_with_no_match_is_a_create_failure() {
    let t = test_app_with(FakeGeocoder::returning(vec![]), FakeMedia::default());
    let (_, cookie) = login(&t.db, "host");

    let resp = handle(
        post_multipart(
            "/listings",
            Some(&cookie),
            &listing_fields("Loft", "Nowhere at all"),
            Some(("loft.jpg", b"data".as_slice())),
        ),
        &t.app,
    )
    .unwrap();

    assert_eq!(location(&resp), "/listings/new");
    assert!(t.app.store.find_all().unwrap().is_empty());
}

#[test]
fn missing_image_fails_before_geocoding() {
    let t = test_app();
    let (_, cookie) = login(&t.db, "host");

    let resp = handle(
        post_multipart("/listings", Some(&cookie), &listing_fields("Loft", "Paris"), None),
        &t.app,
    )
    .unwrap();

    assert_eq!(location(&resp), "/listings/new");
    assert_eq!(flash_message(&resp).as_deref(), Some("Failed to create listing"));
    assert!(t.geocoder.calls().is_empty());
}

#[test]
fn upload_failure_is_a_create_failure() {
    let t = test_app_with(FakeGeocoder::returning(vec![paris()]), FakeMedia::failing());
    let (_, cookie) = login(&t.db, "host");

    let resp = handle(
        post_multipart(
            "/listings",
            Some(&cookie),
            &listing_fields("Loft", "Paris"),
            Some(("loft.jpg", b"data".as_slice())),
        ),
        &t.app,
    )
    .unwrap();

    assert_eq!(location(&resp), "/listings/new");
    assert_eq!(flash_message(&resp).as_deref(), Some("Failed to create listing"));
    assert!(t.geocoder.calls().is_empty());
}

#[test]
fn invalid_form_is_rejected_with_400() {
    let t = test_app();
    let (_, cookie) = login(&t.db, "host");

    let mut fields = listing_fields("", "Paris");
    fields.retain(|(k, _)| *k != "listing[price]");
    fields.push(("listing[price]", "-5"));

    let result = handle(
        post_multipart("/listings", Some(&cookie), &fields, Some(("loft.jpg", b"data".as_slice()))),
        &t.app,
    );
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
    assert!(t.app.store.find_all().unwrap().is_empty());
}

#[test]
fn index_lists_every_listing() {
    let t = test_app();
    let (_, cookie) = login(&t.db, "host");
    create_listing(&t, &cookie, "Loft");
    create_listing(&t, &cookie, "Cabin");

    let resp = handle(get("/listings", None), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("All Listings"));
    assert!(body.contains("Loft"));
    assert!(body.contains("Cabin"));
}

#[test]
fn show_unknown_or_garbage_id_redirects_with_notice() {
    let t = test_app();

    for uri in [format!("/listings/{}", ListingId::new()), "/listings/not-an-id".to_string()] {
        let resp = handle(get(&uri, None), &t.app).unwrap();
        assert_eq!(resp.status(), 302);
        assert_eq!(location(&resp), "/listings");
        assert_eq!(flash_message(&resp).as_deref(), Some("Listing not found"));
    }
}

#[test]
fn show_offers_edit_and_delete_only_to_owner() {
    let t = test_app();
    let (_, owner_cookie) = login(&t.db, "host");
    let (_, guest_cookie) = login(&t.db, "guest");
    let listing = create_listing(&t, &owner_cookie, "Loft");
    let uri = format!("/listings/{}", listing.id);

    let owner_view = body_string(handle(get(&uri, Some(&owner_cookie)), &t.app).unwrap());
    assert!(owner_view.contains(&format!("/listings/{}/edit", listing.id)));
    assert!(owner_view.contains("_method=DELETE"));
    assert!(owner_view.contains("host"));
    assert!(owner_view.contains("pk.test-map-token"));

    let guest_view = body_string(handle(get(&uri, Some(&guest_cookie)), &t.app).unwrap());
    assert!(!guest_view.contains("/edit"));
    assert!(!guest_view.contains("_method=DELETE"));
    assert!(guest_view.contains("Owned by"));
}

#[test]
fn edit_form_previews_a_thumbnail() {
    let t = test_app();
    let (_, cookie) = login(&t.db, "host");
    let listing = create_listing(&t, &cookie, "Loft");

    let resp = handle(get(&format!("/listings/{}/edit", listing.id), Some(&cookie)), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("/image/upload/w_250/v1/listings_test/loft.jpg"));
    assert!(body.contains("_method=PUT"));
}

#[test]
fn update_without_file_keeps_image_and_geometry() {
    let t = test_app();
    let (_, cookie) = login(&t.db, "host");
    let before = create_listing(&t, &cookie, "Loft");

    let resp = handle(
        post_multipart(
            &format!("/listings/{}?_method=PUT", before.id),
            Some(&cookie),
            &listing_fields("Renamed loft", "Lyon, France"),
            None,
        ),
        &t.app,
    )
    .unwrap();

    assert_eq!(location(&resp), format!("/listings/{}", before.id));
    assert_eq!(flash_message(&resp).as_deref(), Some("Listing updated!"));

    let after = t.app.store.find_by_id(&before.id).unwrap().unwrap();
    assert_eq!(after.title, "Renamed loft");
    assert_eq!(after.location, "Lyon, France");
    assert_eq!(after.image, before.image);
    assert_eq!(after.geometry, before.geometry);
    assert_eq!(after.owner, before.owner);
    // Only the create geocoded.
    assert_eq!(t.geocoder.calls().len(), 1);
}

#[test]
fn update_with_file_replaces_image() {
    let t = test_app();
    let (_, cookie) = login(&t.db, "host");
    let before = create_listing(&t, &cookie, "Loft");

    handle(
        post_multipart(
            &format!("/listings/{}?_method=PUT", before.id),
            Some(&cookie),
            &listing_fields("Loft", "Paris, France"),
            Some(("new.png", b"png bytes".as_slice())),
        ),
        &t.app,
    )
    .unwrap();

    let after = t.app.store.find_by_id(&before.id).unwrap().unwrap();
    assert_eq!(after.image.filename, "listings_test/new.png");
}

#[test]
fn non_owner_cannot_update_or_delete() {
    let t = test_app();
    let (_, owner_cookie) = login(&t.db, "host");
    let (_, guest_cookie) = login(&t.db, "guest");
    let listing = create_listing(&t, &owner_cookie, "Loft");
    let uploads_before = t.media.uploads().len();

    let resp = handle(
        post_multipart(
            &format!("/listings/{}?_method=PUT", listing.id),
            Some(&guest_cookie),
            &listing_fields("Hijacked", "Paris"),
            Some(("evil.jpg", b"data".as_slice())),
        ),
        &t.app,
    )
    .unwrap();
    assert_eq!(location(&resp), format!("/listings/{}", listing.id));
    assert_eq!(
        flash_message(&resp).as_deref(),
        Some("You are not the owner of this listing")
    );
    assert_eq!(t.media.uploads().len(), uploads_before);

    let resp = handle(
        post_form(
            &format!("/listings/{}?_method=DELETE", listing.id),
            Some(&guest_cookie),
            &[],
        ),
        &t.app,
    )
    .unwrap();
    assert_eq!(location(&resp), format!("/listings/{}", listing.id));

    let still = t.app.store.find_by_id(&listing.id).unwrap().unwrap();
    assert_eq!(still.title, "Loft");
}

#[test]
fn delete_then_delete_again_then_show() {
    let t = test_app();
    let (_, cookie) = login(&t.db, "host");
    let listing = create_listing(&t, &cookie, "Loft");
    let uri = format!("/listings/{}", listing.id);

    // Form field override, as a plain HTML form would send it.
    let resp = handle(post_form(&uri, Some(&cookie), &[("_method", "DELETE")]), &t.app).unwrap();
    assert_eq!(location(&resp), "/listings");
    assert_eq!(flash_message(&resp).as_deref(), Some("Listing deleted!"));

    let resp = handle(
        post_form(&format!("{uri}?_method=DELETE"), Some(&cookie), &[]),
        &t.app,
    )
    .unwrap();
    assert_eq!(location(&resp), "/listings");
    assert_eq!(flash_message(&resp).as_deref(), Some("Listing not found"));

    let resp = handle(get(&uri, Some(&cookie)), &t.app).unwrap();
    assert_eq!(flash_message(&resp).as_deref(), Some("Listing not found"));
}

#[test]
fn non_owner_cannot_open_the_edit_form() {
    let t = test_app();
    let (_, owner_cookie) = login(&t.db, "host");
    let (_, guest_cookie) = login(&t.db, "guest");
    let listing = create_listing(&t, &owner_cookie, "Loft");

    let resp = handle(
        get(&format!("/listings/{}/edit", listing.id), Some(&guest_cookie)),
        &t.app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), format!("/listings/{}", listing.id));
    assert_eq!(
        flash_message(&resp).as_deref(),
        Some("You are not the owner of this listing")
    );
}

#[test]
fn update_upload_failure_returns_to_edit_form() {
    let t = test_app_with(FakeGeocoder::returning(vec![paris()]), FakeMedia::failing());
    let (owner, cookie) = login(&t.db, "host");
    let listing = t
        .app
        .store
        .create(Listing::new(
            ListingFields {
                title: "Loft".into(),
                description: "Bright".into(),
                price: 80.0,
                location: "Paris".into(),
                country: "France".into(),
            },
            paris().geometry,
            StoredImage {
                url: "https://cdn/a.jpg".into(),
                filename: "a.jpg".into(),
            },
            owner,
        ))
        .unwrap();

    let resp = handle(
        post_multipart(
            &format!("/listings/{}?_method=PUT", listing.id),
            Some(&cookie),
            &listing_fields("Renamed", "Paris"),
            Some(("new.jpg", b"data".as_slice())),
        ),
        &t.app,
    )
    .unwrap();

    assert_eq!(location(&resp), format!("/listings/{}/edit", listing.id));
    assert_eq!(flash_message(&resp).as_deref(), Some("Failed to update listing"));
    let after = t.app.store.find_by_id(&listing.id).unwrap().unwrap();
    assert_eq!(after.title, "Loft");
    assert_eq!(after.image.url, "https://cdn/a.jpg");
}

#[test]
fn database_file_is_removed_with_the_app() {
    let t = test_app();
    let path = t.db_path.clone();
    assert!(path.exists());

    drop(t);
    assert!(!path.exists());
}
