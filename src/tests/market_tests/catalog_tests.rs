use crate::domain::account::Role;
use crate::domain::areas::find_by_slug;
use crate::domain::property::{PropertyDraft, PropertyStatus, PropertyType};
use crate::errors::CatalogError;
use crate::store::StorageWarning;
use crate::tests::utils::{draft, init_test_market, login, login_admin, market_with_quota, signup_as};

#[test]
fn listing_requires_a_session() {
    let mut market = init_test_market();
    let err = market.add_property(draft("1 Road, Maadi", 100_000.0)).unwrap_err();
    assert_eq!(err, CatalogError::NotAuthenticated);
}

#[test]
fn new_listings_are_pending_and_owned_by_the_agent() {
    let mut market = init_test_market();
    let agent = signup_as(&mut market, "Mona Marketer", Role::Marketer);
    login(&mut market, &agent);

    let out = market.add_property(draft("1 Road, Maadi", 100_000.0)).unwrap();
    assert!(out.warning.is_none());

    let p = out.value;
    assert_eq!(p.status, PropertyStatus::Pending);
    assert_eq!(p.agent_id, agent.id);
    assert_eq!(p.agent_name, agent.name);
    assert_eq!(p.kind, PropertyType::Apartment);
    assert_eq!(p.discount_percentage, 0.0);
    assert_eq!(market.properties().len(), 1);
}

#[test]
fn invalid_drafts_are_refused() {
    let mut market = init_test_market();
    let agent = signup_as(&mut market, "Mona Marketer", Role::Marketer);
    login(&mut market, &agent);

    let err = market
        .add_property(PropertyDraft {
            discount_percentage: Some(120.0),
            ..draft("1 Road", 100_000.0)
        })
        .unwrap_err();
    assert_eq!(err, CatalogError::InvalidDiscount(120.0));

    let err = market
        .add_property(PropertyDraft {
            discount_percentage: Some(-1.0),
            ..draft("1 Road", 100_000.0)
        })
        .unwrap_err();
    assert_eq!(err, CatalogError::InvalidDiscount(-1.0));

    let err = market.add_property(draft("1 Road", 0.0)).unwrap_err();
    assert_eq!(err, CatalogError::InvalidPrice(0.0));

    let err = market
        .add_property(PropertyDraft {
            sqft: -5.0,
            ..draft("1 Road", 100_000.0)
        })
        .unwrap_err();
    assert_eq!(err, CatalogError::InvalidSqft(-5.0));

    let err = market
        .add_property(PropertyDraft {
            sqft: f64::NAN,
            ..draft("1 Road", 100_000.0)
        })
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidSqft(v) if v.is_nan()));

    let err = market
        .add_property(PropertyDraft {
            images: vec!["https://img.example/x.jpg".to_string(); 6],
            ..draft("1 Road", 100_000.0)
        })
        .unwrap_err();
    assert_eq!(err, CatalogError::TooManyImages { got: 6, max: 5 });

    assert!(market.properties().is_empty());
}

#[test]
fn resubmission_goes_back_to_pending_and_keeps_area() {
    let mut market = init_test_market();
    let agent = signup_as(&mut market, "Mona Marketer", Role::Marketer);
    login(&mut market, &agent);

    let zamalek = *find_by_slug("zamalek").unwrap();
    let p = market
        .add_property(PropertyDraft {
            area: Some(zamalek),
            kind: Some(PropertyType::Villa),
            ..draft("1 Road, Zamalek", 100_000.0)
        })
        .unwrap()
        .value;

    login_admin(&mut market);
    market.send_back_property(&p.id).unwrap();
    assert_eq!(market.find_property(&p.id).unwrap().status, PropertyStatus::NeedsRevision);

    login(&mut market, &agent);
    let edited = market
        .add_property(PropertyDraft {
            id: Some(p.id.clone()),
            ..draft("1 Road, Zamalek, Cairo", 120_000.0)
        })
        .unwrap()
        .value;

    assert_eq!(edited.id, p.id);
    assert_eq!(edited.status, PropertyStatus::Pending);
    assert_eq!(edited.price, 120_000.0);
    assert_eq!(edited.kind, PropertyType::Villa);
    assert_eq!(edited.area_slug, "zamalek");
    assert_eq!(edited.created_at, p.created_at);
    assert!(edited.updated_at >= p.updated_at);
    assert_eq!(market.properties().len(), 1);
}

#[test]
fn resubmitting_an_unknown_listing_fails() {
    let mut market = init_test_market();
    let err = market
        .add_property(PropertyDraft {
            id: Some("missing".into()),
            ..draft("1 Road", 100_000.0)
        })
        .unwrap_err();
    assert_eq!(err, CatalogError::PropertyNotFound("missing".into()));
}

#[test]
fn moderation_transitions() {
    let mut market = init_test_market();
    let agent = signup_as(&mut market, "Mona Marketer", Role::Marketer);
    login(&mut market, &agent);
    let a = market.add_property(draft("A, Cairo", 100_000.0)).unwrap().value;
    let b = market.add_property(draft("B, Cairo", 200_000.0)).unwrap().value;

    login_admin(&mut market);
    market.approve_property(&a.id).unwrap();
    assert!(market.find_property(&a.id).unwrap().is_approved());

    // Rejection deletes the listing
    market.reject_property(&b.id).unwrap();
    assert!(market.find_property(&b.id).is_none());

    market.delete_property(&a.id).unwrap();
    assert!(market.properties().is_empty());

    assert_eq!(
        market.approve_property("missing").unwrap_err(),
        CatalogError::PropertyNotFound("missing".into())
    );
    assert_eq!(
        market.delete_property("missing").unwrap_err(),
        CatalogError::PropertyNotFound("missing".into())
    );
}

#[test]
fn test_data_adds_two_pending_listings() {
    let mut market = init_test_market();
    let out = market.generate_test_data();

    assert_eq!(out.value.len(), 2);
    assert!(out.value.iter().all(|p| p.status == PropertyStatus::Pending));
    assert_eq!(out.value[0].address, "Test Property 1");
    assert_eq!(out.value[1].price, 750_000.0);
    assert_eq!(market.properties().len(), 2);
}

#[test]
fn inline_images_are_dropped_when_storage_is_full() {
    // Room for the listing text, not for the image payload
    let mut market = market_with_quota(4 * 1024);
    let agent = signup_as(&mut market, "Mona Marketer", Role::Marketer);
    login(&mut market, &agent);

    let big_image = format!("data:image/png;base64,{}", "A".repeat(8 * 1024));
    let out = market
        .add_property(PropertyDraft {
            images: vec!["https://img.example/1.jpg".into(), big_image],
            ..draft("1 Road, Maadi", 100_000.0)
        })
        .unwrap();

    assert_eq!(out.warning, Some(StorageWarning::ImagesDropped));

    // Memory keeps the image, storage does not
    assert!(market.properties()[0].images[1].is_some());
    market.reload().unwrap();
    assert_eq!(
        market.properties()[0].images,
        vec![Some("https://img.example/1.jpg".to_string()), None]
    );
}

#[test]
fn listing_lives_in_memory_when_nothing_fits() {
    let mut market = market_with_quota(16);
    let agent = signup_as(&mut market, "Mona Marketer", Role::Marketer);
    login(&mut market, &agent);

    let out = market.add_property(draft("1 Road, Maadi", 100_000.0)).unwrap();
    assert_eq!(out.warning, Some(StorageWarning::DataWillBeLost));
    assert_eq!(market.properties().len(), 1);

    market.reload().unwrap();
    assert!(market.properties().is_empty());
}
