/// Unit tests for blog-api core helpers
///
/// Covers slug normalization, pagination defaults, subscriber row
/// deserialization, and the fixture template set.
use blog_api::handlers::newsletter_admin::newsletter_templates;
use blog_api::handlers::products::generate_sku;
use blog_api::models::{Pagination, Subscriber};
use blog_api::services::slug::slugify;

#[test]
fn test_slugify_basic_titles() {
    assert_eq!(slugify("Hello World"), "hello-world");
    assert_eq!(slugify("10 Ways to Create a Cozy Reading Nook"), "10-ways-to-create-a-cozy-reading-nook");
}

#[test]
fn test_slugify_handles_punctuation_and_symbols() {
    assert_eq!(slugify("Kitchen & Dining"), "kitchen-and-dining");
    assert_eq!(slugify("What's New? (2024)"), "whats-new-2024");
    assert_eq!(slugify("Indoor/Outdoor: The Guide!"), "indoor-outdoor-the-guide");
}

#[test]
fn test_slugify_is_idempotent() {
    let once = slugify("Transform Your Small Space!");
    assert_eq!(slugify(&once), once);
}

#[test]
fn test_pagination_zero_and_missing_mean_default() {
    let empty: Pagination = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.limit_or(10), 10);
    assert_eq!(empty.offset_or_zero(), 0);

    let zero: Pagination = serde_json::from_str(r#"{"limit":0,"offset":0}"#).unwrap();
    assert_eq!(zero.limit_or(20), 20);

    let set: Pagination = serde_json::from_str(r#"{"limit":5,"offset":15}"#).unwrap();
    assert_eq!(set.limit_or(20), 5);
    assert_eq!(set.offset_or_zero(), 15);
}

#[test]
fn test_subscriber_row_tolerates_sparse_columns() {
    let subscriber: Subscriber =
        serde_json::from_str(r#"{"email":"a@b.com","subscribed_at":"2024-01-01T00:00:00Z"}"#)
            .unwrap();
    assert_eq!(subscriber.email, "a@b.com");
    assert_eq!(subscriber.status, None);
    assert_eq!(subscriber.source, None);
}

#[test]
fn test_sku_generation_shape() {
    let sku = generate_sku();
    assert!(sku.starts_with("SKU-"));
    assert_eq!(sku.len(), "SKU-".len() + 8);
}

#[test]
fn test_newsletter_template_fixtures() {
    let templates = newsletter_templates();
    assert_eq!(templates.len(), 4);
    for template in &templates {
        assert!(!template.subject.is_empty());
        assert!(template.content.starts_with("# "));
    }
}
