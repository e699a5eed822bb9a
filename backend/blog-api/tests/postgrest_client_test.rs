/// Wire-level tests for the PostgREST gateway
///
/// A wiremock double stands in for the hosted store; assertions cover the
/// query parameters, auth headers, count parsing, and single-object
/// negotiation the client is expected to speak.
use blog_api::db::Database;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetch_sends_filters_order_and_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/posts"))
        .and(query_param("select", "*"))
        .and(query_param("category", "eq.living"))
        .and(query_param("order", "published_at.desc"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .and(header("apikey", "anon-key"))
        .and(header("Authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"slug": "a"}])))
        .expect(1)
        .mount(&server)
        .await;

    let db = Database::new(&server.uri(), "anon-key");
    let rows = db
        .from("posts")
        .select("*")
        .eq("category", "living")
        .order_desc("published_at")
        .limit(10)
        .offset(0)
        .fetch()
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["slug"], "a");
}

#[tokio::test]
async fn count_requests_exact_count_and_parses_content_range() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/newsletter_subscribers"))
        .and(query_param("status", "eq.subscribed"))
        .and(header("Prefer", "count=exact"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Range", "0-41/42")
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let db = Database::new(&server.uri(), "anon-key");
    let count = db
        .from("newsletter_subscribers")
        .select("email")
        .eq("status", "subscribed")
        .count()
        .await
        .unwrap();

    assert_eq!(count, 42);
}

#[tokio::test]
async fn count_of_empty_table_is_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Range", "*/0")
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let db = Database::new(&server.uri(), "anon-key");
    let count = db.from("posts").select("slug").count().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn fetch_optional_negotiates_single_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/posts"))
        .and(query_param("slug", "eq.hello-world"))
        .and(header("Accept", "application/vnd.pgrst.object+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"slug": "hello-world"})))
        .mount(&server)
        .await;

    let db = Database::new(&server.uri(), "anon-key");
    let row = db
        .from("posts")
        .select("*")
        .eq("slug", "hello-world")
        .fetch_optional()
        .await
        .unwrap();

    assert_eq!(row.unwrap()["slug"], "hello-world");
}

#[tokio::test]
async fn fetch_optional_maps_no_match_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/posts"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "code": "PGRST116",
            "message": "JSON object requested, multiple (or no) rows returned"
        })))
        .mount(&server)
        .await;

    let db = Database::new(&server.uri(), "anon-key");
    let row = db
        .from("posts")
        .select("*")
        .eq("slug", "missing")
        .fetch_optional()
        .await
        .unwrap();

    assert!(row.is_none());
}

#[tokio::test]
async fn insert_asks_for_minimal_representation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/comments"))
        .and(header("Prefer", "return=minimal"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let db = Database::new(&server.uri(), "anon-key");
    db.from("comments")
        .insert(&json!({"post_slug": "a", "body": "hi"}))
        .await
        .unwrap();
}

#[tokio::test]
async fn update_patches_only_matching_rows() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/posts"))
        .and(query_param("featured_hero", "eq.true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let db = Database::new(&server.uri(), "anon-key");
    db.from("posts")
        .eq("featured_hero", "true")
        .update(&json!({"featured_hero": false}))
        .await
        .unwrap();
}

#[tokio::test]
async fn store_errors_carry_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/guides"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"message":"column guides.featured_hero does not exist"}"#),
        )
        .mount(&server)
        .await;

    let db = Database::new(&server.uri(), "anon-key");
    let err = db.from("guides").select("*").fetch().await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("featured_hero"));
}
