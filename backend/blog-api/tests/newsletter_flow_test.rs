/// Newsletter lifecycle against mocked store and email provider
use actix_web::{test, web, App};
use blog_api::db::Database;
use blog_api::handlers::newsletter;
use blog_api::services::email::{EmailService, ResendClient};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn count_response(total: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Range", total)
        .set_body_json(json!([]))
}

fn email_service(resend: &MockServer) -> EmailService {
    EmailService::with_client(
        ResendClient::with_base_url("test-key", &resend.uri()),
        "hello@betadomot.blog",
        "https://betadomot.blog",
    )
}

async fn subscribe_app(
    store: &MockServer,
    resend: &MockServer,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(Database::new(&store.uri(), "anon-key")))
            .app_data(web::Data::new(email_service(resend)))
            .route("/newsletter/subscribe", web::post().to(newsletter::subscribe))
            .route(
                "/newsletter/unsubscribe",
                web::post().to(newsletter::unsubscribe),
            ),
    )
    .await
}

#[actix_web::test]
async fn first_subscription_inserts_row_and_sends_welcome_email() {
    let store = MockServer::start().await;
    let resend = MockServer::start().await;

    // No row exists yet, under either filter.
    Mock::given(method("GET"))
        .and(path("/rest/v1/newsletter_subscribers"))
        .respond_with(count_response("*/0"))
        .mount(&store)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/newsletter_subscribers"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&store)
        .await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg-1"})))
        .expect(1)
        .mount(&resend)
        .await;

    let app = subscribe_app(&store, &resend).await;
    let req = test::TestRequest::post()
        .uri("/newsletter/subscribe")
        .set_json(json!({"email": "a@b.com"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "subscribed");

    // The welcome email is dispatched off the request path.
    tokio::time::sleep(Duration::from_millis(300)).await;
}

#[actix_web::test]
async fn subscribing_twice_reports_already_subscribed() {
    let store = MockServer::start().await;
    let resend = MockServer::start().await;

    // An active row exists: the very first count is non-zero.
    Mock::given(method("GET"))
        .and(path("/rest/v1/newsletter_subscribers"))
        .respond_with(count_response("0-0/1"))
        .mount(&store)
        .await;
    // Nothing may be written and no email may go out.
    Mock::given(method("POST"))
        .and(path("/rest/v1/newsletter_subscribers"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&store)
        .await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg-1"})))
        .expect(0)
        .mount(&resend)
        .await;

    let app = subscribe_app(&store, &resend).await;
    let req = test::TestRequest::post()
        .uri("/newsletter/subscribe")
        .set_json(json!({"email": "a@b.com"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "already_subscribed");

    tokio::time::sleep(Duration::from_millis(200)).await;
}

#[actix_web::test]
async fn resubscribing_reactivates_the_existing_row() {
    let store = MockServer::start().await;
    let resend = MockServer::start().await;

    // Not actively subscribed...
    Mock::given(method("GET"))
        .and(path("/rest/v1/newsletter_subscribers"))
        .and(query_param("status", "eq.subscribed"))
        .respond_with(count_response("*/0"))
        .mount(&store)
        .await;
    // ...but a row for the address exists.
    Mock::given(method("GET"))
        .and(path("/rest/v1/newsletter_subscribers"))
        .respond_with(count_response("0-0/1"))
        .mount(&store)
        .await;
    // Reactivation updates in place; no new row is inserted.
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/newsletter_subscribers"))
        .and(query_param("email", "eq.a@b.com"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&store)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/newsletter_subscribers"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&store)
        .await;
    // Reactivation counts as a transition into subscribed: welcome email.
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg-2"})))
        .expect(1)
        .mount(&resend)
        .await;

    let app = subscribe_app(&store, &resend).await;
    let req = test::TestRequest::post()
        .uri("/newsletter/subscribe")
        .set_json(json!({"email": "a@b.com"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "subscribed");

    tokio::time::sleep(Duration::from_millis(300)).await;
}

#[actix_web::test]
async fn invalid_email_is_rejected() {
    let store = MockServer::start().await;
    let resend = MockServer::start().await;

    let app = subscribe_app(&store, &resend).await;
    let req = test::TestRequest::post()
        .uri("/newsletter/subscribe")
        .set_json(json!({"email": "not-an-email"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn unsubscribing_updates_status_in_place() {
    let store = MockServer::start().await;
    let resend = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/newsletter_subscribers"))
        .and(query_param("email", "eq.a@b.com"))
        .and(body_partial_json(json!({"status": "unsubscribed"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&store)
        .await;

    let app = subscribe_app(&store, &resend).await;
    let req = test::TestRequest::post()
        .uri("/newsletter/unsubscribe")
        .set_json(json!({"email": "a@b.com"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "unsubscribed");
}

#[tokio::test]
async fn bulk_send_reports_success_count_and_tolerates_partial_failure() {
    let resend = MockServer::start().await;

    // One recipient is rejected; the rest go through.
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(body_partial_json(json!({"to": ["bad@b.com"]})))
        .respond_with(ResponseTemplate::new(422).set_body_string("invalid recipient"))
        .mount(&resend)
        .await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg"})))
        .mount(&resend)
        .await;

    let service = email_service(&resend);
    let recipients = vec![
        "a@b.com".to_string(),
        "bad@b.com".to_string(),
        "c@d.com".to_string(),
    ];
    let sent = service
        .send_newsletter("Subject", "content", "", &recipients)
        .await
        .unwrap();

    assert_eq!(sent, 2);
}

#[tokio::test]
async fn bulk_send_fails_only_when_every_recipient_fails() {
    let resend = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(500).set_body_string("provider down"))
        .mount(&resend)
        .await;

    let service = email_service(&resend);
    let recipients = vec!["a@b.com".to_string(), "c@d.com".to_string()];
    let err = service
        .send_newsletter("Subject", "content", "", &recipients)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("failed to send to all recipients"));
}
