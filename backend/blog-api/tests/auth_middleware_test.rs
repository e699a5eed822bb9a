/// Basic auth gate on the admin subtree
use actix_web::{test, web, App, HttpResponse};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use blog_api::middleware::BasicAuth;
use serde_json::{json, Value};

async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(json!({"ok": true}))
}

macro_rules! admin_app {
    () => {
        test::init_service(
            App::new().service(
                web::scope("/admin")
                    .wrap(BasicAuth::new("admin", "s3cret"))
                    .route("/ping", web::get().to(ping)),
            ),
        )
        .await
    };
}

fn basic(user: &str, pass: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{}:{}", user, pass)))
}

/// Run a request and normalize rejected calls into plain responses, the
/// same conversion the HTTP dispatcher applies in production.
macro_rules! call {
    ($app:expr, $req:expr) => {
        match test::try_call_service(&$app, $req).await {
            Ok(resp) => resp.into_parts().1.map_into_boxed_body(),
            Err(err) => HttpResponse::from_error(err),
        }
    };
}

#[actix_web::test]
async fn missing_credentials_are_challenged() {
    let app = admin_app!();
    let req = test::TestRequest::get().uri("/admin/ping").to_request();
    let resp = call!(app, req);

    assert_eq!(resp.status(), 401);
    let challenge = resp
        .headers()
        .get("WWW-Authenticate")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(challenge.contains("Basic"));
}

#[actix_web::test]
async fn non_basic_scheme_is_rejected() {
    let app = admin_app!();
    let req = test::TestRequest::get()
        .uri("/admin/ping")
        .insert_header(("Authorization", "Bearer some-token"))
        .to_request();
    let resp = call!(app, req);

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn undecodable_header_is_a_bad_request() {
    let app = admin_app!();
    let req = test::TestRequest::get()
        .uri("/admin/ping")
        .insert_header(("Authorization", "Basic not-base64!!!"))
        .to_request();
    let resp = call!(app, req);

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn missing_colon_in_credentials_is_a_bad_request() {
    let app = admin_app!();
    let encoded = BASE64.encode("no-separator");
    let req = test::TestRequest::get()
        .uri("/admin/ping")
        .insert_header(("Authorization", format!("Basic {}", encoded)))
        .to_request();
    let resp = call!(app, req);

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn wrong_password_is_rejected() {
    let app = admin_app!();
    let req = test::TestRequest::get()
        .uri("/admin/ping")
        .insert_header(("Authorization", basic("admin", "wrong")))
        .to_request();
    let resp = call!(app, req);

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn valid_credentials_pass_through() {
    let app = admin_app!();
    let req = test::TestRequest::get()
        .uri("/admin/ping")
        .insert_header(("Authorization", basic("admin", "s3cret")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["ok"], true);
}
