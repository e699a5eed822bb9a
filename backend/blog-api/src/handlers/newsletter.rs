/// Newsletter subscription lifecycle
///
/// Subscribers are unique by email and mutate in place:
/// not-subscribed -> subscribed -> unsubscribed -> subscribed again
/// (reactivation reuses the row). Subscribing twice is idempotent and
/// reports `already_subscribed` instead of an error.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use validator::ValidateEmail;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::services::EmailService;

#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub source: String,
}

/// Subscribe an email address
pub async fn subscribe(
    db: web::Data<Database>,
    email_service: web::Data<EmailService>,
    req: web::Json<NewsletterRequest>,
) -> Result<HttpResponse> {
    if !req.email.validate_email() {
        return Err(AppError::BadRequest("valid email is required".to_string()));
    }

    let source = if req.source.is_empty() {
        "website"
    } else {
        req.source.as_str()
    };

    let active = db
        .from("newsletter_subscribers")
        .select("email")
        .eq("email", &req.email)
        .eq("status", "subscribed")
        .count()
        .await?;

    if active > 0 {
        return Ok(HttpResponse::Ok().json(json!({
            "status": "already_subscribed",
            "message": "You're already subscribed to our newsletter!",
        })));
    }

    let existing = db
        .from("newsletter_subscribers")
        .select("email")
        .eq("email", &req.email)
        .count()
        .await?;

    if existing > 0 {
        // Previously unsubscribed: reactivate the same row.
        db.from("newsletter_subscribers")
            .eq("email", &req.email)
            .update(&json!({
                "status": "subscribed",
                "subscribed_at": "now()",
                "unsubscribed_at": null,
                "source": source,
            }))
            .await?;
    } else {
        db.from("newsletter_subscribers")
            .insert(&json!({
                "email": req.email,
                "source": source,
                "status": "subscribed",
            }))
            .await?;
    }

    // Both remaining paths are true transitions into "subscribed", so both
    // get the welcome email. Dispatch without blocking the response;
    // failures are logged inside the service and never surfaced here.
    let email_service = email_service.get_ref().clone();
    let to = req.email.clone();
    tokio::spawn(async move {
        if let Err(err) = email_service.send_welcome_email(&to).await {
            tracing::warn!(email = %to, "welcome email failed: {}", err);
        }
    });

    Ok(HttpResponse::Ok().json(json!({
        "status": "subscribed",
        "message": "Thank you for subscribing! Check your email for a welcome message.",
    })))
}

/// Unsubscribe an email address
pub async fn unsubscribe(
    db: web::Data<Database>,
    req: web::Json<NewsletterRequest>,
) -> Result<HttpResponse> {
    if req.email.is_empty() {
        return Err(AppError::BadRequest("email is required".to_string()));
    }

    db.from("newsletter_subscribers")
        .eq("email", &req.email)
        .update(&json!({
            "status": "unsubscribed",
            "unsubscribed_at": "now()",
        }))
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "unsubscribed",
        "message": "You've been unsubscribed successfully.",
    })))
}

/// Public subscriber count
pub async fn get_stats(db: web::Data<Database>) -> Result<HttpResponse> {
    let total = db
        .from("newsletter_subscribers")
        .select("email")
        .eq("status", "subscribed")
        .count()
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "total_subscribers": total,
        "status": "success",
    })))
}
