/// Newsletter administration - composing, previewing, and sending
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::services::email::EmailService;

#[derive(Debug, Deserialize)]
pub struct SendNewsletterRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub html_content: String,
    #[serde(default)]
    pub test_email: String,
}

#[derive(Debug, Serialize)]
pub struct NewsletterTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub subject: &'static str,
    pub content: &'static str,
}

/// Send the newsletter to every active subscriber (or a single test address)
///
/// The bulk path runs the full rate-limited loop inside this request;
/// large lists block the caller for the duration.
pub async fn send_newsletter(
    db: web::Data<Database>,
    email: web::Data<EmailService>,
    req: web::Json<SendNewsletterRequest>,
) -> Result<HttpResponse> {
    if req.subject.is_empty() || req.content.is_empty() {
        return Err(AppError::BadRequest(
            "Subject and content are required".to_string(),
        ));
    }

    if !req.test_email.is_empty() {
        email
            .send_test_newsletter(&req.test_email, &req.subject, &req.content, &req.html_content)
            .await?;

        return Ok(HttpResponse::Ok().json(json!({
            "status": "test_sent",
            "message": "Test newsletter sent successfully",
            "recipient": req.test_email,
        })));
    }

    let recipients = active_subscriber_emails(&db).await?;
    if recipients.is_empty() {
        return Err(AppError::BadRequest(
            "No active subscribers found".to_string(),
        ));
    }

    email
        .send_newsletter(&req.subject, &req.content, &req.html_content, &recipients)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "sent",
        "message": "Newsletter sent successfully",
        "recipient_count": recipients.len(),
    })))
}

/// Canned newsletter starting points for the admin UI
pub async fn get_templates() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(newsletter_templates()))
}

/// Render newsletter HTML without sending anything
pub async fn preview_newsletter(
    email: web::Data<EmailService>,
    req: web::Json<SendNewsletterRequest>,
) -> Result<HttpResponse> {
    let html = if req.html_content.is_empty() {
        email.newsletter_html(&req.subject, &req.content)
    } else {
        req.html_content.clone()
    };

    Ok(HttpResponse::Ok().json(json!({
        "html_content": html,
        "subject": req.subject,
        "content": req.content,
    })))
}

/// Sending statistics for the admin dashboard
pub async fn get_stats(db: web::Data<Database>) -> Result<HttpResponse> {
    let subscribers = active_subscriber_emails(&db).await?;

    Ok(HttpResponse::Ok().json(json!({
        "total_subscribers": subscribers.len(),
        "active_subscribers": subscribers.len(),
        // Campaign history needs a newsletters table; open rates need
        // provider-side tracking. Neither exists yet.
        "last_sent": null,
        "total_sent": 0,
        "open_rate": "N/A",
    })))
}

/// Email addresses of all currently-subscribed recipients
async fn active_subscriber_emails(db: &Database) -> Result<Vec<String>> {
    let rows = db
        .from("newsletter_subscribers")
        .select("email")
        .eq("status", "subscribed")
        .fetch()
        .await?;

    Ok(rows
        .iter()
        .filter_map(|row| row.get("email").and_then(Value::as_str))
        .map(str::to_string)
        .collect())
}

/// The fixture template set offered by the admin composer
pub fn newsletter_templates() -> Vec<NewsletterTemplate> {
    vec![
        NewsletterTemplate {
            id: "welcome",
            name: "Welcome Newsletter",
            subject: "Welcome to Our Newsletter!",
            content: "# Welcome to Our Newsletter!\n\nThank you for subscribing. We're excited to share what we've been working on.\n\n## What to Expect\n\n- **Weekly Updates**: The latest blog posts, delivered to your inbox\n- **Exclusive Content**: Subscriber-only guides and ideas\n- **Tips & Tricks**: Practical advice for your home\n\nWe're thrilled to have you on board!\n\nBest regards,\nThe Team",
        },
        NewsletterTemplate {
            id: "weekly",
            name: "Weekly Digest",
            subject: "This Week's Highlights",
            content: "# This Week's Highlights\n\nHere are the latest posts and updates from our blog:\n\n## Featured Posts\n\n- **New**: Transform Your Small Space with These 5 Design Tips\n- **Popular**: The Ultimate Guide to Budget-Friendly Home Decor\n\n## Quick Tips\n\n**Tip of the Week**: Use mirrors strategically to make any room feel larger and brighter!\n\nThanks for reading!\nThe Team",
        },
        NewsletterTemplate {
            id: "announcement",
            name: "Important Announcement",
            subject: "Exciting News from Our Team!",
            content: "# Exciting News!\n\nWe're launching our new home design consultation service.\n\n## How This Benefits You\n\n- **Free Initial Consultation**: 30 minutes with our design team\n- **Personalized Recommendations**: Tailored advice for your space\n- **Subscriber Discount**: 20% off all design packages\n\nSimply reply to this email to get started!\n\nBest regards,\nThe Team",
        },
        NewsletterTemplate {
            id: "seasonal",
            name: "Seasonal Tips",
            subject: "Seasonal Home Refresh Ideas",
            content: "# Seasonal Home Refresh Ideas\n\nA new season is the perfect time to refresh your home.\n\n## Quick & Easy Updates\n\n- **Add Fresh Flowers**: Nothing brightens a room faster\n- **Switch Textiles**: Swap heavy fabrics for lighter materials\n- **Declutter**: A good clean makes everything feel new\n\nWhat updates are you planning? Reply and let us know!\n\nHappy decorating!\nThe Team",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::email::format_content_html;

    #[test]
    fn template_set_is_complete() {
        let templates = newsletter_templates();
        let ids: Vec<&str> = templates.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["welcome", "weekly", "announcement", "seasonal"]);
    }

    #[test]
    fn template_content_renders_to_html() {
        for template in newsletter_templates() {
            let html = format_content_html(template.content);
            assert!(html.contains("<h1>"), "template {} lost its heading", template.id);
        }
    }
}
