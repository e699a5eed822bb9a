/// Email gateway
///
/// Wraps the Resend transactional email HTTP API. Sending is optional: with
/// no API key configured the service logs and skips welcome emails, and
/// refuses newsletter sends. Bulk dispatch is a sequential, rate-limited
/// loop run inside the calling request.
use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const RESEND_BASE_URL: &str = "https://api.resend.com";

/// Recipients per batch; the provider rate-limits bursts.
const BATCH_SIZE: usize = 10;
/// Pause between individual sends within a batch.
const SEND_DELAY: Duration = Duration::from_millis(100);
/// Pause between batches.
const BATCH_DELAY: Duration = Duration::from_secs(1);

/// Errors from the email gateway
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("email service not configured")]
    NotConfigured,

    #[error("no recipients provided")]
    NoRecipients,

    #[error("email request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("email API error: {status} - {body}")]
    Api { status: StatusCode, body: String },

    #[error("failed to send to all recipients: {0}")]
    AllFailed(String),
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<HashMap<&'a str, String>>,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Minimal Resend API client
#[derive(Clone)]
pub struct ResendClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl ResendClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, RESEND_BASE_URL)
    }

    /// Point the client at a different endpoint (used by tests)
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn send(&self, request: &SendEmailRequest<'_>) -> Result<String, EmailError> {
        let response = self
            .http
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(EmailError::Api { status, body });
        }

        let parsed: SendEmailResponse = response.json().await?;
        Ok(parsed.id)
    }
}

/// Handles all outbound email operations
#[derive(Clone)]
pub struct EmailService {
    client: Option<ResendClient>,
    from_email: String,
    from_name: String,
    website_url: String,
}

impl EmailService {
    pub fn new(config: &crate::config::EmailConfig) -> Self {
        let client = match &config.resend_api_key {
            Some(key) => {
                tracing::info!("Email service initialized with Resend");
                Some(ResendClient::new(key))
            }
            None => {
                tracing::warn!("Email service disabled - no RESEND_API_KEY provided");
                None
            }
        };

        Self {
            client,
            from_email: config.from_email.clone(),
            from_name: "Betadomot".to_string(),
            website_url: config.website_url.clone(),
        }
    }

    /// Build a service around an explicit client (used by tests)
    pub fn with_client(client: ResendClient, from_email: &str, website_url: &str) -> Self {
        Self {
            client: Some(client),
            from_email: from_email.to_string(),
            from_name: "Betadomot".to_string(),
            website_url: website_url.to_string(),
        }
    }

    /// Send a welcome email to a new newsletter subscriber
    ///
    /// A no-op when the provider is not configured: subscription must not
    /// fail because email is unavailable.
    pub async fn send_welcome_email(&self, email: &str) -> Result<(), EmailError> {
        let Some(client) = &self.client else {
            tracing::info!(%email, "skipping welcome email - email service not configured");
            return Ok(());
        };

        let from = format!("{} <{}>", self.from_name, self.from_email);
        let mut headers = HashMap::new();
        headers.insert(
            "List-Unsubscribe",
            format!("<{}/newsletter/unsubscribe>", self.website_url),
        );
        headers.insert("List-Unsubscribe-Post", "List-Unsubscribe=One-Click".to_string());
        headers.insert("X-Entity-Ref-ID", "welcome-email".to_string());
        headers.insert("Reply-To", self.from_email.clone());

        let html = self.welcome_email_html();
        let text = self.welcome_email_text();
        let request = SendEmailRequest {
            from: &from,
            to: vec![email],
            subject: "Welcome to Betadomot",
            html: &html,
            text: Some(&text),
            headers: Some(headers),
        };

        let id = client.send(&request).await?;
        tracing::info!(%email, %id, "welcome email sent");
        Ok(())
    }

    /// Send a newsletter to every recipient, one message at a time
    ///
    /// Recipients are processed in fixed-size batches with short delays to
    /// stay under the provider's rate limit. Individual failures are
    /// collected; the call fails only when every send failed. Returns the
    /// number of successful sends.
    pub async fn send_newsletter(
        &self,
        subject: &str,
        content: &str,
        html_content: &str,
        recipients: &[String],
    ) -> Result<usize, EmailError> {
        let Some(client) = &self.client else {
            return Err(EmailError::NotConfigured);
        };
        if recipients.is_empty() {
            return Err(EmailError::NoRecipients);
        }

        let html = if html_content.is_empty() {
            self.newsletter_html(subject, content)
        } else {
            html_content.to_string()
        };

        tracing::info!(%subject, recipients = recipients.len(), "sending newsletter");

        let mut errors = Vec::new();
        let mut success_count = 0usize;

        for (batch_index, batch) in recipients.chunks(BATCH_SIZE).enumerate() {
            if batch_index > 0 {
                tokio::time::sleep(BATCH_DELAY).await;
            }

            for recipient in batch {
                let request = SendEmailRequest {
                    from: &self.from_email,
                    to: vec![recipient],
                    subject,
                    html: &html,
                    text: None,
                    headers: None,
                };

                match client.send(&request).await {
                    Ok(_) => {
                        success_count += 1;
                        tracing::debug!(%recipient, "newsletter sent");
                    }
                    Err(err) => {
                        tracing::warn!(%recipient, "newsletter send failed: {}", err);
                        errors.push(format!("{}: {}", recipient, err));
                    }
                }

                tokio::time::sleep(SEND_DELAY).await;
            }
        }

        tracing::info!(
            successful = success_count,
            failed = errors.len(),
            "newsletter sending complete"
        );

        if !errors.is_empty() && success_count == 0 {
            return Err(EmailError::AllFailed(errors.join("; ")));
        }
        Ok(success_count)
    }

    /// Send a single test newsletter with a `[TEST]` subject prefix
    pub async fn send_test_newsletter(
        &self,
        test_email: &str,
        subject: &str,
        content: &str,
        html_content: &str,
    ) -> Result<(), EmailError> {
        let Some(client) = &self.client else {
            return Err(EmailError::NotConfigured);
        };

        let html = if html_content.is_empty() {
            self.newsletter_html(subject, content)
        } else {
            html_content.to_string()
        };
        let test_subject = format!("[TEST] {}", subject);

        let request = SendEmailRequest {
            from: &self.from_email,
            to: vec![test_email],
            subject: &test_subject,
            html: &html,
            text: None,
            headers: None,
        };

        client.send(&request).await?;
        tracing::info!(%test_email, "test newsletter sent");
        Ok(())
    }

    /// Render the newsletter wrapper template around formatted content
    pub fn newsletter_html(&self, subject: &str, content: &str) -> String {
        let date = Utc::now().format("%B %-d, %Y");
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{subject}</title>
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background-color: #f5f6fa;">
<div style="max-width: 600px; margin: 0 auto; background: white;">
<div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); padding: 40px 30px; text-align: center;">
<h1 style="color: white; margin: 0; font-size: 28px;">Newsletter</h1>
<p style="color: rgba(255,255,255,0.9); margin: 10px 0 0 0;">{date}</p>
</div>
<div style="padding: 40px 30px;">
<h2 style="color: #2d5a87; margin: 0 0 20px 0;">{subject}</h2>
<div style="color: #444; line-height: 1.8;">
{body}
</div>
<div style="text-align: center; margin: 30px 0;">
<a href="{site}/blog" style="background: #667eea; color: white; padding: 15px 30px; text-decoration: none; border-radius: 25px; font-weight: 600; display: inline-block;">Visit Our Blog</a>
</div>
</div>
<div style="background: #f8f9fa; padding: 30px; text-align: center; border-top: 1px solid #eee;">
<p style="margin: 0 0 15px 0; color: #888; font-size: 12px;">You're receiving this because you subscribed to our newsletter.</p>
<p style="margin: 0; color: #999; font-size: 12px;">
<a href="{site}/newsletter/unsubscribe" style="color: #667eea;">Unsubscribe</a> |
<a href="{site}" style="color: #667eea;">Visit Website</a>
</p>
</div>
</div>
</body>
</html>"#,
            subject = subject,
            date = date,
            body = format_content_html(content),
            site = self.website_url,
        )
    }

    fn welcome_email_html(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>From our home to yours, welcome</title>
</head>
<body style="font-family: 'Inter', -apple-system, sans-serif; margin: 0; padding: 0; background-color: #ffffff; color: #000000; line-height: 1.7;">
<div style="max-width: 580px; margin: 0 auto;">
<div style="padding: 0 40px 50px 40px;">
<p style="font-size: 20px; margin: 60px 0 40px 0;">Hey there,</p>
<p style="font-size: 17px; margin: 0 0 24px 0;">Welcome to Betadomot! We're truly glad you're here.</p>
<p style="font-size: 17px; margin: 0 0 24px 0;">This isn't just a home platform. It's a growing space created to help people like you live more intentionally, comfortably, and beautifully, one day at a time.</p>
<p style="font-size: 17px; margin: 0 0 24px 0;">Over the coming days, we'll be sharing tips, tools, and simple ideas to help make daily life at home a little easier, calmer, and smarter.</p>
<p style="font-size: 17px; margin: 0 0 24px 0;">We're always here if you have any questions or thoughts. Just reply to this email, and you'll reach a real human.</p>
<p style="font-size: 17px; margin: 0 0 8px 0;">With warmth,</p>
<p style="font-size: 17px; font-weight: 500; margin: 0;">The Betadomot Team</p>
<div style="text-align: center; padding-top: 40px; border-top: 1px solid #f5f5f5;">
<p style="font-size: 14px; color: #888888; margin: 40px 0 0 0;"><a href="{site}" style="color: #000000; text-decoration: none;">betadomot.blog</a></p>
</div>
</div>
</div>
</body>
</html>"#,
            site = self.website_url,
        )
    }

    fn welcome_email_text(&self) -> String {
        format!(
            "Hey there,\n\n\
             Welcome to Betadomot! We're truly glad you're here.\n\n\
             This isn't just a home platform. It's a growing space created to help people \
             like you live more intentionally, comfortably, and beautifully, one day at a time.\n\n\
             Over the coming days, we'll be sharing tips, tools, and simple ideas to help make \
             daily life at home a little easier, calmer, and smarter.\n\n\
             We're always here if you have any questions or thoughts. Just reply to this email, \
             and you'll reach a real human.\n\n\
             With warmth,\n\
             The Betadomot Team\n\n\
             ---\n\
             {}",
            self.website_url
        )
    }
}

/// Convert lightly-marked-up newsletter content into HTML
///
/// Handles `#`/`##`/`###` headings, `- ` bullet lists, and paragraph
/// breaks. Anything fancier belongs in `html_content` supplied by the
/// caller.
pub fn format_content_html(content: &str) -> String {
    let mut out = Vec::new();
    let mut in_list = false;

    for line in content.lines() {
        let line = line.trim();

        if let Some(item) = line.strip_prefix("- ") {
            if !in_list {
                out.push("<ul>".to_string());
                in_list = true;
            }
            out.push(format!("<li>{}</li>", item));
            continue;
        }

        if in_list {
            out.push("</ul>".to_string());
            in_list = false;
        }

        if let Some(heading) = line.strip_prefix("### ") {
            out.push(format!("<h3>{}</h3>", heading));
        } else if let Some(heading) = line.strip_prefix("## ") {
            out.push(format!("<h2>{}</h2>", heading));
        } else if let Some(heading) = line.strip_prefix("# ") {
            out.push(format!("<h1>{}</h1>", heading));
        } else if !line.is_empty() {
            out.push(format!("<p>{}</p>", line));
        }
    }

    if in_list {
        out.push("</ul>".to_string());
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> EmailService {
        EmailService::with_client(
            ResendClient::with_base_url("test-key", "http://localhost:0"),
            "hello@betadomot.blog",
            "https://betadomot.blog",
        )
    }

    #[test]
    fn formats_headings_and_paragraphs() {
        let html = format_content_html("# Title\n\nSome text\n## Section");
        assert_eq!(html, "<h1>Title</h1>\n<p>Some text</p>\n<h2>Section</h2>");
    }

    #[test]
    fn formats_bullet_lists() {
        let html = format_content_html("Intro\n- one\n- two\nOutro");
        assert_eq!(
            html,
            "<p>Intro</p>\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n<p>Outro</p>"
        );
    }

    #[test]
    fn trailing_list_is_closed() {
        let html = format_content_html("- only");
        assert_eq!(html, "<ul>\n<li>only</li>\n</ul>");
    }

    #[test]
    fn newsletter_template_embeds_subject_and_links() {
        let html = service().newsletter_html("Spring Refresh", "content here");
        assert!(html.contains("Spring Refresh"));
        assert!(html.contains("<p>content here</p>"));
        assert!(html.contains("https://betadomot.blog/newsletter/unsubscribe"));
    }

    #[tokio::test]
    async fn welcome_email_is_skipped_without_client() {
        let service = EmailService {
            client: None,
            from_email: "hello@betadomot.blog".to_string(),
            from_name: "Betadomot".to_string(),
            website_url: "https://betadomot.blog".to_string(),
        };
        assert!(service.send_welcome_email("a@b.com").await.is_ok());
    }

    #[tokio::test]
    async fn newsletter_without_client_is_an_error() {
        let service = EmailService {
            client: None,
            from_email: "hello@betadomot.blog".to_string(),
            from_name: "Betadomot".to_string(),
            website_url: "https://betadomot.blog".to_string(),
        };
        let result = service
            .send_newsletter("s", "c", "", &["a@b.com".to_string()])
            .await;
        assert!(matches!(result, Err(EmailError::NotConfigured)));
    }

    #[tokio::test]
    async fn newsletter_without_recipients_is_an_error() {
        let result = service().send_newsletter("s", "c", "", &[]).await;
        assert!(matches!(result, Err(EmailError::NoRecipients)));
    }
}
