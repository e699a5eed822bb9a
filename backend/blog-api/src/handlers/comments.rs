/// Comment handlers - comments belong to a post by slug
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::db::Database;
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub body: String,
}

/// List a post's comments, oldest first
pub async fn get_comments(
    db: web::Data<Database>,
    slug: web::Path<String>,
) -> Result<HttpResponse> {
    let rows = db
        .from("comments")
        .select("*")
        .eq("post_slug", slug.as_str())
        .order_asc("created_at")
        .fetch()
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Add a comment to an existing post
pub async fn create_comment(
    db: web::Data<Database>,
    slug: web::Path<String>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    if req.author_name.is_empty() || req.body.is_empty() {
        return Err(AppError::BadRequest(
            "author_name and body are required".to_string(),
        ));
    }

    let slug = slug.into_inner();

    // Comments must attach to a real post.
    db.from("posts")
        .select("slug")
        .eq("slug", &slug)
        .fetch_optional()
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    let comment = json!({
        "post_slug": slug,
        "author_name": req.author_name,
        "author_email": req.author_email,
        "body": req.body,
    });

    db.from("comments").insert(&comment).await?;

    Ok(HttpResponse::Created().json(json!({ "status": "created" })))
}
