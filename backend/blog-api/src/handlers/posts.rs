/// Post handlers - HTTP endpoints for blog post operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::services::slug::unique_slug;

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: Option<String>,
    #[serde(default)]
    pub featured_hero: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub homepage_section: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "readTime")]
    pub read_time: String,
    #[serde(default, rename = "featuredImage")]
    pub featured_image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Value,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub featured_hero: bool,
    #[serde(default)]
    pub homepage_section: String,
    #[serde(default)]
    pub homepage_order: i64,
    #[serde(default)]
    pub callout_points: Vec<String>,
    #[serde(default)]
    pub callout_cta: String,
    #[serde(default)]
    pub callout_sidebar_title: String,
    #[serde(default)]
    pub callout_sidebar_content: String,
}

impl CreatePostRequest {
    /// Store row for this payload, without the generated slug
    pub fn to_row(&self) -> Value {
        let mut row = json!({
            "title": self.title,
            "excerpt": self.excerpt,
            "content": self.content,
            "read_time": self.read_time,
            "featured_image": self.featured_image,
            "tags": self.tags,
            "images_json": self.images,
            "category": self.category,
            "featured": self.featured,
            "featured_hero": self.featured_hero,
        });

        // Optional columns only when they carry a value; absent keys let
        // the store keep its defaults.
        if !self.homepage_section.is_empty() {
            row["homepage_section"] = json!(self.homepage_section);
        }
        if self.homepage_order > 0 {
            row["homepage_order"] = json!(self.homepage_order);
        }
        if !self.callout_points.is_empty() {
            row["callout_points"] = json!(self.callout_points);
        }
        if !self.callout_cta.is_empty() {
            row["callout_cta"] = json!(self.callout_cta);
        }
        if !self.callout_sidebar_title.is_empty() {
            row["callout_sidebar_title"] = json!(self.callout_sidebar_title);
        }
        if !self.callout_sidebar_content.is_empty() {
            row["callout_sidebar_content"] = json!(self.callout_sidebar_content);
        }

        row
    }
}

fn is_truthy(flag: &Option<String>) -> bool {
    matches!(flag.as_deref(), Some("true") | Some("1"))
}

/// List posts with filtering, sorting, and pagination
pub async fn get_posts(
    db: web::Data<Database>,
    query: web::Query<PostListQuery>,
) -> Result<HttpResponse> {
    let limit = match query.limit {
        Some(0) | None => 10,
        Some(limit) => limit,
    };
    let offset = query.offset.unwrap_or(0);

    let mut q = db.from("posts").select("*");
    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        q = q.eq("category", category);
    }
    if is_truthy(&query.featured) {
        q = q.eq("featured", "true");
    }
    if is_truthy(&query.featured_hero) {
        q = q.eq("featured_hero", "true");
    }
    if let Some(section) = query.homepage_section.as_deref().filter(|s| !s.is_empty()) {
        q = q.eq("homepage_section", section);
    }

    q = match query.sort.as_deref() {
        Some("views") => q.order_desc("views"),
        Some("homepage_order") => q.order_asc("homepage_order"),
        _ => q.order_desc("published_at"),
    };

    let rows = q.limit(limit).offset(offset).fetch().await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Create a post with a generated unique slug
pub async fn create_post(
    db: web::Data<Database>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    tracing::info!(title = %req.title, "creating post");

    let slug = unique_slug(&db, "posts", &req.title).await?;

    // Promoting a new hero: clear the flag everywhere first, best-effort.
    if req.featured_hero {
        if let Err(err) = db
            .from("posts")
            .eq("featured_hero", "true")
            .update(&json!({ "featured_hero": false }))
            .await
        {
            tracing::warn!("failed to clear existing featured hero: {}", err);
        }
    }

    let mut row = req.to_row();
    row["slug"] = json!(slug);
    row["views"] = json!(0);

    db.from("posts").insert(&row).await?;

    tracing::info!(%slug, "post created");
    Ok(HttpResponse::Created().json(json!({ "slug": slug })))
}

/// Fetch a single post and bump its view counter
pub async fn get_post(db: web::Data<Database>, slug: web::Path<String>) -> Result<HttpResponse> {
    let slug = slug.into_inner();

    let mut post = db
        .from("posts")
        .select("*")
        .eq("slug", &slug)
        .fetch_optional()
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    // Increment the view count without holding up the response. The write
    // is read-then-update; concurrent readers can drop increments.
    if let Some(views) = post.get("views").and_then(Value::as_i64) {
        let new_views = views + 1;
        let db = db.get_ref().clone();
        let view_slug = slug.clone();
        tokio::spawn(async move {
            if let Err(err) = db
                .from("posts")
                .eq("slug", &view_slug)
                .update(&json!({ "views": new_views }))
                .await
            {
                tracing::debug!(slug = %view_slug, "view count update failed: {}", err);
            }
        });
        post["views"] = json!(new_views);
    }

    // Older rows predate the claps column.
    if post.get("claps").is_none() {
        post["claps"] = json!(0);
    }

    Ok(HttpResponse::Ok().json(post))
}

/// Increment the clap counter and return the new value
pub async fn clap_post(db: web::Data<Database>, slug: web::Path<String>) -> Result<HttpResponse> {
    let slug = slug.into_inner();

    let row = db
        .from("posts")
        .select("claps")
        .eq("slug", &slug)
        .fetch_optional()
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    let claps = row.get("claps").and_then(Value::as_i64).unwrap_or(0) + 1;

    db.from("posts")
        .eq("slug", &slug)
        .update(&json!({ "claps": claps }))
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "claps": claps })))
}

/// Current clap count for a post
pub async fn get_claps(db: web::Data<Database>, slug: web::Path<String>) -> Result<HttpResponse> {
    let row = db
        .from("posts")
        .select("claps")
        .eq("slug", slug.as_str())
        .fetch_optional()
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    let claps = row.get("claps").and_then(Value::as_i64).unwrap_or(0);
    Ok(HttpResponse::Ok().json(json!({ "claps": claps })))
}

/// Promote a post to featured hero (clearing any current holder first)
pub async fn set_featured_hero(
    db: web::Data<Database>,
    slug: web::Path<String>,
) -> Result<HttpResponse> {
    if let Err(err) = db
        .from("posts")
        .eq("featured_hero", "true")
        .update(&json!({ "featured_hero": false }))
        .await
    {
        tracing::warn!("failed to clear existing featured hero: {}", err);
    }

    db.from("posts")
        .eq("slug", slug.as_str())
        .update(&json!({ "featured_hero": true }))
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post set as featured hero",
    })))
}

/// Remove featured hero status from a post
pub async fn unset_featured_hero(
    db: web::Data<Database>,
    slug: web::Path<String>,
) -> Result<HttpResponse> {
    db.from("posts")
        .eq("slug", slug.as_str())
        .update(&json!({ "featured_hero": false }))
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Featured hero status removed",
    })))
}
