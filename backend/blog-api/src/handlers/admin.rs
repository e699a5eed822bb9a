/// Admin handlers - dashboard aggregation and content management
use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use crate::db::Database;
use crate::error::Result;
use crate::handlers::posts::CreatePostRequest;
use crate::models::{Pagination, Subscriber};

/// Aggregate counters for the admin dashboard
///
/// Views are summed client-side from a full column scan; fine at blog
/// scale, revisit if the posts table ever gets large.
pub async fn get_dashboard(db: web::Data<Database>) -> Result<HttpResponse> {
    let total_posts = db.from("posts").select("id").count().await?;

    let view_rows = db.from("posts").select("views").fetch().await?;
    let total_views: i64 = view_rows
        .iter()
        .filter_map(|row| row.get("views").and_then(Value::as_i64))
        .sum();

    let total_comments = db.from("comments").select("id").count().await?;

    let total_subscribers = db
        .from("newsletter_subscribers")
        .select("email")
        .eq("status", "subscribed")
        .count()
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "total_posts": total_posts,
        "total_views": total_views,
        "total_comments": total_comments,
        "total_subscribers": total_subscribers,
    })))
}

/// All posts for the management table
pub async fn get_all_posts(
    db: web::Data<Database>,
    query: web::Query<Pagination>,
) -> Result<HttpResponse> {
    let rows = db
        .from("posts")
        .select("*")
        .order_asc("published_at")
        .limit(query.limit_or(20))
        .offset(query.offset_or_zero())
        .fetch()
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Replace a post's editable fields
pub async fn update_post(
    db: web::Data<Database>,
    slug: web::Path<String>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    tracing::info!(slug = %slug, "updating post");

    db.from("posts")
        .eq("slug", slug.as_str())
        .update(&req.to_row())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "updated" })))
}

/// Delete a post and its comments
pub async fn delete_post(db: web::Data<Database>, slug: web::Path<String>) -> Result<HttpResponse> {
    let slug = slug.into_inner();

    // Comments reference the post by slug; remove them first so a failed
    // post delete never strands orphans.
    db.from("comments").eq("post_slug", &slug).delete().await?;
    db.from("posts").eq("slug", &slug).delete().await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "deleted" })))
}

/// All comments across all posts
pub async fn get_all_comments(
    db: web::Data<Database>,
    query: web::Query<Pagination>,
) -> Result<HttpResponse> {
    let rows = db
        .from("comments")
        .select("*")
        .order_asc("created_at")
        .limit(query.limit_or(50))
        .offset(query.offset_or_zero())
        .fetch()
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Delete a comment by id
pub async fn delete_comment(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse> {
    db.from("comments").eq("id", id.as_str()).delete().await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "deleted" })))
}

/// All subscribers, regardless of status
pub async fn get_all_subscribers(
    db: web::Data<Database>,
    query: web::Query<Pagination>,
) -> Result<HttpResponse> {
    let rows = db
        .from("newsletter_subscribers")
        .select("*")
        .order_asc("subscribed_at")
        .limit(query.limit_or(100))
        .offset(query.offset_or_zero())
        .fetch()
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// CSV export of active subscribers
pub async fn export_subscribers(db: web::Data<Database>) -> Result<HttpResponse> {
    let rows = db
        .from("newsletter_subscribers")
        .select("email,subscribed_at,source")
        .eq("status", "subscribed")
        .order_asc("subscribed_at")
        .fetch()
        .await?;

    let mut csv = String::from("email,subscribed_at,source\n");
    for row in rows {
        let subscriber: Subscriber = serde_json::from_value(row)?;
        csv.push_str(&format!(
            "{},{},{}\n",
            subscriber.email,
            subscriber.subscribed_at.unwrap_or_default(),
            subscriber.source.unwrap_or_default(),
        ));
    }

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=newsletter_subscribers.csv",
        ))
        .body(csv))
}
