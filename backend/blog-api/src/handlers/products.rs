/// Product handlers - storefront catalogue plus admin CRUD
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::services::slug::unique_slug;

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Payload for creating or updating a product
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub active: bool,
}

impl ProductRequest {
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.price <= 0.0 {
            return Err(AppError::BadRequest(
                "Name and price are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generate a random stock-keeping unit
pub fn generate_sku() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("SKU-{}", id[..8].to_uppercase())
}

/// Public catalogue listing - active products only
pub async fn get_products(
    db: web::Data<Database>,
    query: web::Query<ProductListQuery>,
) -> Result<HttpResponse> {
    let mut q = db.from("products").select("*").eq("active", "true");

    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        q = q.eq("category", category);
    }
    if query.featured.as_deref() == Some("true") {
        q = q.eq("featured", "true");
    }
    if let Some(limit) = query.limit.filter(|l| *l > 0) {
        q = q.limit(limit);
    }

    let rows = q.order_asc("created_at").fetch().await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Public single-product lookup (returns a one-element array)
pub async fn get_product(db: web::Data<Database>, slug: web::Path<String>) -> Result<HttpResponse> {
    let rows = db
        .from("products")
        .select("*")
        .eq("slug", slug.as_str())
        .eq("active", "true")
        .fetch()
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Admin listing - all products, including inactive
pub async fn get_admin_products(db: web::Data<Database>) -> Result<HttpResponse> {
    let rows = db
        .from("products")
        .select("*")
        .order_asc("created_at")
        .fetch()
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Create a product with generated slug and (if absent) SKU
pub async fn create_product(
    db: web::Data<Database>,
    req: web::Json<ProductRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let slug = unique_slug(&db, "products", &req.name).await?;
    let sku = if req.sku.is_empty() {
        generate_sku()
    } else {
        req.sku.clone()
    };
    let now = Utc::now().to_rfc3339();

    let product = json!({
        "id": Uuid::new_v4().to_string(),
        "slug": slug,
        "name": req.name,
        "description": req.description,
        "price": req.price,
        "sale_price": req.sale_price,
        "images": req.images,
        "category": req.category,
        "tags": req.tags,
        "stock": req.stock,
        "sku": sku,
        "weight": req.weight,
        "dimensions": req.dimensions,
        "featured": req.featured,
        "active": req.active,
        "created_at": now,
        "updated_at": now,
    });

    db.from("products").insert(&product).await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "created", "slug": slug })))
}

/// Update a product in place
pub async fn update_product(
    db: web::Data<Database>,
    slug: web::Path<String>,
    req: web::Json<ProductRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let changes = json!({
        "name": req.name,
        "description": req.description,
        "price": req.price,
        "sale_price": req.sale_price,
        "images": req.images,
        "category": req.category,
        "tags": req.tags,
        "stock": req.stock,
        "sku": req.sku,
        "weight": req.weight,
        "dimensions": req.dimensions,
        "featured": req.featured,
        "active": req.active,
        "updated_at": Utc::now().to_rfc3339(),
    });

    db.from("products")
        .eq("slug", slug.as_str())
        .update(&changes)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "updated" })))
}

/// Delete a product
pub async fn delete_product(
    db: web::Data<Database>,
    slug: web::Path<String>,
) -> Result<HttpResponse> {
    db.from("products").eq("slug", slug.as_str()).delete().await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "deleted" })))
}

#[cfg(test)]
mod tests {
    use super::generate_sku;

    #[test]
    fn sku_has_prefix_and_eight_hex_chars() {
        let sku = generate_sku();
        assert!(sku.starts_with("SKU-"));
        let tail = &sku["SKU-".len()..];
        assert_eq!(tail.len(), 8);
        assert!(tail.chars().all(|c| c.is_ascii_hexdigit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn skus_are_unique_enough() {
        assert_ne!(generate_sku(), generate_sku());
    }
}
