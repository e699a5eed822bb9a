/// Category and collection management
///
/// The merchandising taxonomy is still fixture-driven: listings serve a
/// curated set while the storefront tables are being migrated, and
/// mutations acknowledge without persisting.
/// TODO: back product categories with the product_categories table once
/// the storefront migration lands.
use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use crate::error::Result;

/// Product categories shown on the storefront and homepage
pub async fn get_product_categories() -> Result<HttpResponse> {
    let categories = json!([
        {
            "id": "furniture",
            "name": "Furniture",
            "slug": "furniture",
            "description": "Chairs, tables, beds, storage furniture for Nigerian homes",
            "icon": "sofa",
            "color": "bg-amber-100 text-amber-700",
            "display_order": 100,
            "active": true,
            "featured": true,
            "show_on_homepage": true,
            "product_count": 0,
        },
        {
            "id": "bedroom-comfort",
            "name": "Bedroom Comfort",
            "slug": "bedroom-comfort",
            "description": "Bed sheets, pillows, comforters, and bedroom essentials",
            "icon": "bed",
            "color": "bg-purple-100 text-purple-700",
            "display_order": 90,
            "active": true,
            "featured": true,
            "show_on_homepage": true,
            "product_count": 0,
        },
        {
            "id": "bath-towels",
            "name": "Bath & Towels",
            "slug": "bath-towels",
            "description": "Towels, bath mats, shower essentials, and bathroom accessories",
            "icon": "droplets",
            "color": "bg-blue-100 text-blue-700",
            "display_order": 80,
            "active": true,
            "featured": true,
            "show_on_homepage": true,
            "product_count": 0,
        },
        {
            "id": "home-decor",
            "name": "Home Decor",
            "slug": "home-decor",
            "description": "Wall art, decorative items, plants, and styling accessories",
            "icon": "palette",
            "color": "bg-green-100 text-green-700",
            "display_order": 70,
            "active": true,
            "featured": true,
            "show_on_homepage": true,
            "product_count": 0,
        },
        {
            "id": "kitchen-dining",
            "name": "Kitchen & Dining",
            "slug": "kitchen-dining",
            "description": "Cookware, tableware, kitchen tools, and dining essentials",
            "icon": "chef-hat",
            "color": "bg-red-100 text-red-700",
            "display_order": 60,
            "active": true,
            "featured": true,
            "show_on_homepage": true,
            "product_count": 0,
        },
        {
            "id": "lighting",
            "name": "Lighting",
            "slug": "lighting",
            "description": "Lamps, pendant lights, and power-efficient lighting",
            "icon": "lamp",
            "color": "bg-yellow-100 text-yellow-700",
            "display_order": 50,
            "active": true,
            "featured": false,
            "show_on_homepage": false,
            "product_count": 0,
        },
    ]);

    Ok(HttpResponse::Ok().json(categories))
}

pub async fn create_product_category(_body: web::Json<Value>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Category created successfully",
    })))
}

pub async fn update_product_category(
    id: web::Path<String>,
    _body: web::Json<Value>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Category updated successfully",
        "id": id.as_str(),
    })))
}

pub async fn delete_product_category(id: web::Path<String>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Category deleted successfully",
        "id": id.as_str(),
    })))
}

/// Lifestyle collections - curated shopping rails
pub async fn get_lifestyle_collections() -> Result<HttpResponse> {
    let collections = json!([
        {
            "id": "fresh-picked-favorites",
            "title": "Fresh-Picked Favorites",
            "subtitle": "Our team's latest discoveries for your Nigerian home",
            "badge_text": "New",
            "badge_color": "bg-green-500",
            "title_color": "text-green-700",
            "active": true,
            "display_order": 100,
            "show_on_homepage": true,
            "show_on_products_page": true,
        },
        {
            "id": "home-decor-under-30k",
            "title": "Home Decor Under \u{20a6}30,000",
            "subtitle": "Style your home without breaking the bank",
            "badge_text": "Budget",
            "badge_color": "bg-blue-500",
            "title_color": "text-blue-700",
            "active": true,
            "display_order": 90,
            "show_on_homepage": true,
            "show_on_products_page": true,
        },
        {
            "id": "2-bedroom-apartment-setup",
            "title": "2-Bedroom Apartment Setup",
            "subtitle": "Complete furniture solutions for compact Nigerian homes",
            "badge_text": "Complete",
            "badge_color": "bg-purple-500",
            "title_color": "text-purple-700",
            "active": true,
            "display_order": 80,
            "show_on_homepage": true,
            "show_on_products_page": true,
        },
        {
            "id": "nepa-friendly-lighting",
            "title": "NEPA-Friendly Lighting",
            "subtitle": "Power-efficient lighting that works with Nigerian electricity",
            "badge_text": "Power Save",
            "badge_color": "bg-yellow-500",
            "title_color": "text-yellow-700",
            "active": true,
            "display_order": 70,
            "show_on_homepage": false,
            "show_on_products_page": true,
        },
        {
            "id": "lagos-apartment-essentials",
            "title": "Lagos Apartment Essentials",
            "subtitle": "Space-saving solutions for urban Nigerian living",
            "badge_text": "Space Saver",
            "badge_color": "bg-orange-500",
            "title_color": "text-orange-700",
            "active": true,
            "display_order": 60,
            "show_on_homepage": false,
            "show_on_products_page": true,
        },
        {
            "id": "weekend-diy-projects",
            "title": "Weekend DIY Projects",
            "subtitle": "Simple furniture and decor you can build yourself",
            "badge_text": "DIY",
            "badge_color": "bg-red-500",
            "title_color": "text-red-700",
            "active": true,
            "display_order": 50,
            "show_on_homepage": false,
            "show_on_products_page": true,
        },
    ]);

    Ok(HttpResponse::Ok().json(collections))
}

pub async fn create_lifestyle_collection(_body: web::Json<Value>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Collection created successfully",
    })))
}

pub async fn update_lifestyle_collection(
    id: web::Path<String>,
    _body: web::Json<Value>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Collection updated successfully",
        "id": id.as_str(),
    })))
}

pub async fn delete_lifestyle_collection(id: web::Path<String>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Collection deleted successfully",
        "id": id.as_str(),
    })))
}

/// Blog-to-product collections - shopping rails attached to blog categories
pub async fn get_blog_to_product_collections() -> Result<HttpResponse> {
    let collections = json!([
        {
            "id": "home-and-health",
            "blog_category": "Home & Health",
            "blog_description": "Creating healthy living spaces in Nigerian homes",
            "blog_color": "text-green-600",
            "product_category_title": "Shop Wellness Products",
            "product_badge": "Health",
            "product_badge_color": "bg-green-500",
            "active": true,
            "display_order": 100,
            "show_on_homepage": true,
            "show_on_products_page": false,
        },
        {
            "id": "small-space-living",
            "blog_category": "Small Space Living",
            "blog_description": "Maximizing tiny apartments and rooms across Nigeria",
            "blog_color": "text-blue-600",
            "product_category_title": "Shop Space-Saving Furniture",
            "product_badge": "Space Save",
            "product_badge_color": "bg-blue-500",
            "active": true,
            "display_order": 90,
            "show_on_homepage": true,
            "show_on_products_page": false,
        },
        {
            "id": "diy-and-crafts",
            "blog_category": "DIY & Crafts",
            "blog_description": "Build and create beautiful pieces for your home",
            "blog_color": "text-orange-600",
            "product_category_title": "Shop DIY Tools & Materials",
            "product_badge": "DIY",
            "product_badge_color": "bg-orange-500",
            "active": true,
            "display_order": 80,
            "show_on_homepage": true,
            "show_on_products_page": false,
        },
        {
            "id": "budget-decorating",
            "blog_category": "Budget Decorating",
            "blog_description": "Beautiful home styling on a Nigerian budget",
            "blog_color": "text-purple-600",
            "product_category_title": "Shop Affordable Decor",
            "product_badge": "Budget",
            "product_badge_color": "bg-purple-500",
            "active": true,
            "display_order": 70,
            "show_on_homepage": true,
            "show_on_products_page": false,
        },
        {
            "id": "nigerian-style",
            "blog_category": "Nigerian Style",
            "blog_description": "Celebrating local design and cultural aesthetics",
            "blog_color": "text-amber-600",
            "product_category_title": "Shop Local-Inspired Pieces",
            "product_badge": "Local",
            "product_badge_color": "bg-amber-500",
            "active": true,
            "display_order": 60,
            "show_on_homepage": true,
            "show_on_products_page": false,
        },
        {
            "id": "seasonal-living",
            "blog_category": "Seasonal Living",
            "blog_description": "Adapting your home for dry and rainy seasons",
            "blog_color": "text-teal-600",
            "product_category_title": "Shop Seasonal Essentials",
            "product_badge": "Season",
            "product_badge_color": "bg-teal-500",
            "active": true,
            "display_order": 50,
            "show_on_homepage": true,
            "show_on_products_page": false,
        },
    ]);

    Ok(HttpResponse::Ok().json(collections))
}

pub async fn create_blog_to_product_collection(_body: web::Json<Value>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Blog-to-product collection created successfully",
    })))
}

pub async fn update_blog_to_product_collection(
    id: web::Path<String>,
    _body: web::Json<Value>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Blog-to-product collection updated successfully",
        "id": id.as_str(),
    })))
}

pub async fn delete_blog_to_product_collection(id: web::Path<String>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Blog-to-product collection deleted successfully",
        "id": id.as_str(),
    })))
}

/// Attach products to a collection
pub async fn assign_products(body: web::Json<Value>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Products assigned successfully",
        "data": body.into_inner(),
    })))
}

/// Products assigned to a collection
pub async fn get_collection_products(path: web::Path<(String, String)>) -> Result<HttpResponse> {
    let (collection_type, collection_id) = path.into_inner();

    let products = json!([
        {
            "slug": "luxury-bed-set",
            "name": "Luxury Bed Set",
            "price": 89000,
            "image": "https://example.com/bed.jpg",
            "category": "Bedroom",
            "in_stock": true,
            "collection": collection_type.clone(),
            "assigned_to": collection_id.clone(),
        },
        {
            "slug": "modern-chair",
            "name": "Modern Office Chair",
            "price": 45000,
            "image": "https://example.com/chair.jpg",
            "category": "Furniture",
            "in_stock": true,
            "collection": collection_type,
            "assigned_to": collection_id,
        },
    ]);

    Ok(HttpResponse::Ok().json(products))
}
