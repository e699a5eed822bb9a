use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_api::db::Database;
use blog_api::handlers::{
    admin, categories, comments, guides, newsletter, newsletter_admin, posts, products,
};
use blog_api::middleware::BasicAuth;
use blog_api::services::EmailService;
use blog_api::Config;

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "blog-api",
    }))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-api v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let db = Database::new(&config.supabase.url, &config.supabase.key);
    tracing::info!("Connected to hosted store at {}", config.supabase.url);

    let email = EmailService::new(&config.email);

    let db_data = web::Data::new(db);
    let email_data = web::Data::new(email);

    let bind_address = (config.app.host.clone(), config.app.port);
    tracing::info!("Starting HTTP server at {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let admin_auth = BasicAuth::new(&config.admin.username, &config.admin.password);

        App::new()
            .app_data(db_data.clone())
            .app_data(email_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::get_posts))
                            .route(web::post().to(posts::create_post)),
                    )
                    .route("/{slug}/clap", web::post().to(posts::clap_post))
                    .route("/{slug}/claps", web::get().to(posts::get_claps))
                    .service(
                        web::resource("/{slug}/comments")
                            .route(web::get().to(comments::get_comments))
                            .route(web::post().to(comments::create_comment)),
                    )
                    .route("/{slug}", web::get().to(posts::get_post)),
            )
            .service(
                web::scope("/guides")
                    .service(
                        web::resource("")
                            .route(web::get().to(guides::get_guides))
                            .route(web::post().to(guides::create_guide)),
                    )
                    .route(
                        "/category/{category}",
                        web::get().to(guides::get_guides_by_category),
                    )
                    .route("/{slug}", web::get().to(guides::get_guide)),
            )
            .service(
                web::scope("/newsletter")
                    .route("/subscribe", web::post().to(newsletter::subscribe))
                    .route("/unsubscribe", web::post().to(newsletter::unsubscribe))
                    .route("/stats", web::get().to(newsletter::get_stats)),
            )
            .service(
                web::scope("/products")
                    .route("", web::get().to(products::get_products))
                    .route("/{slug}", web::get().to(products::get_product)),
            )
            .service(
                web::scope("/admin")
                    .wrap(admin_auth)
                    .route("/dashboard", web::get().to(admin::get_dashboard))
                    // Post management
                    .route("/posts", web::get().to(admin::get_all_posts))
                    .route(
                        "/posts/{slug}/featured-hero",
                        web::post().to(posts::set_featured_hero),
                    )
                    .route(
                        "/posts/{slug}/featured-hero",
                        web::delete().to(posts::unset_featured_hero),
                    )
                    .route("/posts/{slug}", web::put().to(admin::update_post))
                    .route("/posts/{slug}", web::delete().to(admin::delete_post))
                    // Guide hero management
                    .route(
                        "/guides/{slug}/featured-hero",
                        web::post().to(guides::set_featured_hero),
                    )
                    .route(
                        "/guides/{slug}/featured-hero",
                        web::delete().to(guides::unset_featured_hero),
                    )
                    // Comment management
                    .route("/comments", web::get().to(admin::get_all_comments))
                    .route("/comments/{id}", web::delete().to(admin::delete_comment))
                    // Newsletter management
                    .route("/subscribers/export", web::get().to(admin::export_subscribers))
                    .route("/subscribers", web::get().to(admin::get_all_subscribers))
                    .route(
                        "/newsletter/send",
                        web::post().to(newsletter_admin::send_newsletter),
                    )
                    .route(
                        "/newsletter/templates",
                        web::get().to(newsletter_admin::get_templates),
                    )
                    .route(
                        "/newsletter/preview",
                        web::post().to(newsletter_admin::preview_newsletter),
                    )
                    .route("/newsletter/stats", web::get().to(newsletter_admin::get_stats))
                    // Product management
                    .route("/products", web::get().to(products::get_admin_products))
                    .route("/products", web::post().to(products::create_product))
                    .route("/products/{slug}", web::put().to(products::update_product))
                    .route(
                        "/products/{slug}",
                        web::delete().to(products::delete_product),
                    )
                    // Product category management
                    .route(
                        "/product-categories",
                        web::get().to(categories::get_product_categories),
                    )
                    .route(
                        "/product-categories",
                        web::post().to(categories::create_product_category),
                    )
                    .route(
                        "/product-categories/{id}",
                        web::put().to(categories::update_product_category),
                    )
                    .route(
                        "/product-categories/{id}",
                        web::delete().to(categories::delete_product_category),
                    )
                    // Lifestyle collection management
                    .route(
                        "/lifestyle-collections",
                        web::get().to(categories::get_lifestyle_collections),
                    )
                    .route(
                        "/lifestyle-collections",
                        web::post().to(categories::create_lifestyle_collection),
                    )
                    .route(
                        "/lifestyle-collections/{id}",
                        web::put().to(categories::update_lifestyle_collection),
                    )
                    .route(
                        "/lifestyle-collections/{id}",
                        web::delete().to(categories::delete_lifestyle_collection),
                    )
                    // Blog-to-product collection management
                    .route(
                        "/blog-to-product-collections",
                        web::get().to(categories::get_blog_to_product_collections),
                    )
                    .route(
                        "/blog-to-product-collections",
                        web::post().to(categories::create_blog_to_product_collection),
                    )
                    .route(
                        "/blog-to-product-collections/{id}",
                        web::put().to(categories::update_blog_to_product_collection),
                    )
                    .route(
                        "/blog-to-product-collections/{id}",
                        web::delete().to(categories::delete_blog_to_product_collection),
                    )
                    // Product assignment management
                    .route("/assign-products", web::post().to(categories::assign_products))
                    .route(
                        "/collection-products/{type}/{id}",
                        web::get().to(categories::get_collection_products),
                    ),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
