//! HTTP request handlers.

pub mod health;
pub mod posts;

use actix_web::web;

/// Configure all API routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{slug}", web::get().to(posts::get_post_by_slug))
                    .route("/{id}", web::patch().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/publish", web::post().to(posts::publish_post))
                    .route("/{id}/publish", web::delete().to(posts::unpublish_post)),
            ),
    );
}
