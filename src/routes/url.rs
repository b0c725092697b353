use actix_web::web;

use crate::handlers::{create_handler, delete_handler, redirect_handler};

// Configure all routes function
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/urls")
            .route("", web::post().to(create_handler))
            .route("/{alias}", web::delete().to(delete_handler)),
        // add more routes here
    );

    // Public redirect, registered last
    cfg.route("/{alias}", web::get().to(redirect_handler));
}
