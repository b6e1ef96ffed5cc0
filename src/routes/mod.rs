use actix_web::web;

use crate::handlers::{index_handler, redirect_handler};

mod url;

// Configure all routes function
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index_handler));
    url::configure(cfg);
    // Catch-all for single segments; keep it registered last
    cfg.route("/{hash}", web::get().to(redirect_handler));
}
