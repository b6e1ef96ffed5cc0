use actix_web::web;

use crate::handlers::{
    create_handler, delete_handler, get_all_handler, missing_hash_handler, redirect_handler,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/url")
            .route("/create", web::post().to(create_handler))
            .route("/get-all", web::get().to(get_all_handler))
            .route("/get", web::get().to(missing_hash_handler))
            .route("/get/", web::get().to(missing_hash_handler))
            .route("/get/{hash}", web::get().to(redirect_handler))
            .route("/delete/{id}", web::delete().to(delete_handler)),
    );
}
