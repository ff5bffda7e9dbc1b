pub mod chat;

use actix_web::web;

use crate::error::AppError;

/// Route table, shared between the server bootstrap and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // malformed/mistyped JSON bodies get the same error shape as domain
    // validation failures
    cfg.app_data(
        web::JsonConfig::default().error_handler(|_, _| AppError::InvalidMessage.into()),
    )
    .route("/", web::get().to(chat::index))
    .route("/chat", web::get().to(chat::chat_page))
    .route("/health", web::get().to(chat::health))
    .service(
        web::scope("/api")
            .route("/chat", web::get().to(chat::list_messages))
            .route("/chat", web::post().to(chat::post_message)),
    );
}
