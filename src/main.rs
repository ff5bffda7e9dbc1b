use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use tracing::info;

use chatboard_service::{config::Config, handlers, logging, services::MessageStore, state::AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let cfg = Config::from_env()?;
    let store = MessageStore::new(&cfg.store_path);
    store.ensure_exists().with_context(|| {
        format!(
            "failed to initialize chat log at {}",
            cfg.store_path.display()
        )
    })?;

    let state = AppState { store };
    let bind_addr = cfg.bind_addr();
    info!(%bind_addr, store_path = %cfg.store_path.display(), "starting chatboard-service");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(handlers::configure)
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind on {bind_addr}"))?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
