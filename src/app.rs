use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{debug, info};

use crate::{
    config::{Config, Environment},
    db::Database,
    errors::AppError,
    handlers::{json_config, UrlServiceData},
    middleware::{build_cors, RequestLogger},
    routes, services,
};

pub type AppResult<T> = Result<T, AppError>;

// Setup logging with custom format and configuration
fn setup_logging(config: &Config) -> AppResult<()> {
    let log_level = match config.app.environment {
        Environment::Development => config.app.log_level.clone(),
        Environment::Testing => "debug,actix_web=info".to_string(),
        Environment::Production => "info,actix_web=warn".to_string(),
    };

    let env = Env::default()
        .filter_or("RUST_LOG", log_level)
        .write_style_or("RUST_LOG_STYLE", "always");

    env_logger::try_init_from_env(env)
        .map_err(|e| AppError::Logger(format!("Failed to initialize logger: {}", e)))
}

pub async fn server() -> AppResult<()> {
    let config = Config::load()?;

    setup_logging(&config)?;

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {:?}", config.app.environment);
    info!("Short URLs will use base '{}'", config.app.base_url);
    info!(
        "Binding to {}:{} with {} workers",
        config.server.host, config.server.port, config.server.workers
    );

    if config.app.environment == Environment::Development {
        debug!("Full configuration: {:?}", config);
    }

    let db = Database::connect(&config.db).await?;
    let service: UrlServiceData = web::Data::from(services::build(&db, &config.app.base_url));

    let enable_debug_logging = config.app.environment != Environment::Production;

    let log_format = if enable_debug_logging {
        "%a \"%r\" %s %b %T \"%{Referer}i\" \"%{User-Agent}i\" %{x-request-id}o"
    } else {
        "%a \"%r\" %s %b %T"
    };

    let cors_config = config.cors.clone();

    let result = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(json_config())
            // Last wrap runs first: CORS, then the access log, then request ids
            .wrap(RequestLogger::new(enable_debug_logging))
            .wrap(Logger::new(log_format))
            .wrap(build_cors(&cors_config))
            .configure(routes::configure_routes)
    })
    .workers(config.server.workers)
    .bind((config.server.host.to_string(), config.server.port))?
    .run()
    .await;

    // Release connections whether the server stopped cleanly or not
    db.shutdown().await;
    info!("Server stopped");

    result.map_err(AppError::from)
}
