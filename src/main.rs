use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use portfolio_admin::auth::jwt::JwtSecret;
use portfolio_admin::auth::session::SessionCache;
use portfolio_admin::cache::RedisCache;
use portfolio_admin::config::AppConfig;
use portfolio_admin::create_pool;
use portfolio_admin::handlers;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Largest request body accepted, sized for CSV imports.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let db = create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run database migrations");
    let db_data = web::Data::new(db);

    // Initialize Redis cache
    let redis_cache = RedisCache::new(&config.redis_url)
        .await
        .expect("Failed to connect to Redis");
    let redis_data = web::Data::new(Arc::new(redis_cache));
    tracing::info!("Connected to Redis");

    let jwt_secret = web::Data::new(JwtSecret(config.jwt_secret.clone()));
    let sessions = web::Data::new(SessionCache::new(config.cache.session_ttl));

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let frontend_dir = config.frontend_dir.clone();
    let config_data = web::Data::new(config);
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .expose_headers(vec![actix_web::http::header::CONTENT_DISPOSITION])
            .max_age(3600);

        let mut app = App::new()
            .wrap(cors)
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .app_data(db_data.clone())
            .app_data(redis_data.clone())
            .app_data(jwt_secret.clone())
            .app_data(sessions.clone())
            .app_data(config_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes));

        if let Some(dir) = &frontend_dir {
            app = app.service(Files::new("/", dir).index_file("index.html"));
        }
        app
    })
    .bind(&bind_addr)?
    .run()
    .await
}
