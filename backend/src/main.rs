use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;

use learnhub::{api, AppConfig};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Try to load environment variables from .env file
    let env_source = if dotenv().is_ok() {
        Some(".env")
    } else if std::path::Path::new(".env.docker").exists() {
        dotenv::from_filename(".env.docker").ok();
        Some(".env.docker")
    } else {
        None
    };

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    match env_source {
        Some(file) => log::info!("Loaded environment variables from {}", file),
        None => log::warn!("No .env or .env.docker file found. Using environment variables from the system."),
    }

    let config = AppConfig::from_env().context("failed to load configuration")?;
    log::debug!("Auth configuration: {:?}", config.auth);

    // Connect to the database
    let db: DatabaseConnection = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    // Run migrations
    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;

    let db = web::Data::new(db);
    let server_url = config.server_url();
    log::info!("Starting server at http://{}", server_url);

    HttpServer::new(move || {
        // Configure CORS based on environment
        let cors = if config.cors_origin == "*" {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        } else {
            Cors::default()
                .allowed_origin(&config.cors_origin)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        };

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(db.clone())
            .configure(api::configure(&config.auth))
    })
    .bind(&server_url)?
    .run()
    .await?;

    Ok(())
}
