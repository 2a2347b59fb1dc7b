use actix_cors::Cors;
use actix_web::{
    middleware::{self, Condition},
    web, App, HttpServer,
};
use clap::Parser;
use database::{
    database::{database::Database, options::DatabaseOptions},
    persistence::storage::StorageEngine,
};
use std::io;

mod error;
mod routes;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_URI: &str = "data";

/// 📀 Pessoas REST server, a CRUD API over the person collection plus an embedded browser client
#[derive(Parser, Debug)]
struct Cli {
    /// Port the server will run on, falls back to the PORT environment variable, then 5000
    #[clap(short, long)]
    port: Option<u16>,

    /// Where the collection lives ("file:<dir>", a bare directory, or "memory:"), falls back
    /// to the DATABASE_URI environment variable. Note: Does not support shell paths, e.g. ~
    #[clap(short, long)]
    database_uri: Option<String>,

    /// Address the server will run on
    #[clap(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Log every http request
    #[clap(long)]
    log_http: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,
}

fn resolve_port(args: &Cli) -> io::Result<u16> {
    if let Some(port) = args.port {
        return Ok(port);
    }

    match std::env::var("PORT") {
        Ok(value) => value.parse::<u16>().map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("PORT must be a number between 1 and 65535, got: {}", value),
            )
        }),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

fn resolve_storage_engine(args: &Cli) -> io::Result<StorageEngine> {
    let uri = match &args.database_uri {
        Some(uri) => uri.clone(),
        None => std::env::var("DATABASE_URI").unwrap_or_else(|_| DEFAULT_DATABASE_URI.to_string()),
    };

    uri.parse::<StorageEngine>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Loads .env before anything reads the environment
    dotenvy::dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let port = resolve_port(&args)?;
    let storage_engine = resolve_storage_engine(&args)?;

    let database_options = DatabaseOptions::default().set_storage_engine(storage_engine);

    let request_manager = Database::new(database_options).start().map_err(|e| {
        log::error!("Unable to start the database: {}", e);

        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    // Set up Ctrl-C handler
    let set_handler_request_manager = request_manager.clone();

    ctrlc::set_handler(move || {
        let shutdown_response = set_handler_request_manager
            .send_shutdown_request()
            .expect("Should not timeout");

        log::info!("Shutting down server: {}", shutdown_response);

        std::process::exit(0);
    })
    .expect("Error setting Ctrl-C handler");

    log::info!("Starting HTTP server on port {}.", port);

    log::info!("Client app: http://{}:{}/app", args.address, port);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(request_manager.clone()))
            .configure(routes::service_config)
            .wrap(Cors::permissive())
            .wrap(Condition::new(args.log_http, middleware::Logger::default()))
    })
    .workers(args.http_workers)
    .bind((args.address, port))?
    .run()
    .await
}
