use std::time::Duration;

use actix_cors::Cors;
use actix_web::{
    middleware::{self, Condition},
    web, App, HttpServer,
};
use anyhow::anyhow;
use clap::Parser;
use pessoas::{
    database::{options::DatabaseOptions, pool::PoolManager, request_manager::RequestManager},
    persistence::storage::{
        memory::MemoryStorage, postgres::PgStorage, StorageEngine, StorageEngineKind,
    },
};

mod assets;
mod error;
mod routes;

/// 📇 Pessoas HTTP Server, create / read / update / delete people over a JSON api plus a page listing them
#[derive(Parser, Debug)]
struct Cli {
    /// Port the http server will run on
    #[clap(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Address the http server will run on
    #[clap(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Logs every http request
    #[clap(long)]
    log_http: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,

    /// Where people are stored: `postgres`, or `memory` for a store that lives as long as the process
    #[clap(long, default_value = "postgres")]
    storage: StorageEngineKind,

    #[clap(long, env = "DB_HOST", default_value = "localhost")]
    db_host: String,

    #[clap(long, env = "DB_PORT", default_value = "5432")]
    db_port: u16,

    #[clap(long, env = "DB_USER", default_value = "postgres")]
    db_user: String,

    #[clap(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    db_password: String,

    #[clap(long, env = "DB_NAME", default_value = "crud_db")]
    db_name: String,

    /// Maximum number of open connections, further requests wait for a free one
    #[clap(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    db_pool_size: usize,

    #[clap(long, default_value_t = 5)]
    connect_timeout_secs: u64,

    /// Exit on startup when the store cannot be reached, instead of answering every request with a server error
    #[clap(long)]
    fail_fast: bool,

    /// Creates the `pessoa` table on startup if it does not exist
    #[clap(long)]
    init_schema: bool,
}

impl Cli {
    fn database_options(&self) -> DatabaseOptions {
        DatabaseOptions::default()
            .set_host(self.db_host.clone())
            .set_port(self.db_port)
            .set_credentials(self.db_user.clone(), self.db_password.clone())
            .set_database(self.db_name.clone())
            .set_max_connections(self.db_pool_size)
            .set_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .set_storage_engine(self.storage)
    }
}

async fn create_storage(args: &Cli) -> anyhow::Result<StorageEngine> {
    let options = args.database_options();

    match options.storage_engine {
        StorageEngineKind::Postgres => {
            let pool_manager = PoolManager::initialize(&options);

            if let Err(err) = pool_manager.check_connection().await {
                if args.fail_fast {
                    return Err(anyhow!("Store is unreachable: {}", err));
                }

                log::warn!(
                    "Store is unreachable, requests will fail until it is available: {}",
                    err
                );
            }

            Ok(StorageEngine::Postgres(
                PgStorage::new(pool_manager).set_create_table(args.init_schema),
            ))
        }
        StorageEngineKind::Memory => {
            log::warn!("Using in-memory storage, people are lost when the process exits");

            Ok(StorageEngine::Memory(MemoryStorage::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let storage = create_storage(&args).await?;

    let request_manager = web::Data::new(RequestManager::new(storage));

    if let Err(err) = request_manager.init().await {
        if args.fail_fast {
            return Err(anyhow!("Unable to initialize storage: {}", err));
        }

        log::error!("Unable to initialize storage: {}", err);
    }

    log::info!(
        "🚀 Server running on http://{}:{} [Storage: {}]",
        args.address,
        args.port,
        args.storage
    );

    let log_http = args.log_http;
    let server_request_manager = request_manager.clone();

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(server_request_manager.clone())
            .configure(routes::configure)
            .configure(assets::configure)
            .wrap(Cors::permissive())
            .wrap(Condition::new(log_http, middleware::Logger::default()))
    })
    .workers(args.http_workers)
    .bind((args.address.clone(), args.port))?
    .run()
    .await?;

    request_manager.shutdown();

    log::info!("Server stopped");

    Ok(())
}
