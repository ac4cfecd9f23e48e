mod cli;

use crate::cli::{CacheBackendArg, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use jiff::Timestamp;
use std::net::SocketAddr;
use std::sync::Arc;
use tinylink_cache::{MokaLinkCache, RedisLinkCache};
use tinylink_core::{LinkCache, LinkStore};
use tinylink_flake::{Flake, FlakeSettings, SystemClock};
use tinylink_gateway::{App, AppState};
use tinylink_shortener::ShortenerService;
use tinylink_storage::{InMemoryLinkStore, PostgresLinkStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

// 2025-01-01T00:00:00Z, the zero point of the 39-bit tick space.
const GENERATOR_EPOCH_UNIX_SECONDS: i64 = 1_735_689_600;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        cache_backend = %config.cache,
        machine_id = config.machine_id,
        "starting tinylink gateway"
    );

    let generator = build_generator(config.machine_id)?;

    match (config.storage, config.cache) {
        (StorageBackendArg::InMemory, CacheBackendArg::InMemory) => {
            run_server(
                config.listen_addr,
                InMemoryLinkStore::new(),
                MokaLinkCache::new(),
                generator,
                config.public_base_url,
            )
            .await
        }
        (StorageBackendArg::InMemory, CacheBackendArg::Redis) => {
            let cache = connect_redis(config.redis_url.as_deref()).await?;
            run_server(
                config.listen_addr,
                InMemoryLinkStore::new(),
                cache,
                generator,
                config.public_base_url,
            )
            .await
        }
        (StorageBackendArg::Postgres, CacheBackendArg::InMemory) => {
            let store = connect_postgres(config.postgres_dsn.as_deref()).await?;
            run_server(
                config.listen_addr,
                store,
                MokaLinkCache::new(),
                generator,
                config.public_base_url,
            )
            .await
        }
        (StorageBackendArg::Postgres, CacheBackendArg::Redis) => {
            let store = connect_postgres(config.postgres_dsn.as_deref()).await?;
            let cache = connect_redis(config.redis_url.as_deref()).await?;
            run_server(
                config.listen_addr,
                store,
                cache,
                generator,
                config.public_base_url,
            )
            .await
        }
    }
}

fn init_tracing() -> anyhow::Result<()> {
    tracing_log::LogTracer::init().context("failed to install the log bridge")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the tracing subscriber")?;

    Ok(())
}

fn build_generator(machine_id: u16) -> anyhow::Result<Flake<SystemClock>> {
    let start_epoch = Timestamp::from_second(GENERATOR_EPOCH_UNIX_SECONDS)
        .context("generator epoch is a valid timestamp")?;
    let settings = FlakeSettings::builder()
        .machine_id(machine_id)
        .start_epoch(start_epoch)
        .build();

    Flake::new(settings).context("failed to initialize the id generator")
}

async fn connect_postgres(dsn: Option<&str>) -> anyhow::Result<PostgresLinkStore> {
    let dsn = dsn.context("postgres dsn is required when the storage backend is postgres")?;
    PostgresLinkStore::connect(dsn)
        .await
        .context("failed to connect to postgres")
}

async fn connect_redis(url: Option<&str>) -> anyhow::Result<RedisLinkCache> {
    let url = url.context("redis url is required when the cache backend is redis")?;
    let client = redis::Client::open(url).context("failed to create the redis client")?;
    let conn = client
        .get_multiplexed_async_connection()
        .await
        .context("failed to connect to redis")?;

    Ok(RedisLinkCache::new(conn))
}

async fn run_server<S, C>(
    listen_addr: SocketAddr,
    store: S,
    cache: C,
    generator: Flake<SystemClock>,
    public_base_url: String,
) -> anyhow::Result<()>
where
    S: LinkStore,
    C: LinkCache,
{
    let service = ShortenerService::new(store, cache, generator);
    let state = AppState::new(Arc::new(service), public_base_url);
    let app = App::router(state);

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .context("failed to bind the listen address")?;
    info!(listen_addr = %listen_addr, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for the shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
