mod cache;
mod cli;
mod download;
mod geocoder;
mod routes;
mod state;

use std::{env, fs, sync::Arc};

use anyhow::{Context, Result};
use log::{error, info};
use moodscape_events::{fixtures, Catalog};
use tokio::{net::TcpListener, signal};

use crate::cache::LookupCache;
use crate::geocoder::Geocoder;
use crate::state::AppState;

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "moodscape_server=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());
    setup_logging();

    let catalog = match &args.catalog {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog {}", path.display()))?;
            Catalog::from_json(json)
                .with_context(|| format!("failed to load catalog {}", path.display()))?
        }
        None => fixtures::load_sample_catalog()?,
    };
    info!("Loaded {} events", catalog.len());

    let cache = LookupCache::new(cache::Config {
        enabled: args.enable_cache,
        ttl: args.cache_ttl,
    });
    let geocoder = Geocoder::new(args.geocoder, cache)?;

    let state = Arc::new(AppState::new(
        catalog,
        fixtures::load_sample_organization()?,
        fixtures::load_sample_analytics()?,
        geocoder,
    ));

    let listener = TcpListener::bind(args.address)
        .await
        .with_context(|| format!("failed to bind {}", args.address))?;
    info!("Listening at http://{}", args.address);

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown() {
    if let Err(err) = signal::ctrl_c().await {
        error!("Failed to listen for ctrl-c: {err}");
    }
}
