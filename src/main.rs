#![forbid(unsafe_code)]

use std::error::Error;
use std::sync::Arc;

use axum::http::HeaderValue;
use lifecare_cost::adapters::{
    api_router, readers_from_seed, ApiState, PostgresCarePlanEntryRepository,
    PostgresFeeScheduleReader, PostgresGeoFactorReader, PostgresLifeCarePlanRepository,
    ReferenceDataSeed,
};
use lifecare_cost::application::handlers::costing::ItemPricer;
use lifecare_cost::config::{AppConfig, ServerConfig};
use lifecare_cost::ports::{FeeScheduleReader, GeoFactorReader};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type BoxError = Box<dyn Error + Send + Sync>;

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let (mut sigterm, mut sigint) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(term), Ok(int)) => (term, int),
            _ => {
                warn!("failed to register signal handlers, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    if server.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

async fn reference_readers(
    config: &AppConfig,
    pool: &PgPool,
) -> Result<(Arc<dyn FeeScheduleReader>, Arc<dyn GeoFactorReader>), BoxError> {
    match &config.calculation.reference_data_path {
        Some(path) => {
            info!(path = %path.display(), "loading reference data from seed file");
            let seed = ReferenceDataSeed::load(path).await?;
            let (fees, geo) = readers_from_seed(seed);
            Ok((Arc::new(fees), Arc::new(geo)))
        }
        None => Ok((
            Arc::new(PostgresFeeScheduleReader::new(pool.clone())),
            Arc::new(PostgresGeoFactorReader::new(pool.clone())),
        )),
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        version = env!("CARGO_PKG_VERSION"),
        "starting lifecare-cost"
    );

    let pool = config.database.pool_options().connect(&config.database.url).await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database migrations applied");
    }

    let (fee_reader, geo_reader) = reference_readers(&config, &pool).await?;
    let pricer = ItemPricer::new(geo_reader.clone(), fee_reader.clone())
        .with_defaults(config.calculation.pricing_defaults());
    let plans = Arc::new(PostgresLifeCarePlanRepository::new(pool.clone()));
    let entries = Arc::new(PostgresCarePlanEntryRepository::new(pool.clone()));

    let app = api_router(ApiState::new(plans, entries, geo_reader, fee_reader, pricer))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    pool.close().await;
    info!("shutdown complete");
    Ok(())
}
