use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use route_server::cache::CacheConfig;
use route_server::config::ServerConfig;
use route_server::planner::{PlannerConfig, RouteNetwork};
use route_server::timetable::Timetable;
use route_server::web::{AppState, create_router};

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            eprintln!(
                "invalid {}, falling back to level '{}' - {}",
                EnvFilter::DEFAULT_ENV,
                default_level,
                err
            );
        }
        EnvFilter::new(default_level.to_string())
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let timetable = match Timetable::load(&config.stations_file, &config.trips_file) {
        Ok(timetable) => timetable,
        Err(e) => {
            error!("Failed to load timetable: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Precomputation is cubic in the number of departures; keep it off the
    // async workers.
    let build = tokio::task::spawn_blocking({
        let timetable = timetable.clone();
        move || RouteNetwork::from_timetable(&timetable, &PlannerConfig::default())
    });
    let network = match build.await.expect("route network build panicked") {
        Ok(network) => network,
        Err(e) => {
            error!("Invalid timetable: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(network, timetable.names(), &CacheConfig::default());
    let app = create_router(state);

    let addr = config.bind_addr;
    info!("Route server listening on http://{addr}");
    info!("  GET  /health                  - Health check");
    info!("  GET  /stats                   - Network statistics");
    info!("  GET  /schedule                - Departures from every station");
    info!("  GET  /stations/:id            - Departures from a station");
    info!("  GET  /stations/:id/arrivals   - Arrivals at a station");
    info!("  GET  /stations/lookup?name=   - Station by name");
    info!("  GET  /stations/search?q=      - Stations by partial name");
    info!("  GET  /routes/shortest         - Shortest route");
    info!("  GET  /routes/at               - Route leaving at a time");
    info!("  GET  /routes/exists           - Whether a route exists");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");

    ExitCode::SUCCESS
}
