//! Waymark - Map-Based Workout Journal
//!
//! Main entry point for the console session.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use waymark::location::StaticLocationProvider;
use waymark::storage::FileStorage;
use waymark::{LatLng, SessionController};

mod console;

/// Fallback start coordinate when WAYMARK_START is unset.
const DEFAULT_START: LatLng = LatLng {
    lat: -37.8136,
    lng: 144.9631,
};

/// Read the session start coordinate from `WAYMARK_START` ("lat,lng").
fn start_position() -> LatLng {
    let Ok(raw) = std::env::var("WAYMARK_START") else {
        return DEFAULT_START;
    };
    let mut parts = raw.splitn(2, ',');
    let lat = parts.next().and_then(|p| p.trim().parse().ok());
    let lng = parts.next().and_then(|p| p.trim().parse().ok());
    match (lat, lng) {
        (Some(lat), Some(lng)) => LatLng::new(lat, lng),
        _ => {
            tracing::warn!("Ignoring malformed WAYMARK_START={raw}");
            DEFAULT_START
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Waymark v{}", env!("CARGO_PKG_VERSION"));

    let controller = SessionController::new(
        console::ConsoleMapWidget,
        FileStorage::open_default(),
        console::ConsoleView,
    );
    let provider = StaticLocationProvider::new(start_position());

    console::run(controller, provider)
}
