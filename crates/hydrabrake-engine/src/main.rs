//! Interactive hydraulic brake demonstration.
//!
//! Run with:
//!   cargo run --features renderer -p hydrabrake-engine
//!
//! Controls:
//!   F -- apply the brake
//!   R -- release the brake
//!   Escape -- quit

use hydrabrake_engine::render::run_windowed;
use hydrabrake_engine::tick::{TickConfig, TickLoop};

const WINDOW_TITLE: &str = "Hydraulic Brake Simulation - Pascal's Law";
const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let tick_loop = TickLoop::try_new(TickConfig::default())?;
    tracing::info!(fixed_dt = tick_loop.fixed_dt(), "starting brake simulation");

    run_windowed(tick_loop, WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT)
}
