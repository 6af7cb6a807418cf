//! Grains fed into a river cross-section.
//!
//! A 50 × 200 grid, closed on every edge except the right one. Every time
//! unit the left ten columns are refilled with grains, then the engine runs
//! for one more unit. At the end the per-rule firing counts and the grain
//! concentration profiles at three stations downstream are printed.
//!
//! Run with `RUST_LOG=celllab_engine=debug` to see the engine's own logs.
//! An optional first argument sets the seed.

use std::error::Error;
use std::time::Instant;

use celllab_bench::{concentration_profile, RiverProfile, PARTICLE};
use celllab_lattice::OrientedRaster;
use tracing::info;
use tracing_subscriber::EnvFilter;

const STATIONS: [u32; 3] = [50, 100, 150];
const HALF_WIDTH: u32 = 10;

fn main() -> Result<(), Box<dyn Error>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("info"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 0,
    };
    let profile = RiverProfile {
        seed,
        ..RiverProfile::default()
    };
    println!("=== celllab river grains ===\n");
    let RiverProfile {
        rows,
        cols,
        feed_columns,
        interval,
        duration,
        ..
    } = profile;
    println!("grid {rows} x {cols}, feed columns 0..{feed_columns}, seed {seed}");
    println!("refill every {interval}, run until {duration}\n");

    let mut run = profile.build()?;
    let started = Instant::now();
    let mut next_report = started + profile.report_every;

    while run.engine.current_time() < profile.duration {
        let report = run.step()?;
        let now = Instant::now();
        if now >= next_report {
            info!(
                time = report.time,
                percent = 100.0 * report.time / profile.duration,
                "current sim time"
            );
            next_report = now + profile.report_every;
        }
    }

    let stats = run.engine.stats();
    println!(
        "finished at t = {} in {:.2?}: {} transitions, {} stale events",
        run.engine.current_time(),
        started.elapsed(),
        stats.fired,
        stats.stale_discarded
    );
    for (label, count) in stats.by_label() {
        println!("  {label:>14}: {count}");
    }

    let grid = run
        .engine
        .lattice()
        .downcast_ref::<OrientedRaster>()
        .ok_or("river lattice is not a raster")?;
    let states = run.engine.states();
    println!("\ngrain concentration by row (top row first)");
    let profiles = STATIONS
        .iter()
        .map(|&col| concentration_profile(grid, states, col, HALF_WIDTH, PARTICLE))
        .collect::<Result<Vec<_>, _>>()?;
    println!("   row    col 50   col 100   col 150");
    for row in (0..grid.rows() as usize).rev() {
        let [a, b, c] = [&profiles[0], &profiles[1], &profiles[2]].map(|p| p[row]);
        println!("  {row:>4}  {a:>8.3}  {b:>8.3}  {c:>8.3}");
    }

    Ok(())
}
