//! Example: Fallback placement for traces without usable headers
//!
//! Run with: cargo run --example headerless_fallback

use seiscube::{CollisionPolicy, CubeError, CubeSession, IngestOptions, Trace, TraceHeader};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("SeisCube Example: Headerless Fallback");
    println!("=====================================\n");

    // 256 traces whose headers carry no grid ids, as happens with 2D
    // lines or corrupt header words. Every trace still gets placed.
    let traces: Vec<Trace> = (0..256)
        .map(|i| {
            let samples: Vec<f32> = (0..32)
                .map(|k| (((i + k) as f32) * 0.21).sin() * 10.0)
                .collect();
            Trace::new(i, TraceHeader::default(), samples)
        })
        .collect();

    let session = CubeSession::new();
    let cube = session.ingest(&traces, Vec::new())?;
    let (n_inlines, n_crosslines, n_samples) = cube.shape();

    println!("✓ {} headerless traces assembled", traces.len());
    println!(
        "  Synthetic grid: {} x {} ({} samples per trace)",
        n_inlines, n_crosslines, n_samples
    );
    println!(
        "  Synthesized placements: {}",
        cube.report().synthesized_placements
    );

    let geometry = cube.geometry();
    println!(
        "  Geometry defaults: inline {:.0}, crossline {:.0} (no coordinates)",
        geometry.inline_azimuth, geometry.crossline_azimuth
    );

    // The same colliding batch under each policy. The third trace lands
    // on the first trace's cell.
    println!("\nCollision policies:");
    let batch = vec![
        Trace::new(0, TraceHeader::new(10, 100), vec![1.0; 8]),
        Trace::new(1, TraceHeader::new(10, 101), vec![2.0; 8]),
        Trace::new(2, TraceHeader::new(10, 100), vec![3.0; 8]),
    ];

    for policy in [
        CollisionPolicy::LastWins,
        CollisionPolicy::FirstWins,
        CollisionPolicy::Reject,
    ] {
        let session =
            CubeSession::with_options(IngestOptions::new().with_collision_policy(policy));
        match session.ingest(&batch, Vec::new()) {
            Ok(cube) => {
                let report = cube.report();
                println!(
                    "  {:?}: cell value {:.0}, placed {}, overwrites {}, skipped {}",
                    policy,
                    cube.amplitudes()[(0, 0, 0)],
                    report.placed,
                    report.overwrites,
                    report.skipped_duplicate
                );
            }
            Err(CubeError::DuplicatePlacement { inline, crossline }) => {
                println!(
                    "  {:?}: rejected at inline {}, crossline {}",
                    policy, inline, crossline
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("\n✓ Example complete!");
    Ok(())
}
