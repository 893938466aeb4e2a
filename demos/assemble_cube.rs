//! Example: Assemble a cube from a synthetic survey and slice it
//!
//! Run with: cargo run --example assemble_cube

use seiscube::utils::format_bytes;
use seiscube::{CubeSession, SliceAxis, Trace, TraceHeader};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("SeisCube Example: Survey Assembly");
    println!("=================================\n");

    // Synthetic 3D survey: 24 inlines x 18 crosslines, 48 samples per
    // trace, bins 25 m apart with inlines heading east.
    let n_inlines = 24;
    let n_crosslines = 18;
    let n_samples = 48;

    let mut traces = Vec::new();
    for i in 0..n_inlines {
        for j in 0..n_crosslines {
            let header = TraceHeader::new(400 + i as i32, 1200 + j as i32).with_cdp(
                612_000.0 + i as f64 * 25.0,
                6_710_000.0 + j as f64 * 25.0,
            );
            // A dipping reflector: a wavelet whose arrival shifts with
            // position.
            let shift = (i + j) as f32 * 0.2;
            let samples: Vec<f32> = (0..n_samples)
                .map(|k| ((k as f32 - shift) * 0.45).sin() * 50.0 / (1.0 + k as f32 * 0.05))
                .collect();
            traces.push(Trace::new(i * n_crosslines + j, header, samples));
        }
    }
    let sample_axis: Vec<f64> = (0..n_samples).map(|k| k as f64 * 4.0).collect();

    println!("Survey:");
    println!("  Traces:  {}", traces.len());
    println!("  Samples: {} per trace (4 ms interval)", n_samples);
    println!();

    let session = CubeSession::new();
    let cube = session.ingest(&traces, sample_axis)?;

    let summary = cube.summary();
    println!("✓ Cube assembled");
    println!(
        "  Shape:     {} x {} x {} (inline x crossline x sample)",
        summary.shape[0], summary.shape[1], summary.shape[2]
    );
    println!(
        "  Inlines:   {} - {}",
        summary.inline_range.min, summary.inline_range.max
    );
    println!(
        "  Crosslines: {} - {}",
        summary.crossline_range.min, summary.crossline_range.max
    );
    println!(
        "  Memory:    {}",
        format_bytes(summary.memory_estimate_bytes)
    );
    println!(
        "  Placed:    {} of {} traces",
        summary.ingest.placed, summary.ingest.total_traces
    );
    println!();

    let stats = cube.stats();
    println!("Amplitudes:");
    println!(
        "  Actual range:  [{:.2}, {:.2}]",
        stats.actual_min, stats.actual_max
    );
    println!(
        "  Display range: [{:.2}, {:.2}] (p5 - p95)",
        stats.display_min, stats.display_max
    );
    println!("  Mean: {:.4}  Std: {:.4}", stats.mean, stats.std);
    println!();

    let geometry = cube.geometry();
    println!("Geometry:");
    println!("  Inline azimuth:    {:.1}", geometry.inline_azimuth);
    println!("  Crossline azimuth: {:.1}", geometry.crossline_azimuth);
    println!();

    // One slice per axis, at the midpoint of each.
    println!("Slices:");
    for axis in [SliceAxis::Inline, SliceAxis::Crossline, SliceAxis::Sample] {
        let index = cube.default_slice_index(axis);
        let slice = session.extract_slice(axis, index as i64)?;
        let (rows, cols) = slice.shape();
        println!(
            "  {:9} @ {:3}: {} x {}  range [{:.2}, {:.2}]",
            axis.to_string(),
            index,
            rows,
            cols,
            slice.stats.min,
            slice.stats.max
        );
    }
    println!();

    // Persist the summary record the way a catalog would.
    let record = session.record_summary("synthetic_survey.sgy")?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(format!("{}.json", record.id));
    std::fs::write(&path, record.to_json()?)?;
    println!("✓ Summary record written to {}", path.display());

    println!("\n✓ Example complete!");
    Ok(())
}
