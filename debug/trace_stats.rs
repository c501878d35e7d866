use field_viewer::scene::load_scene;
use field_viewer::tracer::{LineTracer, Termination};
use std::collections::BTreeMap;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: cargo run --features debug_bins --bin trace_stats <scene.toml>");
        return;
    }

    let viewer = match load_scene(&args[1]) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Failed to load scene: {}", e);
            std::process::exit(1);
        }
    };

    println!("=== Trace statistics: {} ===", args[1]);
    println!("charges: {}", viewer.charges.len());
    println!("params:  {:?}", viewer.params);

    let tracer = LineTracer::new(&viewer.charges, &viewer.params);
    let mut per_charge: BTreeMap<usize, (usize, usize, usize)> = BTreeMap::new();
    let mut longest = 0;

    for line in tracer.lines(viewer.settings.trace_from) {
        let entry = per_charge.entry(line.charge_index).or_default();
        entry.0 += 1;
        match line.termination {
            Termination::ReachedSink { .. } => entry.1 += 1,
            Termination::DrawLimit => {}
            Termination::NonFinite => entry.2 += 1,
        }
        longest = longest.max(line.segment_count());
    }

    for (index, (rays, sinks, broken)) in &per_charge {
        let label = viewer.charges.get(*index).map(|c| c.label()).unwrap_or_default();
        println!(
            "charge {:>3} ({:>6}): {:>4} rays, {:>4} reached a sink, {:>4} non-finite",
            index, label, rays, sinks, broken
        );
    }
    println!("longest line: {} segments", longest);
}
