//! Run statistics display

use crate::state::RunContext;

/// Prints the counters of a run to stdout in a formatted manner
///
/// # Arguments
///
/// * `ctx` - The finished run
pub fn print_summary(ctx: &RunContext) {
    println!("=== Mirror Run Summary ===\n");

    println!("Started: {}", ctx.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Duration: {:.1}s", ctx.elapsed().as_secs_f64());
    println!();

    println!("Discovery:");
    println!("  Nodes collected: {}", ctx.nodes_collected);
    println!("  Nodes excluded: {}", ctx.nodes_excluded);
    println!("  Pages rendered: {}", ctx.pages_rendered);
    println!("  Render failures: {}", ctx.render_failures);
    println!("  Menu timeouts: {}", ctx.menu_timeouts);
    println!();

    println!("Downloads:");
    println!("  Resources found: {}", ctx.resources_found);
    println!("  Files saved: {}", ctx.files_saved);
    println!("  Archives unpacked: {}", ctx.archives_unpacked);
    println!("  Archives kept: {}", ctx.archives_kept);
    println!("  Skipped (HTTP status): {}", ctx.downloads_skipped);
    println!("  Failed: {}", ctx.downloads_failed);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} resources stored)",
        success_rate(ctx),
        ctx.downloads_succeeded(),
        ctx.resources_found
    );
}

fn success_rate(ctx: &RunContext) -> f64 {
    if ctx.resources_found > 0 {
        (ctx.downloads_succeeded() as f64 / ctx.resources_found as f64) * 100.0
    } else {
        0.0
    }
}
