use spillover::prelude::*;
use spillover::utils;

/// Produces a csv file of sill lowering across randomly drawn erosion coefficients.
fn main() -> Result<(), SpillError> {
    pretty_env_logger::init();

    let params = Params::spillover();
    let results = sweep::sample(
        &params, 0.0..0.05, // Range of erosion coefficients.
        200,                // Number of runs.
        1004,               // Seed for rng for reproducibility.
    )?;

    let deepest = results
        .iter()
        .fold(0.0, |m: f64, r| m.max(r.total_drop));
    println!("{} runs, deepest cut {:.3} m", results.len(), deepest);

    utils::record(&results, "erosion_sweep.csv")?;
    Ok(())
}
