//! Parameter sweeps over the erosion coefficient.
//!
//! Every run owns its own network, so the runs of a sweep are spread over the rayon thread pool
//! with no coordination between them.
use crate::errors::SpillError;
use crate::params::Params;
use crate::sim::Simulation;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use rayon::prelude::*;
use serde::Serialize;
use std::ops::Range;

/// Summary of one connection in one run of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepResult {
    /// Erosion coefficient applied to every connection in the run.
    pub coefficient: f64,
    /// Index of the connection.
    pub connection: usize,
    /// Lowering of the sill over the run (m).
    pub total_drop: f64,
    /// Largest discharge magnitude (m³/s).
    pub peak_discharge: f64,
    /// Net volume moved downstream (m³).
    pub volume: f64,
    /// Sill elevation at the end of the run (m).
    pub final_threshold: f64,
}

/// Run `params` once per entry of `coefficients`, in parallel, replacing the erosion coefficient
/// of every connection.  Results are ordered by coefficient index, then connection.
///
/// # Examples
///
/// ```rust
/// use spillover::prelude::*;
/// let params = Params::spillover().total_time(3600.0);
/// let scan = sweep::erosion_scan(&params, &[0.0, 0.01])?;
/// assert_eq!(scan.len(), 2);
/// assert_eq!(scan[0].total_drop, 0.0);
/// # Ok::<(), SpillError>(())
/// ```
pub fn erosion_scan(params: &Params, coefficients: &[f64]) -> Result<Vec<SweepResult>, SpillError> {
    params.validate()?;
    info!(
        "sweeping {} erosion coefficients over {} connections",
        coefficients.len(),
        params.connections.len()
    );
    let runs: Vec<Vec<SweepResult>> = coefficients
        .par_iter()
        .map(|c| -> Result<Vec<SweepResult>, SpillError> {
            let out = Simulation::new(&params.clone().erosion_coefficient(*c))?.run();
            Ok((0..out.series.connections())
                .map(|j| SweepResult {
                    coefficient: *c,
                    connection: j,
                    total_drop: out.series.total_drop(j),
                    peak_discharge: out.series.peak_discharge(j),
                    volume: out.series.volume_transferred(j),
                    final_threshold: out.thresholds[j],
                })
                .collect())
        })
        .collect::<Result<_, _>>()?;
    Ok(runs.into_iter().flatten().collect())
}

/// Draw `runs` erosion coefficients uniformly from `range`, seeded by `seed` for
/// reproducibility, and sweep them with [erosion_scan](fn.erosion_scan.html).  Fails with
/// `EmptyRange` unless `range` is finite with `start < end`.
pub fn sample(
    params: &Params,
    range: Range<f64>,
    runs: usize,
    seed: u64,
) -> Result<Vec<SweepResult>, SpillError> {
    if !(range.start < range.end) || !range.start.is_finite() || !range.end.is_finite() {
        return Err(SpillError::EmptyRange);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Uniform::from(range);
    let coefficients: Vec<f64> = (0..runs).map(|_| dist.sample(&mut rng)).collect();
    erosion_scan(params, &coefficients)
}
