//! Drive a run from a parameter record to a finished series.
use crate::errors::SpillError;
use crate::network::Network;
use crate::params::Params;
use crate::series::Series;
use log::info;

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    /// Values recorded at every step.
    pub series: Series,
    /// Lake levels after the last step (m).
    pub levels: Vec<f64>,
    /// Sill elevations after the last step (m).
    pub thresholds: Vec<f64>,
}

/// A validated network ready to run.
#[derive(Debug, Clone)]
pub struct Simulation {
    network: Network,
    steps: usize,
    dt: f64,
}

impl Simulation {
    /// Validate `params` and build the network.  Every configuration error surfaces here, before
    /// any stepping.
    pub fn new(params: &Params) -> Result<Self, SpillError> {
        let network = params.network()?;
        let (steps, dt) = params.step_plan();
        Ok(Simulation { network, steps, dt })
    }

    /// Number of steps the run will take.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step size (s).
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Run every step and return the series with the final state.
    pub fn run(mut self) -> Output {
        info!(
            "running {} lakes for {} steps of {} s",
            self.network.reservoirs().len(),
            self.steps,
            self.dt
        );
        let series = self.network.run(self.steps, self.dt);
        let levels = self.network.levels();
        let thresholds = self.network.thresholds();
        info!("finished with levels {:?}, sills {:?}", levels, thresholds);
        Output {
            series,
            levels,
            thresholds,
        }
    }
}

/// Validate `params` and run the simulation to completion.
///
/// # Examples
///
/// ```rust
/// use spillover::prelude::*;
/// let out = simulate(&Params::spillover())?;
/// assert_eq!(out.series.steps(), 3600);
/// assert!(out.levels[0] < 10.0);
/// # Ok::<(), SpillError>(())
/// ```
pub fn simulate(params: &Params) -> Result<Output, SpillError> {
    Ok(Simulation::new(params)?.run())
}
