/*!
* # Spillover - A library for modeling water transfer and sill erosion between lakes.
* When a lake fills above the sill that separates it from its neighbour, water spills across and
* cuts a channel into the sill.  The channel deepens, the discharge grows, and the sill erodes
* faster, until the two lakes equalise or the supply runs out.  The functions in this crate follow
* that feedback through a chain of lakes, stepping levels and sill elevations forward in time with
* an explicit Euler scheme.
*
* Each lake is a single well-mixed body of water with a fixed surface area.  Each pair of
* neighbouring lakes is joined by a sill with a rectangular channel whose width scales with flow
* depth.  Flow velocity follows Manning's equation and the sill is lowered by one of three erosion
* laws: a Shields excess shear stress law for a bed of known grain size, a power law on bed shear
* stress, or a simple slope-depth-velocity product.  Eroded sediment leaves the model.
*
*  ## Quick Start
*
* To use spillover, add it to your `Cargo.toml`
* ```toml
* [dependencies]
* spillover = "^0.1.0"
* ```
*
*  - Load the crate prelude in the preamble of your `main.rs`.
*  - Describe the lakes and sills with a [Params](params/struct.Params.html) record and run it:
* ```rust
* use spillover::prelude::*;
*
* fn main() -> Result<(), SpillError> {
*     let params = Params::new()
*         .reservoir(1e6, 10.0)
*         .reservoir(10e6, 0.0)
*         .connection(
*             ConnectionParams::new(100.0, 9.5)
*                 .mode(FlowMode::Forward)
*                 .erosion(ErosionModel::shields(1e-9, 0.001)),
*         )
*         .total_time(7200.0)
*         .steps(10_000);
*
*     let out = simulate(&params)?;
*     // sill lowered by the flow
*     assert!(out.thresholds[0] <= 9.5);
*     // water moved downstream
*     assert!(out.levels[1] > 0.0);
*     Ok(())
* }
* ```
*
* Chains of any length are built the same way, adding one more
* [reservoir](params/struct.Params.html#method.reservoir) and one more
* [connection](params/struct.Params.html#method.connection) per lake.  Connections carry water in
* both directions unless set to [FlowMode::Forward](connection/enum.FlowMode.html).
*
* Finished runs can be written to csv with [write_csv](series/struct.Series.html#method.write_csv)
* or drawn with the [plot](plot/index.html) module, and the erosion coefficient can be swept in
* parallel with the [sweep](sweep/index.html) module.
*/

#![warn(missing_docs)]
pub mod connection;
pub mod erosion;
pub mod errors;
pub mod hydraulics;
pub mod network;
pub mod params;
pub mod plot;
pub mod series;
pub mod sim;
pub mod sweep;
pub mod utils;

pub mod prelude {
    pub use crate::connection::{Connection, FlowMode, SillFloor, StepResult};
    pub use crate::erosion::ErosionModel;
    pub use crate::errors::SpillError;
    pub use crate::hydraulics::RadiusModel;
    pub use crate::network::{Network, Reservoir};
    pub use crate::params::{ConnectionParams, Params, ReservoirParams, Stepping};
    pub use crate::series::Series;
    pub use crate::sim::{simulate, Output, Simulation};
    pub use crate::{plot, sweep};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn spillover_preset_drains_upper_lake() {
        let out = simulate(&Params::spillover()).unwrap();
        let s = &out.series;
        assert!(s.peak_discharge(0) > 0.0);
        assert!(s.total_drop(0) > 0.0);
        assert!(out.levels[0] < 10.0);
        assert!(out.levels[1] > 5.0);
    }

    #[test]
    fn grain_size_preset_runs_every_step() {
        let out = simulate(&Params::grain_size()).unwrap();
        assert_eq!(out.series.steps(), 10_000);
        assert!(out.series.discharge[0].iter().all(|q| *q >= 0.0));
        assert!(out.series.total_drop(0) > 0.0);
        assert!(out.thresholds[0] < 9.5);
    }
}
