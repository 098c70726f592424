//! Input record for a simulation.
//!
//! A [Params](struct.Params.html) is assembled once, using a builder pattern or loaded from csv,
//! and handed to the [Simulation](../sim/struct.Simulation.html).  Nothing in it changes during a
//! run.
use crate::connection::{self, Connection, FlowMode, SillFloor};
use crate::erosion::ErosionModel;
use crate::errors::SpillError;
use crate::hydraulics::RadiusModel;
use crate::network::{self, Network, Reservoir};
use crate::utils;
use serde::{Deserialize, Serialize};

/// Largest step count a run may allocate series for.  Records implying more steps, or a count
/// that cannot be computed, fail validation with
/// [TooManySteps](../errors/enum.SpillError.html#variant.TooManySteps).
pub const MAX_STEPS: usize = 10_000_000;

/// Surface area and starting level of one lake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReservoirParams {
    /// Surface area (m²).
    pub area: f64,
    /// Water level at time zero (m).
    pub initial_level: f64,
}

/// Channel and sill parameters for one connection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// Distance between the two lakes (m).
    pub distance: f64,
    /// Sill elevation at time zero (m).
    pub initial_threshold: f64,
    /// Overrides the global width factor when set.
    pub width_factor: Option<f64>,
    /// Overrides the global Manning's n when set.
    pub mannings_n: Option<f64>,
    /// Erosion law of the sill.
    pub erosion: ErosionModel,
    /// Permitted flow directions.
    pub mode: FlowMode,
    /// Lowest elevation the sill may erode to.
    pub floor: SillFloor,
}

impl ConnectionParams {
    /// Sill at `initial_threshold` between lakes `distance` metres apart, with no erosion,
    /// bidirectional flow and a floor at the lower lake's initial level.
    pub fn new(distance: f64, initial_threshold: f64) -> Self {
        ConnectionParams {
            distance,
            initial_threshold,
            width_factor: None,
            mannings_n: None,
            erosion: ErosionModel::default(),
            mode: FlowMode::default(),
            floor: SillFloor::default(),
        }
    }

    /// Set the erosion law.
    pub fn erosion(mut self, model: ErosionModel) -> Self {
        self.erosion = model;
        self
    }

    /// Set the permitted flow directions.
    pub fn mode(mut self, mode: FlowMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the sill floor.
    pub fn floor(mut self, floor: SillFloor) -> Self {
        self.floor = floor;
        self
    }

    /// Override the global width factor for this connection.
    pub fn width_factor(mut self, k: f64) -> Self {
        self.width_factor = Some(k);
        self
    }

    /// Override the global Manning's n for this connection.
    pub fn mannings_n(mut self, n: f64) -> Self {
        self.mannings_n = Some(n);
        self
    }
}

/// How the run is divided into steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Stepping {
    /// Fixed number of steps; `dt = total_time / count`.
    Count(usize),
    /// Fixed step size (s); the step count is `ceil(total_time / dt)`.
    Size(f64),
}

/// Complete description of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Lakes in chain order.
    pub reservoirs: Vec<ReservoirParams>,
    /// Connection `j` joins lake `j` to lake `j + 1`.
    pub connections: Vec<ConnectionParams>,
    /// Manning's n for connections without their own.
    pub mannings_n: f64,
    /// Width factor for connections without their own.
    pub width_factor: f64,
    /// Hydraulic radius formula used by every channel.
    pub radius: RadiusModel,
    /// Simulated time (s).
    pub total_time: f64,
    /// Step count or step size.
    pub stepping: Stepping,
}

impl Default for Params {
    fn default() -> Self {
        Params::new()
    }
}

/// Row of a connections csv file.
#[derive(Debug, Clone, Deserialize)]
struct ConnectionRecord {
    distance: f64,
    initial_threshold: f64,
    width_factor: Option<f64>,
    mannings_n: Option<f64>,
    model: String,
    coefficient: f64,
    grain_size: Option<f64>,
    flow: Option<String>,
}

impl ConnectionRecord {
    fn into_params(self, index: usize) -> Result<ConnectionParams, SpillError> {
        let erosion = match self.model.trim() {
            "shields" => match self.grain_size {
                Some(d50) => ErosionModel::shields(self.coefficient, d50),
                None => return Err(SpillError::InvalidErosion(index)),
            },
            "shear_power" => ErosionModel::shear_power(self.coefficient),
            "product" => ErosionModel::product(self.coefficient),
            _ => return Err(SpillError::InvalidErosion(index)),
        };
        let mode = match self.flow.as_ref().map(|x| x.trim()) {
            None | Some("") | Some("bidirectional") => FlowMode::Bidirectional,
            Some("forward") => FlowMode::Forward,
            Some(_) => return Err(SpillError::InvalidFlowMode(index)),
        };
        Ok(ConnectionParams {
            distance: self.distance,
            initial_threshold: self.initial_threshold,
            width_factor: self.width_factor,
            mannings_n: self.mannings_n,
            erosion,
            mode,
            floor: SillFloor::default(),
        })
    }
}

impl Params {
    /// Create an empty parameter record.  Use [reservoir](#method.reservoir) and
    /// [connection](#method.connection) to add lakes and sills in chain order.  Defaults are a
    /// Manning's n of 0.03, a width factor of 5, a rectangular channel and 36000 s of simulated
    /// time in steps of 10 s.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spillover::prelude::*;
    /// let params = Params::new()
    ///     .reservoir(1e6, 10.0)
    ///     .reservoir(1e6, 0.0)
    ///     .connection(ConnectionParams::new(100.0, 9.5))
    ///     .total_time(7200.0)
    ///     .steps(720);
    /// assert_eq!(params.step_plan(), (720, 10.0));
    /// assert!(params.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Params {
            reservoirs: Vec::new(),
            connections: Vec::new(),
            mannings_n: 0.03,
            width_factor: 5.0,
            radius: RadiusModel::Rectangular,
            total_time: 36000.0,
            stepping: Stepping::Size(10.0),
        }
    }

    /// Two lakes at 10 m and 5 m behind a sill at 9 m, 1 km apart, eroded by the
    /// slope-depth-velocity law over ten hours.
    pub fn spillover() -> Self {
        Params::new()
            .reservoir(1e6, 10.0)
            .reservoir(0.8e6, 5.0)
            .connection(
                ConnectionParams::new(1000.0, 9.0)
                    .mode(FlowMode::Forward)
                    .erosion(ErosionModel::product(0.01))
                    .floor(SillFloor::Unbounded),
            )
            .total_time(36000.0)
            .step_size(10.0)
    }

    /// A small lake at 10 m draining over a sand sill at 9.5 m into a large empty lake 100 m away,
    /// eroded under the Shields law over two hours.
    pub fn grain_size() -> Self {
        Params::new()
            .reservoir(1e6, 10.0)
            .reservoir(10e6, 0.0)
            .connection(
                ConnectionParams::new(100.0, 9.5)
                    .mode(FlowMode::Forward)
                    .erosion(ErosionModel::shields(1e-9, 0.001))
                    .floor(SillFloor::Unbounded),
            )
            .radius(RadiusModel::Approximate)
            .total_time(7200.0)
            .steps(10_000)
    }

    /// Load lakes and connections from csv files.
    ///  - `reservoirs` has columns `area,initial_level`, one row per lake in chain order.
    ///  - `connections` has columns
    ///    `distance,initial_threshold,width_factor,mannings_n,model,coefficient,grain_size,flow`.
    ///    `model` is one of `shields`, `shear_power` or `product`; `flow` is `forward` or
    ///    `bidirectional`.  Empty optional fields fall back to the defaults.
    pub fn from_csv(
        reservoirs: &str,
        connections: &str,
        total_time: f64,
        stepping: Stepping,
    ) -> Result<Self, SpillError> {
        let lakes: Vec<ReservoirParams> = utils::read_csv(reservoirs)?;
        let records: Vec<ConnectionRecord> = utils::read_csv(connections)?;
        let mut params = Params::new().total_time(total_time);
        params.stepping = stepping;
        params.reservoirs = lakes;
        for (j, rec) in records.into_iter().enumerate() {
            params.connections.push(rec.into_params(j)?);
        }
        Ok(params)
    }

    /// Add a lake of `area` square metres filled to `level`.
    pub fn reservoir(mut self, area: f64, level: f64) -> Self {
        self.reservoirs.push(ReservoirParams {
            area,
            initial_level: level,
        });
        self
    }

    /// Add the connection joining the last two lakes.
    pub fn connection(mut self, conn: ConnectionParams) -> Self {
        self.connections.push(conn);
        self
    }

    /// Set the global Manning's n.
    pub fn mannings_n(mut self, n: f64) -> Self {
        self.mannings_n = n;
        self
    }

    /// Set the global width factor.
    pub fn width_factor(mut self, k: f64) -> Self {
        self.width_factor = k;
        self
    }

    /// Set the hydraulic radius formula.
    pub fn radius(mut self, model: RadiusModel) -> Self {
        self.radius = model;
        self
    }

    /// Set the simulated time (s).
    pub fn total_time(mut self, seconds: f64) -> Self {
        self.total_time = seconds;
        self
    }

    /// Divide the run into `count` steps.
    pub fn steps(mut self, count: usize) -> Self {
        self.stepping = Stepping::Count(count);
        self
    }

    /// Divide the run into steps of `dt` seconds.
    pub fn step_size(mut self, dt: f64) -> Self {
        self.stepping = Stepping::Size(dt);
        self
    }

    /// Replace the erosion coefficient of every connection.
    pub fn erosion_coefficient(mut self, value: f64) -> Self {
        for conn in self.connections.iter_mut() {
            conn.erosion = conn.erosion.with_coefficient(value);
        }
        self
    }

    /// Step count and step size (s) implied by the stepping rule.  Only meaningful for a record
    /// that passes [validate](#method.validate).
    pub fn step_plan(&self) -> (usize, f64) {
        match self.stepping {
            Stepping::Count(k) => (k, self.total_time / k as f64),
            Stepping::Size(dt) => ((self.total_time / dt).ceil() as usize, dt),
        }
    }

    /// Check the record before any stepping.
    pub fn validate(&self) -> Result<(), SpillError> {
        if self.reservoirs.is_empty() {
            return Err(SpillError::NoReservoirs);
        }
        if self.connections.len() + 1 != self.reservoirs.len() {
            return Err(SpillError::LengthMismatch {
                reservoirs: self.reservoirs.len(),
                connections: self.connections.len(),
            });
        }
        for (i, lake) in self.reservoirs.iter().enumerate() {
            network::check_lake(i, lake.area, lake.initial_level)?;
        }
        for (j, conn) in self.connections.iter().enumerate() {
            connection::check_channel(
                j,
                conn.distance,
                conn.initial_threshold,
                conn.mannings_n.unwrap_or(self.mannings_n),
                conn.width_factor.unwrap_or(self.width_factor),
                &conn.erosion,
            )?;
        }
        if !(self.total_time > 0.0) || !self.total_time.is_finite() {
            return Err(SpillError::NonPositiveTime);
        }
        match self.stepping {
            Stepping::Count(0) => Err(SpillError::ZeroSteps),
            Stepping::Count(k) if k > MAX_STEPS => Err(SpillError::TooManySteps),
            Stepping::Size(dt) if !(dt > 0.0) || !dt.is_finite() => Err(SpillError::NonPositiveStep),
            Stepping::Size(dt) => {
                let steps = (self.total_time / dt).ceil();
                if steps.is_finite() && steps <= MAX_STEPS as f64 {
                    Ok(())
                } else {
                    Err(SpillError::TooManySteps)
                }
            }
            _ => Ok(()),
        }
    }

    /// Validate the record and build the lake network it describes.
    pub fn network(&self) -> Result<Network, SpillError> {
        self.validate()?;
        let reservoirs = self
            .reservoirs
            .iter()
            .map(|r| Reservoir::new(r.area, r.initial_level))
            .collect();
        let connections = self
            .connections
            .iter()
            .enumerate()
            .map(|(j, c)| {
                let floor = c.floor.resolve(
                    self.reservoirs[j].initial_level,
                    self.reservoirs[j + 1].initial_level,
                );
                Connection::new(c.distance, c.initial_threshold)
                    .width_factor(c.width_factor.unwrap_or(self.width_factor))
                    .mannings_n(c.mannings_n.unwrap_or(self.mannings_n))
                    .erosion(c.erosion)
                    .mode(c.mode)
                    .radius(self.radius)
                    .floor(floor)
            })
            .collect();
        Network::new(reservoirs, connections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Params {
        Params::new()
            .reservoir(1e6, 10.0)
            .reservoir(1e6, 0.0)
            .connection(ConnectionParams::new(100.0, 9.5))
            .total_time(100.0)
            .steps(10)
    }

    #[test]
    fn presets_are_valid() {
        assert!(Params::spillover().validate().is_ok());
        assert!(Params::grain_size().validate().is_ok());
        assert_eq!(Params::spillover().step_plan(), (3600, 10.0));
        assert_eq!(Params::grain_size().step_plan(), (10_000, 0.72));
    }

    #[test]
    fn partial_last_step_is_counted() {
        let params = pair().total_time(25.0).step_size(10.0);
        assert_eq!(params.step_plan(), (3, 10.0));
    }

    #[test]
    fn configuration_errors() {
        assert_eq!(Params::new().validate(), Err(SpillError::NoReservoirs));
        assert_eq!(
            pair().reservoir(1.0, 0.0).validate(),
            Err(SpillError::LengthMismatch {
                reservoirs: 3,
                connections: 1
            })
        );
        let mut bad = pair();
        bad.reservoirs[1].area = 0.0;
        assert_eq!(bad.validate(), Err(SpillError::NonPositiveArea(1)));
        let mut bad = pair();
        bad.connections[0].distance = -5.0;
        assert_eq!(bad.validate(), Err(SpillError::NonPositiveDistance(0)));
        assert_eq!(pair().steps(0).validate(), Err(SpillError::ZeroSteps));
        assert_eq!(
            pair().step_size(0.0).validate(),
            Err(SpillError::NonPositiveStep)
        );
        assert_eq!(
            pair().total_time(0.0).validate(),
            Err(SpillError::NonPositiveTime)
        );
        assert_eq!(
            pair().mannings_n(0.0).validate(),
            Err(SpillError::NonPositiveRoughness(0))
        );
        assert_eq!(
            pair().width_factor(-1.0).validate(),
            Err(SpillError::NonPositiveWidth(0))
        );
        assert_eq!(
            pair().erosion_coefficient(-1.0).validate(),
            Err(SpillError::InvalidErosion(0))
        );
        let mut bad = pair();
        bad.connections[0].initial_threshold = f64::NAN;
        assert_eq!(bad.validate(), Err(SpillError::NonFiniteThreshold(0)));
        let mut bad = pair();
        bad.reservoirs[1].initial_level = f64::INFINITY;
        assert_eq!(bad.validate(), Err(SpillError::NonFiniteLevel(1)));
    }

    #[test]
    fn oversized_runs_are_rejected() {
        assert_eq!(
            pair().total_time(1e300).step_size(1e-10).validate(),
            Err(SpillError::TooManySteps)
        );
        assert_eq!(
            pair().steps(usize::MAX).validate(),
            Err(SpillError::TooManySteps)
        );
        assert_eq!(
            pair().steps(MAX_STEPS + 1).validate(),
            Err(SpillError::TooManySteps)
        );
        assert_eq!(
            pair().total_time(MAX_STEPS as f64 + 1.0).step_size(1.0).validate(),
            Err(SpillError::TooManySteps)
        );
        assert!(pair().steps(MAX_STEPS).validate().is_ok());
        assert!(pair().total_time(MAX_STEPS as f64).step_size(1.0).validate().is_ok());
    }

    #[test]
    fn connection_override_beats_global() {
        let mut params = pair().mannings_n(0.0);
        params.connections[0] = params.connections[0].mannings_n(0.05);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn network_resolves_floor() {
        let net = pair().network().unwrap();
        assert_eq!(net.connections()[0].floor_elevation(), 0.0);
        assert_eq!(net.levels(), vec![10.0, 0.0]);
        assert_eq!(net.thresholds(), vec![9.5]);
    }

    #[test]
    fn loads_csv() {
        let dir = std::env::temp_dir();
        let lakes = dir.join("spillover_params_lakes.csv");
        let sills = dir.join("spillover_params_sills.csv");
        std::fs::write(&lakes, "area,initial_level\n1000000,10\n800000,5\n500000,2\n").unwrap();
        std::fs::write(
            &sills,
            "distance,initial_threshold,width_factor,mannings_n,model,coefficient,grain_size,flow\n\
             1000,9,,,product,0.01,,forward\n\
             500,4,3,0.04,shields,1e-9,0.001,\n",
        )
        .unwrap();
        let params = Params::from_csv(
            lakes.to_str().unwrap(),
            sills.to_str().unwrap(),
            3600.0,
            Stepping::Size(10.0),
        )
        .unwrap();
        assert_eq!(params.reservoirs.len(), 3);
        assert_eq!(params.connections[0].mode, FlowMode::Forward);
        assert_eq!(params.connections[0].erosion, ErosionModel::product(0.01));
        assert_eq!(params.connections[1].mode, FlowMode::Bidirectional);
        assert_eq!(params.connections[1].width_factor, Some(3.0));
        assert_eq!(params.connections[1].erosion, ErosionModel::shields(1e-9, 0.001));
        assert!(params.validate().is_ok());
        std::fs::remove_file(lakes).unwrap();
        std::fs::remove_file(sills).unwrap();
    }

    #[test]
    fn unknown_flow_is_rejected() {
        let dir = std::env::temp_dir();
        let lakes = dir.join("spillover_flow_lakes.csv");
        let sills = dir.join("spillover_flow_sills.csv");
        std::fs::write(&lakes, "area,initial_level\n1000000,10\n800000,5\n500000,2\n").unwrap();
        std::fs::write(
            &sills,
            "distance,initial_threshold,width_factor,mannings_n,model,coefficient,grain_size,flow\n\
             1000,9,,,product,0.01,,forward\n\
             500,4,,,product,0.01,,sideways\n",
        )
        .unwrap();
        let res = Params::from_csv(
            lakes.to_str().unwrap(),
            sills.to_str().unwrap(),
            3600.0,
            Stepping::Size(10.0),
        );
        assert_eq!(res, Err(SpillError::InvalidFlowMode(1)));
        std::fs::remove_file(lakes).unwrap();
        std::fs::remove_file(sills).unwrap();
    }
}
