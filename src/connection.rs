//! A sill joining two neighbouring lakes.
//!
//! Each step a connection compares the levels on either side with its sill elevation.  Water only
//! crosses when the higher lake stands above the sill, flowing through a channel whose depth is the
//! head over the sill.  The same flow erodes the sill, so the threshold can only move down.
use crate::erosion::ErosionModel;
use crate::errors::SpillError;
use crate::hydraulics::{self, RadiusModel};
use serde::{Deserialize, Serialize};

/// Directions in which a connection may carry water.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlowMode {
    /// Only from the upstream lake (lower index) to the downstream lake.
    Forward,
    /// From whichever lake stands higher.
    Bidirectional,
}

impl Default for FlowMode {
    fn default() -> Self {
        FlowMode::Bidirectional
    }
}

/// Lowest elevation the sill may be eroded to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SillFloor {
    /// No floor.  The sill erodes for as long as water flows over it.
    Unbounded,
    /// The initial level of the lower of the two lakes.
    LowerInitialLevel,
    /// A fixed elevation (m).
    Elevation(f64),
}

impl Default for SillFloor {
    fn default() -> Self {
        SillFloor::LowerInitialLevel
    }
}

impl SillFloor {
    /// Floor elevation for a sill between lakes starting at `upstream` and `downstream`.
    pub fn resolve(&self, upstream: f64, downstream: f64) -> f64 {
        match *self {
            SillFloor::Unbounded => f64::NEG_INFINITY,
            SillFloor::LowerInitialLevel => upstream.min(downstream),
            SillFloor::Elevation(z) => z,
        }
    }
}

/// Check the channel parameters of connection `j`: distance, roughness and width factor must be
/// positive and finite, the sill elevation finite and the erosion law valid.
pub(crate) fn check_channel(
    j: usize,
    distance: f64,
    threshold: f64,
    mannings_n: f64,
    width_factor: f64,
    erosion: &ErosionModel,
) -> Result<(), SpillError> {
    let positive = |x: f64| x > 0.0 && x.is_finite();
    if !positive(distance) {
        return Err(SpillError::NonPositiveDistance(j));
    }
    if !threshold.is_finite() {
        return Err(SpillError::NonFiniteThreshold(j));
    }
    if !positive(mannings_n) {
        return Err(SpillError::NonPositiveRoughness(j));
    }
    if !positive(width_factor) {
        return Err(SpillError::NonPositiveWidth(j));
    }
    if !erosion.is_valid() {
        return Err(SpillError::InvalidErosion(j));
    }
    Ok(())
}

/// Outcome of one step across one connection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepResult {
    /// Discharge (m³/s), positive from the lower-index lake to the higher-index lake.
    pub discharge: f64,
    /// Flow velocity (m/s), signed like `discharge`.
    pub velocity: f64,
    /// Lowering rate of the sill (m/s).
    pub erosion_rate: f64,
    /// Sill elevation after this step (m).
    pub threshold: f64,
}

impl StepResult {
    /// True when water crossed the sill during the step.
    pub fn is_active(&self) -> bool {
        self.discharge != 0.0
    }
}

/// Channel and sill between lake `i` and lake `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    distance: f64,
    threshold: f64,
    floor: f64,
    width_factor: f64,
    mannings_n: f64,
    erosion: ErosionModel,
    mode: FlowMode,
    radius: RadiusModel,
}

impl Connection {
    /// Create a connection using a builder pattern.  Lakes are `distance` metres apart and the sill
    /// stands at `threshold`.  Defaults are a width factor of 5, Manning's n of 0.03, no erosion,
    /// bidirectional flow, a rectangular channel and no floor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spillover::prelude::*;
    /// let mut sill = Connection::new(100.0, 9.5)
    ///     .mode(FlowMode::Forward)
    ///     .erosion(ErosionModel::product(0.01));
    /// let res = sill.step(10.0, 0.0, 1.0);
    /// assert!(res.discharge > 0.0);
    /// assert!(res.threshold < 9.5);
    /// ```
    pub fn new(distance: f64, threshold: f64) -> Self {
        Connection {
            distance,
            threshold,
            floor: f64::NEG_INFINITY,
            width_factor: 5.0,
            mannings_n: 0.03,
            erosion: ErosionModel::default(),
            mode: FlowMode::default(),
            radius: RadiusModel::default(),
        }
    }

    /// Set the channel width factor.
    pub fn width_factor(mut self, k: f64) -> Self {
        self.width_factor = k;
        self
    }

    /// Set Manning's roughness coefficient.
    pub fn mannings_n(mut self, n: f64) -> Self {
        self.mannings_n = n;
        self
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

    /// Set the hydraulic radius formula.
    pub fn radius(mut self, model: RadiusModel) -> Self {
        self.radius = model;
        self
    }

    /// Set the elevation below which the sill cannot erode.
    pub fn floor(mut self, elevation: f64) -> Self {
        self.floor = elevation;
        self
    }

    /// Current sill elevation (m).
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Lowest elevation the sill may reach (m).
    pub fn floor_elevation(&self) -> f64 {
        self.floor
    }

    /// Distance between the two lakes (m).
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Erosion law of the sill.
    pub fn erosion_model(&self) -> &ErosionModel {
        &self.erosion
    }

    /// Check the connection as the `j`th link of a chain.
    pub fn validate(&self, j: usize) -> Result<(), SpillError> {
        check_channel(
            j,
            self.distance,
            self.threshold,
            self.mannings_n,
            self.width_factor,
            &self.erosion,
        )
    }

    /// Advance the connection by `dt` seconds given the `upstream` (lake `i`) and `downstream`
    /// (lake `i + 1`) levels at the start of the step.  Lowers the sill when water crosses it.
    pub fn step(&mut self, upstream: f64, downstream: f64, dt: f64) -> StepResult {
        let (head, sign) = if upstream > self.threshold && upstream > downstream {
            (upstream, 1.0)
        } else if self.mode == FlowMode::Bidirectional
            && downstream > self.threshold
            && downstream > upstream
        {
            (downstream, -1.0)
        } else {
            return StepResult {
                threshold: self.threshold,
                ..StepResult::default()
            };
        };

        let slope = (upstream - downstream).abs() / self.distance;
        let depth = head - self.threshold;
        let flow = hydraulics::manning(
            depth,
            self.width_factor,
            slope,
            self.mannings_n,
            self.radius,
        );
        let mut erosion_rate = self.erosion.rate(&flow);

        let lowered = self.threshold - erosion_rate * dt;
        if lowered < self.floor {
            let next = self.threshold.min(self.floor);
            erosion_rate = (self.threshold - next) / dt;
            self.threshold = next;
        } else {
            self.threshold = lowered;
        }

        StepResult {
            discharge: sign * flow.discharge,
            velocity: sign * flow.velocity,
            erosion_rate,
            threshold: self.threshold,
        }
    }
}
