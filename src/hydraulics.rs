//! Open-channel hydraulics across a sill.
//!
//! The channel cut through a sill is treated as rectangular, open at the top, with a width that
//! scales with flow depth (`w = k·d`).  Velocity follows Manning's equation in SI units:
//!
//! ```text
//! v = (1/n) · R^(2/3) · s^(1/2)
//! Q = v · d · w
//! ```
use serde::{Deserialize, Serialize};

/// Formula used for the hydraulic radius of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RadiusModel {
    /// Flow area over wetted perimeter of a rectangular channel, `R = d·w / (w + 2d)`.
    Rectangular,
    /// Coarser approximation `R = d / (1 + 2/w)`.
    Approximate,
}

impl Default for RadiusModel {
    fn default() -> Self {
        RadiusModel::Rectangular
    }
}

impl RadiusModel {
    /// Hydraulic radius for a flow `depth` in a channel of `width`.
    pub fn radius(&self, depth: f64, width: f64) -> f64 {
        match self {
            RadiusModel::Rectangular => depth * width / (width + 2.0 * depth),
            RadiusModel::Approximate => depth / (1.0 + 2.0 / width),
        }
    }
}

/// Instantaneous flow through one channel.  All values are non-negative magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Flow {
    /// Flow depth above the sill (m).
    pub depth: f64,
    /// Channel width (m).
    pub width: f64,
    /// Hydraulic radius (m).
    pub radius: f64,
    /// Water surface slope between the two lakes.
    pub slope: f64,
    /// Mean flow velocity (m/s).
    pub velocity: f64,
    /// Discharge (m³/s).
    pub discharge: f64,
}

/// Evaluate Manning flow through a channel with `depth` above the sill.
///  - `depth` must be positive; callers gate inactive connections before calling.
///  - `width_factor` scales channel width with depth.
///  - `slope` is the non-negative water surface slope.
///  - `mannings_n` is the roughness coefficient.
///
/// # Examples
///
/// ```rust
/// use spillover::hydraulics::{manning, RadiusModel};
/// let flow = manning(0.5, 5.0, 0.0, 0.03, RadiusModel::Rectangular);
/// assert_eq!(flow.discharge, 0.0);
/// ```
pub fn manning(
    depth: f64,
    width_factor: f64,
    slope: f64,
    mannings_n: f64,
    model: RadiusModel,
) -> Flow {
    let width = width_factor * depth;
    let radius = model.radius(depth, width);
    let velocity = radius.powf(2.0 / 3.0) * slope.sqrt() / mannings_n;
    Flow {
        depth,
        width,
        radius,
        slope,
        velocity,
        discharge: velocity * depth * width,
    }
}
