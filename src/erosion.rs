//! Erosion of the sill by flowing water.
//!
//! Three formulations are supported, chosen per connection:
//!  - [Shields](enum.ErosionModel.html#variant.Shields): excess shear stress over the critical
//!    Shields stress of the bed grains, `E = C·D50^(1−m)·(τ − τc)^m` with `τ = ρw·g·R·s`.
//!  - [ShearPower](enum.ErosionModel.html#variant.ShearPower): `E = C·τ^1.5` with `τ = ρw·g·s·d`
//!    and no critical stress.
//!  - [Product](enum.ErosionModel.html#variant.Product): `E = C·s·d·v`.
use crate::hydraulics::Flow;
use serde::{Deserialize, Serialize};

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;
/// Density of water (kg/m³).
pub const RHO_WATER: f64 = 1000.0;
/// Density of quartz sediment (kg/m³).
pub const RHO_SEDIMENT: f64 = 2650.0;
/// Critical Shields parameter for incipient motion.
pub const THETA_CRIT: f64 = 0.045;
/// Erosion exponent applied to excess shear stress.
pub const EROSION_EXPONENT: f64 = 1.5;

/// Erosion law for a sill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ErosionModel {
    /// Excess shear stress over the critical stress of grains of size `grain_size`.
    Shields {
        /// Empirical erosion coefficient.
        coefficient: f64,
        /// Median grain size D50 (m).
        grain_size: f64,
        /// Exponent `m` on excess shear stress.
        exponent: f64,
        /// Critical Shields parameter.
        theta_crit: f64,
        /// Sediment density (kg/m³).
        rho_sediment: f64,
    },
    /// Power law on simplified bed shear stress, `τ = ρw·g·s·d`.
    ShearPower {
        /// Erodibility coefficient.
        coefficient: f64,
    },
    /// Erosion proportional to slope, depth and velocity.
    Product {
        /// Empirical erosion factor.
        coefficient: f64,
    },
}

impl Default for ErosionModel {
    fn default() -> Self {
        ErosionModel::Product { coefficient: 0.0 }
    }
}

impl ErosionModel {
    /// Shields model with quartz sediment, a critical Shields parameter of 0.045 and exponent 1.5.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spillover::erosion::ErosionModel;
    /// let model = ErosionModel::shields(1e-9, 0.001);
    /// assert_eq!(model.coefficient(), 1e-9);
    /// ```
    pub fn shields(coefficient: f64, grain_size: f64) -> Self {
        ErosionModel::Shields {
            coefficient,
            grain_size,
            exponent: EROSION_EXPONENT,
            theta_crit: THETA_CRIT,
            rho_sediment: RHO_SEDIMENT,
        }
    }

    /// Power law on simplified shear stress.
    pub fn shear_power(coefficient: f64) -> Self {
        ErosionModel::ShearPower { coefficient }
    }

    /// Slope-depth-velocity product law.
    pub fn product(coefficient: f64) -> Self {
        ErosionModel::Product { coefficient }
    }

    /// The leading erosion coefficient of the model.
    pub fn coefficient(&self) -> f64 {
        match self {
            ErosionModel::Shields { coefficient, .. } => *coefficient,
            ErosionModel::ShearPower { coefficient } => *coefficient,
            ErosionModel::Product { coefficient } => *coefficient,
        }
    }

    /// Copy of the model with the leading coefficient replaced, used by parameter sweeps.
    pub fn with_coefficient(mut self, value: f64) -> Self {
        match &mut self {
            ErosionModel::Shields { coefficient, .. } => *coefficient = value,
            ErosionModel::ShearPower { coefficient } => *coefficient = value,
            ErosionModel::Product { coefficient } => *coefficient = value,
        }
        self
    }

    /// True when every parameter is finite, coefficients are non-negative, and grain size and
    /// exponent are positive.
    pub fn is_valid(&self) -> bool {
        let ok = |x: f64| x.is_finite() && x >= 0.0;
        match *self {
            ErosionModel::Shields {
                coefficient,
                grain_size,
                exponent,
                theta_crit,
                rho_sediment,
            } => {
                ok(coefficient)
                    && ok(grain_size)
                    && grain_size > 0.0
                    && ok(exponent)
                    && exponent > 0.0
                    && ok(theta_crit)
                    && ok(rho_sediment)
            }
            ErosionModel::ShearPower { coefficient } => ok(coefficient),
            ErosionModel::Product { coefficient } => ok(coefficient),
        }
    }

    /// Bed shear stress (Pa) the model sees for `flow`.
    pub fn shear_stress(&self, flow: &Flow) -> f64 {
        match self {
            ErosionModel::Shields { .. } => RHO_WATER * GRAVITY * flow.radius * flow.slope,
            _ => RHO_WATER * GRAVITY * flow.slope * flow.depth,
        }
    }

    /// Critical shear stress (Pa) below which no erosion occurs.  Zero for models without a cutoff.
    pub fn critical_stress(&self) -> f64 {
        match *self {
            ErosionModel::Shields {
                grain_size,
                theta_crit,
                rho_sediment,
                ..
            } => theta_crit * (rho_sediment - RHO_WATER) * GRAVITY * grain_size,
            _ => 0.0,
        }
    }

    /// Instantaneous lowering rate of the sill (m/s) for an active `flow`.  Never negative.
    pub fn rate(&self, flow: &Flow) -> f64 {
        if flow.depth <= 0.0 {
            return 0.0;
        }
        let rate = match *self {
            ErosionModel::Shields {
                coefficient,
                grain_size,
                exponent,
                ..
            } => {
                let excess = self.shear_stress(flow) - self.critical_stress();
                if excess > 0.0 {
                    coefficient * grain_size.powf(1.0 - exponent) * excess.powf(exponent)
                } else {
                    0.0
                }
            }
            ErosionModel::ShearPower { coefficient } => {
                coefficient * self.shear_stress(flow).powf(EROSION_EXPONENT)
            }
            ErosionModel::Product { coefficient } => {
                coefficient * flow.slope * flow.depth * flow.velocity
            }
        };
        rate.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydraulics::{manning, RadiusModel};

    fn flow() -> Flow {
        manning(0.5, 5.0, 0.01, 0.03, RadiusModel::Rectangular)
    }

    #[test]
    fn critical_stress_of_coarse_sand() {
        let model = ErosionModel::shields(1e-9, 0.001);
        let tc = 0.045 * 1650.0 * 9.81 * 0.001;
        assert!((model.critical_stress() - tc).abs() < 1e-12);
    }

    #[test]
    fn shields_below_critical_is_zero() {
        let model = ErosionModel::shields(1.0, 1.0);
        assert_eq!(model.rate(&flow()), 0.0);
    }

    #[test]
    fn shields_above_critical() {
        let f = flow();
        let model = ErosionModel::shields(1e-9, 0.001);
        let tau = 1000.0 * 9.81 * f.radius * f.slope;
        let excess: f64 = tau - model.critical_stress();
        let expected = 1e-9 * 0.001_f64.powf(-0.5) * excess.powf(1.5);
        assert!((model.rate(&f) - expected).abs() < 1e-18);
    }

    #[test]
    fn shear_power() {
        let f = flow();
        let tau: f64 = 1000.0 * 9.81 * f.slope * f.depth;
        let rate = ErosionModel::shear_power(1e-6).rate(&f);
        assert!((rate - 1e-6 * tau.powf(1.5)).abs() < 1e-15);
    }

    #[test]
    fn product() {
        let f = flow();
        let rate = ErosionModel::product(0.01).rate(&f);
        assert!((rate - 0.01 * f.slope * f.depth * f.velocity).abs() < 1e-15);
    }

    #[test]
    fn dry_channel_never_erodes() {
        let dry = Flow::default();
        assert_eq!(ErosionModel::product(1.0).rate(&dry), 0.0);
        assert_eq!(ErosionModel::shear_power(1.0).rate(&dry), 0.0);
        assert_eq!(ErosionModel::shields(1.0, 0.001).rate(&dry), 0.0);
    }

    #[test]
    fn coefficient_swap_keeps_variant() {
        let model = ErosionModel::shields(1e-9, 0.002).with_coefficient(3e-9);
        assert_eq!(model.coefficient(), 3e-9);
        assert!((model.critical_stress() - ErosionModel::shields(0.0, 0.002).critical_stress()).abs() < 1e-15);
    }

    #[test]
    fn validity() {
        assert!(ErosionModel::shields(1e-9, 0.001).is_valid());
        assert!(!ErosionModel::shields(1e-9, 0.0).is_valid());
        assert!(!ErosionModel::product(-0.1).is_valid());
        assert!(!ErosionModel::shear_power(f64::NAN).is_valid());
    }
}
