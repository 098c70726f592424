//! Structs and methods for a chain of lakes joined by erodible sills.
use crate::connection::{Connection, StepResult};
use crate::errors::SpillError;
use crate::series::Series;
use log::{debug, trace, warn};

/// A well-mixed lake with a fixed surface area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reservoir {
    /// Surface area (m²).
    pub area: f64,
    /// Water level (m).
    pub level: f64,
}

impl Reservoir {
    /// Lake of `area` square metres filled to `level`.
    pub fn new(area: f64, level: f64) -> Self {
        Reservoir { area, level }
    }

    /// Check the lake as the `i`th of a chain.
    pub fn validate(&self, i: usize) -> Result<(), SpillError> {
        check_lake(i, self.area, self.level)
    }
}

/// Lake `i` needs a positive, finite area and a finite level.
pub(crate) fn check_lake(i: usize, area: f64, level: f64) -> Result<(), SpillError> {
    if !(area > 0.0) || !area.is_finite() {
        return Err(SpillError::NonPositiveArea(i));
    }
    if !level.is_finite() {
        return Err(SpillError::NonFiniteLevel(i));
    }
    Ok(())
}

/// Lakes `0..n` in a line, with connection `j` joining lake `j` to lake `j + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    reservoirs: Vec<Reservoir>,
    connections: Vec<Connection>,
}

impl Network {
    /// Assemble a chain.  Fails unless there is one connection fewer than lakes and every lake and
    /// connection passes the same checks as [Params::validate](../params/struct.Params.html#method.validate):
    /// finite levels and sills, positive finite areas, distances, roughness and width factors, and
    /// valid erosion parameters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spillover::prelude::*;
    /// let net = Network::new(
    ///     vec![Reservoir::new(1e6, 10.0), Reservoir::new(1e6, 0.0)],
    ///     vec![Connection::new(100.0, 9.5)],
    /// );
    /// assert!(net.is_ok());
    /// ```
    pub fn new(reservoirs: Vec<Reservoir>, connections: Vec<Connection>) -> Result<Self, SpillError> {
        if reservoirs.is_empty() {
            return Err(SpillError::NoReservoirs);
        }
        if connections.len() + 1 != reservoirs.len() {
            return Err(SpillError::LengthMismatch {
                reservoirs: reservoirs.len(),
                connections: connections.len(),
            });
        }
        for (i, lake) in reservoirs.iter().enumerate() {
            lake.validate(i)?;
        }
        for (j, conn) in connections.iter().enumerate() {
            conn.validate(j)?;
        }
        Ok(Network {
            reservoirs,
            connections,
        })
    }

    /// Current lake levels (m).
    pub fn levels(&self) -> Vec<f64> {
        self.reservoirs.iter().map(|r| r.level).collect()
    }

    /// Current sill elevations (m).
    pub fn thresholds(&self) -> Vec<f64> {
        self.connections.iter().map(|c| c.threshold()).collect()
    }

    /// Lakes in the chain.
    pub fn reservoirs(&self) -> &[Reservoir] {
        &self.reservoirs
    }

    /// Connections in the chain.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Advance every lake and sill by one explicit Euler step of `dt` seconds.  All connections see
    /// the levels from the start of the step.  Returns one outcome per connection, in chain order.
    pub fn step(&mut self, dt: f64) -> Vec<StepResult> {
        let mut results = vec![StepResult::default(); self.connections.len()];
        self.step_into(dt, &mut results);
        results
    }

    /// As [step](#method.step), writing into a buffer reused across steps.  Only the first
    /// `connections().len()` slots are touched.
    pub(crate) fn step_into(&mut self, dt: f64, results: &mut [StepResult]) {
        let levels = self.reservoirs.windows(2);
        for ((conn, pair), slot) in self.connections.iter_mut().zip(levels).zip(results.iter_mut()) {
            *slot = conn.step(pair[0].level, pair[1].level, dt);
        }
        for (j, res) in results.iter().take(self.connections.len()).enumerate() {
            let volume = res.discharge * dt;
            self.reservoirs[j].level -= volume / self.reservoirs[j].area;
            self.reservoirs[j + 1].level += volume / self.reservoirs[j + 1].area;
        }
    }

    /// Run exactly `steps` steps of `dt` seconds and return the recorded series.
    pub fn run(&mut self, steps: usize, dt: f64) -> Series {
        let mut series = Series::new(self.reservoirs.len(), &self.thresholds(), steps, dt);
        let mut results = vec![StepResult::default(); self.connections.len()];
        let mut active = vec![false; self.connections.len()];
        let mut floored: Vec<bool> = self
            .connections
            .iter()
            .map(|c| c.threshold() <= c.floor_elevation())
            .collect();

        for k in 0..steps {
            series.record_levels(k, self.reservoirs.iter().map(|r| r.level));
            self.step_into(dt, &mut results);
            series.record_step(k, &results);
            trace!("step {}: levels {:?}", k, self.levels());

            for (j, res) in results.iter().enumerate() {
                if res.is_active() != active[j] {
                    active[j] = res.is_active();
                    debug!(
                        "connection {} {} at t = {} s (Q = {:.3} m³/s, sill {:.4} m)",
                        j,
                        if active[j] { "opened" } else { "closed" },
                        series.time[k],
                        res.discharge,
                        res.threshold
                    );
                }
                if !floored[j] && res.threshold <= self.connections[j].floor_elevation() {
                    floored[j] = true;
                    warn!(
                        "sill {} reached its floor of {} m at t = {} s",
                        j, res.threshold, series.time[k]
                    );
                }
            }
        }
        series
    }
}
