//! Time series recorded over a run.
//!
//! Every array is sized up front from the step count.  Row `k` of each array holds the values
//! evaluated at `time[k] = k·dt`: lake levels at the start of step `k`, the flow computed from those
//! levels, and the sill elevation after that step's erosion.
use crate::connection::StepResult;
use crate::errors::SpillError;

/// Levels, flows and sill elevations for every step of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    dt: f64,
    initial_thresholds: Vec<f64>,
    /// Model time at the start of each step (s).
    pub time: Vec<f64>,
    /// Lake levels (m), indexed `[lake][step]`.
    pub levels: Vec<Vec<f64>>,
    /// Discharge (m³/s), indexed `[connection][step]`.
    pub discharge: Vec<Vec<f64>>,
    /// Flow velocity (m/s), indexed `[connection][step]`.
    pub velocity: Vec<Vec<f64>>,
    /// Sill erosion rate (m/s), indexed `[connection][step]`.
    pub erosion_rate: Vec<Vec<f64>>,
    /// Sill elevation after each step (m), indexed `[connection][step]`.
    pub threshold: Vec<Vec<f64>>,
}

impl Series {
    /// Zeroed series for `reservoirs` lakes joined by sills starting at `thresholds`, covering
    /// `steps` steps of `dt` seconds.
    pub fn new(reservoirs: usize, thresholds: &[f64], steps: usize, dt: f64) -> Self {
        let connections = thresholds.len();
        Series {
            dt,
            initial_thresholds: thresholds.to_vec(),
            time: (0..steps).map(|k| k as f64 * dt).collect(),
            levels: vec![vec![0.0; steps]; reservoirs],
            discharge: vec![vec![0.0; steps]; connections],
            velocity: vec![vec![0.0; steps]; connections],
            erosion_rate: vec![vec![0.0; steps]; connections],
            threshold: vec![vec![0.0; steps]; connections],
        }
    }

    /// Store lake levels at the start of step `k`.
    pub fn record_levels<I: IntoIterator<Item = f64>>(&mut self, k: usize, levels: I) {
        for (lake, level) in self.levels.iter_mut().zip(levels) {
            lake[k] = level;
        }
    }

    /// Store the connection results of step `k`.
    pub fn record_step(&mut self, k: usize, results: &[StepResult]) {
        for (j, res) in results.iter().enumerate() {
            self.discharge[j][k] = res.discharge;
            self.velocity[j][k] = res.velocity;
            self.erosion_rate[j][k] = res.erosion_rate;
            self.threshold[j][k] = res.threshold;
        }
    }

    /// Number of steps.
    pub fn steps(&self) -> usize {
        self.time.len()
    }

    /// Time step (s).
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of lakes.
    pub fn reservoirs(&self) -> usize {
        self.levels.len()
    }

    /// Number of connections.
    pub fn connections(&self) -> usize {
        self.discharge.len()
    }

    /// Largest discharge magnitude across connection `j` (m³/s).
    pub fn peak_discharge(&self, j: usize) -> f64 {
        self.discharge[j].iter().fold(0.0, |m, q| q.abs().max(m))
    }

    /// How far sill `j` was lowered over the run (m).
    pub fn total_drop(&self, j: usize) -> f64 {
        match self.threshold[j].last() {
            Some(last) => self.initial_thresholds[j] - last,
            None => 0.0,
        }
    }

    /// Net volume moved across connection `j` over the run (m³), positive downstream.
    pub fn volume_transferred(&self, j: usize) -> f64 {
        self.discharge[j].iter().sum::<f64>() * self.dt
    }

    /// Column names used by [write_csv](#method.write_csv).
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["time".to_string()];
        headers.extend((0..self.reservoirs()).map(|i| format!("level_{}", i)));
        for name in &["discharge", "velocity", "erosion", "threshold"] {
            headers.extend((0..self.connections()).map(|j| format!("{}_{}", name, j)));
        }
        headers
    }

    /// Values of step `k` in the column order of [headers](#method.headers).
    pub fn row(&self, k: usize) -> Vec<f64> {
        let mut row = vec![self.time[k]];
        row.extend(self.levels.iter().map(|x| x[k]));
        for column in &[
            &self.discharge,
            &self.velocity,
            &self.erosion_rate,
            &self.threshold,
        ] {
            row.extend(column.iter().map(|x| x[k]));
        }
        row
    }

    /// Write the series to a csv file with one row per step.
    pub fn write_csv(&self, path: &str) -> Result<(), SpillError> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(self.headers())?;
        for k in 0..self.steps() {
            wtr.write_record(self.row(k).iter().map(|x| x.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
