use crate::errors;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Seconds to hours, for chart axes.
pub fn hours(seconds: f64) -> f64 {
    seconds / 3600.0
}

/// Smallest and largest finite value in `values`, widened so the range is never empty.
///
/// # Examples
///
/// ```rust
/// let (lo, hi) = spillover::utils::extent(&[2.0, 5.0, 3.0]);
/// assert_eq!((lo, hi), (2.0, 5.0));
/// let (lo, hi) = spillover::utils::extent(&[1.0, 1.0]);
/// assert!(lo < 1.0 && hi > 1.0);
/// ```
pub fn extent(values: &[f64]) -> (f64, f64) {
    let lo = values
        .iter()
        .cloned()
        .filter(|x| x.is_finite())
        .fold(f64::INFINITY, f64::min);
    let hi = values
        .iter()
        .cloned()
        .filter(|x| x.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if lo > hi {
        return (0.0, 1.0);
    }
    if hi - lo < 1e-12 {
        let pad = if lo.abs() > 0.0 { lo.abs() * 0.05 } else { 1.0 };
        return (lo - pad, hi + pad);
    }
    (lo, hi)
}

/// Read rows of a csv file with headers into a vector of `T`.
pub fn read_csv<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, errors::SpillError> {
    let mut dat = Vec::new();
    let var = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(var);
    for result in rdr.deserialize() {
        let row: T = result?;
        dat.push(row);
    }
    Ok(dat)
}

/// Write records to csv file.
pub fn record<T: Serialize>(rec: &[T], path: &str) -> Result<(), errors::SpillError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for i in rec {
        wtr.serialize(i)?;
    }
    wtr.flush()?;
    Ok(())
}
