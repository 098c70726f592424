/// Custom error type for the spillover crate.
#[derive(Debug, Clone, PartialEq)]
pub enum SpillError {
    /// A network needs at least one reservoir.
    NoReservoirs,
    /// A chain of `n` reservoirs needs exactly `n - 1` connections.
    LengthMismatch {
        /// Number of reservoirs supplied.
        reservoirs: usize,
        /// Number of connections supplied.
        connections: usize,
    },
    /// Reservoir at index has zero or negative surface area.
    NonPositiveArea(usize),
    /// Connection at index has zero or negative distance.
    NonPositiveDistance(usize),
    /// Connection at index has zero or negative Manning's n.
    NonPositiveRoughness(usize),
    /// Connection at index has zero or negative width factor.
    NonPositiveWidth(usize),
    /// Connection at index has an erosion model with negative or non-finite parameters.
    InvalidErosion(usize),
    /// Reservoir at index starts from a NaN or infinite level.
    NonFiniteLevel(usize),
    /// Sill of connection at index starts from a NaN or infinite elevation.
    NonFiniteThreshold(usize),
    /// Connection at index names a flow direction other than `forward` or `bidirectional`.
    InvalidFlowMode(usize),
    /// Total simulated time is zero, negative or not finite.
    NonPositiveTime,
    /// Time step is zero, negative or not finite.
    NonPositiveStep,
    /// Requested step count is zero.
    ZeroSteps,
    /// Requested or implied step count exceeds the cap, or cannot be computed.
    TooManySteps,
    /// Sampling range is empty, reversed or not finite.
    EmptyRange,
    /// Error type from csv crate.
    CsvError,
    /// Error type from std::io.
    IoError,
    /// Error type from plotters, carrying the backend message.
    PlotError(String),
}

impl std::error::Error for SpillError {}

impl std::fmt::Display for SpillError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SpillError::NoReservoirs => write!(f, "At least one reservoir is required."),
            SpillError::LengthMismatch {
                reservoirs,
                connections,
            } => write!(
                f,
                "{} reservoirs require {} connections, found {}.",
                reservoirs,
                reservoirs.saturating_sub(1),
                connections
            ),
            SpillError::NonPositiveArea(i) => {
                write!(f, "Reservoir {} must have a positive surface area.", i)
            }
            SpillError::NonPositiveDistance(i) => {
                write!(f, "Connection {} must have a positive distance.", i)
            }
            SpillError::NonPositiveRoughness(i) => {
                write!(f, "Connection {} must have a positive Manning's n.", i)
            }
            SpillError::NonPositiveWidth(i) => {
                write!(f, "Connection {} must have a positive width factor.", i)
            }
            SpillError::InvalidErosion(i) => write!(
                f,
                "Connection {} has negative or non-finite erosion parameters.",
                i
            ),
            SpillError::NonFiniteLevel(i) => {
                write!(f, "Reservoir {} starts from a non-finite level.", i)
            }
            SpillError::NonFiniteThreshold(i) => {
                write!(f, "Sill {} starts from a non-finite elevation.", i)
            }
            SpillError::InvalidFlowMode(i) => write!(
                f,
                "Connection {} flow must be `forward` or `bidirectional`.",
                i
            ),
            SpillError::NonPositiveTime => write!(f, "Total simulated time must be positive."),
            SpillError::NonPositiveStep => write!(f, "Time step must be positive."),
            SpillError::ZeroSteps => write!(f, "Step count must be at least one."),
            SpillError::TooManySteps => write!(
                f,
                "Step count must be computable and at most {}.",
                crate::params::MAX_STEPS
            ),
            SpillError::EmptyRange => write!(f, "Sampling range must be finite and non-empty."),
            SpillError::CsvError => write!(f, "Could not serialize/deserialize csv file."),
            SpillError::IoError => write!(f, "Could not read file from path provided."),
            SpillError::PlotError(msg) => write!(f, "Could not draw chart: {}", msg),
        }
    }
}

impl From<csv::Error> for SpillError {
    fn from(_: csv::Error) -> Self {
        SpillError::CsvError
    }
}

impl From<std::io::Error> for SpillError {
    fn from(_: std::io::Error) -> Self {
        SpillError::IoError
    }
}
