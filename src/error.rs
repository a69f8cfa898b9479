//! Error types.
//!
//! The library reports failures through [`GwError`]; the `gwc` binary wraps
//! them in an [`AppError`] that carries the process exit code.

use snafu::Snafu;

/// Broad failure classes, used to pick exit codes and log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input: selectors, domains, population names, cosmology parameters.
    Validation,
    /// Quadrature or root-finding did not behave.
    Numerical,
    /// The rejection sampler gave up on a density.
    Calibration,
    /// Reading or writing catalogs.
    Io,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum GwError {
    #[snafu(display("{message}"))]
    InvalidSelector { message: String },

    #[snafu(display(
        "{what} {value} is out of bounds, valid range for {source_name} is [{min}, {max}]"
    ))]
    DomainViolation {
        source_name: String,
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[snafu(display(
        "population '{name}' not available, available populations are: 'Pop III', 'Delay' and 'No Delay'"
    ))]
    UnknownPopulation { name: String },

    #[snafu(display("invalid cosmology: {message}"))]
    InvalidCosmology { message: String },

    #[snafu(display("{message}"))]
    InvalidInput { message: String },

    #[snafu(display(
        "quadrature over [{a}, {b}] did not converge after {subdivisions} subdivisions (error estimate {estimate:e})"
    ))]
    NumericalIntegration {
        a: f64,
        b: f64,
        subdivisions: usize,
        estimate: f64,
    },

    #[snafu(display("no redshift found for luminosity distance {target} Gpc: {reason}"))]
    RootNotFound { target: f64, reason: String },

    #[snafu(display(
        "luminosity distance {value} Gpc is outside the tabulated range [{min}, {max}] Gpc"
    ))]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[snafu(display(
        "rejection sampler gave up after {attempts} consecutive rejections with {accepted} of {requested} samples accepted; check the density's codomain bounds"
    ))]
    SamplerCalibration {
        attempts: usize,
        accepted: usize,
        requested: usize,
    },

    #[snafu(display("i/o error on '{path}': {source}"))]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("malformed catalog '{path}': {source}"))]
    Csv { path: String, source: csv::Error },

    #[snafu(display("json error on '{path}': {source}"))]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

impl GwError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GwError::InvalidSelector { .. }
            | GwError::DomainViolation { .. }
            | GwError::UnknownPopulation { .. }
            | GwError::InvalidCosmology { .. }
            | GwError::InvalidInput { .. } => ErrorKind::Validation,
            GwError::NumericalIntegration { .. }
            | GwError::RootNotFound { .. }
            | GwError::OutOfRange { .. } => ErrorKind::Numerical,
            GwError::SamplerCalibration { .. } => ErrorKind::Calibration,
            GwError::Io { .. } | GwError::Csv { .. } | GwError::Json { .. } => ErrorKind::Io,
        }
    }
}

pub type GwResult<T> = Result<T, GwError>;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<GwError> for AppError {
    fn from(err: GwError) -> Self {
        let exit_code = match err.kind() {
            ErrorKind::Validation | ErrorKind::Io => 2,
            ErrorKind::Numerical | ErrorKind::Calibration => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
