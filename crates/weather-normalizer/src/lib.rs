//! Weather Reading Normalization and Validation
//!
//! Converts raw weather readings in any supported unit system into a single
//! canonical, range-checked record. Pure and synchronous: no I/O and no
//! shared state, so every entry point can be called concurrently.

mod batch;
mod error;
mod model;
mod normalizer;
mod units;
mod validator;

pub use batch::normalize_batch;
pub use error::{ErrorKind, NormalizationFailure, ValidationError};
pub use model::{parse_timestamp, CanonicalWeather, Location, RawReading, Source};
pub use normalizer::{normalize, NormalizationOutcome, Normalizer};
pub use units::{TemperatureUnit, WindSpeedUnit};
pub use validator::{ValidationConfig, Validator};
