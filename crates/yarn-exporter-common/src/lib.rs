pub mod error;
pub mod units;

pub use error::{ExporterError, Result};
pub use units::{megabytes_to_bytes, to_epoch_millis};
