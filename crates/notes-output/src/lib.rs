//! Output of the extracted discharge-summary dataset.

mod error;
mod writer;

pub use error::{OutputError, Result};
pub use writer::{DischargeWriter, format_discharge_line};
