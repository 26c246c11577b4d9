//! Error types produced while binding configuration nodes.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{BindError, ScalarFormatError};

#[cfg(test)]
mod tests;
