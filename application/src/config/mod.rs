//! Application-level configuration.
//!
//! - [`ExecutionParams`]: generator call control (timeouts, sampling options)

pub mod execution_params;

pub use execution_params::ExecutionParams;
