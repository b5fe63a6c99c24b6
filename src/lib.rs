//! Practical exam scoring for university physical-fitness admissions.
//!
//! Raw event measurements are converted to points through a per-university
//! [`StandardsTable`](standards::StandardsTable), summed with the candidate's
//! academic score, and classified against that university's cutoffs.

pub mod config;
pub mod error;
pub mod output;
pub mod scoring;
pub mod standards;

pub use error::{EvalError, EvalResult};
