//! Host File Access
//!
//! A `Result`-based layer over the raw semihosting calls: descriptors become
//! owned [`HostFile`] handles and the −1 convention becomes [`HostError`]
//! with the host's errno attached.

mod error;
mod file;

pub use error::HostError;
pub use file::{remove, HostFile};
