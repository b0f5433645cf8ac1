#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod progress;

pub use error::Error;
pub use progress::{answered_count, compute_progress};
