//! Type definitions

pub mod advisory;
pub mod geo;
pub mod junction;
pub mod messages;
pub mod signal;
pub mod stats;

pub use advisory::*;
pub use geo::*;
pub use junction::*;
pub use messages::*;
pub use signal::*;
pub use stats::*;
