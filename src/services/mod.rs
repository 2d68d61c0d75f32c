//! Business logic services

pub mod advisory;
pub mod geo;
pub mod glosa;
pub mod junctions;
pub mod prediction;
pub mod stats;
