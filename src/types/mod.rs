//! Data types shared across the crate.

pub mod location;

pub use location::{LocationSample, MPS_TO_KMH};
