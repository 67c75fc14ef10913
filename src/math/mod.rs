//! Unit-checked scalar and vector math used by the physics core.

pub mod units;
pub mod vector;

pub use units::*;
pub use vector::*;
