//! Domain models for the R4C robot factory

mod order;
mod robot;
mod serial;

pub use order::*;
pub use robot::*;
pub use serial::*;
