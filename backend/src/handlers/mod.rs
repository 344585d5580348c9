//! HTTP handlers for the R4C robot factory

pub mod health;
pub mod robots;

pub use health::health_check;
pub use robots::{add_robot, weekly_report};
