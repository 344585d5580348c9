//! Storage access for robots and orders
//!
//! Services depend on the traits here. The server puts the PostgreSQL
//! implementations into `AppState` behind `Arc<dyn ...>`.

pub mod order;
pub mod robot;

pub use order::{OrderRepository, PgOrderRepository};
pub use robot::{PgRobotRepository, RobotRepository};
