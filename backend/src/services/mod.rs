//! Business logic services for the R4C robot factory

pub mod notification;
pub mod production;
pub mod registration;
pub mod report;
pub mod serial_pool;

pub use notification::{Mailer, NotificationDispatcher, SmtpMailer};
pub use production::{ModelGroups, WeeklyProduction};
pub use registration::RobotRegistrar;
pub use report::ReportService;
pub use serial_pool::{SerialPool, SharedSerialPool};
