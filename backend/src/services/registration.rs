//! Robot registration
//!
//! Validates incoming robot data, assigns the next serial code from the pool
//! and stores the robot. The serial is consumed before the robot is written;
//! if the write fails that serial is gone from the pool for good.

use shared::{RegisterRobotInput, Robot};

use super::serial_pool::SharedSerialPool;
use crate::error::{AppError, AppResult};
use crate::repositories::RobotRepository;

/// Registers newly produced robots
pub struct RobotRegistrar<R> {
    robots: R,
    serials: SharedSerialPool,
}

impl<R: RobotRepository> RobotRegistrar<R> {
    pub fn new(robots: R, serials: SharedSerialPool) -> Self {
        Self { robots, serials }
    }

    /// Register a robot and return it with its identifier and serial code
    pub async fn register(&self, input: RegisterRobotInput) -> AppResult<Robot> {
        let robot = input.clean().map_err(AppError::InvalidInput)?;

        let serial = {
            let pool = self.serials.lock().await;
            pool.take_next().await.map_err(|err| {
                tracing::warn!(error = %err, "Robot registration aborted, no serial code");
                err
            })?
        };

        let robot = self.robots.create(robot, serial).await?;

        tracing::info!(
            robot_id = %robot.id,
            serial = %robot.serial,
            model = %robot.model,
            version = %robot.version,
            "Robot registered"
        );
        Ok(robot)
    }
}
