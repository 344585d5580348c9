//! Robot persistence

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use shared::{NewRobot, Robot, RobotInfo, SerialCode, TimeWindow};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[async_trait]
pub trait RobotRepository: Send + Sync {
    /// Persist a validated robot together with its serial code
    async fn create(&self, robot: NewRobot, serial: SerialCode) -> AppResult<Robot>;

    /// Count robots created within `window`, grouped by model and version.
    ///
    /// Rows are ordered by model, then version.
    async fn production_counts(&self, window: &TimeWindow) -> AppResult<Vec<RobotInfo>>;
}

#[async_trait]
impl<T: RobotRepository + ?Sized> RobotRepository for Arc<T> {
    async fn create(&self, robot: NewRobot, serial: SerialCode) -> AppResult<Robot> {
        (**self).create(robot, serial).await
    }

    async fn production_counts(&self, window: &TimeWindow) -> AppResult<Vec<RobotInfo>> {
        (**self).production_counts(window).await
    }
}

/// PostgreSQL robot repository
#[derive(Clone)]
pub struct PgRobotRepository {
    db: PgPool,
}

/// Database row for a robot
#[derive(Debug, Clone, sqlx::FromRow)]
struct RobotRow {
    id: Uuid,
    model: String,
    version: String,
    serial: String,
    created: NaiveDateTime,
}

impl TryFrom<RobotRow> for Robot {
    type Error = AppError;

    fn try_from(row: RobotRow) -> Result<Self, Self::Error> {
        let serial = row.serial.parse().map_err(|e| {
            AppError::Internal(format!("Stored serial {:?} is invalid: {}", row.serial, e))
        })?;
        Ok(Robot {
            id: row.id,
            model: row.model,
            version: row.version,
            serial,
            created: row.created,
        })
    }
}

impl PgRobotRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RobotRepository for PgRobotRepository {
    async fn create(&self, robot: NewRobot, serial: SerialCode) -> AppResult<Robot> {
        let row = sqlx::query_as::<_, RobotRow>(
            r#"
            INSERT INTO robots (id, model, version, serial, created)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, model, version, serial, created
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&robot.model)
        .bind(&robot.version)
        .bind(serial.as_str())
        .bind(robot.created)
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }

    async fn production_counts(&self, window: &TimeWindow) -> AppResult<Vec<RobotInfo>> {
        let rows: Vec<(String, String, i64)> = sqlx::query_as(
            r#"
            SELECT model, version, COUNT(*) AS produced_amount
            FROM robots
            WHERE created BETWEEN $1 AND $2
            GROUP BY model, version
            ORDER BY model, version
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(model, version, produced_amount)| RobotInfo {
                model,
                version,
                produced_amount,
            })
            .collect())
    }
}
