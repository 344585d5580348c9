//! Weekly production aggregation
//!
//! Counts the robots produced during the previous calendar week per model and
//! version, then hands them out one model at a time.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use shared::{RobotInfo, TimeWindow};

use crate::error::AppResult;
use crate::repositories::RobotRepository;

/// Weekly production data source
pub struct WeeklyProduction<R> {
    robots: R,
}

impl<R: RobotRepository> WeeklyProduction<R> {
    pub fn new(robots: R) -> Self {
        Self { robots }
    }

    /// Per-model production groups for the week before `now`
    pub async fn weekly_production(&self, now: NaiveDateTime) -> AppResult<ModelGroups> {
        let window = TimeWindow::previous_week(now);
        let counts = self.robots.production_counts(&window).await?;

        tracing::debug!(
            start = %window.start,
            end = %window.end,
            rows = counts.len(),
            "Weekly production counted"
        );
        Ok(ModelGroups::new(counts))
    }
}

/// Single-pass iterator over production counts, one `Vec` per model.
///
/// Models come out in the order they first appear; versions keep the order
/// of the grouping query.
#[derive(Debug)]
pub struct ModelGroups {
    counts: Vec<RobotInfo>,
    models: std::vec::IntoIter<String>,
}

impl ModelGroups {
    pub fn new(counts: Vec<RobotInfo>) -> Self {
        let models: Vec<String> = {
            let mut seen = HashSet::new();
            counts
                .iter()
                .filter(|info| seen.insert(info.model.as_str()))
                .map(|info| info.model.clone())
                .collect()
        };

        Self {
            counts,
            models: models.into_iter(),
        }
    }
}

impl Iterator for ModelGroups {
    type Item = Vec<RobotInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        let model = self.models.next()?;
        Some(
            self.counts
                .iter()
                .filter(|info| info.model == model)
                .cloned()
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.models.size_hint()
    }
}

impl ExactSizeIterator for ModelGroups {}
