//! Weekly production report
//!
//! Builds an Excel workbook with one worksheet per robot model and one row per
//! version. A report is built at most once per week: if the file for that
//! week is already on disk it is returned as is.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime};
use rust_xlsxwriter::{Workbook, XlsxError};
use shared::{Language, TimeWindow};
use thiserror::Error;
use uuid::Uuid;

use super::production::{ModelGroups, WeeklyProduction};
use crate::config::ReportsConfig;
use crate::error::AppError;
use crate::repositories::RobotRepository;

/// Report generation failures
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not aggregate weekly production: {0}")]
    Aggregation(#[from] AppError),

    #[error("could not write workbook: {0}")]
    Workbook(#[from] XlsxError),

    #[error("report file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Weekly production report builder
pub struct ReportService<R> {
    production: WeeklyProduction<R>,
    directory: PathBuf,
    language: Language,
}

impl<R: RobotRepository> ReportService<R> {
    pub fn new(robots: R, config: &ReportsConfig, language: Language) -> Self {
        Self {
            production: WeeklyProduction::new(robots),
            directory: config.directory.clone(),
            language,
        }
    }

    /// Where the report for the week before `now` lives
    pub fn report_path(&self, now: NaiveDateTime) -> PathBuf {
        self.directory
            .join(report_file_name(&TimeWindow::previous_week(now)))
    }

    /// Build the report for the week before `now`, or reuse an existing one
    pub async fn build_weekly_report(&self, now: NaiveDateTime) -> Result<PathBuf, ReportError> {
        let path = self.report_path(now);
        if is_file(&path).await {
            tracing::debug!(path = %path.display(), "Weekly report already built");
            return Ok(path);
        }

        let groups = self.production.weekly_production(now).await?;
        let bytes = render_workbook(groups, self.language)?;

        tokio::fs::create_dir_all(&self.directory).await?;
        publish(&path, &bytes).await?;

        tracing::info!(path = %path.display(), "Weekly report built");
        Ok(path)
    }
}

/// `"{start.day}.{end.month}-{end.day}.{end.month}.xlsx"`.
///
/// The end month is used for both halves, also when the week spans two
/// months.
pub fn report_file_name(window: &TimeWindow) -> String {
    format!(
        "{}.{}-{}.{}.xlsx",
        window.start.day(),
        window.end.month(),
        window.end.day(),
        window.end.month()
    )
}

/// Column labels of every worksheet
pub fn report_headers(language: Language) -> [&'static str; 3] {
    match language {
        Language::Russian => ["Модель", "Версия", "Произведено за неделю"],
        Language::English => ["Model", "Version", "Produced this week"],
    }
}

/// Characters Excel does not allow in worksheet names
const SHEET_NAME_FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Worksheet name for `model`, unique among `used` regardless of case.
///
/// Forbidden characters become `_` and surrounding apostrophes are dropped.
/// A name already taken gets a ` (2)`, ` (3)`, ... suffix. The model itself
/// is still written unchanged in the first column.
pub fn sheet_name(model: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = model
        .chars()
        .map(|c| if SHEET_NAME_FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    let base = match cleaned.trim_matches('\'') {
        "" => "_",
        trimmed => trimmed,
    };

    let mut name = base.to_string();
    let mut suffix = 1;
    while !used.insert(name.to_lowercase()) {
        suffix += 1;
        name = format!("{} ({})", base, suffix);
    }
    name
}

fn render_workbook(groups: ModelGroups, language: Language) -> Result<Vec<u8>, XlsxError> {
    let headers = report_headers(language);
    let mut workbook = Workbook::new();
    let mut used_names = HashSet::new();

    for group in groups {
        let Some(first) = group.first() else {
            continue;
        };
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(&first.model, &mut used_names))?;

        for (col, label) in headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *label)?;
        }
        for (offset, info) in group.iter().enumerate() {
            let row = offset as u32 + 1;
            worksheet.write_string(row, 0, &info.model)?;
            worksheet.write_string(row, 1, &info.version)?;
            worksheet.write_number(row, 2, info.produced_amount as f64)?;
        }
    }

    workbook.save_to_buffer()
}

/// Put `bytes` at `path` unless another builder got there first.
///
/// The workbook is written to a temporary file and hard-linked into place, so
/// readers never see a partial file and an existing report is never replaced.
async fn publish(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

    tokio::fs::write(&temp, bytes).await?;
    let linked = tokio::fs::hard_link(&temp, path).await;
    if let Err(err) = tokio::fs::remove_file(&temp).await {
        tracing::warn!(path = %temp.display(), error = %err, "Could not remove temporary report");
    }

    match linked {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            tracing::debug!(path = %path.display(), "Weekly report built concurrently");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
