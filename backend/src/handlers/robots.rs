//! Robot registration and weekly report HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use shared::{RegisterRobotInput, Robot};

use crate::error::{AppError, AppResult};
use crate::services::{NotificationDispatcher, ReportService, RobotRegistrar};
use crate::AppState;

/// Content type of the weekly report download
pub const REPORT_CONTENT_TYPE: &str = "application/ms-excel";

/// Register a newly produced robot and notify waiting customers
pub async fn add_robot(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRobotInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Robot>)> {
    let Json(input) = payload.map_err(|e| AppError::InvalidRequestBody(e.body_text()))?;

    let registrar = RobotRegistrar::new(state.robots.clone(), state.serial_pool.clone());
    let robot = registrar.register(input).await?;

    let dispatcher = NotificationDispatcher::new(
        state.orders.clone(),
        state.mailer.clone(),
        &state.config.email,
        state.config.language,
    );
    if let Err(err) = dispatcher.notify_new_robot(&robot.model, &robot.version).await {
        tracing::warn!(
            robot_id = %robot.id,
            error = %err,
            "Customer notification failed"
        );
    }

    Ok((StatusCode::CREATED, Json(robot)))
}

/// Download the production report for the previous calendar week
pub async fn weekly_report(State(state): State<AppState>) -> AppResult<Response> {
    let service = ReportService::new(
        state.robots.clone(),
        &state.config.reports,
        state.config.language,
    );

    let path = match service.build_weekly_report(Local::now().naive_local()).await {
        Ok(path) => path,
        Err(err) => {
            tracing::error!(error = %err, "Weekly report generation failed");
            return Err(AppError::ReportUnavailable);
        }
    };

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("Report {}", path.display())));
        }
        Err(err) => return Err(AppError::Internal(format!("Could not read report: {}", err))),
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok((
        [
            (header::CONTENT_TYPE, REPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename={}", file_name),
            ),
        ],
        bytes,
    )
        .into_response())
}
