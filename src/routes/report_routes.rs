use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::UsageReportResponse;
use crate::middleware::auth::{AuthUser, REPORT_ROLES};
use crate::middleware::extract::AppQuery;
use crate::services::report_service::ReportKind;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
struct DownloadQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
}

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/", get(usage_report))
        .route("/download", get(download_report))
}

async fn usage_report(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UsageReportResponse>, AppError> {
    auth.require_role(REPORT_ROLES)?;
    let controller = ReportController::new(state.pool().await?);
    let response = controller.usage().await?;
    Ok(Json(response))
}

async fn download_report(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(query): AppQuery<DownloadQuery>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_role(REPORT_ROLES)?;
    let kind = ReportKind::parse(query.kind.as_deref())?;

    let controller = ReportController::new(state.pool().await?);
    let csv = controller.download(kind).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", kind.file_name()),
        ),
    ];
    Ok((headers, csv))
}
