use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::dto::machine_dto::ProductivityQuery;
use crate::model::machine::CategoryFilter;
use crate::service::machine_service::{MachineService, MachineServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};

fn parse_number(params: &HashMap<String, String>, key: &str, default: u32) -> Result<u32, HandlerError> {
    match params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: format!("Invalid {}: {}", key, raw),
            details: None,
        }),
    }
}

// Handler: List machines, optionally by category
pub async fn list_machines_handler(
    State(service): State<Arc<MachineServiceImpl>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HandlerError> {
    let filter = match params.get("category") {
        None => CategoryFilter::All,
        Some(raw) => raw.parse::<CategoryFilter>().map_err(|e| {
            warn!("[list_machines_handler] {}", e);
            HandlerError {
                error: HandlerErrorKind::BadRequest,
                message: "Invalid category".to_string(),
                details: Some(e),
            }
        })?,
    };
    let machines = service.list_machines(filter).await?;
    Ok(Json(machines))
}

// Handler: Category filter options
pub async fn list_categories_handler(
    State(service): State<Arc<MachineServiceImpl>>,
) -> impl IntoResponse {
    Json(service.categories())
}

// Handler: Get one machine
pub async fn get_machine_handler(
    State(service): State<Arc<MachineServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    debug!("[get_machine_handler] id={}", id);
    let machine = service.get_machine(&id).await?;
    Ok(Json(machine))
}

// Handler: Monthly production estimate
pub async fn productivity_handler(
    State(service): State<Arc<MachineServiceImpl>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HandlerError> {
    let defaults = ProductivityQuery::default();
    let query = ProductivityQuery {
        hours_per_day: parse_number(&params, "hoursPerDay", defaults.hours_per_day)?,
        days_per_month: parse_number(&params, "daysPerMonth", defaults.days_per_month)?,
    };
    let estimate = service.estimate_productivity(&id, query).await?;
    Ok(Json(estimate))
}
