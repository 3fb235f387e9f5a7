// HTTP request handlers
use crate::application::history_query::HistoryQueryParams;
use crate::infrastructure::http_response::{
    accepts_brotli, csv_response, fleet_error_response, into_response, json_response,
    with_filter_warnings,
};
use crate::infrastructure::json_mapper::{
    fuel_report_to_dto, history_to_dto, hourly_to_dto, stats_to_dto, track_to_dto,
    vessel_to_dto, VesselDto,
};
use crate::infrastructure::ndjson_stream::stream_from_watch;
use crate::presentation::app_state::AppState;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Response},
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryRequest {
    #[serde(flatten)]
    pub filters: HistoryQueryParams,
    /// Kept as text; anything unparseable falls back to the first page
    pub page: Option<String>,
}

impl HistoryRequest {
    fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_vessels(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response<Body> {
    match state.fleet_service.list_vessels().await {
        Ok(vessels) => {
            let dtos: Vec<VesselDto> = vessels.iter().map(vessel_to_dto).collect();
            into_response(json_response(&dtos, accepts_brotli(&headers)).await)
        }
        Err(e) => fleet_error_response(e),
    }
}

pub async fn get_vessel(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    match state.fleet_service.get_vessel(&id).await {
        Ok(vessel) => into_response(json_response(&vessel_to_dto(&vessel), accepts_brotli(&headers)).await),
        Err(e) => fleet_error_response(e),
    }
}

pub async fn dashboard_stats(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response<Body> {
    match state.fleet_service.dashboard_stats().await {
        Ok(stats) => into_response(json_response(&stats_to_dto(stats), accepts_brotli(&headers)).await),
        Err(e) => fleet_error_response(e),
    }
}

/// Filtered, sorted, then either paged or grouped history
pub async fn history(
    Query(request): Query<HistoryRequest>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    match state.fleet_service.history_view(&request.filters, request.page()).await {
        Ok(result) => into_response(json_response(&history_to_dto(result), accepts_brotli(&headers)).await),
        Err(e) => fleet_error_response(e),
    }
}

/// Every filtered record as CSV; pagination and grouping do not apply. Ignored
/// filters are counted in `x-filter-warnings`.
pub async fn export_history(
    Query(request): Query<HistoryRequest>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let today = state.fleet_service.today(Utc::now());

    match state.fleet_service.export_history(&request.filters, today).await {
        Ok(result) => {
            let warnings = result.warnings.len();
            let response = into_response(csv_response(result.export, accepts_brotli(&headers)).await);
            with_filter_warnings(response, warnings)
        }
        Err(e) => fleet_error_response(e),
    }
}

pub async fn hourly(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    match state.fleet_service.hourly_report(&id, Utc::now()).await {
        Ok(report) => into_response(json_response(&hourly_to_dto(report), accepts_brotli(&headers)).await),
        Err(e) => fleet_error_response(e),
    }
}

pub async fn track(
    Path(id): Path<String>,
    Query(query): Query<DateQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let service = &state.fleet_service;
    let result = match service.resolve_date(query.date.as_deref(), Utc::now()) {
        Ok(date) => service.vessel_track(&id, date).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(track) => into_response(json_response(&track_to_dto(track), accepts_brotli(&headers)).await),
        Err(e) => fleet_error_response(e),
    }
}

pub async fn export_track(
    Path(id): Path<String>,
    Query(query): Query<DateQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let service = &state.fleet_service;
    let result = match service.resolve_date(query.date.as_deref(), Utc::now()) {
        Ok(date) => service.export_track(&id, date).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(export) => into_response(csv_response(export, accepts_brotli(&headers)).await),
        Err(e) => fleet_error_response(e),
    }
}

pub async fn fuel(
    Path(id): Path<String>,
    Query(query): Query<DateQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let service = &state.fleet_service;
    let result = match service.resolve_date(query.date.as_deref(), Utc::now()) {
        Ok(date) => service.fuel_report(&id, date).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => into_response(json_response(&fuel_report_to_dto(report), accepts_brotli(&headers)).await),
        Err(e) => fleet_error_response(e),
    }
}

pub async fn export_fuel(
    Path(id): Path<String>,
    Query(query): Query<DateQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let service = &state.fleet_service;
    let result = match service.resolve_date(query.date.as_deref(), Utc::now()) {
        Ok(date) => service.export_fuel_report(&id, date).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(export) => into_response(csv_response(export, accepts_brotli(&headers)).await),
        Err(e) => fleet_error_response(e),
    }
}

/// Stream live snapshots of one vessel. Selecting another vessel elsewhere
/// stops this ticker and ends the stream.
pub async fn live_stream(Path(id): Path<String>, State(state): State<Arc<AppState>>) -> Response<Body> {
    match state.fleet_service.get_vessel(&id).await {
        Ok(vessel) => {
            if let Some(previous) = state.live_feed.selected().await.filter(|p| *p != id) {
                tracing::info!("Live feed switching from {} to {}", previous, id);
            }
            let rx = state.live_feed.select(vessel).await;
            stream_from_watch(rx, vessel_to_dto)
        }
        Err(e) => fleet_error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    fn request(uri: &'static str) -> HistoryRequest {
        Query::<HistoryRequest>::try_from_uri(&Uri::from_static(uri))
            .unwrap()
            .0
    }

    #[test]
    fn test_history_request_page_falls_back_to_first() {
        let parsed = request("/history?vessels=V001,V002&page=3&speed_min=abc");
        assert_eq!(parsed.page(), 3);
        assert_eq!(parsed.filters.vessels.as_deref(), Some("V001,V002"));
        assert_eq!(parsed.filters.speed_min.as_deref(), Some("abc"));

        assert_eq!(request("/history?page=last").page(), 1);
        assert_eq!(request("/history").page(), 1);
    }
}
