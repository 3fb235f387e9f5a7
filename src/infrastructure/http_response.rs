// HTTP response utilities for JSON and CSV bodies with optional Brotli encoding
use crate::application::error::FleetError;
use crate::infrastructure::csv_export::CsvExport;
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
    response::IntoResponse,
};
use serde::Serialize;
use tokio::io::AsyncReadExt;

/// True when the client advertises Brotli in `Accept-Encoding`.
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').any(|enc| enc.trim().starts_with("br")))
        .unwrap_or(false)
}

async fn brotli(bytes: Vec<u8>) -> std::io::Result<Vec<u8>> {
    let mut encoder = BrotliEncoder::new(std::io::Cursor::new(bytes));
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

async fn encoded_response(
    bytes: Vec<u8>,
    content_type: &'static str,
    disposition: Option<HeaderValue>,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let (body_bytes, content_encoding) = if compress {
        let original = bytes.len();
        let compressed = brotli(bytes).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!("Compressed response: {} -> {} bytes", original, compressed.len());
        (compressed, Some("br"))
    } else {
        (bytes, None)
    };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, body_bytes.len());

    if let Some(encoding) = content_encoding {
        builder = builder.header(header::CONTENT_ENCODING, encoding);
    }
    if let Some(disposition) = disposition {
        builder = builder.header(header::CONTENT_DISPOSITION, disposition);
    }

    builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Serialize `data` as JSON, Brotli-compressed when `compress` is set.
pub async fn json_response<T: Serialize>(data: &T, compress: bool) -> Result<Response<Body>, StatusCode> {
    let bytes = serde_json::to_vec(data).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    encoded_response(bytes, "application/json", None, compress).await
}

/// Header-safe filename: ASCII only, no quotes or control characters.
fn attachment_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect()
}

/// Serve a CSV export as a downloadable attachment.
pub async fn csv_response(export: CsvExport, compress: bool) -> Result<Response<Body>, StatusCode> {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        attachment_filename(&export.filename)
    );
    let disposition = HeaderValue::from_str(&disposition).map_err(|e| {
        tracing::error!("Invalid attachment filename {:?}: {}", export.filename, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::info!("Serving {} ({} bytes)", export.filename, export.body.len());
    encoded_response(export.body, "text/csv; charset=utf-8", Some(disposition), compress).await
}

/// Header listing how many filters were ignored; omitted when none were.
pub const FILTER_WARNINGS_HEADER: &str = "x-filter-warnings";

pub fn with_filter_warnings(mut response: Response<Body>, warnings: usize) -> Response<Body> {
    if warnings > 0 {
        response
            .headers_mut()
            .insert(FILTER_WARNINGS_HEADER, HeaderValue::from(warnings));
    }
    response
}

pub fn fleet_error_status(error: &FleetError) -> StatusCode {
    match error {
        FleetError::VesselNotFound(_) => StatusCode::NOT_FOUND,
        FleetError::InvalidDate(_) => StatusCode::BAD_REQUEST,
        FleetError::MissingHistory { .. } | FleetError::Csv(_) | FleetError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Map a service error to a JSON `{"error": ...}` body with a matching status.
pub fn fleet_error_response(error: FleetError) -> Response<Body> {
    let status = fleet_error_status(&error);
    if status.is_server_error() {
        tracing::error!("Request failed: {}", error);
    } else {
        tracing::warn!("Request rejected: {}", error);
    }

    (status, axum::Json(serde_json::json!({ "error": error.to_string() }))).into_response()
}

/// Collapse a handler result into a response.
pub fn into_response(result: Result<Response<Body>, StatusCode>) -> Response<Body> {
    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, br;q=0.9"));
        assert!(accepts_brotli(&headers));
    }

    #[test]
    fn test_attachment_filename_is_header_safe() {
        assert_eq!(
            attachment_filename("Kapal \"Ñusa\"-tracking.csv"),
            "Kapal __usa_-tracking.csv"
        );
        assert_eq!(attachment_filename("vessel-history-2024-05-01.csv"), "vessel-history-2024-05-01.csv");
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            fleet_error_status(&FleetError::VesselNotFound("V9".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            fleet_error_status(&FleetError::InvalidDate("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            fleet_error_status(&FleetError::MissingHistory { vessel_id: "V1".to_string() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_csv_response_headers() {
        let export = crate::infrastructure::csv_export::export_history(
            &crate::test_support::two_vessel_day(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )
        .unwrap();
        let length = export.body.len();

        let response = csv_response(export, false).await.unwrap();
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"vessel-history-2024-05-01.csv\""
        );
        assert_eq!(headers[header::CONTENT_LENGTH], length.to_string().as_str());
        assert!(headers.get(header::CONTENT_ENCODING).is_none());
    }

    #[tokio::test]
    async fn test_filter_warning_count_header() {
        let response = json_response(&serde_json::json!([]), false).await.unwrap();
        let response = with_filter_warnings(response, 0);
        assert!(response.headers().get(FILTER_WARNINGS_HEADER).is_none());

        let response = with_filter_warnings(response, 2);
        assert_eq!(response.headers()[FILTER_WARNINGS_HEADER], "2");
    }

    #[tokio::test]
    async fn test_compressed_json_response() {
        let response = json_response(&serde_json::json!({ "ok": true }), true).await.unwrap();
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }
}
