use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::export::{content_disposition, file_name, ExportFormat};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;
use crate::web::stream::export_body;

#[utoipa::path(
    get,
    path = "/api/tracks/{id}/export/{format}",
    params(
        ("id" = String, Path, description = "Track ID"),
        ("format" = String, Path, description = "One of gpx, kml, csv, geojson (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Streamed track file"),
        (status = 400, description = "Unsupported format", body = ErrorResponse),
        (status = 404, description = "Track not found", body = ErrorResponse)
    ),
    tag = "export"
)]
pub async fn export_track(
    State(state): State<AppState>,
    Path((id, format)): Path<(String, String)>,
) -> ApiResult<Response> {
    let format: ExportFormat = format.parse()?;
    let document = state.storage.get_track(&id)?;

    let name = file_name(&document.metadata, format.extension());
    let disposition = HeaderValue::from_str(&content_disposition(&name))
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    log::info!(
        "Exporting track {} ({} points) as {}",
        id,
        document.points.len(),
        format
    );

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(format.mime_type())),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    let body = export_body(state.exporter, format, document);

    Ok((headers, body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::sync::Arc;

    use crate::export::Exporter;
    use crate::store::Storage;
    use crate::track::WallClock;

    const RUN_YAML: &str = r#"
metadata:
  name: Evening Run
points:
  - longitude: 116.397128
    latitude: 39.916527
    altitude: 50.5
    speed: 5.2
    captured_at: 2024-01-01 10:00:00
  - address: "Gate 3, East Side"
"#;

    fn fixture() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("run.yaml"), RUN_YAML).unwrap();
        let state = AppState {
            storage: Arc::new(Storage::new(dir.path().to_path_buf())),
            exporter: Exporter::new(WallClock::utc()),
        };
        (dir, state)
    }

    async fn call(state: AppState, id: &str, format: &str) -> Response {
        export_track(State(state), Path((id.to_string(), format.to_string())))
            .await
            .into_response()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn streams_gpx_with_download_headers() {
        let (_dir, state) = fixture();
        let response = call(state, "run", "GPX").await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/gpx+xml");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Evening Run.gpx\"; filename*=UTF-8''Evening%20Run.gpx"
        );

        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains(r#"<trkpt lat="39.916527" lon="116.397128">"#));
        assert!(body.contains("<time>2024-01-01T10:00:00Z</time>"));
    }

    #[tokio::test]
    async fn csv_keeps_every_row() {
        let (_dir, state) = fixture();
        let response = call(state, "run", "csv").await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");

        let body = body_bytes(response).await;
        assert_eq!(&body[..3], &[0xEF, 0xBB, 0xBF]);
        let text = String::from_utf8(body[3..].to_vec()).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.ends_with("2,,,,,,\"Gate 3, East Side\",\n"));
    }

    #[tokio::test]
    async fn unsupported_format_is_bad_request() {
        let (_dir, state) = fixture();
        let response = call(state, "run", "xml").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_track_is_not_found() {
        let (_dir, state) = fixture();
        let response = call(state, "missing", "kml").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
