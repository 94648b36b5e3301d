use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::TrackEntry;
use crate::track::{self, Sample, Summary, TrackMetadata};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct TrackDetailResponse {
    pub id: String,
    pub metadata: TrackMetadata,
    pub summary: Summary,
    /// Seconds between the track's recorded start and end, when both are known.
    pub duration_seconds: Option<i64>,
    pub points: Vec<Sample>,
}

#[utoipa::path(
    get,
    path = "/api/tracks",
    responses(
        (status = 200, description = "Available tracks", body = Vec<TrackEntry>),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "tracks"
)]
pub async fn list_tracks(State(state): State<AppState>) -> ApiResult<Json<Vec<TrackEntry>>> {
    Ok(Json(state.storage.list_tracks()?))
}

#[utoipa::path(
    get,
    path = "/api/tracks/{id}",
    params(
        ("id" = String, Path, description = "Track ID")
    ),
    responses(
        (status = 200, description = "Track with summary", body = TrackDetailResponse),
        (status = 404, description = "Track not found", body = ErrorResponse)
    ),
    tag = "tracks"
)]
pub async fn get_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TrackDetailResponse>> {
    let document = state.storage.get_track(&id)?;
    let summary = track::compute(&document.points);

    Ok(Json(TrackDetailResponse {
        id,
        duration_seconds: document.metadata.duration_seconds(),
        metadata: document.metadata,
        summary,
        points: document.points,
    }))
}

#[utoipa::path(
    get,
    path = "/api/tracks/{id}/stats",
    params(
        ("id" = String, Path, description = "Track ID")
    ),
    responses(
        (status = 200, description = "Track summary", body = Summary),
        (status = 404, description = "Track not found", body = ErrorResponse)
    ),
    tag = "tracks"
)]
pub async fn get_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Summary>> {
    let document = state.storage.get_track(&id)?;
    Ok(Json(track::compute(&document.points)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::Arc;

    use crate::export::Exporter;
    use crate::store::Storage;

    const RIDE_YAML: &str = r#"
metadata:
  name: Morning Ride
  start_time: 2024-01-01 08:00:00
  end_time: 2024-01-01 09:15:00
points:
  - { longitude: 0.0, latitude: 0.0, speed: 4.0, altitude: 10.0 }
  - { longitude: 1.0, latitude: 0.0, speed: 6.0, altitude: 30.0 }
"#;

    fn fixture() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ride.yaml"), RIDE_YAML).unwrap();
        let state = AppState {
            storage: Arc::new(Storage::new(dir.path().to_path_buf())),
            exporter: Exporter::default(),
        };
        (dir, state)
    }

    #[tokio::test]
    async fn lists_tracks() {
        let (_dir, state) = fixture();
        let Ok(Json(tracks)) = list_tracks(State(state)).await else {
            panic!("listing failed");
        };
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "ride");
        assert_eq!(tracks[0].name, "Morning Ride");
    }

    #[tokio::test]
    async fn detail_carries_summary_and_duration() {
        let (_dir, state) = fixture();
        let Ok(Json(detail)) = get_track(State(state), Path("ride".to_string())).await else {
            panic!("detail failed");
        };
        assert_eq!(detail.summary.total_points, 2);
        assert_eq!(detail.summary.average_speed, 5.0);
        assert_eq!(detail.summary.altitude_change, Some(20.0));
        assert!((detail.summary.total_distance - 111_195.0).abs() < 1.0);
        assert_eq!(detail.duration_seconds, Some(4500));
    }

    #[tokio::test]
    async fn stats_for_missing_track_is_not_found() {
        let (_dir, state) = fixture();
        let response = get_stats(State(state), Path("nope".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
