use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::tracks::TrackDetailResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::tracks::list_tracks,
        super::api::tracks::get_track,
        super::api::tracks::get_stats,
        super::api::export::export_track,
    ),
    components(
        schemas(
            TrackDetailResponse,
            ErrorResponse,
            crate::store::TrackEntry,
            crate::track::Summary,
            crate::track::Sample,
            crate::track::TrackMetadata,
            crate::export::ExportFormat,
        )
    ),
    info(
        title = "Track-O-Mat API",
        description = "Track summaries and GPX/KML/CSV/GeoJSON export",
        version = "0.1.0"
    ),
    tags(
        (name = "tracks", description = "Track listing and statistics"),
        (name = "export", description = "Streaming track export")
    )
)]
pub struct ApiDoc;
