//! Track statistics and streaming GPX/KML/CSV/GeoJSON export.

pub mod export;
pub mod store;
pub mod track;
pub mod web;
