use std::sync::Arc;

use crate::export::Exporter;
use crate::store::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub exporter: Exporter,
}
