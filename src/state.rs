use std::sync::Arc;

use crate::db::Db;
use crate::templates::Templates;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(db: Db, templates: Templates) -> Self {
        Self {
            db,
            templates: Arc::new(templates),
        }
    }
}
