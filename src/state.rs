// src/state.rs

use crate::config::Config;
use crate::store::{DocumentStore, Entity, Repository};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn repo<T: Entity>(&self) -> Repository<T> {
        Repository::new(Arc::clone(&self.store))
    }
}
