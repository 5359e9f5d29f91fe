//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    jwt::JwtService,
    repositories::{InMemoryRepository, PhotoRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub user_repository: Arc<dyn UserRepository>,
    pub photo_repository: Arc<dyn PhotoRepository>,
}

impl AppState {
    /// State backed by a single in-process store
    pub fn in_memory(jwt_service: JwtService, store: InMemoryRepository) -> Self {
        Self {
            jwt_service,
            user_repository: Arc::new(store.clone()),
            photo_repository: Arc::new(store),
        }
    }
}
