//! In-process storage backend
//!
//! Implements both repository traits over a single mutex-guarded store so
//! that photo details can be joined with their owner. Ids are assigned from
//! 1 upwards per table, like a fresh SERIAL column.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::{PhotoRepository, UserRepository};
use crate::models::{NewPhoto, NewUser, Photo, PhotoDetail, User};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    photos: Vec<Photo>,
}

/// In-memory repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut tables = self.tables.lock().await;

        if tables.users.iter().any(|user| user.email == new_user.email) {
            return Err(DatabaseError::UniqueViolation(format!(
                "email {} already exists",
                new_user.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: tables.users.len() as i32 + 1,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password: new_user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());

        info!("Created user {} in memory", user.id);
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|user| user.email == email).cloned())
    }
}

#[async_trait]
impl PhotoRepository for InMemoryRepository {
    async fn create(&self, new_photo: &NewPhoto) -> DatabaseResult<Photo> {
        let mut tables = self.tables.lock().await;

        if !tables.users.iter().any(|user| user.id == new_photo.user_id) {
            return Err(DatabaseError::ForeignKeyViolation(format!(
                "owner {} does not exist",
                new_photo.user_id
            )));
        }

        let now = Utc::now();
        let photo = Photo {
            id: tables.photos.len() as i32 + 1,
            title: new_photo.title.clone(),
            caption: Some(new_photo.caption.clone()),
            image_url: new_photo.image_url.clone(),
            created_at: now,
            updated_at: now,
            user_id: new_photo.user_id,
        };
        tables.photos.push(photo.clone());

        Ok(photo)
    }

    async fn get_all(&self) -> DatabaseResult<Vec<Photo>> {
        let tables = self.tables.lock().await;
        Ok(tables.photos.clone())
    }

    async fn get_detail(&self, id: i32) -> DatabaseResult<Option<PhotoDetail>> {
        let tables = self.tables.lock().await;

        let Some(photo) = tables.photos.iter().find(|photo| photo.id == id) else {
            return Ok(None);
        };
        let owner = tables
            .users
            .iter()
            .find(|user| user.id == photo.user_id)
            .map(User::profile);

        Ok(owner.map(|owner| PhotoDetail::new(photo.clone(), owner)))
    }
}
