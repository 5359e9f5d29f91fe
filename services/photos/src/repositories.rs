//! Repositories for database operations
//!
//! Handlers talk to storage through the [`UserRepository`] and
//! [`PhotoRepository`] traits. The PostgreSQL implementations live in
//! [`postgres`]; [`memory`] keeps everything in process. Both report
//! constraint violations as the matching `DatabaseError` variants.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{NewPhoto, NewUser, Photo, PhotoDetail, User};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::{PgPhotoRepository, PgUserRepository};

/// Storage operations on users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;
}

/// Storage operations on photos
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Create a new photo
    async fn create(&self, new_photo: &NewPhoto) -> DatabaseResult<Photo>;

    /// Get all photos ordered by id
    async fn get_all(&self) -> DatabaseResult<Vec<Photo>>;

    /// Get a photo by ID together with its owner
    async fn get_detail(&self, id: i32) -> DatabaseResult<Option<PhotoDetail>>;
}
