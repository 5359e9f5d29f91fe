//! PostgreSQL-backed repositories

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use super::{PhotoRepository, UserRepository};
use crate::models::{NewPhoto, NewUser, Photo, PhotoDetail, User, UserProfile};

/// User repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password: row.get("password"),
        created_at: row.get("createdAt"),
        updated_at: row.get("updatedAt"),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.username);

        let row = sqlx::query(
            r#"
            INSERT INTO "Users" (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password, "createdAt", "updatedAt"
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(user_from_row(&row))
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password, "createdAt", "updatedAt"
            FROM "Users"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password, "createdAt", "updatedAt"
            FROM "Users"
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(row.as_ref().map(user_from_row))
    }
}

/// Photo repository
#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    /// Create a new photo repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn photo_from_row(row: &PgRow) -> Photo {
    Photo {
        id: row.get("id"),
        title: row.get("title"),
        caption: row.get("caption"),
        image_url: row.get("image_url"),
        created_at: row.get("createdAt"),
        updated_at: row.get("updatedAt"),
        user_id: row.get("UserId"),
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    async fn create(&self, new_photo: &NewPhoto) -> DatabaseResult<Photo> {
        info!(
            "Creating photo '{}' for user {}",
            new_photo.title, new_photo.user_id
        );

        let row = sqlx::query(
            r#"
            INSERT INTO "Photos" (title, caption, image_url, "UserId")
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, caption, image_url, "UserId", "createdAt", "updatedAt"
            "#,
        )
        .bind(&new_photo.title)
        .bind(&new_photo.caption)
        .bind(&new_photo.image_url)
        .bind(new_photo.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(photo_from_row(&row))
    }

    async fn get_all(&self) -> DatabaseResult<Vec<Photo>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, caption, image_url, "UserId", "createdAt", "updatedAt"
            FROM "Photos"
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(rows.iter().map(photo_from_row).collect())
    }

    async fn get_detail(&self, id: i32) -> DatabaseResult<Option<PhotoDetail>> {
        let row = sqlx::query(
            r#"
            SELECT p.id, p.title, p.caption, p.image_url, p."UserId",
                   p."createdAt", p."updatedAt",
                   u.username AS owner_username, u.email AS owner_email
            FROM "Photos" p
            JOIN "Users" u ON u.id = p."UserId"
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(row.map(|row| {
            let photo = photo_from_row(&row);
            let owner = UserProfile {
                id: photo.user_id,
                username: row.get("owner_username"),
                email: row.get("owner_email"),
            };
            PhotoDetail::new(photo, owner)
        }))
    }
}
