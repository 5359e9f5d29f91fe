//! Photo models for the photos service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserProfile;

/// Photo entity, as listed and as returned on creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i32,
    pub title: String,
    pub caption: Option<String>,
    pub image_url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "UserId")]
    pub user_id: i32,
}

/// Photo joined with its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoDetail {
    pub id: i32,
    pub title: String,
    pub caption: Option<String>,
    pub image_url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "User")]
    pub user: UserProfile,
}

impl PhotoDetail {
    pub fn new(photo: Photo, user: UserProfile) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            image_url: photo.image_url,
            created_at: photo.created_at,
            updated_at: photo.updated_at,
            user,
        }
    }
}

/// Request body for photo creation
///
/// Every field is optional at the wire level so that omissions are reported
/// by the validation rules rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePhotoRequest {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub image_url: Option<String>,
}

/// Validated photo ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoto {
    pub title: String,
    pub caption: String,
    pub image_url: String,
    pub user_id: i32,
}

/// Caption used when the client does not provide one
pub fn default_caption(title: &str, image_url: &str) -> String {
    format!("{} - {}", title.to_uppercase(), image_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caption_contains_title_and_url() {
        let caption = default_caption("photo 2", "http://image.com/photo2.png");
        assert!(caption.contains("PHOTO 2"));
        assert!(caption.contains("http://image.com/photo2.png"));
    }

    #[test]
    fn test_photo_serializes_with_wire_names() {
        let now = Utc::now();
        let photo = Photo {
            id: 1,
            title: "Default Photo".to_string(),
            caption: Some("Default Photo caption".to_string()),
            image_url: "http://image.com/defaultphoto.png".to_string(),
            created_at: now,
            updated_at: now,
            user_id: 1,
        };

        let value = serde_json::to_value(&photo).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["id", "title", "caption", "image_url", "createdAt", "updatedAt", "UserId"] {
            assert!(keys.contains(&key), "missing key {key}");
        }
        assert_eq!(keys.len(), 7);
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_detail_nests_user_without_owner_column() {
        let now = Utc::now();
        let photo = Photo {
            id: 1,
            title: "t".to_string(),
            caption: None,
            image_url: "http://a.b/c.png".to_string(),
            created_at: now,
            updated_at: now,
            user_id: 1,
        };
        let user = UserProfile {
            id: 1,
            username: "rio".to_string(),
            email: "rio@mail.com".to_string(),
        };

        let value = serde_json::to_value(PhotoDetail::new(photo, user)).unwrap();
        assert!(value.get("UserId").is_none());
        assert_eq!(value["User"]["username"], "rio");
        assert!(value["User"].get("password").is_none());
    }
}
