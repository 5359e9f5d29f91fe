//! API models for entities and request/response payloads

pub mod photo;
pub mod user;

pub use photo::{CreatePhotoRequest, NewPhoto, Photo, PhotoDetail};
pub use user::{LoginRequest, NewUser, RegisterRequest, TokenResponse, User, UserProfile};
