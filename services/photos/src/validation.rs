//! Input validation rules
//!
//! Photo creation is checked against an ordered rule list; only the first
//! violated rule is reported.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

use crate::models::{CreatePhotoRequest, NewPhoto, RegisterRequest, photo::default_caption};

/// A single field constraint
pub struct Rule<T> {
    /// Message reported when the rule is violated
    pub message: &'static str,
    /// Returns true when `T` violates the rule
    pub violated: fn(&T) -> bool,
}

/// Evaluate `rules` in order and return the message of the first violation
pub fn first_violation<T>(rules: &[Rule<T>], value: &T) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| (rule.violated)(value))
        .map(|rule| rule.message)
}

pub const TITLE_OMITTED: &str = "Title cannot be omitted";
pub const TITLE_EMPTY: &str = "Title cannot be an empty string";
pub const IMAGE_URL_OMITTED: &str = "Image URL cannot be omitted";
pub const IMAGE_URL_EMPTY: &str = "Image URL cannot be an empty string";
pub const IMAGE_URL_FORMAT: &str = "Wrong URL format";

/// Photo creation rules, in evaluation order
pub const PHOTO_RULES: &[Rule<CreatePhotoRequest>] = &[
    Rule {
        message: TITLE_OMITTED,
        violated: title_omitted,
    },
    Rule {
        message: TITLE_EMPTY,
        violated: title_empty,
    },
    Rule {
        message: IMAGE_URL_OMITTED,
        violated: image_url_omitted,
    },
    Rule {
        message: IMAGE_URL_EMPTY,
        violated: image_url_empty,
    },
    Rule {
        message: IMAGE_URL_FORMAT,
        violated: image_url_malformed,
    },
];

fn title_omitted(req: &CreatePhotoRequest) -> bool {
    req.title.is_none()
}

fn title_empty(req: &CreatePhotoRequest) -> bool {
    req.title.as_deref().is_some_and(|title| title.trim().is_empty())
}

fn image_url_omitted(req: &CreatePhotoRequest) -> bool {
    req.image_url.is_none()
}

fn image_url_empty(req: &CreatePhotoRequest) -> bool {
    req.image_url.as_deref().is_some_and(|url| url.trim().is_empty())
}

fn image_url_malformed(req: &CreatePhotoRequest) -> bool {
    !req.image_url.as_deref().is_some_and(is_url)
}

/// Absolute URL with a web scheme and a host
pub fn is_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https" | "ftp")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Validate a photo creation request and build the record to persist
///
/// A missing caption is replaced by [`default_caption`].
pub fn validate_photo(req: CreatePhotoRequest, owner_id: i32) -> Result<NewPhoto, String> {
    if let Some(message) = first_violation(PHOTO_RULES, &req) {
        return Err(message.to_string());
    }

    let CreatePhotoRequest {
        title: Some(title),
        caption,
        image_url: Some(image_url),
    } = req
    else {
        return Err(TITLE_OMITTED.to_string());
    };

    let caption = caption.unwrap_or_else(|| default_caption(&title, &image_url));

    Ok(NewPhoto {
        title,
        caption,
        image_url,
        user_id: owner_id,
    })
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if username.len() > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 6 {
        return Err("Password must be at least 6 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a registration request, reporting the first failing field
pub fn validate_registration(req: &RegisterRequest) -> Result<(), String> {
    validate_username(&req.username)?;
    validate_email(&req.email)?;
    validate_password(&req.password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: Option<&str>, image_url: Option<&str>) -> CreatePhotoRequest {
        CreatePhotoRequest {
            title: title.map(str::to_string),
            caption: None,
            image_url: image_url.map(str::to_string),
        }
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let messages: Vec<&str> = PHOTO_RULES.iter().map(|rule| rule.message).collect();
        assert_eq!(
            messages,
            vec![
                TITLE_OMITTED,
                TITLE_EMPTY,
                IMAGE_URL_OMITTED,
                IMAGE_URL_EMPTY,
                IMAGE_URL_FORMAT
            ]
        );
    }

    #[test]
    fn test_first_violation_wins() {
        // Everything is wrong: only the title omission is reported
        assert_eq!(first_violation(PHOTO_RULES, &request(None, None)), Some(TITLE_OMITTED));
        assert_eq!(
            first_violation(PHOTO_RULES, &request(Some(""), Some("wrongurl"))),
            Some(TITLE_EMPTY)
        );
        assert_eq!(
            first_violation(PHOTO_RULES, &request(Some("photo"), None)),
            Some(IMAGE_URL_OMITTED)
        );
        assert_eq!(
            first_violation(PHOTO_RULES, &request(Some("photo"), Some(""))),
            Some(IMAGE_URL_EMPTY)
        );
        assert_eq!(
            first_violation(PHOTO_RULES, &request(Some("photo"), Some("wrongurl"))),
            Some(IMAGE_URL_FORMAT)
        );
        assert_eq!(
            first_violation(
                PHOTO_RULES,
                &request(Some("photo"), Some("http://image.com/photo2.png"))
            ),
            None
        );
    }

    #[test]
    fn test_blank_fields_count_as_empty() {
        assert_eq!(
            first_violation(PHOTO_RULES, &request(Some("   "), Some("http://image.com/a.png"))),
            Some(TITLE_EMPTY)
        );
        assert_eq!(
            first_violation(PHOTO_RULES, &request(Some("\t\n"), None)),
            Some(TITLE_EMPTY)
        );
        assert_eq!(
            first_violation(PHOTO_RULES, &request(Some("photo"), Some("  "))),
            Some(IMAGE_URL_EMPTY)
        );
        assert!(validate_photo(request(Some(" "), Some("http://image.com/a.png")), 1).is_err());
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("http://image.com/photo2.png"));
        assert!(is_url("https://cdn.example.org/a/b.jpg?size=large"));
        assert!(!is_url("wrongurl"));
        assert!(!is_url("image.com/photo.png"));
        assert!(!is_url("mailto:rio@mail.com"));
        assert!(!is_url("file:///etc/passwd"));
    }

    #[test]
    fn test_validate_photo_defaults_caption() {
        let photo = validate_photo(request(Some("photo 2"), Some("http://image.com/photo2.png")), 7)
            .unwrap();
        assert_eq!(photo.user_id, 7);
        assert!(photo.caption.contains("PHOTO 2"));
        assert!(photo.caption.contains("http://image.com/photo2.png"));
    }

    #[test]
    fn test_validate_photo_keeps_given_caption() {
        let mut req = request(Some("photo"), Some("http://image.com/p.png"));
        req.caption = Some("my caption".to_string());
        let photo = validate_photo(req, 1).unwrap();
        assert_eq!(photo.caption, "my caption");
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("rio").is_ok());
        assert!(validate_username("ri").is_err());
        assert!(validate_username("rio!").is_err());
        assert!(validate_username("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("rio@mail.com").is_ok());
        assert!(validate_email("rio@mail").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_registration_reports_first_field() {
        let req = RegisterRequest {
            username: "x".to_string(),
            email: "bad".to_string(),
            password: "".to_string(),
        };
        assert_eq!(
            validate_registration(&req).unwrap_err(),
            "Username must be at least 3 characters long"
        );
    }
}
