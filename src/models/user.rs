use serde::{Deserialize, Serialize};

/// Login payload. The backend accepts a username or an email alongside the
/// password; whichever identifier is unused is omitted from the body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

impl LoginRequest {
    pub fn with_username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            email: None,
            password: password.into(),
        }
    }

    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: None,
            email: Some(email.into()),
            password: password.into(),
        }
    }
}

/// Successful login response: the opaque session key.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl UserProfile {
    /// Full name, falling back to the username when no name is set.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Partial profile update for `PATCH /api/auth/user/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetConfirm {
    pub uid: String,
    pub token: String,
    pub new_password1: String,
    pub new_password2: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_omits_unused_identifier() {
        let body = serde_json::to_string(&LoginRequest::with_username("admin", "pw")).unwrap();
        assert!(body.contains("\"username\":\"admin\""));
        assert!(!body.contains("email"));

        let body = serde_json::to_string(&LoginRequest::with_email("a@b.edu", "pw")).unwrap();
        assert!(body.contains("\"email\":\"a@b.edu\""));
        assert!(!body.contains("username"));
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let named = UserProfile {
            username: "jdoe".to_string(),
            email: "jdoe@school.edu".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        };
        assert_eq!(named.display_name(), "Jane Doe");

        let bare = UserProfile {
            username: "jdoe".to_string(),
            email: "jdoe@school.edu".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        };
        assert_eq!(bare.display_name(), "jdoe");
    }
}
