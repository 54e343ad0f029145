use serde::{Deserialize, Serialize};

/// A user account as seen by the admin user-management screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
    /// Group/role names assigned to the account.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl AdminUser {
    pub fn status_display(&self) -> &'static str {
        match self.is_active {
            Some(true) => "active",
            Some(false) => "disabled",
            None => "unknown",
        }
    }
}

/// Partial update for an admin-managed account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminUserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    pub codename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let mut user = AdminUser {
            id: 1,
            username: "registrar".to_string(),
            email: None,
            first_name: None,
            last_name: None,
            is_active: Some(true),
            groups: vec![],
        };
        assert_eq!(user.status_display(), "active");
        user.is_active = Some(false);
        assert_eq!(user.status_display(), "disabled");
        user.is_active = None;
        assert_eq!(user.status_display(), "unknown");
    }
}
