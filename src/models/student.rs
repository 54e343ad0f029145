use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub admission_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Current class/grade label, e.g. "Grade 8 - B".
    pub current_class: Option<String>,
    pub is_active: Option<bool>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn display_class(&self) -> String {
        self.current_class
            .clone()
            .unwrap_or_else(|| "Unassigned".to_string())
    }
}

/// Create/update payload for a student record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StudentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_class: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guardian {
    pub id: i64,
    /// Owning student id.
    pub student: i64,
    pub first_name: String,
    pub last_name: String,
    /// Relationship to the student, e.g. "Mother".
    pub relation: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Guardian {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_display_helpers() {
        let student = Student {
            id: 1,
            admission_number: Some("ADM-0042".to_string()),
            first_name: "Amina".to_string(),
            last_name: "Khan".to_string(),
            email: None,
            phone: None,
            date_of_birth: None,
            current_class: None,
            is_active: Some(true),
        };
        assert_eq!(student.full_name(), "Amina Khan");
        assert_eq!(student.display_class(), "Unassigned");
    }

    #[test]
    fn test_student_payload_skips_unset_fields() {
        let payload = StudentPayload {
            first_name: "Amina".to_string(),
            last_name: "Khan".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_string(&payload).unwrap();
        assert!(body.contains("first_name"));
        assert!(!body.contains("admission_number"));
        assert!(!body.contains("date_of_birth"));
    }
}
