//! Typed request and response payloads for the EMIS backend.
//!
//! Field names mirror the backend's JSON (snake_case, Django conventions),
//! so no rename attributes are needed.

pub mod admin;
pub mod calendar;
pub mod student;
pub mod user;

use serde::{Deserialize, Serialize};

pub use admin::{AdminUser, AdminUserPayload, Permission};
pub use calendar::{
    Calendar, CalendarEvent, CalendarLayout, CalendarPayload, CalendarSnapshot, EventCategory,
    EventFilter, EventPayload,
};
pub use student::{Guardian, Student, StudentPayload};
pub use user::{
    LoginRequest, LoginResponse, PasswordChange, PasswordResetConfirm, UserProfile, UserUpdate,
};

/// Generic `{"detail": ...}` acknowledgement body returned by auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}
