//! Endpoint path templates for the EMIS backend.
//!
//! Paths use the backend's trailing-slash convention. Resource endpoints
//! follow REST conventions: `GET/POST {base}`, `GET/PATCH/DELETE {base}{id}/`.

// ===== Auth =====

pub const AUTH_LOGIN: &str = "/api/auth/login/";
pub const AUTH_LOGOUT: &str = "/api/auth/logout/";
pub const AUTH_PASSWORD_CHANGE: &str = "/api/auth/password/change/";
pub const AUTH_PASSWORD_RESET_CONFIRM: &str = "/api/auth/password/reset/confirm/";
pub const AUTH_USER: &str = "/api/auth/user/";

// ===== Calendar =====

pub const CALENDARS: &str = "/api/calendar/calendars/";
pub const CALENDAR_EVENTS: &str = "/api/calendar/events/";
pub const EVENT_CATEGORIES: &str = "/api/calendar/categories/";
pub const CALENDAR_LAYOUTS: &str = "/api/calendar/layouts/";

// ===== Students =====

pub const STUDENTS: &str = "/api/students/students/";
pub const GUARDIANS: &str = "/api/students/guardians/";

// ===== Admin =====

pub const ADMIN_USERS: &str = "/api/admin/users/";
pub const ADMIN_PERMISSIONS: &str = "/api/admin/permissions/";

/// Join a resource id onto a collection endpoint, keeping the trailing slash.
pub fn join(base: &str, id: i64) -> String {
    format!("{}{}/", base, id)
}
