//! API client for the EMIS backend.
//!
//! This module provides the `ApiClient` struct: a single parameterized HTTP
//! client that every feature operation (auth, user, calendar, student,
//! admin) calls through. It attaches the session credential, serializes
//! bodies and query parameters, and maps responses into typed values or
//! typed errors.

use std::sync::Arc;

use reqwest::{header, Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::models::{
    AdminUser, AdminUserPayload, Calendar, CalendarEvent, CalendarLayout, CalendarPayload,
    CalendarSnapshot, Detail, EventCategory, EventFilter, EventPayload, Guardian, LoginRequest,
    LoginResponse, PasswordChange, PasswordResetConfirm, Permission, Student, StudentPayload,
    UserProfile, UserUpdate,
};

use super::endpoints;
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Authorization header scheme the backend expects.
const AUTH_SCHEME: &str = "Token";

/// API client for an EMIS backend.
/// Clone is cheap - reqwest::Client pools connections internally and the
/// token store is shared behind an Arc.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client against `base_url`, reading credentials from `store`.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a session envelope is currently present. Presence only; a
    /// corrupted envelope still reports true here.
    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    /// Authorization header for the current session. Omitted entirely when no
    /// token is stored - requests then reach the backend unauthenticated and
    /// fail with 401 rather than carrying a bogus credential.
    fn auth_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        match self.store.token() {
            Ok(Some(token)) => {
                match header::HeaderValue::from_str(&format!("{} {}", AUTH_SCHEME, token)) {
                    Ok(value) => {
                        headers.insert(header::AUTHORIZATION, value);
                    }
                    Err(_) => {
                        warn!("Stored token is not a valid header value; sending request unauthenticated");
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Could not read session token; sending request unauthenticated");
            }
        }
        headers
    }

    // ===== Request Core =====

    /// Issue a single request and decode the JSON response.
    ///
    /// One attempt only: no retry, no backoff, no de-duplication. 2xx bodies
    /// decode into `T`; anything else maps through [`ApiError::from_status`].
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<&[(&str, String)]>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(method = %method, url = %url, "Sending API request");

        let mut builder = self.http.request(method, &url).headers(self.auth_headers());
        if let Some(params) = params {
            builder = builder.query(params);
        }
        if let Some(body) = body {
            // reqwest sets the JSON content-type header here; requests
            // without a body carry no content-type at all.
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!(status = %status, url = %url, "API request failed");
            return Err(ApiError::from_status(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to decode response from {}: {}", url, e))
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, None, None::<&()>).await
    }

    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, Some(params), None::<&()>)
            .await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, None, Some(body)).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, None, Some(body)).await
    }

    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, endpoint, None, Some(body))
            .await
    }

    /// DELETE expects a 2xx (the backend answers 204) and discards the body.
    pub async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(url = %url, "Sending DELETE request");

        let response = self
            .http
            .delete(&url)
            .headers(self.auth_headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &text));
        }
        Ok(())
    }

    // ===== Auth / Session =====

    /// Log in and persist the returned session key before returning.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.post(endpoints::AUTH_LOGIN, credentials).await?;
        self.store.set_token(&response.key)?;
        Ok(response)
    }

    /// Log out. The local envelope is removed even when the backend call
    /// fails - a dead server must not pin a session on this machine.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self
            .post::<Detail, _>(endpoints::AUTH_LOGOUT, &serde_json::json!({}))
            .await;
        self.store.remove_token()?;
        result.map(|_| ())
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<Detail, ApiError> {
        self.post(endpoints::AUTH_PASSWORD_CHANGE, change).await
    }

    pub async fn confirm_password_reset(
        &self,
        confirm: &PasswordResetConfirm,
    ) -> Result<Detail, ApiError> {
        self.post(endpoints::AUTH_PASSWORD_RESET_CONFIRM, confirm)
            .await
    }

    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get(endpoints::AUTH_USER).await
    }

    pub async fn update_user(&self, update: &UserUpdate) -> Result<UserProfile, ApiError> {
        self.patch(endpoints::AUTH_USER, update).await
    }

    // ===== Calendar =====

    pub async fn list_calendars(&self) -> Result<Vec<Calendar>, ApiError> {
        self.get(endpoints::CALENDARS).await
    }

    pub async fn calendar(&self, id: i64) -> Result<Calendar, ApiError> {
        self.get(&endpoints::join(endpoints::CALENDARS, id)).await
    }

    pub async fn create_calendar(&self, payload: &CalendarPayload) -> Result<Calendar, ApiError> {
        self.post(endpoints::CALENDARS, payload).await
    }

    pub async fn update_calendar(
        &self,
        id: i64,
        payload: &CalendarPayload,
    ) -> Result<Calendar, ApiError> {
        self.patch(&endpoints::join(endpoints::CALENDARS, id), payload)
            .await
    }

    pub async fn delete_calendar(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::join(endpoints::CALENDARS, id))
            .await
    }

    pub async fn list_events(&self, filter: &EventFilter) -> Result<Vec<CalendarEvent>, ApiError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(calendar) = filter.calendar {
            params.push(("calendar", calendar.to_string()));
        }
        if let Some(from) = filter.from {
            params.push(("from", from.to_string()));
        }
        if let Some(to) = filter.to {
            params.push(("to", to.to_string()));
        }
        self.get_with_params(endpoints::CALENDAR_EVENTS, &params)
            .await
    }

    pub async fn event(&self, id: i64) -> Result<CalendarEvent, ApiError> {
        self.get(&endpoints::join(endpoints::CALENDAR_EVENTS, id))
            .await
    }

    pub async fn create_event(&self, payload: &EventPayload) -> Result<CalendarEvent, ApiError> {
        self.post(endpoints::CALENDAR_EVENTS, payload).await
    }

    pub async fn update_event(
        &self,
        id: i64,
        payload: &EventPayload,
    ) -> Result<CalendarEvent, ApiError> {
        self.patch(&endpoints::join(endpoints::CALENDAR_EVENTS, id), payload)
            .await
    }

    pub async fn delete_event(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::join(endpoints::CALENDAR_EVENTS, id))
            .await
    }

    pub async fn list_event_categories(&self) -> Result<Vec<EventCategory>, ApiError> {
        self.get(endpoints::EVENT_CATEGORIES).await
    }

    pub async fn list_calendar_layouts(&self) -> Result<Vec<CalendarLayout>, ApiError> {
        self.get(endpoints::CALENDAR_LAYOUTS).await
    }

    pub async fn calendar_layout(&self, id: i64) -> Result<CalendarLayout, ApiError> {
        self.get(&endpoints::join(endpoints::CALENDAR_LAYOUTS, id))
            .await
    }

    /// Fetch calendars, events, and categories concurrently.
    pub async fn calendar_snapshot(&self) -> Result<CalendarSnapshot, ApiError> {
        let filter = EventFilter::default();
        let (calendars, events, categories) = futures::try_join!(
            self.list_calendars(),
            self.list_events(&filter),
            self.list_event_categories(),
        )?;
        Ok(CalendarSnapshot {
            calendars,
            events,
            categories,
        })
    }

    // ===== Students =====

    pub async fn list_students(&self, search: Option<&str>) -> Result<Vec<Student>, ApiError> {
        match search {
            Some(term) => {
                let params = [("search", term.to_string())];
                self.get_with_params(endpoints::STUDENTS, &params).await
            }
            None => self.get(endpoints::STUDENTS).await,
        }
    }

    pub async fn student(&self, id: i64) -> Result<Student, ApiError> {
        self.get(&endpoints::join(endpoints::STUDENTS, id)).await
    }

    pub async fn create_student(&self, payload: &StudentPayload) -> Result<Student, ApiError> {
        self.post(endpoints::STUDENTS, payload).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        payload: &StudentPayload,
    ) -> Result<Student, ApiError> {
        self.patch(&endpoints::join(endpoints::STUDENTS, id), payload)
            .await
    }

    pub async fn delete_student(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::join(endpoints::STUDENTS, id)).await
    }

    pub async fn list_guardians(&self, student: Option<i64>) -> Result<Vec<Guardian>, ApiError> {
        match student {
            Some(id) => {
                let params = [("student", id.to_string())];
                self.get_with_params(endpoints::GUARDIANS, &params).await
            }
            None => self.get(endpoints::GUARDIANS).await,
        }
    }

    // ===== Admin =====

    pub async fn list_admin_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.get(endpoints::ADMIN_USERS).await
    }

    pub async fn admin_user(&self, id: i64) -> Result<AdminUser, ApiError> {
        self.get(&endpoints::join(endpoints::ADMIN_USERS, id)).await
    }

    pub async fn update_admin_user(
        &self,
        id: i64,
        payload: &AdminUserPayload,
    ) -> Result<AdminUser, ApiError> {
        self.patch(&endpoints::join(endpoints::ADMIN_USERS, id), payload)
            .await
    }

    pub async fn list_permissions(&self) -> Result<Vec<Permission>, ApiError> {
        self.get(endpoints::ADMIN_PERMISSIONS).await
    }
}
