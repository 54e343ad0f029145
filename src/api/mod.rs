//! REST API client module for EMIS backends.
//!
//! This module provides the `ApiClient` for communicating with an EMIS
//! backend to manage sessions, profiles, calendars, students, and admin
//! accounts.
//!
//! Requests authenticate with an opaque session key sent as
//! `Authorization: Token <key>`, obtained from the login endpoint.

pub mod client;
pub mod endpoints;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
