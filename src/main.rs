//! emisdesk - a terminal companion for EMIS school administration.
//!
//! Provides login/logout against the backend and quick listings of the
//! calendar, student, and admin resources the web frontend manages.

use std::io::{self, Write as _};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use emisdesk::api::ApiClient;
use emisdesk::auth::{FileTokenStore, SessionCipher, TokenError, TokenStore};
use emisdesk::config::Config;
use emisdesk::models::{EventFilter, LoginRequest};
use emisdesk::utils::format::{format_datetime, format_optional};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("emisdesk starting");

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    match command {
        "login" => cmd_login(args.get(2).cloned()).await,
        "logout" => cmd_logout().await,
        "status" => cmd_status(),
        "whoami" => cmd_whoami().await,
        "calendars" => cmd_calendars().await,
        "events" => cmd_events().await,
        "students" => cmd_students(args.get(2).cloned()).await,
        "users" => cmd_users().await,
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    println!("emisdesk - EMIS terminal companion");
    println!();
    println!("Usage: emisdesk <command>");
    println!();
    println!("Commands:");
    println!("  login [username]    Log in and store the session");
    println!("  logout              Clear the session (and notify the backend)");
    println!("  status              Show the local session state");
    println!("  whoami              Show the logged-in profile");
    println!("  calendars           List calendars with event counts");
    println!("  events              List upcoming calendar events");
    println!("  students [search]   List students, optionally filtered");
    println!("  users               List admin-managed accounts");
}

fn session_store(config: &Config) -> Result<Arc<FileTokenStore>> {
    let cipher = SessionCipher::derive(&config.auth_secret())?;
    Ok(Arc::new(FileTokenStore::new(
        config.cookie_path()?,
        cipher,
        config.is_secure_transport(),
    )))
}

fn build_client(config: &Config) -> Result<(ApiClient, Arc<FileTokenStore>)> {
    let store = session_store(config)?;
    let client = ApiClient::new(config.api_base_url(), store.clone())
        .context("Failed to build API client")?;
    Ok((client, store))
}

fn prompt_username(last: Option<&str>) -> Result<String> {
    match last {
        Some(last) => print!("Username [{}]: ", last),
        None => print!("Username: "),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let entered = line.trim();

    if entered.is_empty() {
        match last {
            Some(last) => Ok(last.to_string()),
            None => anyhow::bail!("A username is required"),
        }
    } else {
        Ok(entered.to_string())
    }
}

async fn cmd_login(username_arg: Option<String>) -> Result<()> {
    let mut config = Config::load()?;
    let (client, _store) = build_client(&config)?;

    let username = match username_arg {
        Some(username) => username,
        None => prompt_username(config.last_username.as_deref())?,
    };
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    client
        .login(&LoginRequest::with_username(&username, &password))
        .await?;

    config.last_username = Some(username);
    config.save()?;

    let profile = client.current_user().await?;
    println!("Logged in as {} <{}>", profile.display_name(), profile.email);
    Ok(())
}

async fn cmd_logout() -> Result<()> {
    let config = Config::load()?;
    let (client, _store) = build_client(&config)?;

    match client.logout().await {
        Ok(()) => println!("Logged out."),
        // The envelope is gone either way; only the backend notification failed.
        Err(e) => println!("Local session cleared; backend logout failed: {}", e),
    }
    Ok(())
}

fn cmd_status() -> Result<()> {
    let config = Config::load()?;
    let store = session_store(&config)?;

    if !store.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }

    match store.token() {
        Ok(Some(_)) => {
            let who = format_optional(&config.last_username, "unknown user");
            println!("Logged in ({}) against {}", who, config.api_base_url());
        }
        Ok(None) => println!("Not logged in."),
        Err(TokenError::Corrupted(reason)) => {
            println!("Session envelope is corrupted: {}", reason);
            println!("Run `emisdesk logout` to clear it.");
        }
        Err(e) => println!("Could not read session: {}", e),
    }
    Ok(())
}

async fn cmd_whoami() -> Result<()> {
    let config = Config::load()?;
    let (client, _store) = build_client(&config)?;

    let profile = client.current_user().await?;
    println!("{}", profile.display_name());
    println!("  username: {}", profile.username);
    println!("  email:    {}", profile.email);
    Ok(())
}

async fn cmd_calendars() -> Result<()> {
    let config = Config::load()?;
    let (client, _store) = build_client(&config)?;

    let snapshot = client.calendar_snapshot().await?;
    for calendar in &snapshot.calendars {
        let events = snapshot
            .events
            .iter()
            .filter(|e| e.calendar == calendar.id)
            .count();
        println!("{:>4}  {}  ({} events)", calendar.id, calendar.name, events);
    }
    println!(
        "{} calendars, {} categories",
        snapshot.calendars.len(),
        snapshot.categories.len()
    );
    Ok(())
}

async fn cmd_events() -> Result<()> {
    let config = Config::load()?;
    let (client, _store) = build_client(&config)?;

    let events = client.list_events(&EventFilter::default()).await?;
    if events.is_empty() {
        println!("No events.");
        return Ok(());
    }
    for event in &events {
        let when = if event.all_day {
            event.start.format("%b %d, %Y (all day)").to_string()
        } else {
            format_datetime(&event.start)
        };
        println!("{:>4}  {}  {}", event.id, when, event.title);
    }
    Ok(())
}

async fn cmd_students(search: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let (client, _store) = build_client(&config)?;

    let students = client.list_students(search.as_deref()).await?;
    if students.is_empty() {
        println!("No students found.");
        return Ok(());
    }
    for student in &students {
        println!(
            "{:>4}  {:<30}  {:<16}  {}",
            student.id,
            student.full_name(),
            student.display_class(),
            format_optional(&student.admission_number, "-"),
        );
    }
    println!("{} students", students.len());
    Ok(())
}

async fn cmd_users() -> Result<()> {
    let config = Config::load()?;
    let (client, _store) = build_client(&config)?;

    let users = client.list_admin_users().await?;
    for user in &users {
        println!(
            "{:>4}  {:<20}  {:<8}  {}",
            user.id,
            user.username,
            user.status_display(),
            format_optional(&user.email, "-"),
        );
    }
    Ok(())
}
