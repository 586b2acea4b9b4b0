//! Authentication commands.

use crate::output::{self, OutputFormat};
use anyhow::Result;
use portal_session::{GuestLoginRequest, LoginRequest, RegisterProfile, SessionService};
use std::io::{self, Write};

/// Prompt for a line of input.
fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

/// Prompt for an optional line of input; empty answers become `None`.
fn prompt_optional(label: &str) -> Result<Option<String>> {
    let value = prompt(&format!("{} (optional)", label))?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// Collect the shared registration fields.
fn prompt_profile(with_teacher_id: bool) -> Result<Option<RegisterProfile>> {
    let email = prompt("Email")?;
    if email.is_empty() {
        return Ok(None);
    }

    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        return Ok(None);
    }

    Ok(Some(RegisterProfile {
        email,
        password,
        first_name: prompt_optional("First name")?,
        last_name: prompt_optional("Last name")?,
        teacher_id: if with_teacher_id {
            prompt_optional("Teacher ID")?
        } else {
            None
        },
    }))
}

/// Login with email and password.
pub async fn login(session: &SessionService, format: &OutputFormat) -> Result<()> {
    if let Some(user) = session.snapshot().user {
        output::print_success(
            &format!("Already signed in as {}", user.display_name()),
            format,
        );
        return Ok(());
    }

    let email = prompt("Email")?;
    if email.is_empty() {
        output::print_error("Email is required", format);
        return Ok(());
    }

    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        output::print_error("Password is required", format);
        return Ok(());
    }

    match session.login(LoginRequest { email, password }).await {
        Ok(user) => {
            output::print_success(&format!("Signed in as {}", user.display_name()), format);
        }
        Err(e) => {
            output::print_error(&format!("Login failed: {}", e), format);
        }
    }

    Ok(())
}

/// Register a student account.
pub async fn register_student(session: &SessionService, format: &OutputFormat) -> Result<()> {
    let Some(profile) = prompt_profile(true)? else {
        output::print_error("Email and password are required", format);
        return Ok(());
    };

    match session.register_student(profile).await {
        Ok(user) => {
            output::print_success(
                &format!("Student account created for {}", user.display_name()),
                format,
            );
        }
        Err(e) => {
            output::print_error(&format!("Registration failed: {}", e), format);
        }
    }

    Ok(())
}

/// Register a teacher account.
pub async fn register_teacher(session: &SessionService, format: &OutputFormat) -> Result<()> {
    let Some(profile) = prompt_profile(false)? else {
        output::print_error("Email and password are required", format);
        return Ok(());
    };

    match session.register_teacher(profile).await {
        Ok(user) => {
            output::print_success(
                &format!("Teacher account created for {}", user.display_name()),
                format,
            );
        }
        Err(e) => {
            output::print_error(&format!("Registration failed: {}", e), format);
        }
    }

    Ok(())
}

/// Start a guest session.
pub async fn guest(session: &SessionService, format: &OutputFormat) -> Result<()> {
    let first_name = prompt("First name")?;
    if first_name.is_empty() {
        output::print_error("A display name is required", format);
        return Ok(());
    }

    match session.guest_login(GuestLoginRequest { first_name }).await {
        Ok(user) => {
            output::print_success(
                &format!("Signed in as guest {}", user.display_name()),
                format,
            );
        }
        Err(e) => {
            output::print_error(&format!("Guest login failed: {}", e), format);
        }
    }

    Ok(())
}

/// Exchange the stored refresh token for fresh credentials.
pub async fn refresh(session: &SessionService, format: &OutputFormat) -> Result<()> {
    match session.refresh().await {
        Ok(Some(user)) => {
            output::print_success(
                &format!("Session refreshed for {}", user.display_name()),
                format,
            );
        }
        Ok(None) => {
            output::print_success("No session to refresh", format);
        }
        Err(e) => {
            output::print_error(&format!("Refresh failed: {}", e), format);
        }
    }

    Ok(())
}

/// Show session status.
pub async fn status(session: &SessionService, format: &OutputFormat) -> Result<()> {
    let state = session.snapshot();

    match format {
        OutputFormat::Text => match &state.user {
            Some(user) if state.is_authenticated() => {
                println!("Signed in");
                output::print_row("User", &user.display_name());
                output::print_row("Role", &user.role.to_string());
                output::print_row("Guest", if user.is_guest { "yes" } else { "no" });
                output::print_row("Home", portal_routes::home_route_for_role(user.role));
                output::print_row(
                    "Refresh token",
                    if state.refresh_token.is_some() {
                        "stored"
                    } else {
                        "none"
                    },
                );
            }
            _ => {
                println!("Signed out");
            }
        },
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "status": state.status,
                    "user": state.user,
                    "hasRefreshToken": state.refresh_token.is_some(),
                })
            );
        }
    }

    Ok(())
}

/// Logout and clear the stored session.
pub async fn logout(session: &SessionService, format: &OutputFormat) -> Result<()> {
    session.logout().await;
    output::print_success("Signed out", format);
    Ok(())
}
