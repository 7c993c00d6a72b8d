//! Authentication commands
//!
//! Login, logout, and account registration. Login persists the returned
//! token pair through the configured session backend; logout destroys it.

use colored::Colorize;
use rustyline::DefaultEditor;

use crate::api::types::RegisterRequest;
use crate::api::ApiOutcome;
use crate::commands::AppContext;
use crate::error::Result;
use crate::session::Credentials;

/// Log in and persist the session.
///
/// A rejection (wrong credentials) is reported inline and exits cleanly;
/// the previously stored session, if any, is left untouched.
pub async fn run_login(ctx: &AppContext, username: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt("Password: ")?,
    };

    let credentials = Credentials {
        username_or_email: username,
        password,
    };

    match ctx.session.login(&credentials).await? {
        ApiOutcome::Success(_) => {
            println!("{}", "Logged in.".green());
            Ok(())
        }
        ApiOutcome::Rejected(message) => {
            eprintln!("{}", format!("Login failed: {}", message).red());
            Ok(())
        }
    }
}

/// Destroy the persisted session. Idempotent.
pub fn run_logout(ctx: &AppContext) -> Result<()> {
    ctx.session.logout()?;
    println!("Logged out.");
    Ok(())
}

/// Create a new account, then direct the user to log in.
pub async fn run_register(
    ctx: &AppContext,
    firstname: String,
    lastname: String,
    username: String,
    email: String,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => {
            let first = prompt("Password: ")?;
            let second = prompt("Confirm password: ")?;
            if first != second {
                eprintln!("{}", "Passwords do not match.".red());
                return Ok(());
            }
            first
        }
    };

    let request = RegisterRequest {
        username,
        email,
        firstname,
        lastname,
        confirm_password: password.clone(),
        password,
    };

    match ctx.session.register(&request).await? {
        ApiOutcome::Success(user) => {
            println!(
                "{}",
                format!("Account '{}' created. Run `trimlink login` to sign in.", user.username)
                    .green()
            );
            Ok(())
        }
        ApiOutcome::Rejected(message) => {
            eprintln!("{}", format!("Registration failed: {}", message).red());
            Ok(())
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    let mut rl = DefaultEditor::new()?;
    let line = rl.readline(label)?;
    Ok(line.trim().to_string())
}
