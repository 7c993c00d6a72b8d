//! Profile commands
//!
//! Viewing and editing the authenticated user's profile. Updates are a
//! full-form submission: unspecified fields are filled from the current
//! profile so a partial CLI invocation never blanks a name.

use colored::Colorize;
use prettytable::{row, Table};

use crate::api::types::UpdateProfileRequest;
use crate::api::ApiOutcome;
use crate::commands::{or_login_hint, AppContext};
use crate::error::Result;

/// Maximum first/last name length accepted by the service.
const MAX_NAME_LEN: usize = 45;

/// Maximum custom-domain length accepted by the service.
const MAX_DOMAIN_LEN: usize = 200;

/// Fetch and print the profile.
pub async fn run_show(ctx: &AppContext) -> Result<()> {
    let client = &ctx.client;
    let fetched = ctx
        .session
        .authorized(|token| async move { client.fetch_profile(&token).await })
        .await;
    let Some(profile) = or_login_hint(fetched)? else {
        return Ok(());
    };

    let mut table = Table::new();
    table.add_row(row!["Username", profile.username]);
    table.add_row(row!["Email", profile.email]);
    table.add_row(row!["First name", profile.firstname.as_deref().unwrap_or("-")]);
    table.add_row(row!["Last name", profile.lastname.as_deref().unwrap_or("-")]);
    table.add_row(row![
        "Custom domain",
        profile.custom_domain.as_deref().unwrap_or("-")
    ]);
    table.printstd();
    Ok(())
}

/// Update profile fields, carrying over whatever was not overridden.
pub async fn run_update(
    ctx: &AppContext,
    firstname: Option<String>,
    lastname: Option<String>,
    custom_domain: Option<String>,
    remove_custom_domain: bool,
) -> Result<()> {
    if firstname.is_none() && lastname.is_none() && custom_domain.is_none() && !remove_custom_domain
    {
        println!("Nothing to update.");
        return Ok(());
    }

    let client = &ctx.client;
    let fetched = ctx
        .session
        .authorized(|token| async move { client.fetch_profile(&token).await })
        .await;
    let Some(current) = or_login_hint(fetched)? else {
        return Ok(());
    };

    let request = UpdateProfileRequest {
        firstname: firstname
            .or(current.firstname)
            .unwrap_or_default(),
        lastname: lastname.or(current.lastname).unwrap_or_default(),
        custom_domain,
        remove_custom_domain,
    };

    if let Err(message) = validate(&request) {
        eprintln!("{}", format!("Rejected: {}", message).red());
        return Ok(());
    }

    let client = &ctx.client;
    // Borrow so the retried closure can reuse the request.
    let request = &request;
    let submitted = ctx
        .session
        .authorized(|token| async move { client.update_profile(&token, request).await })
        .await;
    match or_login_hint(submitted)? {
        Some(ApiOutcome::Success(_)) => {
            println!("{}", "Profile updated.".green());
            Ok(())
        }
        Some(ApiOutcome::Rejected(message)) => {
            eprintln!("{}", format!("Rejected: {}", message).red());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Client-side validation mirroring the service's form rules.
fn validate(request: &UpdateProfileRequest) -> std::result::Result<(), String> {
    if request.firstname.trim().is_empty() {
        return Err("First name is required".to_string());
    }
    if request.firstname.chars().count() > MAX_NAME_LEN {
        return Err(format!(
            "First name cannot be more than {} characters",
            MAX_NAME_LEN
        ));
    }
    if request.lastname.trim().is_empty() {
        return Err("Last name is required".to_string());
    }
    if request.lastname.chars().count() > MAX_NAME_LEN {
        return Err(format!(
            "Last name cannot be more than {} characters",
            MAX_NAME_LEN
        ));
    }
    if let Some(domain) = &request.custom_domain {
        if domain.chars().count() > MAX_DOMAIN_LEN {
            return Err(format!(
                "Custom domain cannot be more than {} characters",
                MAX_DOMAIN_LEN
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UpdateProfileRequest {
        UpdateProfileRequest {
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            custom_domain: None,
            remove_custom_domain: false,
        }
    }

    #[test]
    fn test_validate_accepts_a_plain_update() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_firstname() {
        let mut r = request();
        r.firstname = " ".to_string();
        assert_eq!(validate(&r).unwrap_err(), "First name is required");
    }

    #[test]
    fn test_validate_rejects_overlong_lastname() {
        let mut r = request();
        r.lastname = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate(&r).unwrap_err().contains("45 characters"));
    }

    #[test]
    fn test_validate_rejects_overlong_custom_domain() {
        let mut r = request();
        r.custom_domain = Some("d".repeat(MAX_DOMAIN_LEN + 1));
        assert!(validate(&r).unwrap_err().contains("200 characters"));
    }

    #[test]
    fn test_validate_accepts_domain_at_the_limit() {
        let mut r = request();
        r.custom_domain = Some("d".repeat(MAX_DOMAIN_LEN));
        assert!(validate(&r).is_ok());
    }
}
