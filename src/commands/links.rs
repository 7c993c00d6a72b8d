//! Link management commands
//!
//! Listing, shortening, deletion, QR generation, and the interactive
//! detail view. The detail view is a readline loop driving the
//! [`DialogController`] state machine; every mutation goes through the
//! [`LinkCache`] so the table and detail output always render the latest
//! server snapshot.

use colored::Colorize;
use prettytable::{row, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::api::types::LinkResource;
use crate::api::ApiOutcome;
use crate::commands::{or_login_hint, AppContext};
use crate::error::Result;
use crate::links::analytics;
use crate::links::dialog::{DialogController, DialogState};
use crate::links::LinkCache;

/// Builds a cache over the context's client and session and fills it.
///
/// Returns `None` (after printing the login hint) when there is no usable
/// session.
async fn load_cache(ctx: &AppContext) -> Result<Option<LinkCache>> {
    let mut cache = LinkCache::new(ctx.client.clone(), ctx.session.clone());
    match or_login_hint(cache.reload().await)? {
        Some(()) => Ok(Some(cache)),
        None => Ok(None),
    }
}

/// Print all links as a table.
pub async fn run_list(ctx: &AppContext) -> Result<()> {
    let Some(cache) = load_cache(ctx).await? else {
        return Ok(());
    };

    if cache.is_empty() {
        println!("No links yet. Try `trimlink links shorten <url> --title <title>`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "TITLE", "SHORT URL", "DESTINATION", "CLICKS", "QR"]);
    for link in cache.links() {
        table.add_row(row![
            link.uuid,
            link.title,
            link.short_url,
            truncate(&link.long_url, 60),
            link.clicks,
            if link.has_qr_code { "yes" } else { "no" },
        ]);
    }
    table.printstd();
    Ok(())
}

/// Shorten a URL, printing the new short link on success.
pub async fn run_shorten(ctx: &AppContext, url: String, title: String) -> Result<()> {
    let Some(mut cache) = load_cache(ctx).await? else {
        return Ok(());
    };

    match or_login_hint(cache.shorten(&url, &title).await)? {
        Some(ApiOutcome::Success(link)) => {
            println!(
                "{}",
                format!("Shortened: {} -> {}", link.long_url, link.short_url).green()
            );
            Ok(())
        }
        Some(ApiOutcome::Rejected(message)) => {
            eprintln!("{}", format!("Rejected: {}", message).red());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Delete a link, confirming first unless `--yes` was given.
pub async fn run_delete(ctx: &AppContext, uuid: String, yes: bool) -> Result<()> {
    let Some(mut cache) = load_cache(ctx).await? else {
        return Ok(());
    };

    let mut dialog = DialogController::new();
    if !dialog.open_detail(&cache, &uuid) {
        eprintln!("{}", format!("No link with id '{}'.", uuid).red());
        return Ok(());
    }
    dialog.request_delete();

    if !yes {
        let mut rl = DefaultEditor::new()?;
        let answer = rl.readline(&format!("Delete link '{}'? [y/N] ", uuid))?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            dialog.cancel();
            println!("Aborted.");
            return Ok(());
        }
    }

    match or_login_hint(dialog.confirm_delete(&mut cache).await)? {
        Some(true) => {
            println!("{}", format!("Deleted '{}'.", uuid).green());
            Ok(())
        }
        Some(false) => {
            let message = dialog.error().unwrap_or("delete rejected");
            eprintln!("{}", format!("Rejected: {}", message).red());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Ask the service to generate a QR code and print the asset URL.
pub async fn run_qr(ctx: &AppContext, uuid: String) -> Result<()> {
    let Some(cache) = load_cache(ctx).await? else {
        return Ok(());
    };

    if cache.get(&uuid).is_none() {
        eprintln!("{}", format!("No link with id '{}'.", uuid).red());
        return Ok(());
    }

    if or_login_hint(cache.request_qr_code(&uuid).await)?.is_none() {
        return Ok(());
    }

    let asset = cache.client().qr_code_url(&uuid)?;
    println!("{}", format!("QR code generated: {}", asset).green());
    Ok(())
}

/// Interactive detail view for one link.
///
/// Runs a readline loop: `show` and `stats` render the cached snapshot,
/// `title`/`url` edit the form, `save` submits it, `delete` moves to the
/// confirmation step where only `confirm` or `cancel` are accepted.
pub async fn run_inspect(ctx: &AppContext, uuid: String) -> Result<()> {
    let Some(mut cache) = load_cache(ctx).await? else {
        return Ok(());
    };

    let mut dialog = DialogController::new();
    if !dialog.open_detail(&cache, &uuid) {
        eprintln!("{}", format!("No link with id '{}'.", uuid).red());
        return Ok(());
    }

    if let Some(link) = cache.get(&uuid) {
        print_detail(link);
    }
    println!("Type 'help' for available commands, 'quit' to leave.\n");

    let mut rl = DefaultEditor::new()?;
    loop {
        let prompt = match dialog.state() {
            DialogState::ConfirmingDelete(_) => "confirm delete? > ".to_string(),
            _ => format!("{} > ", uuid),
        };
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                tracing::error!("readline error: {:?}", err);
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        rl.add_history_entry(trimmed)?;

        let (command, argument) = match trimmed.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (trimmed, ""),
        };

        // Only confirm/cancel (and quit) are meaningful while a delete is
        // pending.
        if matches!(dialog.state(), DialogState::ConfirmingDelete(_)) {
            match command {
                "confirm" => {
                    match or_login_hint(dialog.confirm_delete(&mut cache).await)? {
                        Some(true) => {
                            println!("{}", "Link deleted.".green());
                            break;
                        }
                        Some(false) => {
                            let message = dialog.error().unwrap_or("delete rejected");
                            eprintln!("{}", format!("Rejected: {}", message).red());
                            dialog.dismiss_error();
                        }
                        None => break,
                    }
                }
                "cancel" => {
                    dialog.cancel();
                    println!("Delete cancelled.");
                    break;
                }
                "quit" | "exit" => break,
                _ => println!("A delete is pending: type 'confirm' or 'cancel'."),
            }
            continue;
        }

        match command {
            "show" => {
                if let Some(link) = cache.get(&uuid) {
                    print_detail(link);
                }
            }
            "stats" => {
                if let Some(link) = cache.get(&uuid) {
                    print_stats(link);
                }
            }
            "title" => {
                if argument.is_empty() {
                    println!("Usage: title <new title>");
                } else {
                    dialog.edit_title(argument);
                    println!("Title staged; 'save' to submit.");
                }
            }
            "url" => {
                if argument.is_empty() {
                    println!("Usage: url <new destination>");
                } else {
                    dialog.edit_long_url(argument);
                    println!("Destination staged; 'save' to submit.");
                }
            }
            "save" => match or_login_hint(dialog.save(&mut cache).await)? {
                Some(true) => {
                    println!("{}", "Saved.".green());
                    break;
                }
                Some(false) => {
                    let message = dialog.error().unwrap_or("save rejected");
                    eprintln!("{}", format!("Rejected: {}", message).red());
                    dialog.dismiss_error();
                }
                None => break,
            },
            "delete" => {
                dialog.request_delete();
            }
            "qr" => match or_login_hint(dialog.request_qr_code(&cache).await)? {
                Some(true) => {
                    let asset = cache.client().qr_code_url(&uuid)?;
                    println!("{}", format!("QR code generated: {}", asset).green());
                }
                Some(false) => {
                    let message = dialog.error().unwrap_or("no link is being viewed");
                    eprintln!("{}", format!("Rejected: {}", message).red());
                    dialog.dismiss_error();
                }
                None => break,
            },
            "help" => print_inspect_help(),
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    dialog.close();
    Ok(())
}

fn print_detail(link: &LinkResource) {
    println!();
    println!("ID:          {}", link.uuid);
    println!("Title:       {}", link.title);
    println!("Short URL:   {}", link.short_url);
    println!("Destination: {}", link.long_url);
    println!("Clicks:      {}", link.clicks);
    println!("QR code:     {}", if link.has_qr_code { "yes" } else { "no" });
    if let Some(created) = link.created_at {
        println!("Created:     {}", created);
    }
    if let Some(updated) = link.updated_at {
        println!("Updated:     {}", updated);
    }
    println!();
}

fn print_stats(link: &LinkResource) {
    let ranked = analytics::rank(&link.referrer_entries());
    if ranked.is_empty() {
        println!("No clicks recorded yet.");
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["SOURCE", "CLICKS"]);
    for (label, count) in ranked {
        table.add_row(row![label, count]);
    }
    table.printstd();
}

fn print_inspect_help() {
    println!("Commands:");
    println!("  show            display the link's current fields");
    println!("  stats           display click sources, most clicks first");
    println!("  title <text>    stage a new title (max 20 characters)");
    println!("  url <text>      stage a new destination URL");
    println!("  save            submit the staged edits");
    println!("  delete          ask to delete this link (then confirm/cancel)");
    println!("  qr              generate a QR code for this link");
    println!("  quit            leave the detail view");
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", prefix)
    }
}
