//! Command-line interface definition for Trimlink
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for authentication, link management, and profile
//! management.

use clap::{Parser, Subcommand};

/// Trimlink - URL shortening service client
///
/// Shorten, inspect and manage your links from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "trimlink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to the platform config dir)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Trimlink
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in and persist the session
    Login {
        /// Username or email address
        #[arg(short, long)]
        username: String,

        /// Password (prompted interactively when omitted)
        #[arg(short, long, env = "TRIMLINK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Destroy the persisted session
    Logout,

    /// Create a new account
    Register {
        #[arg(long)]
        firstname: String,

        #[arg(long)]
        lastname: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Password (prompted interactively when omitted)
        #[arg(short, long, env = "TRIMLINK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Manage shortened links
    Links {
        /// Link subcommand
        #[command(subcommand)]
        command: LinkCommand,
    },

    /// Manage the user profile
    Profile {
        /// Profile subcommand
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

/// Link management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum LinkCommand {
    /// List all links
    List,

    /// Shorten a URL
    Shorten {
        /// The long URL to shorten
        url: String,

        /// Display title for the link (max 20 characters)
        #[arg(short, long)]
        title: String,
    },

    /// Open the interactive detail view for a link
    Inspect {
        /// Identifier of the link
        uuid: String,
    },

    /// Delete a link (asks for confirmation)
    Delete {
        /// Identifier of the link
        uuid: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate a QR code for a link
    Qr {
        /// Identifier of the link
        uuid: String,
    },
}

/// Profile management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    /// Show the authenticated user's profile
    Show,

    /// Update profile fields
    Update {
        #[arg(long)]
        firstname: Option<String>,

        #[arg(long)]
        lastname: Option<String>,

        /// Custom domain for shortened links (max 200 characters)
        #[arg(long)]
        custom_domain: Option<String>,

        /// Remove the configured custom domain
        #[arg(long)]
        remove_custom_domain: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_login() {
        let cli = Cli::try_parse_from(["trimlink", "login", "--username", "ada"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Login { username, password } = cli.command {
            assert_eq!(username, "ada");
            assert_eq!(password, None);
        } else {
            panic!("Expected Login command");
        }
    }

    #[test]
    fn test_cli_parse_login_with_password() {
        let cli = Cli::try_parse_from([
            "trimlink", "login", "--username", "ada", "--password", "hunter2",
        ]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Login { password, .. } = cli.command {
            assert_eq!(password, Some("hunter2".to_string()));
        } else {
            panic!("Expected Login command");
        }
    }

    #[test]
    fn test_cli_parse_logout() {
        let cli = Cli::try_parse_from(["trimlink", "logout"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Logout));
    }

    #[test]
    fn test_cli_parse_register() {
        let cli = Cli::try_parse_from([
            "trimlink",
            "register",
            "--firstname",
            "Ada",
            "--lastname",
            "Lovelace",
            "--username",
            "ada",
            "--email",
            "ada@example.com",
        ]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Register {
            firstname, email, ..
        } = cli.command
        {
            assert_eq!(firstname, "Ada");
            assert_eq!(email, "ada@example.com");
        } else {
            panic!("Expected Register command");
        }
    }

    #[test]
    fn test_cli_parse_links_list() {
        let cli = Cli::try_parse_from(["trimlink", "links", "list"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Links { command } = cli.command {
            assert!(matches!(command, LinkCommand::List));
        } else {
            panic!("Expected Links command");
        }
    }

    #[test]
    fn test_cli_parse_links_shorten() {
        let cli = Cli::try_parse_from([
            "trimlink",
            "links",
            "shorten",
            "https://example.com/deep/path",
            "--title",
            "Example",
        ]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Links {
            command: LinkCommand::Shorten { url, title },
        } = cli.command
        {
            assert_eq!(url, "https://example.com/deep/path");
            assert_eq!(title, "Example");
        } else {
            panic!("Expected Shorten command");
        }
    }

    #[test]
    fn test_cli_parse_links_shorten_requires_title() {
        let cli = Cli::try_parse_from(["trimlink", "links", "shorten", "https://example.com"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_links_inspect() {
        let cli = Cli::try_parse_from(["trimlink", "links", "inspect", "Ab3dEf"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Links {
            command: LinkCommand::Inspect { uuid },
        } = cli.command
        {
            assert_eq!(uuid, "Ab3dEf");
        } else {
            panic!("Expected Inspect command");
        }
    }

    #[test]
    fn test_cli_parse_links_delete_with_yes() {
        let cli = Cli::try_parse_from(["trimlink", "links", "delete", "Ab3dEf", "--yes"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Links {
            command: LinkCommand::Delete { uuid, yes },
        } = cli.command
        {
            assert_eq!(uuid, "Ab3dEf");
            assert!(yes);
        } else {
            panic!("Expected Delete command");
        }
    }

    #[test]
    fn test_cli_parse_links_qr() {
        let cli = Cli::try_parse_from(["trimlink", "links", "qr", "Ab3dEf"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Links {
            command: LinkCommand::Qr { uuid },
        } = cli.command
        {
            assert_eq!(uuid, "Ab3dEf");
        } else {
            panic!("Expected Qr command");
        }
    }

    #[test]
    fn test_cli_parse_profile_show() {
        let cli = Cli::try_parse_from(["trimlink", "profile", "show"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Profile { command } = cli.command {
            assert!(matches!(command, ProfileCommand::Show));
        } else {
            panic!("Expected Profile command");
        }
    }

    #[test]
    fn test_cli_parse_profile_update() {
        let cli = Cli::try_parse_from([
            "trimlink",
            "profile",
            "update",
            "--firstname",
            "Ada",
            "--custom-domain",
            "links.example.com",
        ]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Profile {
            command:
                ProfileCommand::Update {
                    firstname,
                    lastname,
                    custom_domain,
                    remove_custom_domain,
                },
        } = cli.command
        {
            assert_eq!(firstname, Some("Ada".to_string()));
            assert_eq!(lastname, None);
            assert_eq!(custom_domain, Some("links.example.com".to_string()));
            assert!(!remove_custom_domain);
        } else {
            panic!("Expected Update command");
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::try_parse_from(["trimlink", "--config", "custom.yaml", "logout"]);
        assert!(cli.is_ok());
        assert_eq!(cli.unwrap().config, Some("custom.yaml".to_string()));
    }

    #[test]
    fn test_cli_parse_with_verbose() {
        let cli = Cli::try_parse_from(["trimlink", "-v", "logout"]);
        assert!(cli.is_ok());
        assert!(cli.unwrap().verbose);
    }

    #[test]
    fn test_cli_parse_missing_command() {
        let cli = Cli::try_parse_from(["trimlink"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_invalid_command() {
        let cli = Cli::try_parse_from(["trimlink", "invalid"]);
        assert!(cli.is_err());
    }
}
