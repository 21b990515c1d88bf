//! 命令行参数

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cv-builder", version, about = "Manage CV data and generate blurbs against the CV backend")]
pub struct Cli {
    /// Backend base URL (overrides CV_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Register a new account; the backend generates the password
    Register {
        #[arg(long)]
        email: String,
    },
    /// Log out (the local session is always cleared)
    Logout,
    /// Password reset
    #[command(subcommand)]
    ResetPassword(ResetPasswordCommand),
    /// Show whether a session token is stored
    #[command(alias = "status")]
    Whoami,
    /// Theme preference
    #[command(subcommand)]
    Theme(ThemeCommand),
    /// Generate blurbs (all four types unless --type is given)
    Generate {
        /// Blurb type to generate; repeat for several
        #[arg(long = "type")]
        types: Vec<String>,
        /// full, modify or double-check
        #[arg(long, default_value = "full")]
        mode: String,
        /// Target job description id
        #[arg(long)]
        job: Option<String>,
        /// Save every generated blurb to the backend
        #[arg(long)]
        save: bool,
    },
    /// Saved blurbs
    #[command(subcommand)]
    Blurbs(BlurbsCommand),
    /// Analyze a job description
    AnalyzeJob { id: String },
    /// Compile every experience, project and saved blurb into a PDF
    Compile {
        /// Directory the PDF is written to
        #[arg(long, default_value = ".")]
        output: PathBuf,
        #[arg(long)]
        template: Option<String>,
        #[arg(long)]
        font_size: Option<u32>,
    },
    /// Download a full data export archive
    Export {
        #[arg(long, default_value = "cv-export.zip")]
        output: PathBuf,
    },
    /// Upload a data export archive
    Import { archive: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum ResetPasswordCommand {
    /// Send a reset email
    Request {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the emailed token
    Confirm {
        #[arg(long)]
        token: String,
        #[arg(long)]
        new_password: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Show the current preference and what it renders as
    Get,
    /// Change the preference
    Set {
        /// light, dark or system
        value: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum BlurbsCommand {
    /// List saved blurbs
    List {
        #[arg(long)]
        job: Option<String>,
    },
    /// Save a blurb
    Save {
        #[arg(long = "type")]
        blurb_type: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        job: Option<String>,
    },
    /// Delete a saved blurb
    Delete { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_matches_documented_commands() {
        let cli = Cli::try_parse_from(["cv-builder", "whoami"]).unwrap();
        assert!(matches!(cli.command, Command::Whoami));

        let cli = Cli::try_parse_from(["cv-builder", "status"]).unwrap();
        assert!(matches!(cli.command, Command::Whoami));

        let cli = Cli::try_parse_from(["cv-builder", "theme", "get"]).unwrap();
        assert!(matches!(cli.command, Command::Theme(ThemeCommand::Get)));

        let cli = Cli::try_parse_from(["cv-builder", "theme", "set", "dark"]).unwrap();
        match cli.command {
            Command::Theme(ThemeCommand::Set { value }) => assert_eq!(value, "dark"),
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["cv-builder", "theme"]).is_err());
    }
}
