//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use motes_intake::SubmissionForm;

#[derive(Debug, Parser)]
#[command(name = "motes")]
#[command(about = "Ambient, pointer-reactive particle field for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to config.toml in the config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file for the terminal scene (defaults to motes.log in the data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Seed for reproducible animation
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a project enquiry
    Submit(SubmitArgs),

    /// Print the effective configuration
    Config {
        /// Write it to the configuration file instead
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub service: Option<String>,

    #[arg(long)]
    pub project: Option<String>,

    #[arg(long)]
    pub budget: Option<String>,

    /// Short introduction
    #[arg(long)]
    pub intro: Option<String>,

    /// Submission store (defaults to the configured store)
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,
}

impl SubmitArgs {
    pub fn to_form(&self) -> SubmissionForm {
        SubmissionForm {
            username: self.username.clone(),
            email: self.email.clone(),
            phone_num: self.phone.clone(),
            service: self.service.clone(),
            project_name: self.project.clone(),
            budget: self.budget.clone(),
            intro: self.intro.clone(),
        }
    }
}
