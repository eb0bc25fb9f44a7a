//! CLI interface for the resume analyzer

use crate::config::OutputFormat;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Extract resume fields and match a resume against a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    #[command(group(ArgGroup::new("jd").required(true).args(["job", "job_text"])))]
    Analyze {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to a plain-text job description
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description text given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<OutputFormat>,

        /// Include the education block in console output
        #[arg(short, long)]
        detailed: bool,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Parse a resume and print the extracted fields as JSON
    Parse {
        /// Path to resume file (PDF, DOCX)
        resume: PathBuf,
    },

    /// List the recognised skill vocabulary
    Skills,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write the default configuration to a file
    Init {
        /// Destination path
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_requires_a_job_description() {
        assert!(Cli::try_parse_from(["resume-analyzer", "analyze", "-r", "cv.pdf"]).is_err());

        let cli = Cli::try_parse_from([
            "resume-analyzer", "analyze", "-r", "cv.pdf", "--job-text", "Python developer", "-o", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { job_text, output, .. } => {
                assert_eq!(job_text.as_deref(), Some("Python developer"));
                assert_eq!(output, Some(OutputFormat::Json));
            }
            _ => panic!("expected analyze"),
        }
    }
}
