//! Resume analyzer: resume field extraction and job description matching

use clap::Parser;
use log::{error, info};
use resume_analyzer::cli::{Cli, Commands, ConfigAction};
use resume_analyzer::output::formatter::{save_report_to_file, ReportGenerator};
use resume_analyzer::processing::analyzer::AnalysisEngine;
use resume_analyzer::processing::vocabulary::SkillVocabulary;
use resume_analyzer::{Config, Result, ResumeAnalyzerError};
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config) {
        error!("Command failed ({:?}): {}", e.kind(), e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Ok(Config::default()),
    }
}

fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze { resume, job, job_text, output, detailed, no_color, save } => {
            let jd_text = match (job, job_text) {
                (Some(path), _) => std::fs::read_to_string(&path)?,
                (None, Some(text)) => text,
                (None, None) => {
                    return Err(ResumeAnalyzerError::InvalidInput(
                        "A job description is required".to_string(),
                    ))
                }
            };

            let format = output.unwrap_or(config.output.format);
            let use_colors = config.output.use_colors && !no_color && save.is_none();
            let detailed = detailed || config.output.detailed;

            info!("Analyzing {}", resume.display());
            let engine = AnalysisEngine::shared(config)?;
            let report = engine.analyze_file(&resume, &jd_text)?;

            let rendered = ReportGenerator::new(use_colors, detailed).generate_report(&report, format)?;
            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Parse { resume } => {
            let engine = AnalysisEngine::shared(config)?;
            let parsed = engine.parse_resume_file(&resume)?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }

        Commands::Skills => {
            for (skill, _) in SkillVocabulary::shared().patterns() {
                println!("{}", skill);
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }
            ConfigAction::Init { path } => {
                Config::default().save_to(&path)?;
                println!("Wrote default configuration to {}", path.display());
            }
        },
    }

    Ok(())
}
