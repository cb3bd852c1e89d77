//! ATS scorer: deterministic resume and job description compatibility scoring

use ats_scorer::cli::{self, Cli, Commands, ConfigAction};
use ats_scorer::config::Config;
use ats_scorer::error::{AtsError, Result};
use ats_scorer::input::InputManager;
use ats_scorer::llm::{merge_analysis, QualitativeAnalysis};
use ats_scorer::output::formatter::{resolve_save_path, save_report_to_file, ReportGenerator};
use ats_scorer::output::ScoreReport;
use ats_scorer::processing::ats_scorer::compute_ats_score;
use ats_scorer::processing::gap::near_misses;
use ats_scorer::processing::text_processor::enriched_token_set;
use clap::Parser;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use unicode_segmentation::UnicodeSegmentation;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            analysis,
            detailed,
            output,
            save,
        } => {
            info!("Starting ATS scoring");

            cli::validate_file_extension(&resume, &["pdf", "txt", "text", "md", "markdown"])
                .map_err(|e| AtsError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "text", "md", "markdown"])
                .map_err(|e| AtsError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(AtsError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let mut input_manager = InputManager::from_config(&config.input);
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;

            if job_text.trim().is_empty() {
                return Err(AtsError::InvalidInput(format!(
                    "Job description is empty: {}",
                    job.display()
                )));
            }
            info!(
                "Extracted {} resume characters and {} job description characters",
                resume_text.len(),
                job_text.len()
            );

            if detailed {
                println!("Resume preview:\n{}\n", truncate_text(&resume_text, 300));
                println!("Job description preview:\n{}\n", truncate_text(&job_text, 300));
            }

            let start = Instant::now();
            let ats = compute_ats_score(&resume_text, &job_text);
            let hints = near_misses(
                &ats.missing_keywords,
                &enriched_token_set(&resume_text),
                config.gaps.near_miss_threshold,
            );
            let merged = match analysis {
                Some(path) => load_analysis(&path).await.map(|ai| merge_analysis(ai, &ats)),
                None => None,
            };
            let elapsed_ms = start.elapsed().as_millis() as u64;
            info!("ATS score {} computed in {}ms", ats.score, elapsed_ms);

            let report = ScoreReport::new(
                ats,
                merged,
                hints,
                &resume.to_string_lossy(),
                &job.to_string_lossy(),
                elapsed_ms,
            );

            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
            println!("{}", generator.generate_report(&report, &output_format)?);

            if let Some(save_path) = save {
                let save_path = resolve_save_path(&save_path, &output_format, &resume.to_string_lossy());
                // Saved files never carry terminal color codes
                let plain = ReportGenerator::with_options(false, detailed, true, true);
                save_report_to_file(&plain.generate_report(&report, &output_format)?, &save_path)?;
                info!("Report saved to {}", save_path.display());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| AtsError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("# {}\n{}", config_path.display(), rendered);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(&config_path)?;
                info!("Configuration reset to defaults at {}", config_path.display());
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set(&key, &value)?;
                config.save_to(&config_path)?;
                info!("Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

/// Read an AI review saved as JSON. A file that cannot be used is skipped with
/// a warning; the deterministic score stands on its own.
async fn load_analysis(path: &Path) -> Option<QualitativeAnalysis> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Could not read analysis file {}: {}", path.display(), e);
            return None;
        }
    };

    match QualitativeAnalysis::from_model_output(&content) {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            warn!("Ignoring malformed analysis file {}: {}", path.display(), e);
            None
        }
    }
}

/// Truncate text to at most `max_graphemes` user-visible characters, cutting
/// at the last word boundary.
fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        return text.to_string();
    }

    let truncated = graphemes[..max_graphemes].concat();
    let cut = truncated.rfind(char::is_whitespace).unwrap_or(truncated.len());
    format!("{}...", truncated[..cut].trim_end())
}
