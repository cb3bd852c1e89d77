//! Output formatters: colored console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::{AtsError, Result};
use crate::output::report::ScoreReport;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for formatting score reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

const BAR_WIDTH: usize = 20;

fn progress_bar(value: u8, max: u8) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value as usize * BAR_WIDTH + max as usize / 2) / max as usize
    };
    format!("{}{}", "█".repeat(filled.min(BAR_WIDTH)), "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)))
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            80..=100 => ("STRONG", Color::Green),
            65..=79 => ("GOOD", Color::Yellow),
            50..=64 => ("PARTIAL", Color::BrightYellow),
            _ => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("ATS COMPATIBILITY SCORE", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "ATS Score: {}/100 {}\n",
            report.ats.score,
            self.format_score_badge(report.ats.score)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&report.verdict, Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for (label, value, max) in report.ats.breakdown.components() {
            output.push_str(&format!(
                "  {:<28} {} {:>2}/{}\n",
                label,
                self.colorize(&progress_bar(value, max), Color::Blue),
                value,
                max
            ));
        }

        if !report.strengths.is_empty() {
            output.push_str(&self.format_header("Strengths", 3));
            for strength in &report.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(&strength.label, Color::Green)));
            }
        }

        if !report.improvement_areas.is_empty() {
            output.push_str(&self.format_header("Improvement Areas", 3));
            for area in &report.improvement_areas {
                output.push_str(&format!(
                    "  • {} {}\n",
                    self.colorize(&area.label, Color::Yellow),
                    self.colorize(&format!("({} points available)", area.points_lost()), Color::BrightBlack)
                ));
            }
        }

        let missing = report.missing_keywords();
        if !missing.is_empty() {
            output.push_str(&self.format_header("Missing Keywords", 2));
            output.push_str(&format!("  {}\n", self.colorize(&missing.join(", "), Color::Red)));
        }

        if !report.near_misses.is_empty() {
            output.push_str(&self.format_header("Did You Mean", 3));
            for hint in &report.near_misses {
                output.push_str(&format!(
                    "  • {} → resume has \"{}\" ({:.0}% similar)\n",
                    self.colorize(&hint.keyword, Color::Red),
                    hint.resume_token,
                    hint.similarity * 100.0
                ));
            }
        }

        if let Some(analysis) = &report.analysis {
            output.push_str(&self.format_header("AI Recommendations", 2));
            for (section, items) in &analysis.sections {
                output.push_str(&format!("{}\n", self.colorize(section, Color::Cyan)));
                for item in items {
                    output.push_str(&format!("  • {}\n", item));
                }
            }

            if self.detailed && !analysis.optimized_resume.is_empty() {
                output.push_str(&self.format_header("Optimized Resume", 3));
                output.push_str(&analysis.optimized_resume);
                output.push('\n');
            }
        }

        output.push_str(&format!(
            "\n{} Generated by ATS Scorer v{}\n",
            self.colorize("ℹ", Color::Blue),
            report.metadata.scorer_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn file_name(path: &str) -> String {
        Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# ATS Compatibility Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                Self::file_name(&report.metadata.resume_file),
                Self::file_name(&report.metadata.job_file)
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("**ATS Score:** {}/100\n\n", report.ats.score));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score | Max |\n");
        output.push_str("|-----------|-------|-----|\n");
        for (label, value, max) in report.ats.breakdown.components() {
            output.push_str(&format!("| {} | {} | {} |\n", label, value, max));
        }
        output.push('\n');

        if !report.improvement_areas.is_empty() {
            output.push_str("### Areas for Improvement\n\n");
            for area in &report.improvement_areas {
                output.push_str(&format!("- {} ({} points available)\n", area.label, area.points_lost()));
            }
            output.push('\n');
        }

        let missing = report.missing_keywords();
        if !missing.is_empty() {
            output.push_str("## Missing Keywords\n\n");
            output.push_str(&format!("`{}`\n\n", missing.join("`, `")));
        }

        if !report.near_misses.is_empty() {
            output.push_str("### Did You Mean\n\n");
            for hint in &report.near_misses {
                output.push_str(&format!(
                    "- `{}`: resume has `{}` ({:.0}% similar)\n",
                    hint.keyword,
                    hint.resume_token,
                    hint.similarity * 100.0
                ));
            }
            output.push('\n');
        }

        if let Some(analysis) = &report.analysis {
            output.push_str("## AI Recommendations\n\n");
            for (section, items) in &analysis.sections {
                output.push_str(&format!("### {}\n\n", section));
                for item in items {
                    output.push_str(&format!("- {}\n", item));
                }
                output.push('\n');
            }
            if !analysis.optimized_resume.is_empty() {
                output.push_str("## Optimized Resume\n\n");
                output.push_str(&analysis.optimized_resume);
                output.push_str("\n\n");
            }
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by ATS Scorer v{}*\n", report.metadata.scorer_version));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &ScoreReport, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), *format);
        formatter.format_report(report)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content).map_err(|e| {
        AtsError::OutputFormatting(format!("Failed to write report to {}: {}", file_path.display(), e))
    })
}

/// Where `--save` writes: an existing directory gets a file named after the
/// resume, anything else is used as given.
pub fn resolve_save_path(save_path: &Path, format: &OutputFormat, resume_name: &str) -> PathBuf {
    if save_path.is_dir() {
        save_path.join(suggest_filename(format, resume_name, true))
    } else {
        save_path.to_path_buf()
    }
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_ats{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_ats{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_ats{}.md", base_name, timestamp_suffix),
    }
}
