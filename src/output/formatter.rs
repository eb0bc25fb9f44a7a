//! Console and JSON rendering of analysis reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{AnalysisReport, ScoreBand};
use crate::processing::document::FieldValue;
use colored::{Color, Colorize};
use std::collections::BTreeSet;
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
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
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::BrightGreen,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Poor => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.to_string().color(color).bold())
        } else {
            format!("[{}]", band)
        }
    }

    fn format_field(&self, label: &str, value: &FieldValue<String>) -> String {
        match value {
            FieldValue::Found(v) => format!("{}: {}\n", label, v),
            FieldValue::NotFound => format!("{}: {}\n", label, self.colorize("not found", Color::BrightBlack)),
        }
    }

    fn format_list(&self, label: &str, items: &BTreeSet<String>, color: Color) -> String {
        let joined = if items.is_empty() {
            "none".to_string()
        } else {
            items.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        format!("{}: {}\n", label, self.colorize(&joined, color))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));
        if let Some(source) = &report.metadata.resume_source {
            output.push_str(&format!("Resume: {}\n", source));
        }

        output.push_str(&self.format_header("Scorecard", 2));
        output.push_str(&format!(
            "Overall JD Match Score: {:.2}% {}\n",
            report.match_score,
            self.format_score_badge(report.score_band())
        ));

        output.push_str(&self.format_header("Extracted Resume Info", 2));
        output.push_str(&self.format_field("Name", &report.resume.name));
        output.push_str(&self.format_field("Email", &report.resume.email));
        output.push_str(&self.format_field("Phone", &report.resume.phone));
        if let Some(pages) = report.resume.page_count {
            output.push_str(&format!("Pages: {}\n", pages));
        }
        if self.detailed {
            output.push_str(&self.format_header("Education", 3));
            match &report.resume.education {
                FieldValue::Found(education) => output.push_str(&format!("{}\n", education)),
                FieldValue::NotFound => output.push_str("Education information not clearly found\n"),
            }
        }

        let comparison = &report.comparison;
        let resume_skills: BTreeSet<String> = report.resume.skill_set().iter().cloned().collect();

        output.push_str(&self.format_header("Skills Analysis", 2));
        output.push_str(&self.format_list("Skills from Resume", &resume_skills, Color::Cyan));
        output.push_str(&self.format_list("Skills Parsed from JD", &comparison.all_jd_skills, Color::White));
        output.push_str(&self.format_list("Matched Skills", &comparison.matched_skills, Color::Green));
        output.push_str(&self.format_list("Missing Skills", &comparison.missing_skills, Color::Red));
        if !comparison.all_jd_skills.is_empty() {
            output.push_str(&format!(
                "Coverage: {}/{} ({:.0}%)\n",
                comparison.matched_count(),
                comparison.all_jd_skills.len(),
                comparison.coverage() * 100.0
            ));
        }

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
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            report.to_json()
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

/// Picks the formatter for a requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true, false)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
