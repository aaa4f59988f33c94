use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

pub const NO_RESULT_NOTE: &str = "Code executed successfully with no output or errors.";

/// Everything the learner wants in the downloadable report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub language: String,
    pub user_code: String,
    pub execution_output: Option<String>,
    pub execution_error: Option<String>,
    pub ai_explanation: String,
    pub learning_tip: String,
    pub fixed_code: Option<String>,
    #[serde(default)]
    pub gamified_questions: Vec<String>,
}

/// `codesnap_report_20240314_120000.md`
pub fn report_filename(now: &DateTime<Local>) -> String {
    format!("codesnap_report_{}.md", now.format("%Y%m%d_%H%M%S"))
}

pub fn render_markdown(report: &ReportRequest, now: &DateTime<Local>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_markdown(&mut out, report, now);
    out
}

fn write_markdown(out: &mut String, report: &ReportRequest, now: &DateTime<Local>) -> fmt::Result {
    let fence = report.language.to_lowercase();

    writeln!(out, "# CodeSnap Learning Report\n")?;
    writeln!(out, "**Date & Time:** {}", now.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "**Language:** {}\n", title_case(&report.language))?;

    writeln!(out, "## User Submitted Code")?;
    writeln!(out, "```{}\n{}\n```\n", fence, report.user_code)?;

    writeln!(out, "## Execution Result")?;
    let output = non_empty(&report.execution_output);
    let error = non_empty(&report.execution_error);
    if let Some(output) = output {
        writeln!(out, "**Output:**\n```\n{}\n```", output)?;
    }
    if let Some(error) = error {
        writeln!(out, "**Error:**\n```\n{}\n```", error)?;
    }
    if output.is_none() && error.is_none() {
        writeln!(out, "{}", NO_RESULT_NOTE)?;
    }
    writeln!(out)?;

    writeln!(out, "## AI Explanation\n{}\n", report.ai_explanation)?;
    writeln!(out, "## Learning Tip\n{}\n", report.learning_tip)?;

    if let Some(fixed) = non_empty(&report.fixed_code) {
        writeln!(out, "## Fixed Code\n```{}\n{}\n```\n", fence, fixed)?;
    }

    if !report.gamified_questions.is_empty() {
        writeln!(out, "## Practice Questions")?;
        for (i, question) in report.gamified_questions.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, question)?;
        }
    }

    Ok(())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Upper-case the first letter of every word, lower-case the rest.
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}
