//! Rendering of extracted problems.
use std::fmt::Write;
use std::str::FromStr;

use cf_statement::Problem;

use crate::Error;

/// The format problems are printed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text, one section after another
    #[default]
    Text,
    /// A JSON array of problems
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format `{other}`, expected `text` or `json`")),
        }
    }
}

/// Renders `problem` as plain text. Sections without content are left out.
#[must_use]
pub fn render_text(problem: &Problem) -> String {
    let mut sections = Vec::new();
    let mut header = problem.title.clone();

    for (label, value) in [
        ("time limit", &problem.time_limit),
        ("memory limit", &problem.memory_limit),
        ("input", &problem.input_file),
        ("output", &problem.output_file),
    ] {
        if !value.is_empty() {
            let _ = write!(header, "\n{label}: {value}");
        }
    }

    if let Some(difficulty) = problem.difficulty {
        let _ = write!(header, "\ndifficulty: {difficulty}");
    }

    if !problem.tags.is_empty() {
        let _ = write!(header, "\ntags: {}", problem.tags.join(", "));
    }

    sections.push(header.trim_start().to_string());

    for (label, value) in [
        (None, &problem.statement),
        (Some("Input"), &problem.input_specification),
        (Some("Output"), &problem.output_specification),
    ] {
        if !value.is_empty() {
            sections.push(match label {
                Some(label) => format!("{label}\n{value}"),
                None => value.clone(),
            });
        }
    }

    for (n, sample) in problem.samples.iter().enumerate() {
        sections.push(format!(
            "Sample {}\ninput:\n{}output:\n{}",
            n + 1,
            sample.input,
            sample.output
        ));
    }

    if !problem.note.is_empty() {
        sections.push(format!("Note\n{}", problem.note));
    }

    sections.retain(|section| !section.is_empty());
    sections.join("\n\n")
}

/// Renders `problems` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if serialization fails.
pub fn render_json(problems: &[Problem]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(problems)?)
}
