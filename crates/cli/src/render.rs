//! Console rendering of run outcomes
//!
//! Outcomes are turned into plain [`Line`]s first and printed afterwards, so
//! the wording can be tested without capturing the terminal.

use colored::Colorize;
use migjson_core::EngineError;
use migjson_generator::{
    GenerationReport, ManifestOutcome, RunOutcome, UndoReport, ValidationOutcome,
};
use std::path::Path;

/// Severity of a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// One line of user-facing output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub level: Level,
    pub text: String,
}

impl Line {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }
}

/// Print lines: info in green on stdout, errors in red on stderr
pub fn print(lines: &[Line]) {
    for line in lines {
        match line.level {
            Level::Info => println!("{}", line.text.green()),
            Level::Error => eprintln!("{}", line.text.red()),
        }
    }
}

/// Render the outcome of a successful run
pub fn render_outcome(outcome: &RunOutcome, manifest: &Path) -> Vec<Line> {
    match outcome {
        RunOutcome::Generated(report) => render_generation(report),
        RunOutcome::Validated(outcome) => render_validation(outcome),
        RunOutcome::Undone(report) => render_undo(report, manifest),
    }
}

/// Render an error that aborted the run
pub fn render_error(err: &EngineError) -> Vec<Line> {
    vec![Line::error(err.to_string())]
}

fn render_generation(report: &GenerationReport) -> Vec<Line> {
    let mut lines = vec![Line::info(format!(
        "Generated {} migration(s)",
        report.migrations.len()
    ))];

    if !report.generated_files.is_empty() {
        lines.push(Line::info("The following files have been created:"));
        for file in &report.generated_files {
            lines.push(Line::info(format!("  {}", file.display())));
        }
    }

    match &report.manifest {
        ManifestOutcome::Written(path) => {
            lines.push(Line::info(format!("Undo file written: {}", path.display())))
        }
        ManifestOutcome::Disabled => {}
        ManifestOutcome::Skipped(err) => lines.push(Line::error(err.to_string())),
    }

    lines
}

fn render_validation(outcome: &ValidationOutcome) -> Vec<Line> {
    if outcome.report.is_empty() {
        return vec![Line::info("No validation errors were found, congrats!")];
    }

    let mut lines = Vec::new();
    for table in outcome.report.tables() {
        for field in &table.fields {
            let section = outcome.document.section(&table.table, &field.field);
            let section = serde_json::to_string_pretty(&section).unwrap_or_default();

            for (_, message) in field.messages() {
                lines.push(Line::error(message));
                lines.push(Line::error(format!("In section: {}", section)));
            }
        }
    }
    lines
}

fn render_undo(report: &UndoReport, manifest: &Path) -> Vec<Line> {
    let mut lines = vec![Line::info("Deleting files:")];

    for file in &report.deleted {
        lines.push(Line::info(format!("  Deleted: {}", file.display())));
    }
    for failure in &report.failures {
        lines.push(Line::error(failure.to_string()));
    }

    if !report.manifest_removed {
        lines.push(Line::error(format!(
            "Undo file kept so the undo can be retried: {}",
            manifest.display()
        )));
    }

    lines
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use migjson_schema::{MigrationEntry, MigrationPayload, parse_document, validate};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_render_generation() {
        let report = GenerationReport {
            migrations: vec![MigrationEntry {
                name: "create_users_table".to_string(),
                payload: MigrationPayload::Schema("name:string".to_string()),
            }],
            generated_files: vec![PathBuf::from("database/migrations/create_users_table.php")],
            manifest: ManifestOutcome::Written(PathBuf::from("schema.json.undo.json")),
        };

        let lines = render_outcome(
            &RunOutcome::Generated(report),
            Path::new("schema.json.undo.json"),
        );
        assert_eq!(
            texts(&lines),
            vec![
                "Generated 1 migration(s)",
                "The following files have been created:",
                "  database/migrations/create_users_table.php",
                "Undo file written: schema.json.undo.json",
            ]
        );
        assert!(lines.iter().all(|l| l.level == Level::Info));
    }

    #[test]
    fn test_render_generation_without_files() {
        let report = GenerationReport {
            migrations: Vec::new(),
            generated_files: Vec::new(),
            manifest: ManifestOutcome::Skipped(EngineError::NoGeneratedFiles),
        };

        let lines = render_outcome(&RunOutcome::Generated(report), Path::new("x.undo.json"));
        assert_eq!(lines.last(), Some(&Line::error("No generated files created")));
    }

    #[test]
    fn test_render_validation_echoes_section() {
        let document = parse_document(r#"{"cats": {"paw": "nonsense_type"}}"#).unwrap();
        let report = validate(&document);
        let lines = render_outcome(
            &RunOutcome::Validated(ValidationOutcome { document, report }),
            Path::new("x.undo.json"),
        );

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.level == Level::Error));
        assert!(lines[0].text.contains("nonsense_type"));
        assert!(lines[1].text.starts_with("In section: {"));
        assert!(lines[1].text.contains("\"paw\": \"nonsense_type\""));
    }

    #[test]
    fn test_render_validation_success() {
        let document = parse_document(r#"{"cats": {"paw": "integer"}}"#).unwrap();
        let report = validate(&document);
        let lines = render_outcome(
            &RunOutcome::Validated(ValidationOutcome { document, report }),
            Path::new("x.undo.json"),
        );
        assert_eq!(
            lines,
            vec![Line::info("No validation errors were found, congrats!")]
        );
    }

    #[test]
    fn test_render_undo_with_failure() {
        let report = UndoReport {
            deleted: vec![PathBuf::from("app/User.php")],
            failures: vec![EngineError::FileUndeletable {
                path: PathBuf::from("app/Gone.php"),
                message: "No such file or directory".to_string(),
            }],
            manifest_removed: false,
        };

        let lines = render_outcome(&RunOutcome::Undone(report), Path::new("s.json.undo.json"));
        assert_eq!(
            texts(&lines),
            vec![
                "Deleting files:",
                "  Deleted: app/User.php",
                "Could not delete: app/Gone.php (No such file or directory)",
                "Undo file kept so the undo can be retried: s.json.undo.json",
            ]
        );
    }

    #[test]
    fn test_render_error() {
        let lines = render_error(&EngineError::EmptyDocument(PathBuf::from("s.json")));
        assert_eq!(
            lines,
            vec![Line::error(
                "No data found in json file: It seems you have no data in: s.json"
            )]
        );
    }
}
