//! # Generator Dispatch
//!
//! The migration classes themselves are written by an external generator
//! (`make:migration:schema` and `make:migration:pivot` of Laravel Generators
//! Extended). [`MigrationGenerator`] is the seam to it; [`ArtisanGenerator`]
//! runs it as a child process.
//!
//! Calls are synchronous. The files they leave behind are picked up by the
//! directory scan after the last call, so a call must finish before the next
//! one starts.

use migjson_core::{EngineError, EngineResult};
use migjson_schema::{MigrationEntry, MigrationPayload};
use std::path::PathBuf;
use std::process::Command;

/// Command name of the schema migration generator
pub const SCHEMA_COMMAND: &str = "make:migration:schema";

/// Command name of the pivot migration generator
pub const PIVOT_COMMAND: &str = "make:migration:pivot";

// ============================================================================
// MigrationGenerator Trait
// ============================================================================

/// External collaborator that writes migration files
pub trait MigrationGenerator {
    /// Generate a migration from a schema line such as `name:string, email:string:unique`
    fn generate_schema_migration(&mut self, name: &str, schema: &str) -> EngineResult<()>;

    /// Generate a pivot migration joining two tables
    fn generate_pivot_migration(&mut self, first: &str, second: &str) -> EngineResult<()>;
}

/// Route one entry to the matching generator operation
pub fn dispatch(generator: &mut dyn MigrationGenerator, entry: &MigrationEntry) -> EngineResult<()> {
    match &entry.payload {
        MigrationPayload::Pivot { first, second } => {
            tracing::info!("Generating pivot migration {} ({} + {})", entry.name, first, second);
            generator.generate_pivot_migration(first, second)
        }
        MigrationPayload::Schema(schema) => {
            tracing::info!("Generating migration {}", entry.name);
            generator.generate_schema_migration(&entry.name, schema)
        }
    }
}

/// Dispatch entries in order, stopping at the first failure
pub fn dispatch_all(
    generator: &mut dyn MigrationGenerator,
    entries: &[MigrationEntry],
) -> EngineResult<()> {
    for entry in entries {
        dispatch(generator, entry)?;
    }
    Ok(())
}

// ============================================================================
// ArtisanGenerator
// ============================================================================

/// Runs the generator commands through `php artisan`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtisanGenerator {
    /// Executable to run
    pub program: String,

    /// Arguments placed before the command name
    pub args: Vec<String>,

    /// Working directory for the child process (current directory if unset)
    pub working_dir: Option<PathBuf>,
}

impl ArtisanGenerator {
    /// Create a generator running `program args... <command> ...`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    /// Run the child process in `dir`
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Build the `make:migration:schema` invocation
    pub fn schema_command(&self, name: &str, schema: &str) -> Command {
        let mut cmd = self.base_command();
        cmd.arg(SCHEMA_COMMAND)
            .arg(name)
            .arg(format!("--schema={}", schema));
        cmd
    }

    /// Build the `make:migration:pivot` invocation
    pub fn pivot_command(&self, first: &str, second: &str) -> Command {
        let mut cmd = self.base_command();
        cmd.arg(PIVOT_COMMAND).arg(first).arg(second);
        cmd
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn run(&self, mut cmd: Command) -> EngineResult<()> {
        let described = describe(&cmd);
        tracing::debug!("Running {}", described);

        let status = cmd.status().map_err(|e| EngineError::GeneratorSpawn {
            program: self.program.clone(),
            message: e.to_string(),
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(EngineError::GeneratorFailed {
                command: described,
                status: status.to_string(),
            })
        }
    }
}

impl Default for ArtisanGenerator {
    fn default() -> Self {
        Self::new("php", vec!["artisan".to_string()])
    }
}

impl MigrationGenerator for ArtisanGenerator {
    fn generate_schema_migration(&mut self, name: &str, schema: &str) -> EngineResult<()> {
        let cmd = self.schema_command(name, schema);
        self.run(cmd)
    }

    fn generate_pivot_migration(&mut self, first: &str, second: &str) -> EngineResult<()> {
        let cmd = self.pivot_command(first, second);
        self.run(cmd)
    }
}

fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        fail_on: Option<String>,
    }

    impl MigrationGenerator for Recorder {
        fn generate_schema_migration(&mut self, name: &str, schema: &str) -> EngineResult<()> {
            if self.fail_on.as_deref() == Some(name) {
                return Err(EngineError::GeneratorFailed {
                    command: name.to_string(),
                    status: "exit status: 1".to_string(),
                });
            }
            self.calls.push(format!("schema {} [{}]", name, schema));
            Ok(())
        }

        fn generate_pivot_migration(&mut self, first: &str, second: &str) -> EngineResult<()> {
            self.calls.push(format!("pivot {} {}", first, second));
            Ok(())
        }
    }

    fn entries() -> Vec<MigrationEntry> {
        vec![
            MigrationEntry {
                name: "create_users_table".to_string(),
                payload: MigrationPayload::Schema("name:string".to_string()),
            },
            MigrationEntry {
                name: "posts_tags_pivot".to_string(),
                payload: MigrationPayload::Pivot {
                    first: "posts".to_string(),
                    second: "tags".to_string(),
                },
            },
            MigrationEntry {
                name: "create_cats_table".to_string(),
                payload: MigrationPayload::Schema(String::new()),
            },
        ]
    }

    #[test]
    fn test_dispatch_routes_by_payload() {
        let mut recorder = Recorder::default();
        dispatch_all(&mut recorder, &entries()).unwrap();

        assert_eq!(
            recorder.calls,
            vec![
                "schema create_users_table [name:string]",
                "pivot posts tags",
                "schema create_cats_table []",
            ]
        );
    }

    #[test]
    fn test_dispatch_stops_at_first_failure() {
        let mut recorder = Recorder {
            fail_on: Some("create_users_table".to_string()),
            ..Default::default()
        };
        let result = dispatch_all(&mut recorder, &entries());

        assert!(matches!(result, Err(EngineError::GeneratorFailed { .. })));
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn test_schema_command_arguments() {
        let generator = ArtisanGenerator::default();
        let cmd = generator.schema_command("create_users_table", "name:string, email:string:unique");

        assert_eq!(cmd.get_program(), "php");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec![
                "artisan",
                "make:migration:schema",
                "create_users_table",
                "--schema=name:string, email:string:unique",
            ]
        );
    }

    #[test]
    fn test_pivot_command_arguments() {
        let generator = ArtisanGenerator::default().with_working_dir("/srv/app");
        let cmd = generator.pivot_command("posts", "tags");

        assert_eq!(describe(&cmd), "php artisan make:migration:pivot posts tags");
        assert_eq!(cmd.get_current_dir(), Some(std::path::Path::new("/srv/app")));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let mut generator = ArtisanGenerator::new("migration-json-no-such-program", Vec::new());
        let result = generator.generate_pivot_migration("posts", "tags");

        match result {
            Err(EngineError::GeneratorSpawn { program, .. }) => {
                assert_eq!(program, "migration-json-no-such-program")
            }
            other => panic!("Expected GeneratorSpawn, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_generator_failure() {
        let mut generator = ArtisanGenerator::new(
            "sh",
            vec!["-c".to_string(), "exit 3".to_string(), "sh".to_string()],
        );
        let result = generator.generate_schema_migration("create_users_table", "name:string");

        match result {
            Err(EngineError::GeneratorFailed { command, .. }) => {
                assert!(command.contains("make:migration:schema create_users_table"))
            }
            other => panic!("Expected GeneratorFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_program() {
        let mut generator = ArtisanGenerator::new(
            "sh",
            vec!["-c".to_string(), "exit 0".to_string(), "sh".to_string()],
        );
        assert!(generator.generate_pivot_migration("posts", "tags").is_ok());
    }
}
