//! # Migrator CLI
//!
//! Command-line front end of pg-migrator.
//!
//! Reads a model from a file or stdin, compiles it into a migration script
//! and then prints it, writes it to a file or applies it to a PostgreSQL
//! server.
//!
//! ## Usage
//!
//! ```sh
//! pg-migrate -s shop -f api.json -u admin -d shop
//! cat api.yaml | pg-migrate --format yaml --dry-run
//! ```
//!

// ============================================================================
// Modules
// ============================================================================

pub mod args;
pub mod config;
pub mod connection;
pub mod runner;

// ============================================================================
// Re-exports
// ============================================================================

pub use args::{Cli, InputFormat};
pub use config::FileConfig;
pub use connection::{
    ConnectParts, ConnectTarget, Connection, ConnectionDefaults, ConnectionObject, parse, resolve,
};
pub use runner::{Executor, PgExecutor, exec};

pub use migrator_codegen;
pub use migrator_core;
pub use migrator_ir;

use colored::Colorize;
use migrator_codegen::{CompiledMigration, compile};
use migrator_core::{MigrateError, ResultExt, Warnings};
use migrator_ir::{Model, ModelFormat, load_model, load_model_from_str};
use std::io::{Read, Write};
use std::process::ExitCode;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the command against a live server, reading stdin when no file is given
pub async fn run(cli: Cli, defaults: &ConnectionDefaults) -> anyhow::Result<()> {
    run_with(
        cli,
        defaults,
        &PgExecutor,
        std::io::stdin().lock(),
        &mut std::io::stdout(),
    )
    .await
}

/// [`run`] with the executor and standard streams supplied by the caller
pub async fn run_with<E, R, W>(
    cli: Cli,
    defaults: &ConnectionDefaults,
    executor: &E,
    stdin: R,
    stdout: &mut W,
) -> anyhow::Result<()>
where
    E: Executor,
    R: Read,
    W: Write,
{
    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let config = cli.generator_config(file_config.generator.clone());

    let model = read_model(&cli, stdin)?;
    let compiled = compile(&model, &config)?;
    report_warnings(&compiled.warnings);

    if let Some(path) = &cli.output {
        write_script(path, &compiled)?;
        tracing::info!(path = %path.display(), "Migration written");
    }
    if cli.dry_run {
        stdout
            .write_all(compiled.sql.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(MigrateError::from)?;
    }
    if cli.output.is_some() || cli.dry_run {
        return Ok(());
    }

    let target = cli.connect_target(file_config.connection.as_ref());
    let connection = resolve(&target, defaults)?;
    exec(Some(&connection), &compiled.sql, executor).await?;
    Ok(())
}

fn read_model<R: Read>(cli: &Cli, mut stdin: R) -> anyhow::Result<Model> {
    let model = match (&cli.file, cli.model_format()) {
        (Some(path), None) => load_model(path)?,
        (Some(path), Some(format)) => {
            let text = std::fs::read_to_string(path).map_err(|e| MigrateError::FileRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            load_model_from_str(&text, format)?
        }
        (None, format) => {
            tracing::debug!("Reading model from stdin");
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .with_context("Failed to read model from stdin")?;
            let format = format.unwrap_or(ModelFormat::Json);
            load_model_from_str(&text, format).with_context(format!("Model on stdin ({})", format))?
        }
    };
    Ok(model)
}

fn write_script(path: &std::path::Path, compiled: &CompiledMigration) -> anyhow::Result<()> {
    std::fs::write(path, &compiled.sql).map_err(|e| MigrateError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(())
}

fn report_warnings(warnings: &Warnings) {
    for warning in warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
}

/// Process exit status of a failed run
///
/// | code | cause                                   |
/// |------|-----------------------------------------|
/// | 3    | the model cannot be translated          |
/// | 4    | connection resolution or execution      |
/// | 5    | reading or writing files and streams    |
/// | 1    | anything else                           |
///
/// Code 2 stays with clap's usage errors.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<MigrateError>() {
        Some(e) if e.is_model_error() => 3,
        Some(e) if e.is_connection_error() => 4,
        Some(e) if e.is_io() => 5,
        _ => 1,
    }
}

/// Print a failed run's error on stderr and pick its exit status
pub fn report_error(error: &anyhow::Error) -> ExitCode {
    eprintln!("{} {:#}", "error:".red().bold(), error);
    ExitCode::from(exit_code(error))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use migrator_core::MigrateResult;
    use std::sync::Mutex;

    const MODEL: &str =
        r#"{ "foo": { "type": "object", "properties": { "bar": { "type": "integer" } } } }"#;

    #[derive(Default)]
    struct RecordingExecutor {
        scripts: Mutex<Vec<(String, String)>>,
    }

    impl Executor for RecordingExecutor {
        async fn execute(&self, connection: &Connection, sql: &str) -> MigrateResult<()> {
            self.scripts
                .lock()
                .unwrap()
                .push((connection.string.clone(), sql.to_string()));
            Ok(())
        }
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pg-migrate").chain(args.iter().copied())).unwrap()
    }

    async fn run_cli(args: &[&str], stdin: &str) -> (anyhow::Result<()>, String, RecordingExecutor) {
        let executor = RecordingExecutor::default();
        let mut stdout = Vec::new();
        let result = run_with(
            cli(args),
            &ConnectionDefaults::default(),
            &executor,
            stdin.as_bytes(),
            &mut stdout,
        )
        .await;
        (result, String::from_utf8(stdout).unwrap(), executor)
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_prints_sql() {
        let (result, stdout, executor) = run_cli(&["--dry-run", "-s", "shop"], MODEL).await;

        result.unwrap();
        assert!(stdout.starts_with("\nBEGIN;\n\nCREATE SCHEMA shop IF NOT EXISTS;"));
        assert!(stdout.contains("CREATE TABLE shop.foo IF NOT EXISTS ("));
        assert!(executor.scripts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_executes_with_resolved_connection() {
        let (result, stdout, executor) = run_cli(&["-u", "admin", "-d", "shop"], MODEL).await;

        result.unwrap();
        assert!(stdout.is_empty());
        let scripts = executor.scripts.lock().unwrap();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].0, "postgresql://admin@127.0.0.1:5432/shop");
        assert!(scripts[0].1.contains("CREATE TABLE api.foo"));
    }

    #[tokio::test]
    async fn test_yaml_from_stdin() {
        let yaml = "foo:\n  type: object\n  properties:\n    bar:\n      type: string\n";
        let (result, stdout, _) = run_cli(&["--format", "yaml", "--dry-run"], yaml).await;

        result.unwrap();
        assert!(stdout.contains("bar CHARACTER VARYING"));
    }

    #[tokio::test]
    async fn test_output_file_skips_execution() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("migration.sql");
        let out_arg = out.to_str().unwrap();

        let (result, _, executor) = run_cli(&["-o", out_arg], MODEL).await;

        result.unwrap();
        let sql = std::fs::read_to_string(&out).unwrap();
        assert!(sql.ends_with("COMMIT;\n"));
        assert!(executor.scripts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_config_file_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("migrator.toml");
        std::fs::write(
            &config,
            "[generator]\nschema = \"from_file\"\nsoftDelete = false\n\n[connection]\nhost = \"db\"\n",
        )
        .unwrap();
        let model = dir.path().join("api.json");
        std::fs::write(&model, MODEL).unwrap();

        let (result, _, executor) = run_cli(
            &["-C", config.to_str().unwrap(), "-f", model.to_str().unwrap(), "-p", "6000"],
            "",
        )
        .await;

        result.unwrap();
        let scripts = executor.scripts.lock().unwrap();
        assert_eq!(scripts[0].0, "postgresql://postgres@db:6000/postgres");
        assert!(scripts[0].1.contains("CREATE SCHEMA from_file IF NOT EXISTS;"));
        assert!(!scripts[0].1.contains("delete_at"));
    }

    #[tokio::test]
    async fn test_invalid_model_fails() {
        let (result, stdout, executor) =
            run_cli(&["--dry-run"], r#"{ "foo": { "type": "string" } }"#).await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MigrateError>(),
            Some(MigrateError::ModelType { .. })
        ));
        assert!(stdout.is_empty());
        assert!(executor.scripts.lock().unwrap().is_empty());
        assert_eq!(exit_code(&err), 3);
    }

    #[tokio::test]
    async fn test_bad_connect_string_fails() {
        let (result, _, executor) = run_cli(&["-c", "mysql://a@b"], MODEL).await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MigrateError>(),
            Some(MigrateError::ConnectProtocol(_))
        ));
        assert_eq!(exit_code(&err), 4);
        assert!(executor.scripts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_stdin_names_its_source() {
        let (result, _, _) = run_cli(&["--dry-run"], "{ not json").await;

        let err = result.unwrap_err();
        match err.downcast_ref::<MigrateError>() {
            Some(MigrateError::WithContext { context, .. }) => {
                assert_eq!(context, "Model on stdin (json)");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_exit_codes_follow_error_class() {
        let model = anyhow::Error::from(MigrateError::missing_items("api.a.b"));
        assert_eq!(exit_code(&model), 3);

        let io = anyhow::Error::from(MigrateError::from(std::io::Error::other("closed")));
        assert_eq!(exit_code(&io), 5);

        assert_eq!(exit_code(&anyhow::anyhow!("other")), 1);
    }
}
