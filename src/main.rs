use std::path::PathBuf;

use anyhow::{Context, Result};
use bear_search::feedback::{Feedback, error_feedback};
use bear_search::logging::init_logging;
use bear_search::{Config, ConfigError, NoteSearcher};
use clap::Parser;
use time::OffsetDateTime;
use tracing::{debug, error};

/// bear-search - find Bear notes by title or body text
#[derive(Parser)]
#[command(name = "bear-search")]
#[command(about = "Search Bear notes and print launcher feedback as JSON")]
#[command(version)]
struct Cli {
    /// Text to look for in note titles and bodies
    #[arg(value_name = "QUERY")]
    query: String,

    /// Path to Bear's database (defaults to Bear's location under the home directory)
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Include archived notes in the results
    #[arg(long)]
    include_archived: bool,

    /// Include trashed notes in the results
    #[arg(long)]
    include_trashed: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    let feedback = match load_config(&cli).and_then(|config| run(&cli, &config)) {
        Ok(feedback) => feedback,
        Err(e) => {
            error!("{e:#}");
            print_feedback(&error_feedback(&e));
            let exit_code = if is_user_error(&e) { 1 } else { 2 };
            std::process::exit(exit_code);
        }
    };

    print_feedback(&feedback);
}

/// Determines if an error is a user error (vs internal error).
///
/// Configuration mistakes are user errors; store and query failures are not.
fn is_user_error(error: &anyhow::Error) -> bool {
    error.downcast_ref::<ConfigError>().is_some()
}

/// Reads configuration from the environment and applies CLI overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(path) = &cli.database {
        config.database_path = path.clone();
    }
    if cli.include_archived {
        config.options.exclude_archived = false;
    }
    if cli.include_trashed {
        config.options.exclude_trashed = false;
    }

    Ok(config)
}

/// Runs the search and renders the launcher feedback.
///
/// Separated from `main` so it can be tested against fixture databases.
fn run(cli: &Cli, config: &Config) -> Result<Feedback> {
    let mut feedback = Feedback::new();

    if !config.has_token {
        feedback.push_warning(
            "BEAR_TOKEN missing in workflow settings",
            "In Bear, go to Help > API Token to find your token",
        );
        return Ok(feedback);
    }

    let searcher = NoteSearcher::new(config.database_path.clone(), config.options);
    debug!(path = %searcher.store_path().display(), "searching notes");
    let notes = searcher
        .search(&cli.query)
        .context("Failed to search notes")?;

    let now = OffsetDateTime::now_utc();
    for note in &notes {
        feedback.push_note(note, now, &config.icon);
    }
    feedback.warn_empty("No matching notes found", "Try another query");

    Ok(feedback)
}

fn print_feedback(feedback: &Feedback) {
    match feedback.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => error!("failed to serialize feedback: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bear_search::SearchOptions;
    use rusqlite::Connection;
    use tempfile::tempdir;

    fn cli(query: &str) -> Cli {
        Cli {
            query: query.to_string(),
            database: None,
            include_archived: false,
            include_trashed: false,
            verbose: false,
        }
    }

    fn config(database_path: PathBuf, has_token: bool) -> Config {
        Config {
            database_path,
            options: SearchOptions::default(),
            has_token,
            icon: PathBuf::from("icon.png"),
        }
    }

    #[test]
    fn cli_parses_query_and_flags() {
        let cli = Cli::try_parse_from([
            "bear-search",
            "groceries",
            "--include-trashed",
            "--database",
            "/tmp/db.sqlite",
        ])
        .unwrap();

        assert_eq!(cli.query, "groceries");
        assert!(cli.include_trashed);
        assert!(!cli.include_archived);
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/db.sqlite")));
    }

    #[test]
    fn cli_requires_a_query() {
        assert!(Cli::try_parse_from(["bear-search"]).is_err());
    }

    #[test]
    fn missing_token_yields_single_warning() {
        let feedback = run(&cli("x"), &config(PathBuf::from("/nonexistent"), false)).unwrap();

        assert_eq!(feedback.items().len(), 1);
        assert_eq!(
            feedback.items()[0].title,
            "BEAR_TOKEN missing in workflow settings"
        );
    }

    #[test]
    fn missing_store_is_internal_error() {
        let dir = tempdir().unwrap();
        let result = run(&cli("x"), &config(dir.path().join("missing.sqlite"), true));

        let err = result.unwrap_err();
        assert!(!is_user_error(&err));
        assert!(format!("{err:#}").contains("open store"));
    }

    #[test]
    fn config_error_is_user_error() {
        let err = anyhow::Error::from(ConfigError::HomeDirUnavailable);
        assert!(is_user_error(&err));
    }

    #[test]
    fn empty_result_yields_no_results_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("database.sqlite");
        Connection::open(&path)
            .unwrap()
            .execute_batch(
                "CREATE TABLE ZSFNOTE (
                    ZUNIQUEIDENTIFIER VARCHAR, ZTITLE VARCHAR, ZTEXT VARCHAR,
                    ZCREATIONDATE TIMESTAMP, ZMODIFICATIONDATE TIMESTAMP,
                    ZARCHIVEDDATE TIMESTAMP, ZTRASHEDDATE TIMESTAMP
                );
                INSERT INTO ZSFNOTE VALUES ('A', 'Groceries', 'milk', 1.0, 2.0, NULL, NULL);",
            )
            .unwrap();

        let feedback = run(&cli("zebra"), &config(path.clone(), true)).unwrap();
        assert_eq!(feedback.items().len(), 1);
        assert_eq!(feedback.items()[0].title, "No matching notes found");

        let feedback = run(&cli("milk"), &config(path, true)).unwrap();
        assert_eq!(feedback.items().len(), 1);
        assert_eq!(feedback.items()[0].uid.as_deref(), Some("A"));
    }
}
