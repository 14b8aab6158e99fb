//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary runs.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_PORT, database};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let db = database::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn: db.dsn,
        db_password: db.password,
        pool: db.pool,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_server_action() {
        temp_env::with_vars(
            [
                ("CREDO_PORT", Some("5000")),
                ("CREDO_DSN", Some("postgres://credo@localhost:5432/credo")),
                ("CREDO_DB_PASSWORD", None),
                ("CREDO_DB_MAX_CONNECTIONS", Some("1")),
                ("CREDO_DB_MIN_CONNECTIONS", Some("1")),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec!["credo"]);
                let result = handler(&matches);
                assert!(result.is_ok());
                if let Ok(Action::Server(args)) = result {
                    assert_eq!(args.port, 5000);
                    assert_eq!(args.dsn, "postgres://credo@localhost:5432/credo");
                    assert!(args.db_password.is_none());
                    assert_eq!(args.pool.max_connections(), 1);
                    assert_eq!(args.pool.min_connections(), 1);
                }
            },
        );
    }

    #[test]
    fn inconsistent_pool_limits_fail() {
        temp_env::with_vars(
            [
                ("CREDO_DSN", Some("postgres://credo@localhost:5432/credo")),
                ("CREDO_DB_MAX_CONNECTIONS", Some("2")),
                ("CREDO_DB_MIN_CONNECTIONS", Some("4")),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec!["credo"]);
                assert!(handler(&matches).is_err());
            },
        );
    }
}
