use crate::store::PoolConfig;
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;
use std::time::Duration;

pub const ARG_DSN: &str = "dsn";
pub const ARG_DB_PASSWORD: &str = "db-password";
pub const ARG_DB_MAX_CONNECTIONS: &str = "db-max-connections";
pub const ARG_DB_MIN_CONNECTIONS: &str = "db-min-connections";
pub const ARG_DB_ACQUIRE_TIMEOUT: &str = "db-acquire-timeout";

#[derive(Debug, Clone)]
pub struct Options {
    pub dsn: String,
    pub password: Option<SecretString>,
    pub pool: PoolConfig,
}

impl Options {
    /// Parse database arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the DSN is missing or the pool limits are inconsistent.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let dsn = match matches.get_one::<String>(ARG_DSN).cloned() {
            Some(value) if !value.trim().is_empty() => value,
            _ => anyhow::bail!("missing required argument: --{ARG_DSN}"),
        };

        let password = matches
            .get_one::<String>(ARG_DB_PASSWORD)
            .filter(|v| !v.is_empty())
            .map(|v| SecretString::from(v.clone()));

        let max_connections = matches
            .get_one::<u32>(ARG_DB_MAX_CONNECTIONS)
            .copied()
            .unwrap_or(5);
        let min_connections = matches
            .get_one::<u32>(ARG_DB_MIN_CONNECTIONS)
            .copied()
            .unwrap_or(1);
        let acquire_timeout = matches
            .get_one::<u64>(ARG_DB_ACQUIRE_TIMEOUT)
            .copied()
            .unwrap_or(30);

        if min_connections > max_connections {
            anyhow::bail!(
                "--{ARG_DB_MIN_CONNECTIONS} ({min_connections}) must not exceed --{ARG_DB_MAX_CONNECTIONS} ({max_connections})"
            );
        }

        Ok(Self {
            dsn,
            password,
            pool: PoolConfig::new()
                .with_max_connections(max_connections)
                .with_min_connections(min_connections)
                .with_acquire_timeout(Duration::from_secs(acquire_timeout)),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_DSN)
                .short('d')
                .long(ARG_DSN)
                .help("Database connection string")
                .long_help(
                    "Database connection string, example: postgres://credo@localhost:5432/credo. The password may be given separately with --db-password.",
                )
                .env("CREDO_DSN")
                .required(true),
        )
        .arg(
            Arg::new(ARG_DB_PASSWORD)
                .long(ARG_DB_PASSWORD)
                .help("Database password, injected into the DSN")
                .env("CREDO_DB_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_DB_MAX_CONNECTIONS)
                .long(ARG_DB_MAX_CONNECTIONS)
                .help("Maximum number of open database connections")
                .env("CREDO_DB_MAX_CONNECTIONS")
                .default_value("5")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new(ARG_DB_MIN_CONNECTIONS)
                .long(ARG_DB_MIN_CONNECTIONS)
                .help("Database connections kept open while idle")
                .env("CREDO_DB_MIN_CONNECTIONS")
                .default_value("1")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(ARG_DB_ACQUIRE_TIMEOUT)
                .long(ARG_DB_ACQUIRE_TIMEOUT)
                .help("Seconds to wait for a free database connection")
                .env("CREDO_DB_ACQUIRE_TIMEOUT")
                .default_value("30")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
