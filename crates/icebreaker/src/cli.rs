//! CLI command definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::config::StoreSettings;

/// Inspect and edit the icebreaker bot's stored records.
///
/// Store settings come from flags or from `TABLE_ACCOUNT_NAME`,
/// `TABLE_ACCOUNT_KEY`, `TABLE_COLLECTION_TEAMS` and `TABLE_COLLECTION_USERS`.
#[derive(Debug, Parser)]
#[command(name = "icebreaker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Storage account name.
    #[arg(long, env = "TABLE_ACCOUNT_NAME")]
    pub account_name: Option<String>,

    /// Storage account key.
    #[arg(long, env = "TABLE_ACCOUNT_KEY", hide_env_values = true)]
    pub account_key: Option<String>,

    /// Teams table name.
    #[arg(long, env = "TABLE_COLLECTION_TEAMS")]
    pub teams_table: Option<String>,

    /// Users table name.
    #[arg(long, env = "TABLE_COLLECTION_USERS")]
    pub users_table: Option<String>,

    /// Store region.
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Custom store endpoint URL, e.g. a local DynamoDB.
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Store settings from the parsed arguments.
    ///
    /// Missing values are left blank and rejected when the provider
    /// initializes.
    pub fn store_settings(&self) -> StoreSettings {
        let settings = StoreSettings::new(
            self.account_name.clone().unwrap_or_default(),
            self.account_key.clone().unwrap_or_default(),
            self.teams_table.clone().unwrap_or_default(),
            self.users_table.clone().unwrap_or_default(),
        )
        .with_region(&self.region);

        match &self.endpoint_url {
            Some(endpoint_url) => settings.with_endpoint_url(endpoint_url),
            None => settings,
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Team installation records.
    Teams(TeamsCommand),
    /// User opt-in records.
    Users(UsersCommand),
}

/// Team commands.
#[derive(Debug, Parser)]
pub struct TeamsCommand {
    #[command(subcommand)]
    pub action: TeamsAction,
}

/// Available team actions.
#[derive(Debug, Subcommand)]
pub enum TeamsAction {
    /// List all teams the bot is installed to.
    List,
    /// Look up a team by ID.
    Get {
        /// Team ID.
        team_id: String,
    },
    /// Record the bot as installed to a team.
    Install {
        #[arg(long)]
        team_id: String,
        #[arg(long)]
        tenant_id: String,
        #[arg(long)]
        service_url: String,
        /// Name of the person that installed the bot.
        #[arg(long)]
        installer_name: String,
    },
    /// Remove the installation record of a team.
    Uninstall {
        /// Team ID.
        team_id: String,
    },
}

/// User commands.
#[derive(Debug, Parser)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// Look up a user by ID.
    Get {
        /// User ID.
        user_id: String,
    },
    /// Store user info, replacing any previous record.
    Set {
        #[arg(long)]
        tenant_id: String,
        #[arg(long)]
        user_id: String,
        /// Whether the user opted in (true or false).
        #[arg(long, action = ArgAction::Set)]
        opted_in: bool,
        #[arg(long)]
        service_url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("icebreaker").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_teams_list() {
        let cli = parse(&["teams", "list"]);
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(matches!(
            cli.command,
            Commands::Teams(TeamsCommand {
                action: TeamsAction::List
            })
        ));
    }

    #[test]
    fn test_teams_install() {
        let cli = parse(&[
            "--format",
            "json",
            "teams",
            "install",
            "--team-id",
            "team-1",
            "--tenant-id",
            "tenant-1",
            "--service-url",
            "https://smba.example",
            "--installer-name",
            "Ada",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Teams(TeamsCommand {
                action:
                    TeamsAction::Install {
                        team_id,
                        installer_name,
                        ..
                    },
            }) => {
                assert_eq!(team_id, "team-1");
                assert_eq!(installer_name, "Ada");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_teams_get_and_uninstall() {
        let cli = parse(&["teams", "get", "team-1"]);
        assert!(matches!(
            cli.command,
            Commands::Teams(TeamsCommand { action: TeamsAction::Get { team_id } }) if team_id == "team-1"
        ));

        let cli = parse(&["--quiet", "teams", "uninstall", "team-1"]);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Teams(TeamsCommand { action: TeamsAction::Uninstall { .. } })
        ));
    }

    #[test]
    fn test_users_set_takes_explicit_opt_in_value() {
        let cli = parse(&[
            "users",
            "set",
            "--tenant-id",
            "tenant-1",
            "--user-id",
            "u1",
            "--opted-in",
            "false",
            "--service-url",
            "https://smba.example",
        ]);

        match cli.command {
            Commands::Users(UsersCommand {
                action: UsersAction::Set { opted_in, user_id, .. },
            }) => {
                assert!(!opted_in);
                assert_eq!(user_id, "u1");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_users_set_requires_opt_in() {
        let result = Cli::try_parse_from([
            "icebreaker",
            "users",
            "set",
            "--tenant-id",
            "tenant-1",
            "--user-id",
            "u1",
            "--service-url",
            "https://smba.example",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_store_settings_from_flags() {
        let cli = parse(&[
            "--account-name",
            "icebreakerstore",
            "--account-key",
            "c2VjcmV0",
            "--teams-table",
            "teams",
            "--users-table",
            "users",
            "--region",
            "eu-west-1",
            "--endpoint-url",
            "http://localhost:8000",
            "teams",
            "list",
        ]);

        let settings = cli.store_settings();

        assert_eq!(
            settings,
            StoreSettings::new("icebreakerstore", "c2VjcmV0", "teams", "users")
                .with_region("eu-west-1")
                .with_endpoint_url("http://localhost:8000")
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_store_settings_blank_value_fails_validation() {
        let cli = parse(&[
            "--account-name",
            "icebreakerstore",
            "--account-key",
            "c2VjcmV0",
            "--teams-table",
            "",
            "--users-table",
            "users",
            "teams",
            "list",
        ]);

        assert_eq!(
            cli.store_settings().validate(),
            Err(icebreaker_core::storage::RepositoryError::Configuration(
                "TABLE_COLLECTION_TEAMS is not set".to_string()
            ))
        );
    }

    #[test]
    fn test_users_get() {
        let cli = parse(&["users", "get", "u1"]);
        assert!(matches!(
            cli.command,
            Commands::Users(UsersCommand { action: UsersAction::Get { user_id } }) if user_id == "u1"
        ));
    }
}
