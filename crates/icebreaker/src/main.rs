use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use icebreaker::cli::{Cli, Commands, OutputFormat, TeamsAction, UsersAction};
use icebreaker::output::{format_output, format_team, format_teams, format_user};
use icebreaker::{BotDataProvider, StoreConnector};
use icebreaker_core::bot::TeamInstallInfo;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "icebreaker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let provider = BotDataProvider::with_settings(connector(), cli.store_settings());

    match cli.command {
        Commands::Teams(teams_cmd) => match teams_cmd.action {
            TeamsAction::List => {
                let teams = provider.get_installed_teams().await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&teams, cli.format)),
                    OutputFormat::Pretty => println!("{}", format_teams(&teams)),
                }
            }
            TeamsAction::Get { team_id } => {
                let team = provider.get_installed_team(&team_id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&team, cli.format)),
                    OutputFormat::Pretty => println!("{}", format_team(team.as_ref())),
                }
            }
            TeamsAction::Install {
                team_id,
                tenant_id,
                service_url,
                installer_name,
            } => {
                let team = TeamInstallInfo::new(team_id, tenant_id, service_url, installer_name);
                provider.set_team_install_status(&team, true).await?;
                if !cli.quiet {
                    println!("Installed:\n{}", team);
                }
            }
            TeamsAction::Uninstall { team_id } => {
                let team = TeamInstallInfo::key_only(&team_id);
                provider.set_team_install_status(&team, false).await?;
                if !cli.quiet {
                    println!("Uninstalled team {}", team_id);
                }
            }
        },
        Commands::Users(users_cmd) => match users_cmd.action {
            UsersAction::Get { user_id } => {
                let user = provider.get_user_info(&user_id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&user, cli.format)),
                    OutputFormat::Pretty => println!("{}", format_user(user.as_ref())),
                }
            }
            UsersAction::Set {
                tenant_id,
                user_id,
                opted_in,
                service_url,
            } => {
                provider
                    .set_user_info(&tenant_id, &user_id, opted_in, &service_url)
                    .await?;
                if !cli.quiet {
                    println!("Saved user {} (opted in: {})", user_id, opted_in);
                }
            }
        },
    }

    Ok(())
}

#[cfg(feature = "dynamodb")]
fn connector() -> Arc<dyn StoreConnector> {
    Arc::new(icebreaker::storage::DynamoDbConnector)
}

// Without DynamoDB every run starts from an empty store.
#[cfg(not(feature = "dynamodb"))]
fn connector() -> Arc<dyn StoreConnector> {
    Arc::new(icebreaker::storage::InMemoryConnector::default())
}
