//! Output formatting functions.

use icebreaker_core::bot::{TeamInstallInfo, UserInfo};

use crate::cli::OutputFormat;

/// Format a value for output.
pub fn format_output<T: serde::Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

/// Format a list of teams, one per line.
pub fn format_teams(teams: &[TeamInstallInfo]) -> String {
    if teams.is_empty() {
        return "No teams found".to_string();
    }
    teams
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single team lookup result.
pub fn format_team(team: Option<&TeamInstallInfo>) -> String {
    match team {
        Some(team) => team.to_string(),
        None => "Team not found".to_string(),
    }
}

/// Format a single user lookup result.
pub fn format_user(user: Option<&UserInfo>) -> String {
    match user {
        Some(user) => user.to_string(),
        None => "User not found".to_string(),
    }
}
