use std::{env, fmt};

use icebreaker_core::storage::{RepositoryError, Result};

pub const ACCOUNT_NAME_VAR: &str = "TABLE_ACCOUNT_NAME";
pub const ACCOUNT_KEY_VAR: &str = "TABLE_ACCOUNT_KEY";
pub const TEAMS_TABLE_VAR: &str = "TABLE_COLLECTION_TEAMS";
pub const USERS_TABLE_VAR: &str = "TABLE_COLLECTION_USERS";
pub const REGION_VAR: &str = "AWS_REGION";
pub const ENDPOINT_URL_VAR: &str = "AWS_ENDPOINT_URL";

const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings for the table store, read once at initialization.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Storage account name (the access key id for DynamoDB).
    pub account_name: String,
    /// Storage account key (the secret access key for DynamoDB).
    pub account_key: String,
    pub teams_table: String,
    pub users_table: String,
    pub region: String,
    /// Custom endpoint URL, e.g. a local DynamoDB.
    pub endpoint_url: Option<String>,
}

impl StoreSettings {
    pub fn new(
        account_name: impl Into<String>,
        account_key: impl Into<String>,
        teams_table: impl Into<String>,
        users_table: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            account_key: account_key.into(),
            teams_table: teams_table.into(),
            users_table: users_table.into(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }

    /// Sets the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets a custom endpoint URL.
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Load settings from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_ACCOUNT_NAME` - Storage account name (required)
    /// - `TABLE_ACCOUNT_KEY` - Storage account key (required)
    /// - `TABLE_COLLECTION_TEAMS` - Teams table name (required)
    /// - `TABLE_COLLECTION_USERS` - Users table name (required)
    /// - `AWS_REGION` - Region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - Custom endpoint URL (optional)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| RepositoryError::Configuration(format!("{name} is not set")))
        };

        let mut settings = Self::new(
            required(ACCOUNT_NAME_VAR)?,
            required(ACCOUNT_KEY_VAR)?,
            required(TEAMS_TABLE_VAR)?,
            required(USERS_TABLE_VAR)?,
        );

        if let Some(region) = lookup(REGION_VAR).filter(|v| !v.trim().is_empty()) {
            settings.region = region;
        }
        settings.endpoint_url = lookup(ENDPOINT_URL_VAR).filter(|v| !v.trim().is_empty());

        Ok(settings)
    }

    /// Checks that every required value is present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            (ACCOUNT_NAME_VAR, &self.account_name),
            (ACCOUNT_KEY_VAR, &self.account_key),
            (TEAMS_TABLE_VAR, &self.teams_table),
            (USERS_TABLE_VAR, &self.users_table),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(RepositoryError::Configuration(format!(
                "{name} is not set"
            ))),
            None => Ok(()),
        }
    }
}

// The account key stays out of logs.
impl fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSettings")
            .field("account_name", &self.account_name)
            .field("account_key", &"<redacted>")
            .field("teams_table", &self.teams_table)
            .field("users_table", &self.users_table)
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn required_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            (ACCOUNT_NAME_VAR, "icebreakerstore"),
            (ACCOUNT_KEY_VAR, "c2VjcmV0"),
            (TEAMS_TABLE_VAR, "teams"),
            (USERS_TABLE_VAR, "users"),
        ]
    }

    #[test]
    fn test_from_lookup_reads_required_values() {
        let settings = StoreSettings::from_lookup(lookup_from(&required_vars())).unwrap();

        assert_eq!(settings.account_name, "icebreakerstore");
        assert_eq!(settings.account_key, "c2VjcmV0");
        assert_eq!(settings.teams_table, "teams");
        assert_eq!(settings.users_table, "users");
        assert_eq!(settings.region, "us-east-1");
        assert_eq!(settings.endpoint_url, None);
    }

    #[test]
    fn test_from_lookup_optional_values() {
        let mut vars = required_vars();
        vars.push((REGION_VAR, "eu-west-1"));
        vars.push((ENDPOINT_URL_VAR, "http://localhost:8000"));

        let settings = StoreSettings::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(settings.region, "eu-west-1");
        assert_eq!(
            settings.endpoint_url.as_deref(),
            Some("http://localhost:8000")
        );
    }

    #[test]
    fn test_from_lookup_missing_value() {
        let vars: Vec<_> = required_vars()
            .into_iter()
            .filter(|(name, _)| *name != USERS_TABLE_VAR)
            .collect();

        let result = StoreSettings::from_lookup(lookup_from(&vars));

        assert_eq!(
            result,
            Err(RepositoryError::Configuration(
                "TABLE_COLLECTION_USERS is not set".to_string()
            ))
        );
    }

    #[test]
    fn test_from_lookup_blank_value() {
        let mut vars = required_vars();
        vars[1] = (ACCOUNT_KEY_VAR, "  ");

        let result = StoreSettings::from_lookup(lookup_from(&vars));

        assert!(matches!(result, Err(RepositoryError::Configuration(_))));
    }

    #[test]
    fn test_validate() {
        assert!(StoreSettings::new("a", "k", "teams", "users")
            .validate()
            .is_ok());
        assert!(StoreSettings::new("a", "k", "", "users").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_account_key() {
        let settings = StoreSettings::new("a", "super-secret", "teams", "users");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
