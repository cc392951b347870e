use std::fmt;

use serde::{Deserialize, Serialize};

use crate::storage::TableEntity;

/// A team the bot is currently installed to.
///
/// The team id doubles as the partition and row key of the stored row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInstallInfo {
    pub team_id: String,
    pub tenant_id: String,
    pub service_url: String,
    /// Name of the person that installed the bot to the team.
    pub installer_name: String,
}

impl TeamInstallInfo {
    /// Creates a new team installation record.
    pub fn new(
        team_id: impl Into<String>,
        tenant_id: impl Into<String>,
        service_url: impl Into<String>,
        installer_name: impl Into<String>,
    ) -> Self {
        Self {
            team_id: team_id.into(),
            tenant_id: tenant_id.into(),
            service_url: service_url.into(),
            installer_name: installer_name.into(),
        }
    }

    /// A record carrying only the team id, enough to address the stored row.
    pub fn key_only(team_id: impl Into<String>) -> Self {
        Self::new(team_id, "", "", "")
    }
}

impl fmt::Display for TeamInstallInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Team - Id = {}, TenantId = {}, ServiceUrl = {}, Installer = {}",
            self.team_id, self.tenant_id, self.service_url, self.installer_name
        )
    }
}

impl TableEntity for TeamInstallInfo {
    const ENTITY_TYPE: &'static str = "TeamInstallInfo";
    const ID_PROPERTY: &'static str = "teamId";

    fn natural_id(&self) -> &str {
        &self.team_id
    }
}

/// Consent and contact state of a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub tenant_id: String,
    pub user_id: String,
    pub opted_in: bool,
    pub service_url: String,
}

impl UserInfo {
    pub fn new(
        tenant_id: impl Into<String>,
        user_id: impl Into<String>,
        opted_in: bool,
        service_url: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            user_id: user_id.into(),
            opted_in,
            service_url: service_url.into(),
        }
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User - Id = {}, TenantId = {}, OptedIn = {}, ServiceUrl = {}",
            self.user_id, self.tenant_id, self.opted_in, self.service_url
        )
    }
}

impl TableEntity for UserInfo {
    const ENTITY_TYPE: &'static str = "UserInfo";
    const ID_PROPERTY: &'static str = "userId";

    fn natural_id(&self) -> &str {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_display() {
        let team = TeamInstallInfo::new("team-1", "tenant-1", "https://smba.example", "Ada");
        assert_eq!(
            team.to_string(),
            "Team - Id = team-1, TenantId = tenant-1, ServiceUrl = https://smba.example, Installer = Ada"
        );
    }

    #[test]
    fn test_team_key_uses_team_id() {
        let team = TeamInstallInfo::new("team-1", "tenant-1", "https://smba.example", "Ada");
        let key = team.key();
        assert_eq!(key.partition_key, "team-1");
        assert_eq!(key.row_key, "team-1");
    }

    #[test]
    fn test_key_only_team() {
        let team = TeamInstallInfo::key_only("team-9");
        assert_eq!(team.natural_id(), "team-9");
        assert!(team.tenant_id.is_empty());
    }

    #[test]
    fn test_user_display() {
        let user = UserInfo::new("tenant-1", "u1", false, "https://smba.example");
        assert_eq!(
            user.to_string(),
            "User - Id = u1, TenantId = tenant-1, OptedIn = false, ServiceUrl = https://smba.example"
        );
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = UserInfo::new("tenant-1", "u1", true, "https://smba.example");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["tenantId"], "tenant-1");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["optedIn"], true);
        assert_eq!(json["serviceUrl"], "https://smba.example");
    }
}
