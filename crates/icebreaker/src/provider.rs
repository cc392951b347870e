//! Team installation and user opt-in records on top of a table store.
//!
//! [`BotDataProvider`] connects lazily: the first operation reads the store
//! settings, opens the connection and creates both tables. Concurrent first
//! callers share that single attempt, and its outcome (success or failure) is
//! kept for the lifetime of the provider.
//!
//! Failure policy per operation:
//!
//! - writes (`set_team_install_status`, `set_user_info`) return store errors
//! - reads (`get_installed_teams`, `get_installed_team`, `get_user_info`) log
//!   store errors and return an empty result
//!
//! Initialization errors are returned by every operation.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info};

use icebreaker_core::bot::{TeamInstallInfo, UserInfo};
use icebreaker_core::storage::{
    entity_to_row, row_to_entity, Result, TableEntity, TableStore,
};

use crate::config::StoreSettings;
use crate::storage::{query_single_entity, StoreConnector};

/// Where the provider takes its store settings from at initialization.
#[derive(Debug, Clone)]
pub enum SettingsSource {
    /// Read from process environment variables, see [`StoreSettings::from_env`].
    Environment,
    /// Use the given settings.
    Fixed(StoreSettings),
}

impl SettingsSource {
    fn load(&self) -> Result<StoreSettings> {
        match self {
            SettingsSource::Environment => StoreSettings::from_env(),
            SettingsSource::Fixed(settings) => {
                settings.validate()?;
                Ok(settings.clone())
            }
        }
    }
}

/// Connected store plus the names of the two tables.
struct DataStore {
    store: Arc<dyn TableStore>,
    teams_table: String,
    users_table: String,
}

/// Data provider for the bot's team and user records.
pub struct BotDataProvider {
    connector: Arc<dyn StoreConnector>,
    settings: SettingsSource,
    data_store: OnceCell<Result<DataStore>>,
}

impl BotDataProvider {
    /// Creates a provider that reads its settings from the environment on
    /// first use.
    pub fn new(connector: Arc<dyn StoreConnector>) -> Self {
        Self::with_source(connector, SettingsSource::Environment)
    }

    /// Creates a provider with fixed settings.
    pub fn with_settings(connector: Arc<dyn StoreConnector>, settings: StoreSettings) -> Self {
        Self::with_source(connector, SettingsSource::Fixed(settings))
    }

    /// Creates a provider that loads its settings from `settings` on first use.
    pub fn with_source(connector: Arc<dyn StoreConnector>, settings: SettingsSource) -> Self {
        Self {
            connector,
            settings,
            data_store: OnceCell::new(),
        }
    }

    /// Updates team installation status in store. If the bot is installed the
    /// record is saved, otherwise the record for the team is deleted.
    pub async fn set_team_install_status(
        &self,
        team: &TeamInstallInfo,
        installed: bool,
    ) -> Result<()> {
        let data_store = self.ensure_ready().await?;

        if installed {
            data_store
                .store
                .upsert(&data_store.teams_table, entity_to_row(team)?)
                .await
        } else {
            data_store
                .store
                .delete(&data_store.teams_table, &team.key())
                .await
        }
    }

    /// Returns every team the bot is installed to, in no particular order.
    ///
    /// A failed query is logged and reported as no teams.
    pub async fn get_installed_teams(&self) -> Result<Vec<TeamInstallInfo>> {
        let data_store = self.ensure_ready().await?;
        Ok(or_default(
            "list installed teams",
            fetch_all::<TeamInstallInfo>(data_store.store.as_ref(), &data_store.teams_table).await,
        ))
    }

    /// Returns the team with the given id, if the lookup finds one.
    ///
    /// A failed lookup is logged and reported as `None`.
    pub async fn get_installed_team(&self, team_id: &str) -> Result<Option<TeamInstallInfo>> {
        let data_store = self.ensure_ready().await?;
        Ok(or_default(
            "get installed team",
            query_single_entity(
                data_store.store.as_ref(),
                &data_store.teams_table,
                team_id,
            )
            .await,
        ))
    }

    /// Returns the stored information about the given user, if the lookup
    /// finds any.
    ///
    /// A failed lookup is logged and reported as `None`.
    pub async fn get_user_info(&self, user_id: &str) -> Result<Option<UserInfo>> {
        let data_store = self.ensure_ready().await?;
        Ok(or_default(
            "get user info",
            query_single_entity(
                data_store.store.as_ref(),
                &data_store.users_table,
                user_id,
            )
            .await,
        ))
    }

    /// Stores the user info, replacing any previous record for the user.
    pub async fn set_user_info(
        &self,
        tenant_id: &str,
        user_id: &str,
        opted_in: bool,
        service_url: &str,
    ) -> Result<()> {
        let data_store = self.ensure_ready().await?;

        let user_info = UserInfo::new(tenant_id, user_id, opted_in, service_url);
        data_store
            .store
            .upsert(&data_store.users_table, entity_to_row(&user_info)?)
            .await
    }

    async fn ensure_ready(&self) -> Result<&DataStore> {
        self.data_store
            .get_or_init(|| self.initialize())
            .await
            .as_ref()
            .map_err(Clone::clone)
    }

    async fn initialize(&self) -> Result<DataStore> {
        info!("Initializing data store");

        let settings = self.settings.load()?;
        let store = self.connector.connect(&settings).await?;

        store
            .create_table_if_not_exists(&settings.teams_table)
            .await?;
        store
            .create_table_if_not_exists(&settings.users_table)
            .await?;

        info!(
            teams_table = %settings.teams_table,
            users_table = %settings.users_table,
            "Data store initialized"
        );

        Ok(DataStore {
            store,
            teams_table: settings.teams_table,
            users_table: settings.users_table,
        })
    }
}

async fn fetch_all<T: TableEntity>(store: &dyn TableStore, table: &str) -> Result<Vec<T>> {
    store
        .scan(table)
        .await?
        .into_iter()
        .map(row_to_entity)
        .collect()
}

fn or_default<T: Default>(operation: &'static str, result: Result<T>) -> T {
    result.unwrap_or_else(|err| {
        error!(error = %err, operation, "Data store query failed");
        T::default()
    })
}
