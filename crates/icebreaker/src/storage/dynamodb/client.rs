//! AWS SDK client setup.

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::Client;
use icebreaker_core::storage::{Result, TableStore};

use super::DynamoDbTableStore;
use crate::config::StoreSettings;
use crate::storage::StoreConnector;

const CREDENTIALS_PROVIDER_NAME: &str = "icebreaker";

/// Creates a DynamoDB client authenticated with the account name and key.
pub async fn create_client(settings: &StoreSettings) -> Client {
    let credentials = Credentials::new(
        &settings.account_name,
        &settings.account_key,
        None,
        None,
        CREDENTIALS_PROVIDER_NAME,
    );

    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.region.clone()))
        .credentials_provider(credentials);

    if let Some(endpoint) = &settings.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}

/// Connects to DynamoDB using the settings passed at initialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamoDbConnector;

#[async_trait]
impl StoreConnector for DynamoDbConnector {
    async fn connect(&self, settings: &StoreSettings) -> Result<Arc<dyn TableStore>> {
        let target = match &settings.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", settings.region),
        };
        tracing::debug!(%target, "Connecting to table store");

        let client = create_client(settings).await;
        Ok(Arc::new(DynamoDbTableStore::new(client)))
    }
}
