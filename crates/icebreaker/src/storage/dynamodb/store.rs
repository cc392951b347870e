//! DynamoDB table store implementation.
//!
//! Implements `TableStore` from `icebreaker_core::storage` using DynamoDB.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;

use icebreaker_core::storage::{
    ContinuationToken, EntityKey, QuerySegment, RepositoryError, Result, RowFilter, StoredRow,
    TableStore,
};

use super::conversions::{
    item_to_row, key_to_item, last_evaluated_key_to_token, row_to_item,
    token_to_exclusive_start_key, PARTITION_KEY_ATTR, ROW_KEY_ATTR,
};
use super::error::{
    map_build_error, map_create_table_error, map_delete_item_error, map_describe_table_error,
    map_put_item_error, map_query_error, map_scan_error,
};

const TABLE_ACTIVE_MAX_ATTEMPTS: u32 = 60;
const TABLE_ACTIVE_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// DynamoDB-based table store.
#[derive(Debug, Clone)]
pub struct DynamoDbTableStore {
    client: Client,
}

impl DynamoDbTableStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn wait_for_table_active(&self, table: &str) -> Result<()> {
        for _ in 0..TABLE_ACTIVE_MAX_ATTEMPTS {
            let response = self
                .client
                .describe_table()
                .table_name(table)
                .send()
                .await
                .map_err(map_describe_table_error)?;

            let status = response.table().and_then(|t| t.table_status());
            if status == Some(&TableStatus::Active) {
                return Ok(());
            }
            tokio::time::sleep(TABLE_ACTIVE_POLL_INTERVAL).await;
        }

        Err(RepositoryError::ConnectionFailed(format!(
            "Timeout waiting for table '{}' to become active",
            table
        )))
    }
}

#[async_trait]
impl TableStore for DynamoDbTableStore {
    async fn create_table_if_not_exists(&self, table: &str) -> Result<bool> {
        let key_schema = vec![
            KeySchemaElement::builder()
                .attribute_name(PARTITION_KEY_ATTR)
                .key_type(KeyType::Hash)
                .build()
                .map_err(map_build_error)?,
            KeySchemaElement::builder()
                .attribute_name(ROW_KEY_ATTR)
                .key_type(KeyType::Range)
                .build()
                .map_err(map_build_error)?,
        ];

        let attribute_definitions = vec![
            AttributeDefinition::builder()
                .attribute_name(PARTITION_KEY_ATTR)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(map_build_error)?,
            AttributeDefinition::builder()
                .attribute_name(ROW_KEY_ATTR)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(map_build_error)?,
        ];

        let result = self
            .client
            .create_table()
            .table_name(table)
            .set_key_schema(Some(key_schema))
            .set_attribute_definitions(Some(attribute_definitions))
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await;

        match result {
            Ok(_) => {
                self.wait_for_table_active(table).await?;
                Ok(true)
            }
            Err(err)
                if matches!(
                    err.as_service_error(),
                    Some(CreateTableError::ResourceInUseException(_))
                ) =>
            {
                Ok(false)
            }
            Err(err) => Err(map_create_table_error(err)),
        }
    }

    async fn upsert(&self, table: &str, row: StoredRow) -> Result<()> {
        let item = row_to_item(&row)?;

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn delete(&self, table: &str, key: &EntityKey) -> Result<()> {
        self.client
            .delete_item()
            .table_name(table)
            .set_key(Some(key_to_item(key)))
            .condition_expression("attribute_exists(PK)")
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, table, key.partition_key.clone()))?;

        Ok(())
    }

    async fn scan(&self, table: &str) -> Result<Vec<StoredRow>> {
        let mut rows = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let result = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(map_scan_error)?;

            for item in result.items.unwrap_or_default() {
                rows.push(item_to_row(item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => return Ok(rows),
            }
        }
    }

    async fn query_segment(
        &self,
        table: &str,
        filter: &RowFilter,
        continuation: Option<ContinuationToken>,
    ) -> Result<QuerySegment> {
        let exclusive_start_key = continuation
            .as_ref()
            .map(token_to_exclusive_start_key)
            .transpose()?;

        let key_condition = format!(
            "{} = :pk AND {} {} :sk",
            PARTITION_KEY_ATTR,
            ROW_KEY_ATTR,
            filter.row_comparison.operator()
        );

        let result = self
            .client
            .query()
            .table_name(table)
            .key_condition_expression(key_condition)
            .expression_attribute_values(":pk", AttributeValue::S(filter.partition_key.clone()))
            .expression_attribute_values(":sk", AttributeValue::S(filter.row_key.clone()))
            .set_limit(filter.take.map(|take| take.min(i32::MAX as usize) as i32))
            .set_exclusive_start_key(exclusive_start_key)
            .send()
            .await
            .map_err(map_query_error)?;

        let rows = result
            .items
            .unwrap_or_default()
            .into_iter()
            .map(item_to_row)
            .collect::<Result<Vec<_>>>()?;

        let continuation = match result.last_evaluated_key {
            Some(key) if !key.is_empty() => Some(last_evaluated_key_to_token(key)?),
            _ => None,
        };

        Ok(QuerySegment { rows, continuation })
    }
}
