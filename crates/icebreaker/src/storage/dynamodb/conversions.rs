//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! stored rows. Testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use icebreaker_core::storage::{
    ContinuationToken, EntityKey, Properties, RepositoryError, Result, StoredRow,
};
use serde_json::{Number, Value};

pub const PARTITION_KEY_ATTR: &str = "PK";
pub const ROW_KEY_ATTR: &str = "SK";

pub type Item = HashMap<String, AttributeValue>;

/// Convert a stored row to a DynamoDB item.
pub fn row_to_item(row: &StoredRow) -> Result<Item> {
    let mut item = key_to_item(&row.key);

    for (name, value) in &row.properties {
        if name == PARTITION_KEY_ATTR || name == ROW_KEY_ATTR {
            return Err(RepositoryError::InvalidData(format!(
                "Property name '{}' is reserved for keys",
                name
            )));
        }
        item.insert(name.clone(), value_to_attribute(name, value)?);
    }

    Ok(item)
}

/// Convert a DynamoDB item to a stored row.
pub fn item_to_row(mut item: Item) -> Result<StoredRow> {
    let partition_key = take_string(&mut item, PARTITION_KEY_ATTR)?;
    let row_key = take_string(&mut item, ROW_KEY_ATTR)?;

    let mut properties = Properties::new();
    for (name, attribute) in item {
        let value = attribute_to_value(&name, attribute)?;
        properties.insert(name, value);
    }

    Ok(StoredRow::new(
        EntityKey::new(partition_key, row_key),
        properties,
    ))
}

/// Key attributes addressing a single item.
pub fn key_to_item(key: &EntityKey) -> Item {
    let mut item = HashMap::new();
    item.insert(
        PARTITION_KEY_ATTR.to_string(),
        AttributeValue::S(key.partition_key.clone()),
    );
    item.insert(
        ROW_KEY_ATTR.to_string(),
        AttributeValue::S(key.row_key.clone()),
    );
    item
}

/// Encode a `LastEvaluatedKey` as an opaque continuation token.
pub fn last_evaluated_key_to_token(key: Item) -> Result<ContinuationToken> {
    let row = item_to_row(key)?;
    serde_json::to_string(&row.key)
        .map(ContinuationToken::new)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Decode a continuation token into an `ExclusiveStartKey`.
pub fn token_to_exclusive_start_key(token: &ContinuationToken) -> Result<Item> {
    let key: EntityKey = serde_json::from_str(token.as_str())
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid continuation token: {e}")))?;
    Ok(key_to_item(&key))
}

fn value_to_attribute(name: &str, value: &Value) -> Result<AttributeValue> {
    match value {
        Value::String(s) => Ok(AttributeValue::S(s.clone())),
        Value::Bool(b) => Ok(AttributeValue::Bool(*b)),
        Value::Number(n) => Ok(AttributeValue::N(n.to_string())),
        Value::Null => Ok(AttributeValue::Null(true)),
        Value::Array(_) | Value::Object(_) => Err(RepositoryError::InvalidData(format!(
            "Property '{}' is not a scalar",
            name
        ))),
    }
}

fn attribute_to_value(name: &str, attribute: AttributeValue) -> Result<Value> {
    match attribute {
        AttributeValue::S(s) => Ok(Value::String(s)),
        AttributeValue::Bool(b) => Ok(Value::Bool(b)),
        AttributeValue::N(n) => parse_number(&n)
            .map(Value::Number)
            .ok_or_else(|| {
                RepositoryError::InvalidData(format!("Property '{}' is not a number: {}", name, n))
            }),
        AttributeValue::Null(_) => Ok(Value::Null),
        other => Err(RepositoryError::InvalidData(format!(
            "Unsupported attribute type for '{}': {:?}",
            name, other
        ))),
    }
}

fn parse_number(n: &str) -> Option<Number> {
    if let Ok(i) = n.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Some(Number::from(u));
    }
    n.parse::<f64>().ok().and_then(Number::from_f64)
}

fn take_string(item: &mut Item, key: &str) -> Result<String> {
    match item.remove(key) {
        Some(AttributeValue::S(s)) => Ok(s),
        Some(_) => Err(RepositoryError::InvalidData(format!(
            "Attribute '{}' is not a string",
            key
        ))),
        None => Err(RepositoryError::Serialization(format!(
            "Missing attribute: {}",
            key
        ))),
    }
}
