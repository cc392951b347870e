//! Conversions between record types and stored rows.
//!
//! Pure functions, testable without a backing store.

use serde_json::Value;

use super::{EntityKey, RepositoryError, Result, TableEntity};

/// Property bag of a stored row, keyed by serialized property name.
pub type Properties = serde_json::Map<String, Value>;

/// A row as held by a table store: its key plus scalar properties.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    pub key: EntityKey,
    pub properties: Properties,
}

impl StoredRow {
    pub fn new(key: EntityKey, properties: Properties) -> Self {
        Self { key, properties }
    }
}

/// Convert a record into a row keyed by its natural id.
///
/// The id property is dropped from the property bag; it is carried by the key.
pub fn entity_to_row<T: TableEntity>(entity: &T) -> Result<StoredRow> {
    let value = serde_json::to_value(entity)
        .map_err(|e| RepositoryError::Serialization(format!("{}: {}", T::ENTITY_TYPE, e)))?;

    let Value::Object(mut properties) = value else {
        return Err(RepositoryError::Serialization(format!(
            "{} did not serialize to an object",
            T::ENTITY_TYPE
        )));
    };

    properties.remove(T::ID_PROPERTY);

    if let Some((name, _)) = properties
        .iter()
        .find(|(_, v)| matches!(v, Value::Array(_) | Value::Object(_)))
    {
        return Err(RepositoryError::InvalidData(format!(
            "{}.{} is not a scalar property",
            T::ENTITY_TYPE,
            name
        )));
    }

    Ok(StoredRow::new(entity.key(), properties))
}

/// Convert a stored row back into a record, restoring the id from the
/// partition key.
pub fn row_to_entity<T: TableEntity>(row: StoredRow) -> Result<T> {
    let StoredRow {
        key,
        mut properties,
    } = row;

    properties.insert(
        T::ID_PROPERTY.to_string(),
        Value::String(key.partition_key),
    );

    serde_json::from_value(Value::Object(properties))
        .map_err(|e| RepositoryError::Serialization(format!("{}: {}", T::ENTITY_TYPE, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::{TeamInstallInfo, UserInfo};
    use serde::{Deserialize, Serialize};

    fn sample_team() -> TeamInstallInfo {
        TeamInstallInfo::new("team-1", "tenant-1", "https://smba.example", "Ada")
    }

    #[test]
    fn test_team_row_has_keys_and_no_id_property() {
        let row = entity_to_row(&sample_team()).unwrap();

        assert_eq!(row.key, EntityKey::for_id("team-1"));
        assert!(!row.properties.contains_key("teamId"));
        assert_eq!(row.properties["tenantId"], "tenant-1");
        assert_eq!(row.properties["serviceUrl"], "https://smba.example");
        assert_eq!(row.properties["installerName"], "Ada");
    }

    #[test]
    fn test_team_restored_from_row() {
        let row = entity_to_row(&sample_team()).unwrap();
        let team: TeamInstallInfo = row_to_entity(row).unwrap();
        assert_eq!(team, sample_team());
    }

    #[test]
    fn test_user_id_restored_from_partition_key() {
        let mut properties = Properties::new();
        properties.insert("tenantId".into(), "tenant-1".into());
        properties.insert("optedIn".into(), false.into());
        properties.insert("serviceUrl".into(), "https://smba.example".into());

        let user: UserInfo =
            row_to_entity(StoredRow::new(EntityKey::for_id("u1"), properties)).unwrap();

        assert_eq!(user.user_id, "u1");
        assert!(!user.opted_in);
    }

    #[test]
    fn test_missing_property_is_serialization_error() {
        let row = StoredRow::new(EntityKey::for_id("u1"), Properties::new());
        let result = row_to_entity::<UserInfo>(row);
        assert!(matches!(result, Err(RepositoryError::Serialization(_))));
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Tagged {
        tag_id: String,
        labels: Vec<String>,
    }

    impl TableEntity for Tagged {
        const ENTITY_TYPE: &'static str = "Tagged";
        const ID_PROPERTY: &'static str = "tagId";

        fn natural_id(&self) -> &str {
            &self.tag_id
        }
    }

    #[test]
    fn test_nested_property_is_rejected() {
        let tagged = Tagged {
            tag_id: "t1".into(),
            labels: vec!["a".into()],
        };
        let result = entity_to_row(&tagged);
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }
}
