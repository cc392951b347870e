//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `icebreaker_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use icebreaker_core::storage::RepositoryError;

/// Service errors shared by several DynamoDB operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServiceFailure {
    TableNotFound,
    ThroughputExceeded,
    RequestLimitExceeded,
    TransactionConflict,
    InternalServerError,
}

impl ServiceFailure {
    fn message(self) -> &'static str {
        match self {
            ServiceFailure::TableNotFound => "Table not found",
            ServiceFailure::ThroughputExceeded => "Throughput exceeded, please retry",
            ServiceFailure::RequestLimitExceeded => "Request limit exceeded, please retry",
            ServiceFailure::TransactionConflict => "Transaction conflict, please retry",
            ServiceFailure::InternalServerError => "DynamoDB internal server error",
        }
    }
}

impl From<ServiceFailure> for RepositoryError {
    fn from(failure: ServiceFailure) -> Self {
        RepositoryError::QueryFailed(failure.message().to_string())
    }
}

/// Map a CreateTable SDK error to RepositoryError.
///
/// `ResourceInUseException` is not an error for callers creating a table
/// idempotently; it is handled before reaching this function.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
) -> RepositoryError {
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            RepositoryError::ConnectionFailed(format!("CreateTable failed: {:?}", err))
        }
        err => match err.into_service_error() {
            CreateTableError::LimitExceededException(_) => {
                RepositoryError::QueryFailed("Table limit exceeded".to_string())
            }
            CreateTableError::InternalServerError(_) => {
                ServiceFailure::InternalServerError.into()
            }
            err => RepositoryError::QueryFailed(format!("CreateTable failed: {:?}", err)),
        },
    }
}

/// Map a DescribeTable SDK error to RepositoryError.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => {
            ServiceFailure::TableNotFound.into()
        }
        DescribeTableError::InternalServerError(_) => {
            ServiceFailure::InternalServerError.into()
        }
        err => RepositoryError::QueryFailed(format!("DescribeTable failed: {:?}", err)),
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => {
            ServiceFailure::TableNotFound.into()
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            ServiceFailure::ThroughputExceeded.into()
        }
        QueryError::RequestLimitExceeded(_) => {
            ServiceFailure::RequestLimitExceeded.into()
        }
        QueryError::InternalServerError(_) => {
            ServiceFailure::InternalServerError.into()
        }
        err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to RepositoryError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            ServiceFailure::TableNotFound.into()
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            ServiceFailure::ThroughputExceeded.into()
        }
        ScanError::RequestLimitExceeded(_) => {
            ServiceFailure::RequestLimitExceeded.into()
        }
        ScanError::InternalServerError(_) => {
            ServiceFailure::InternalServerError.into()
        }
        err => RepositoryError::QueryFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => {
            ServiceFailure::TableNotFound.into()
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            ServiceFailure::ThroughputExceeded.into()
        }
        PutItemError::RequestLimitExceeded(_) => {
            ServiceFailure::RequestLimitExceeded.into()
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            ServiceFailure::TransactionConflict.into()
        }
        PutItemError::InternalServerError(_) => {
            ServiceFailure::InternalServerError.into()
        }
        err => RepositoryError::QueryFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table: &str,
    id: impl Into<String>,
) -> RepositoryError {
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => RepositoryError::NotFound {
            table: table.to_string(),
            id: id.into(),
        },
        DeleteItemError::ResourceNotFoundException(_) => {
            ServiceFailure::TableNotFound.into()
        }
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            ServiceFailure::ThroughputExceeded.into()
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            ServiceFailure::RequestLimitExceeded.into()
        }
        DeleteItemError::TransactionConflictException(_) => {
            ServiceFailure::TransactionConflict.into()
        }
        DeleteItemError::InternalServerError(_) => {
            ServiceFailure::InternalServerError.into()
        }
        err => RepositoryError::QueryFailed(format!("DeleteItem failed: {:?}", err)),
    }
}

/// Map a request builder error to RepositoryError.
pub fn map_build_error(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::InvalidData(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::error::{
        ConditionalCheckFailedException, RequestLimitExceeded, ResourceNotFoundException,
    };

    #[test]
    fn test_service_failure_messages() {
        assert_eq!(
            RepositoryError::from(ServiceFailure::ThroughputExceeded),
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        );
        assert_eq!(
            RepositoryError::from(ServiceFailure::InternalServerError),
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        );
    }

    #[test]
    fn test_map_query_error_table_not_found() {
        let err = SdkError::service_error(
            QueryError::ResourceNotFoundException(ResourceNotFoundException::builder().build()),
            (),
        );
        assert_eq!(
            map_query_error(err),
            RepositoryError::QueryFailed("Table not found".to_string())
        );
    }

    #[test]
    fn test_map_scan_error_request_limit() {
        let err = SdkError::service_error(
            ScanError::RequestLimitExceeded(RequestLimitExceeded::builder().build()),
            (),
        );
        assert_eq!(
            map_scan_error(err),
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        );
    }

    #[test]
    fn test_map_delete_item_error_condition_failed_is_not_found() {
        let err = SdkError::service_error(
            DeleteItemError::ConditionalCheckFailedException(
                ConditionalCheckFailedException::builder().build(),
            ),
            (),
        );
        assert_eq!(
            map_delete_item_error(err, "teams", "team-1"),
            RepositoryError::NotFound {
                table: "teams".to_string(),
                id: "team-1".to_string(),
            }
        );
    }
}
