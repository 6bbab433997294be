// Helper functions shared across GraphQL query/mutation modules.

use async_graphql::{Context, ErrorExtensions, ID, MaybeUndefined, Value};

use crate::error::ApiError;

/// Parse a GraphQL `ID` into a book primary key
pub(crate) fn parse_book_id(id: &ID) -> Result<i64, ApiError> {
    id.parse::<i64>()
        .map_err(|_| ApiError::validation(format!("Invalid book ID: {}", id.as_str())))
}

/// Reject blank values for fields that can never be empty
pub(crate) fn required_text(field: &str, value: String) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{} must not be empty", field)));
    }
    Ok(value)
}

/// Treat an argument bound to a variable the client never sent as omitted.
///
/// async-graphql resolves such variables to `null`, which would clear a
/// nullable field instead of leaving it untouched.
pub(crate) fn omit_unsent<T>(
    ctx: &Context<'_>,
    argument: &str,
    value: MaybeUndefined<T>,
) -> MaybeUndefined<T> {
    let Some(arg) = ctx.item.node.get_argument(argument) else {
        return value;
    };

    let env = ctx.query_env;
    let sent = arg
        .node
        .clone()
        .into_const_with(|name| {
            let has_default = env
                .operation
                .node
                .variable_definitions
                .iter()
                .any(|def| def.node.name.node == name && def.node.default_value.is_some());
            if has_default || env.variables.contains_key(name.as_str()) {
                Ok(Value::Null)
            } else {
                Err(())
            }
        })
        .is_ok();

    if sent { value } else { MaybeUndefined::Undefined }
}

/// Presence rule for non-nullable fields: omitted or `null` keeps the stored
/// value, a non-blank value replaces it.
pub(crate) fn text_change(
    field: &str,
    value: MaybeUndefined<String>,
) -> Result<Option<String>, ApiError> {
    match value {
        MaybeUndefined::Undefined | MaybeUndefined::Null => Ok(None),
        MaybeUndefined::Value(v) => required_text(field, v).map(Some),
    }
}

/// Presence rule for nullable fields: omitted keeps, `null` clears, a value replaces.
pub(crate) fn nullable_change<T>(value: MaybeUndefined<T>) -> Option<Option<T>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(v) => Some(Some(v)),
    }
}

/// Log a storage failure and turn it into a GraphQL error
pub(crate) fn storage_error(operation: &str, e: anyhow::Error) -> async_graphql::Error {
    tracing::error!(operation = operation, error = %format!("{:#}", e), "Storage operation failed");
    ApiError::Storage(e).extend()
}

/// Turn a validation failure into a GraphQL error
pub(crate) fn validation_error(e: ApiError) -> async_graphql::Error {
    tracing::debug!(error = %e, "Rejected request");
    e.extend()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_parse_book_id() {
        assert_eq!(parse_book_id(&ID::from("42")).unwrap(), 42);
        assert_matches!(parse_book_id(&ID::from("abc")), Err(ApiError::Validation(_)));
        assert_matches!(parse_book_id(&ID::from("")), Err(ApiError::Validation(_)));
        assert_matches!(parse_book_id(&ID::from("4.2")), Err(ApiError::Validation(_)));
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("title", "Dune".to_string()).unwrap(), "Dune");
        assert_matches!(
            required_text("title", "   ".to_string()),
            Err(ApiError::Validation(msg)) if msg == "title must not be empty"
        );
    }

    #[test]
    fn test_text_change() {
        assert_eq!(text_change("author", MaybeUndefined::Undefined).unwrap(), None);
        assert_eq!(
            text_change("author", MaybeUndefined::Value("Le Guin".to_string())).unwrap(),
            Some("Le Guin".to_string())
        );
        assert_eq!(text_change("author", MaybeUndefined::Null).unwrap(), None);
        assert_matches!(
            text_change("author", MaybeUndefined::Value(String::new())),
            Err(ApiError::Validation(_))
        );
    }

    #[test]
    fn test_nullable_change() {
        assert_eq!(nullable_change::<i32>(MaybeUndefined::Undefined), None);
        assert_eq!(nullable_change::<i32>(MaybeUndefined::Null), Some(None));
        assert_eq!(nullable_change(MaybeUndefined::Value(1950)), Some(Some(1950)));
    }
}
