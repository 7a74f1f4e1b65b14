//! Error handling utilities for MCP server

use planout_core::{ErrorKind, PlannerError};
use rmcp::ErrorData;

/// Converts a planner error into an MCP error, keeping the not-found and
/// bad-request distinction.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error.kind() {
        ErrorKind::NotFound => ErrorData::resource_not_found(text, None),
        ErrorKind::BadRequest => ErrorData::invalid_params(text, None),
        ErrorKind::Internal => ErrorData::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_error_codes_follow_kind() {
        let missing = to_mcp_error("Failed", &PlannerError::PlanNotFound { id: 3 });
        assert_eq!(missing.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert!(missing.message.contains("Plan with ID 3 not found"));

        let invalid = to_mcp_error(
            "Failed",
            &PlannerError::InvalidStatus {
                value: "NOPE".into(),
            },
        );
        assert_eq!(invalid.code, ErrorCode::INVALID_PARAMS);
    }
}
