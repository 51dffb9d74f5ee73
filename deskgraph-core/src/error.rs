//! Error types for Deskgraph operations

use crate::ResourceKind;
use thiserror::Error;

/// Upstream access client errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("upstream request {op} failed{}: {message}", status.map(|s| format!(" with status {}", s)).unwrap_or_default())]
    Transport {
        op: &'static str,
        status: Option<u16>,
        message: String,
    },

    #[error("next-page URL {url} carries no page parameter")]
    MalformedCursor { url: String },

    #[error("invalid response body for {op}: {message}")]
    InvalidResponse { op: &'static str, message: String },
}

/// Master error type for connector operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    #[error("principal must be a {expected} resource, got {actual}")]
    InvalidPrincipalType {
        expected: ResourceKind,
        actual: ResourceKind,
    },

    #[error("user {user_id} has role {role} and is not a team member")]
    NotATeamMember { user_id: String, role: String },

    #[error("expected a numeric identifier, got {value}")]
    IdentifierParse { value: String },

    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display_with_status() {
        let err = ClientError::Transport {
            op: "list_groups",
            status: Some(503),
            message: "service unavailable".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("list_groups"));
        assert!(msg.contains("503"));
        assert!(msg.contains("service unavailable"));
    }

    #[test]
    fn test_transport_error_display_without_status() {
        let err = ClientError::Transport {
            op: "list_users",
            status: None,
            message: "connection reset".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("list_users"));
        assert!(!msg.contains("status"));
    }

    #[test]
    fn test_malformed_cursor_display() {
        let err = ClientError::MalformedCursor {
            url: "https://acme.zendesk.com/api/v2/users.json?per_page=100".to_string(),
        };
        assert!(format!("{}", err).contains("no page parameter"));
    }

    #[test]
    fn test_invalid_principal_type_display() {
        let err = ConnectorError::InvalidPrincipalType {
            expected: ResourceKind::TeamMember,
            actual: ResourceKind::User,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("team_member"));
        assert!(msg.contains("user"));
    }

    #[test]
    fn test_not_a_team_member_display() {
        let err = ConnectorError::NotATeamMember {
            user_id: "1234".to_string(),
            role: "end-user".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("1234"));
        assert!(msg.contains("end-user"));
    }

    #[test]
    fn test_connector_error_from_client_error() {
        let err = ConnectorError::from(ClientError::MalformedCursor {
            url: "https://example.invalid".to_string(),
        });
        assert!(matches!(err, ConnectorError::Client(_)));
    }
}
