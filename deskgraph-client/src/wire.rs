//! Wire types for the Zendesk REST API
//!
//! Field sets mirror the upstream JSON bodies; everything is defaulted so
//! that sparse records (common on older accounts) still deserialize.

use serde::{Deserialize, Serialize};

/// Upstream user account. Both the `user` and `team_member` projections in
/// the graph derive from this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Built-in role string: "end-user", "agent", or "admin".
    pub role: String,
    /// Non-zero when the user holds a custom role.
    pub custom_role_id: i64,
    pub organization_id: i64,
    pub active: bool,
    pub suspended: bool,
    /// Upstream timestamps arrive as strings in two distinct formats; the
    /// mapper parses them leniently.
    pub last_login_at: Option<String>,
    pub created_at: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GroupMembership {
    pub id: i64,
    pub user_id: i64,
    pub group_id: i64,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrganizationMembership {
    pub id: i64,
    pub user_id: i64,
    pub organization_id: i64,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CustomRole {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

// ============================================================================
// LIST ENVELOPES
// ============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub next_page: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GroupsPage {
    pub groups: Vec<Group>,
    pub next_page: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OrganizationsPage {
    pub organizations: Vec<Organization>,
    pub next_page: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GroupMembershipsPage {
    pub group_memberships: Vec<GroupMembership>,
    pub next_page: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OrganizationMembershipsPage {
    pub organization_memberships: Vec<OrganizationMembership>,
    pub next_page: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CustomRolesPage {
    pub custom_roles: Vec<CustomRole>,
}

// ============================================================================
// SINGLE-OBJECT ENVELOPES
// ============================================================================

// Zendesk wraps single objects in a one-key envelope both directions:
// POST {"group_membership": {...}} echoes {"group_membership": {...}}.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEnvelope {
    pub group: Group,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMembershipEnvelope {
    pub group_membership: GroupMembership,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationMembershipEnvelope {
    pub organization_membership: OrganizationMembership,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRoleEnvelope {
    pub custom_role: CustomRole,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_sparse_record() {
        let raw = r#"{"id": 35436, "name": "Johnny Agent", "role": "agent"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id, 35436);
        assert_eq!(user.role, "agent");
        assert_eq!(user.email, "");
        assert!(!user.suspended);
        assert_eq!(user.custom_role_id, 0);
    }

    #[test]
    fn test_users_page_carries_next_page() {
        let raw = r#"{
            "users": [{"id": 1, "name": "A", "email": "a@acme.test", "role": "admin", "active": true}],
            "next_page": "https://acme.zendesk.com/api/v2/users.json?page=2",
            "count": 120
        }"#;
        let page: UsersPage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.users.len(), 1);
        assert_eq!(
            page.next_page.as_deref(),
            Some("https://acme.zendesk.com/api/v2/users.json?page=2")
        );
        assert_eq!(page.count, 120);
    }

    #[test]
    fn test_group_membership_envelope_round_trip() {
        let env = GroupMembershipEnvelope {
            group_membership: GroupMembership {
                id: 4,
                user_id: 29,
                group_id: 12,
                created_at: None,
            },
        };
        let raw = serde_json::to_string(&env).unwrap();
        assert!(raw.starts_with(r#"{"group_membership""#));
        let back: GroupMembershipEnvelope = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.group_membership.user_id, 29);
    }
}
