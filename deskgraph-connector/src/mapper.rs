//! Pure mapping from upstream records to canonical resources
//!
//! No network calls and no side effects; every function here builds a
//! [`Resource`] value from one upstream object.

use chrono::{DateTime, NaiveDateTime, Utc};
use deskgraph_client::wire::{CustomRole, Group, Organization, User};
use deskgraph_core::{
    Annotation, GroupTraitData, Resource, ResourceId, ResourceKind, RoleTraitData, TraitData,
    UserStatus, UserTraitData,
};
use serde_json::json;

/// Built-in role strings on upstream user records.
pub const ROLE_END_USER: &str = "end-user";
pub const ROLE_AGENT: &str = "agent";
pub const ROLE_ADMIN: &str = "admin";

/// Upstream timestamps arrive in two formats depending on the field.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S%.6fZ"];

/// Split a full name on the first space only; single-token names leave the
/// last name empty.
pub fn split_full_name(name: &str) -> (String, String) {
    match name.split_once(' ') {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (name.to_string(), String::new()),
    }
}

/// Whether an upstream account counts as a team member.
///
/// Upstream semantics, precedence included: the admin+suspended check binds
/// tighter than the agent check, so a suspended agent still qualifies.
pub fn is_valid_team_member(user: &User) -> bool {
    user.role == ROLE_AGENT || user.role == ROLE_ADMIN && !user.suspended
}

/// Lenient parse of an upstream timestamp. A failure is swallowed; the
/// timestamp is omitted from the resource rather than failing the sync.
pub fn parse_upstream_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    TIMESTAMP_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(raw, fmt)
            .ok()
            .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
    })
}

/// Project an upstream account as a plain `user` resource.
pub fn user_resource(user: &User, parent_id: Option<ResourceId>) -> Resource {
    let (first_name, last_name) = split_full_name(&user.name);
    let status = if user.active {
        UserStatus::Enabled
    } else {
        UserStatus::Disabled
    };

    Resource::new(ResourceKind::User, user.id, user.name.clone())
        .with_parent(parent_id)
        .with_trait_data(TraitData::User(UserTraitData {
            profile: json!({
                "user_id": format!("account:{}", user.id),
                "first_name": first_name,
                "last_name": last_name,
                "login": user.email,
            }),
            email: Some(user.email.clone()),
            login: Some(user.email.clone()),
            status,
            last_login_at: None,
            created_at: None,
        }))
}

/// Project a staff account as a `team_member` resource.
///
/// Callers filter with [`is_valid_team_member`] first; this function only
/// shapes the record.
pub fn team_member_resource(user: &User, parent_id: Option<ResourceId>) -> Resource {
    let (first_name, last_name) = split_full_name(&user.name);
    let status = if !user.active || user.suspended {
        UserStatus::Disabled
    } else {
        UserStatus::Enabled
    };

    // Accounts created through ticket intake may have no display name.
    let display_name = if user.name.is_empty() {
        user.email.clone()
    } else {
        user.name.clone()
    };

    let last_login_at = user
        .last_login_at
        .as_deref()
        .and_then(parse_upstream_timestamp);
    let created_at = user.created_at.as_deref().and_then(parse_upstream_timestamp);

    Resource::new(ResourceKind::TeamMember, user.id, display_name)
        .with_parent(parent_id)
        .with_annotation(Annotation::V1Identifier(format!("team:{}", user.id)))
        .with_trait_data(TraitData::User(UserTraitData {
            profile: json!({
                "login": user.email,
                "first_name": first_name,
                "last_name": last_name,
                "email": user.email,
            }),
            email: Some(user.email.clone()),
            login: Some(user.email.clone()),
            status,
            last_login_at,
            created_at,
        }))
}

pub fn group_resource(group: &Group, parent_id: Option<ResourceId>) -> Resource {
    Resource::new(ResourceKind::Group, group.id, group.name.clone())
        .with_parent(parent_id)
        .with_trait_data(TraitData::Group(GroupTraitData {
            profile: json!({
                "group_id": group.id,
                "group_name": group.name,
            }),
        }))
}

pub fn role_resource(role: &CustomRole, parent_id: Option<ResourceId>) -> Resource {
    Resource::new(ResourceKind::Role, role.id, role.name.clone())
        .with_parent(parent_id)
        .with_trait_data(TraitData::Role(RoleTraitData {
            profile: json!({
                "role_id": role.id,
                "role_name": role.name,
            }),
        }))
}

/// Project an organization, declaring which resource kind hangs under it.
pub fn org_resource(
    org: &Organization,
    parent_id: Option<ResourceId>,
    child_kind: ResourceKind,
) -> Resource {
    let mut resource = Resource::new(ResourceKind::Org, org.id, org.name.clone())
        .with_parent(parent_id)
        .with_annotation(Annotation::V1Identifier(format!("org:{}", org.id)))
        .with_annotation(Annotation::ChildResourceKind(child_kind));

    if let Some(url) = &org.url {
        resource = resource.with_annotation(Annotation::ExternalLink { url: url.clone() });
    }

    resource
}

// =============================================================================
// TESTS
// =============================================================================
