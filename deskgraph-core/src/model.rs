//! Resource, entitlement, and grant structures for the access graph

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// RESOURCE KINDS
// ============================================================================

/// Resource kind discriminator for graph nodes.
///
/// `TeamMember` is a projection of upstream staff accounts (agents and
/// admins), distinct from the generic `User` projection of all accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    User,
    Group,
    Org,
    Role,
    TeamMember,
}

impl ResourceKind {
    /// Stable string id used in resource identity and wire payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Group => "group",
            ResourceKind::Org => "org",
            ResourceKind::Role => "role",
            ResourceKind::TeamMember => "team_member",
        }
    }

    /// Human-readable display name for the kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::User => "User",
            ResourceKind::Group => "Group",
            ResourceKind::Org => "Org",
            ResourceKind::Role => "Role",
            ResourceKind::TeamMember => "Team Member",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource kind: {0}")]
pub struct ResourceKindParseError(pub String);

impl FromStr for ResourceKind {
    type Err = ResourceKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ResourceKind::User),
            "group" => Ok(ResourceKind::Group),
            "org" => Ok(ResourceKind::Org),
            "role" => Ok(ResourceKind::Role),
            "team_member" => Ok(ResourceKind::TeamMember),
            other => Err(ResourceKindParseError(other.to_string())),
        }
    }
}

// ============================================================================
// RESOURCE IDENTITY
// ============================================================================

/// Identity of a graph node: `(kind, opaque id)`.
///
/// The id is the upstream numeric identifier serialized as decimal text, or
/// the upstream role name for privilege roles. Uniqueness is required within
/// a kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    pub kind: ResourceKind,
    pub id: String,
}

impl ResourceId {
    pub fn new(kind: ResourceKind, id: impl ToString) -> Self {
        Self {
            kind,
            id: id.to_string(),
        }
    }

    /// Decode the id as the upstream numeric identifier.
    pub fn numeric(&self) -> Result<i64, crate::error::ConnectorError> {
        self.id
            .parse::<i64>()
            .map_err(|_| crate::error::ConnectorError::IdentifierParse {
                value: self.id.clone(),
            })
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

// ============================================================================
// ANNOTATIONS AND TRAIT PAYLOADS
// ============================================================================

/// Auxiliary markers attached to a resource for downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Annotation {
    /// Link to the resource in the upstream web UI.
    ExternalLink { url: String },
    /// Declares which resource kind hangs under this one in the hierarchy.
    ChildResourceKind(ResourceKind),
    /// Legacy identifier carried for compatibility (e.g. `org:123`).
    V1Identifier(String),
}

/// Enabled/disabled status on a user-shaped resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Enabled,
    Disabled,
}

/// Profile payload for user-shaped resources (users and team members).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserTraitData {
    pub profile: serde_json::Value,
    pub email: Option<String>,
    pub login: Option<String>,
    pub status: UserStatus,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Profile payload for group-shaped resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroupTraitData {
    pub profile: serde_json::Value,
}

/// Profile payload for role-shaped resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RoleTraitData {
    pub profile: serde_json::Value,
}

/// Typed trait payload carried by a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraitData {
    User(UserTraitData),
    Group(GroupTraitData),
    Role(RoleTraitData),
}

// ============================================================================
// RESOURCE
// ============================================================================

/// Canonical node in the access graph.
///
/// Produced by List operations and immutable for the duration of a sync
/// pass; the next pass supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub display_name: String,
    pub parent_id: Option<ResourceId>,
    pub annotations: Vec<Annotation>,
    pub trait_data: Option<TraitData>,
}

impl Resource {
    pub fn new(kind: ResourceKind, id: impl ToString, display_name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(kind, id),
            display_name: display_name.into(),
            parent_id: None,
            annotations: Vec::new(),
            trait_data: None,
        }
    }

    pub fn with_parent(mut self, parent_id: Option<ResourceId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_trait_data(mut self, trait_data: TraitData) -> Self {
        self.trait_data = Some(trait_data);
        self
    }

    /// External link annotation, if one was attached.
    pub fn external_link(&self) -> Option<&str> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::ExternalLink { url } => Some(url.as_str()),
            _ => None,
        })
    }

    /// Declared child resource kind, if one was attached.
    pub fn child_resource_kind(&self) -> Option<ResourceKind> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::ChildResourceKind(kind) => Some(*kind),
            _ => None,
        })
    }
}

// ============================================================================
// ENTITLEMENTS AND GRANTS
// ============================================================================

/// Whether an entitlement models plain membership or a permission level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementPurpose {
    Assignment,
    Permission,
}

/// A capability or membership class advertised by a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    pub resource_id: ResourceId,
    pub slug: String,
    pub display_name: String,
    pub description: String,
    pub purpose: EntitlementPurpose,
    pub grantable_to: Vec<ResourceKind>,
}

impl Entitlement {
    pub fn assignment(resource: &Resource, slug: impl Into<String>) -> Self {
        Self::build(resource, slug.into(), EntitlementPurpose::Assignment)
    }

    pub fn permission(resource: &Resource, slug: impl Into<String>) -> Self {
        Self::build(resource, slug.into(), EntitlementPurpose::Permission)
    }

    fn build(resource: &Resource, slug: String, purpose: EntitlementPurpose) -> Self {
        Self {
            resource_id: resource.id.clone(),
            display_name: format!("{} {}", resource.display_name, slug),
            description: String::new(),
            slug,
            purpose,
            grantable_to: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn grantable_to(mut self, kinds: &[ResourceKind]) -> Self {
        self.grantable_to = kinds.to_vec();
        self
    }
}

/// An edge asserting that a principal holds an entitlement on a resource.
///
/// Directional. Symmetric relationships are emitted as two separate grants,
/// one from each endpoint, so consumers can traverse from either side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    pub resource_id: ResourceId,
    pub entitlement_slug: String,
    pub principal_id: ResourceId,
}

impl Grant {
    pub fn new(resource: &Resource, slug: impl Into<String>, principal_id: ResourceId) -> Self {
        Self {
            resource_id: resource.id.clone(),
            entitlement_slug: slug.into(),
            principal_id,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
