//! DESKGRAPH CORE - Canonical Access-Graph Model
//!
//! Data types shared by the upstream client and the connector: resources,
//! entitlements, grants, pagination tokens, and the error taxonomy. This
//! crate is pure data - no network calls, no async, no side effects.

pub mod error;
pub mod model;
pub mod pagination;

pub use error::{ClientError, ConnectorError, ConnectorResult};
pub use model::{
    Annotation, Entitlement, EntitlementPurpose, Grant, GroupTraitData, Resource, ResourceId,
    ResourceKind, ResourceKindParseError, RoleTraitData, TraitData, UserStatus, UserTraitData,
};
pub use pagination::PageToken;
