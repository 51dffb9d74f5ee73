//! Resource syncers: one handler per resource kind
//!
//! Every handler implements the same four-operation contract
//! ([`ResourceSyncer`]); the kinds that can be mutated upstream additionally
//! implement [`ResourceProvisioner`]. The host sync engine drives each
//! operation independently, threading the returned cursor back in.

mod group;
mod org;
mod role;
mod team;
mod user;

pub use group::GroupSyncer;
pub use org::OrgSyncer;
pub use role::RoleSyncer;
pub use team::TeamSyncer;
pub use user::UserSyncer;

use async_trait::async_trait;
use deskgraph_core::{
    ConnectorError, ConnectorResult, Entitlement, Grant, PageToken, Resource, ResourceId,
    ResourceKind,
};

/// Four-operation sync contract shared by all resource kinds.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    fn resource_kind(&self) -> ResourceKind;

    /// Page through the resources of this kind. The returned cursor is
    /// `None` when the listing is exhausted.
    async fn list(
        &self,
        parent_id: Option<&ResourceId>,
        page: &PageToken,
    ) -> ConnectorResult<(Vec<Resource>, Option<String>)>;

    /// Entitlements the given resource advertises.
    async fn entitlements(
        &self,
        resource: &Resource,
        page: &PageToken,
    ) -> ConnectorResult<(Vec<Entitlement>, Option<String>)>;

    /// Grant edges currently held against the given resource.
    async fn grants(
        &self,
        resource: &Resource,
        page: &PageToken,
    ) -> ConnectorResult<(Vec<Grant>, Option<String>)>;
}

/// Grant/revoke contract for mutable resource kinds.
#[async_trait]
pub trait ResourceProvisioner: Send + Sync {
    async fn grant(&self, principal: &Resource, entitlement: &Entitlement) -> ConnectorResult<()>;

    async fn revoke(&self, grant: &Grant) -> ConnectorResult<()>;
}

/// Title-case each whitespace-separated word, for entitlement display names.
pub(crate) fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The synthesized membership entitlement pair advertised by groups and
/// custom roles: `member` assignment plus `admin` permission.
pub(crate) fn membership_entitlement_pair(resource: &Resource) -> Vec<Entitlement> {
    let member = Entitlement::assignment(resource, group::MEMBER_ENTITLEMENT)
        .with_display_name(format!(
            "{} Role {}",
            resource.display_name,
            group::MEMBER_ENTITLEMENT
        ))
        .with_description(format!(
            "{} of {} {}",
            group::MEMBER_ENTITLEMENT,
            resource.display_name,
            resource.id.id
        ))
        .grantable_to(&[ResourceKind::TeamMember]);

    let admin = Entitlement::permission(resource, group::ADMIN_ENTITLEMENT)
        .with_display_name(format!(
            "{} Role {}",
            resource.display_name,
            group::ADMIN_ENTITLEMENT
        ))
        .with_description(format!(
            "{} of {} {}",
            group::ADMIN_ENTITLEMENT,
            resource.display_name,
            resource.id.id
        ))
        .grantable_to(&[ResourceKind::TeamMember]);

    vec![member, admin]
}

/// Precondition shared by all provisioners: only team members can hold
/// membership entitlements. Fails before any upstream call is made.
pub(crate) fn ensure_team_member_principal(principal: &Resource) -> ConnectorResult<()> {
    if principal.id.kind != ResourceKind::TeamMember {
        tracing::warn!(
            principal_kind = %principal.id.kind,
            principal_id = %principal.id.id,
            "principal is not a team member resource"
        );
        return Err(ConnectorError::InvalidPrincipalType {
            expected: ResourceKind::TeamMember,
            actual: principal.id.kind,
        });
    }
    Ok(())
}
