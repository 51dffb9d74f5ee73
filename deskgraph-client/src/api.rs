//! The upstream API trait consumed by the resource syncers
//!
//! Implementations must be thread-safe (`Send + Sync`); syncers hold the
//! client behind an `Arc<dyn UpstreamApi>` and tests substitute a mock.

use crate::wire::{
    CustomRole, Group, GroupMembership, Organization, OrganizationMembership, User,
};
use async_trait::async_trait;
use deskgraph_core::ClientError;

/// Options for paginated user listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserListOptions {
    /// Upstream page index; 0 asks for the default (first) page.
    pub page: u64,
    pub per_page: Option<u64>,
    /// Restrict the listing to the given built-in roles (e.g. `["admin"]`).
    pub roles: Vec<String>,
}

impl UserListOptions {
    pub fn page(page: u64) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn with_roles(roles: &[&str]) -> Self {
        Self {
            roles: roles.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }
}

/// Options for paginated organization listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationListOptions {
    pub page: u64,
    pub per_page: Option<u64>,
}

/// Paginated item batch plus the normalized next-page cursor.
/// `None` means the listing is exhausted.
pub type Page<T> = (Vec<T>, Option<String>);

/// Access to the upstream helpdesk API.
///
/// List operations never mutate state. Create operations POST a single
/// wrapped object; delete operations resolve the upstream membership id by
/// scanning and issue one DELETE. Retries are a transport-layer concern and
/// never happen here.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    async fn list_users(&self, opts: UserListOptions) -> Result<Page<User>, ClientError>;

    async fn list_groups(&self, page: u64) -> Result<Page<Group>, ClientError>;

    async fn list_organizations(
        &self,
        opts: OrganizationListOptions,
    ) -> Result<Page<Organization>, ClientError>;

    /// One page of a single group's memberships; page 0 asks for the
    /// upstream default (first) page.
    async fn group_memberships(
        &self,
        group_id: i64,
        page: u64,
    ) -> Result<Page<GroupMembership>, ClientError>;

    /// Memberships of a single organization. Upstream does not paginate this
    /// listing for the fleet sizes the connector targets.
    async fn organization_memberships(
        &self,
        organization_id: i64,
    ) -> Result<Vec<OrganizationMembership>, ClientError>;

    /// Users that belong to an organization.
    async fn organization_users(
        &self,
        organization_id: i64,
        opts: UserListOptions,
    ) -> Result<Page<User>, ClientError>;

    async fn get_user(&self, user_id: i64) -> Result<User, ClientError>;

    async fn get_group(&self, group_id: i64) -> Result<Group, ClientError>;

    /// All custom roles defined on the account (unpaginated upstream).
    async fn custom_roles(&self) -> Result<Vec<CustomRole>, ClientError>;

    async fn create_group_membership(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<GroupMembership, ClientError>;

    async fn create_organization_membership(
        &self,
        user_id: i64,
        organization_id: i64,
    ) -> Result<OrganizationMembership, ClientError>;

    async fn create_custom_role(&self, name: &str) -> Result<CustomRole, ClientError>;

    /// Delete the membership joining `user_id` to `group_id`.
    /// Returns the upstream membership id that was deleted, or `None` when
    /// no such membership exists.
    async fn delete_group_membership(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<Option<i64>, ClientError>;

    /// Delete the membership joining `user_id` to `organization_id`.
    async fn delete_organization_membership(
        &self,
        user_id: i64,
        organization_id: i64,
    ) -> Result<Option<i64>, ClientError>;
}
