//! Shared test support: an in-memory upstream API with call counters

// Not every test binary exercises every fixture helper.
#![allow(dead_code)]

use async_trait::async_trait;
use deskgraph_client::wire::{
    CustomRole, Group, GroupMembership, Organization, OrganizationMembership, User,
};
use deskgraph_client::{OrganizationListOptions, UpstreamApi, UserListOptions};
use deskgraph_core::ClientError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Fixture-backed [`UpstreamApi`] implementation. Listings return a single
/// page; memberships mutate in place so round-trip tests can re-derive
/// grants after a provisioning call.
#[derive(Default)]
pub struct MockApi {
    pub users: Vec<User>,
    pub groups: Vec<Group>,
    pub organizations: Vec<Organization>,
    pub custom_roles: Vec<CustomRole>,
    pub group_memberships: Mutex<Vec<GroupMembership>>,
    pub organization_memberships: Mutex<Vec<OrganizationMembership>>,
    /// When set, group membership listings are served in chunks of this
    /// size with a numeric next-page cursor, mimicking upstream pagination.
    membership_page_size: Option<usize>,

    next_membership_id: AtomicUsize,
    get_user_calls: AtomicUsize,
    create_group_membership_calls: AtomicUsize,
    create_organization_membership_calls: AtomicUsize,
    create_custom_role_calls: AtomicUsize,
    deletes_issued: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            next_membership_id: AtomicUsize::new(1000),
            ..Self::default()
        }
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn with_groups(mut self, groups: Vec<Group>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_organizations(mut self, organizations: Vec<Organization>) -> Self {
        self.organizations = organizations;
        self
    }

    pub fn with_custom_roles(mut self, custom_roles: Vec<CustomRole>) -> Self {
        self.custom_roles = custom_roles;
        self
    }

    pub fn with_group_memberships(self, memberships: Vec<GroupMembership>) -> Self {
        *self.group_memberships.lock().unwrap() = memberships;
        self
    }

    pub fn with_organization_memberships(self, memberships: Vec<OrganizationMembership>) -> Self {
        *self.organization_memberships.lock().unwrap() = memberships;
        self
    }

    pub fn with_membership_page_size(mut self, size: usize) -> Self {
        self.membership_page_size = Some(size);
        self
    }

    pub fn get_user_calls(&self) -> usize {
        self.get_user_calls.load(Ordering::SeqCst)
    }

    pub fn create_group_membership_calls(&self) -> usize {
        self.create_group_membership_calls.load(Ordering::SeqCst)
    }

    pub fn create_organization_membership_calls(&self) -> usize {
        self.create_organization_membership_calls.load(Ordering::SeqCst)
    }

    pub fn create_custom_role_calls(&self) -> usize {
        self.create_custom_role_calls.load(Ordering::SeqCst)
    }

    /// Upstream DELETE requests actually issued (a revoke whose scan finds
    /// no membership issues none).
    pub fn deletes_issued(&self) -> usize {
        self.deletes_issued.load(Ordering::SeqCst)
    }

    fn next_id(&self) -> i64 {
        self.next_membership_id.fetch_add(1, Ordering::SeqCst) as i64
    }

    fn not_found(op: &'static str) -> ClientError {
        ClientError::Transport {
            op,
            status: Some(404),
            message: "not found".to_string(),
        }
    }
}

#[async_trait]
impl UpstreamApi for MockApi {
    async fn list_users(&self, opts: UserListOptions) -> Result<(Vec<User>, Option<String>), ClientError> {
        let users = self
            .users
            .iter()
            .filter(|u| opts.roles.is_empty() || opts.roles.contains(&u.role))
            .cloned()
            .collect();
        Ok((users, None))
    }

    async fn list_groups(&self, _page: u64) -> Result<(Vec<Group>, Option<String>), ClientError> {
        Ok((self.groups.clone(), None))
    }

    async fn list_organizations(
        &self,
        _opts: OrganizationListOptions,
    ) -> Result<(Vec<Organization>, Option<String>), ClientError> {
        Ok((self.organizations.clone(), None))
    }

    async fn group_memberships(
        &self,
        group_id: i64,
        page: u64,
    ) -> Result<(Vec<GroupMembership>, Option<String>), ClientError> {
        let all: Vec<GroupMembership> = self
            .group_memberships
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect();

        let Some(size) = self.membership_page_size else {
            return Ok((all, None));
        };

        // page 0 and page 1 are both the first page, as upstream treats them
        let index = page.max(1) as usize;
        let start = (index - 1) * size;
        let chunk: Vec<GroupMembership> = all.iter().skip(start).take(size).cloned().collect();
        let next = if start + size < all.len() {
            Some((index + 1).to_string())
        } else {
            None
        };
        Ok((chunk, next))
    }

    async fn organization_memberships(
        &self,
        organization_id: i64,
    ) -> Result<Vec<OrganizationMembership>, ClientError> {
        Ok(self
            .organization_memberships
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn organization_users(
        &self,
        organization_id: i64,
        _opts: UserListOptions,
    ) -> Result<(Vec<User>, Option<String>), ClientError> {
        let users = self
            .users
            .iter()
            .filter(|u| u.organization_id == organization_id)
            .cloned()
            .collect();
        Ok((users, None))
    }

    async fn get_user(&self, user_id: i64) -> Result<User, ClientError> {
        self.get_user_calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| Self::not_found("get_user"))
    }

    async fn get_group(&self, group_id: i64) -> Result<Group, ClientError> {
        self.groups
            .iter()
            .find(|g| g.id == group_id)
            .cloned()
            .ok_or_else(|| Self::not_found("get_group"))
    }

    async fn custom_roles(&self) -> Result<Vec<CustomRole>, ClientError> {
        Ok(self.custom_roles.clone())
    }

    async fn create_group_membership(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<GroupMembership, ClientError> {
        self.create_group_membership_calls
            .fetch_add(1, Ordering::SeqCst);
        let membership = GroupMembership {
            id: self.next_id(),
            user_id,
            group_id,
            created_at: None,
        };
        self.group_memberships
            .lock()
            .unwrap()
            .push(membership.clone());
        Ok(membership)
    }

    async fn create_organization_membership(
        &self,
        user_id: i64,
        organization_id: i64,
    ) -> Result<OrganizationMembership, ClientError> {
        self.create_organization_membership_calls
            .fetch_add(1, Ordering::SeqCst);
        let membership = OrganizationMembership {
            id: self.next_id(),
            user_id,
            organization_id,
            created_at: None,
        };
        self.organization_memberships
            .lock()
            .unwrap()
            .push(membership.clone());
        Ok(membership)
    }

    async fn create_custom_role(&self, name: &str) -> Result<CustomRole, ClientError> {
        self.create_custom_role_calls.fetch_add(1, Ordering::SeqCst);
        Ok(CustomRole {
            id: self.next_id(),
            name: name.to_string(),
            description: None,
            created_at: None,
        })
    }

    async fn delete_group_membership(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<Option<i64>, ClientError> {
        let mut memberships = self.group_memberships.lock().unwrap();
        let found = memberships
            .iter()
            .position(|m| m.user_id == user_id && m.group_id == group_id);
        match found {
            Some(index) => {
                let removed = memberships.remove(index);
                self.deletes_issued.fetch_add(1, Ordering::SeqCst);
                Ok(Some(removed.id))
            }
            None => Ok(None),
        }
    }

    async fn delete_organization_membership(
        &self,
        user_id: i64,
        organization_id: i64,
    ) -> Result<Option<i64>, ClientError> {
        let mut memberships = self.organization_memberships.lock().unwrap();
        let found = memberships
            .iter()
            .position(|m| m.user_id == user_id && m.organization_id == organization_id);
        match found {
            Some(index) => {
                let removed = memberships.remove(index);
                self.deletes_issued.fetch_add(1, Ordering::SeqCst);
                Ok(Some(removed.id))
            }
            None => Ok(None),
        }
    }
}

// ============================================================================
// FIXTURE BUILDERS
// ============================================================================

pub fn user(id: i64, name: &str, role: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@acme.test", name.to_lowercase().replace(' ', ".")),
        role: role.to_string(),
        active: true,
        ..User::default()
    }
}

pub fn group(id: i64, name: &str) -> Group {
    Group {
        id,
        name: name.to_string(),
        url: None,
    }
}

pub fn organization(id: i64, name: &str) -> Organization {
    Organization {
        id,
        name: name.to_string(),
        url: Some(format!("https://acme.zendesk.com/api/v2/organizations/{}.json", id)),
    }
}

pub fn custom_role(id: i64, name: &str) -> CustomRole {
    CustomRole {
        id,
        name: name.to_string(),
        description: None,
        created_at: None,
    }
}

pub fn group_membership(id: i64, user_id: i64, group_id: i64) -> GroupMembership {
    GroupMembership {
        id,
        user_id,
        group_id,
        created_at: None,
    }
}

pub fn organization_membership(
    id: i64,
    user_id: i64,
    organization_id: i64,
) -> OrganizationMembership {
    OrganizationMembership {
        id,
        user_id,
        organization_id,
        created_at: None,
    }
}
