//! Reqwest-backed Zendesk client

use crate::api::{OrganizationListOptions, Page, UpstreamApi, UserListOptions};
use crate::wire::{
    CustomRole, CustomRoleEnvelope, CustomRolesPage, Group, GroupEnvelope, GroupMembership,
    GroupMembershipEnvelope, GroupMembershipsPage, GroupsPage, Organization,
    OrganizationMembership, OrganizationMembershipEnvelope, OrganizationMembershipsPage,
    OrganizationsPage, User, UserEnvelope, UsersPage,
};
use async_trait::async_trait;
use deskgraph_core::ClientError;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Zendesk API client authenticated with an API token.
pub struct ZendeskClient {
    client: Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl ZendeskClient {
    /// Create a client for `https://{subdomain}.zendesk.com/api/v2`.
    pub fn new(
        subdomain: impl AsRef<str>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("https://{}.zendesk.com/api/v2", subdomain.as_ref()),
            email: email.into(),
            api_token: api_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// API-token auth: basic auth with username `{email}/token`.
    fn auth_user(&self) -> String {
        format!("{}/token", self.email)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        op: &'static str,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .basic_auth(self.auth_user(), Some(&self.api_token))
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                op,
                status: None,
                message: e.to_string(),
            })?;

        Self::decode(op, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        op: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .post(self.url(path))
            .basic_auth(self.auth_user(), Some(&self.api_token))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                op,
                status: None,
                message: e.to_string(),
            })?;

        Self::decode(op, response).await
    }

    async fn delete(&self, op: &'static str, path: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(path))
            .basic_auth(self.auth_user(), Some(&self.api_token))
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                op,
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::status_error(op, status, response).await)
    }

    async fn decode<T: DeserializeOwned>(
        op: &'static str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(op, status, response).await);
        }

        let body = response.bytes().await.map_err(|e| ClientError::Transport {
            op,
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| ClientError::InvalidResponse {
            op,
            message: e.to_string(),
        })
    }

    async fn status_error(
        op: &'static str,
        status: StatusCode,
        response: reqwest::Response,
    ) -> ClientError {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unreadable response body".to_string());
        ClientError::Transport {
            op,
            status: Some(status.as_u16()),
            message,
        }
    }
}

impl std::fmt::Debug for ZendeskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZendeskClient")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

/// Normalize an upstream "next page" URL into an opaque cursor.
///
/// Upstream advertises the follow-up listing as a full URL; the cursor the
/// connector threads around is the `page` query parameter. A next-page URL
/// without one is malformed.
pub fn parse_next_page(next_page: Option<&str>) -> Result<Option<String>, ClientError> {
    let Some(raw) = next_page else {
        return Ok(None);
    };

    let url = Url::parse(raw).map_err(|_| ClientError::MalformedCursor {
        url: raw.to_string(),
    })?;
    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned());

    match page {
        Some(token) if !token.is_empty() => Ok(Some(token)),
        _ => Err(ClientError::MalformedCursor {
            url: raw.to_string(),
        }),
    }
}

fn user_list_query(opts: &UserListOptions) -> Vec<(String, String)> {
    let mut query = Vec::new();
    if opts.page > 0 {
        query.push(("page".to_string(), opts.page.to_string()));
    }
    if let Some(per_page) = opts.per_page {
        query.push(("per_page".to_string(), per_page.to_string()));
    }
    for role in &opts.roles {
        query.push(("role[]".to_string(), role.clone()));
    }
    query
}

/// Locate the membership joining a user to a group. O(n) over one group's
/// memberships, which stays in the hundreds at the fleet sizes served.
pub fn find_group_membership(
    memberships: &[GroupMembership],
    user_id: i64,
    group_id: i64,
) -> Option<i64> {
    memberships
        .iter()
        .find(|m| m.user_id == user_id && m.group_id == group_id)
        .map(|m| m.id)
}

/// Locate the membership joining a user to an organization.
pub fn find_organization_membership(
    memberships: &[OrganizationMembership],
    user_id: i64,
    organization_id: i64,
) -> Option<i64> {
    memberships
        .iter()
        .find(|m| m.user_id == user_id && m.organization_id == organization_id)
        .map(|m| m.id)
}

#[async_trait]
impl UpstreamApi for ZendeskClient {
    async fn list_users(&self, opts: UserListOptions) -> Result<Page<User>, ClientError> {
        let query = user_list_query(&opts);
        let page: UsersPage = self.get_json("list_users", "/users.json", &query).await?;
        let next = parse_next_page(page.next_page.as_deref())?;
        Ok((page.users, next))
    }

    async fn list_groups(&self, page: u64) -> Result<Page<Group>, ClientError> {
        let mut query = Vec::new();
        if page > 0 {
            query.push(("page".to_string(), page.to_string()));
        }
        let body: GroupsPage = self.get_json("list_groups", "/groups.json", &query).await?;
        let next = parse_next_page(body.next_page.as_deref())?;
        Ok((body.groups, next))
    }

    async fn list_organizations(
        &self,
        opts: OrganizationListOptions,
    ) -> Result<Page<Organization>, ClientError> {
        let mut query = Vec::new();
        if opts.page > 0 {
            query.push(("page".to_string(), opts.page.to_string()));
        }
        if let Some(per_page) = opts.per_page {
            query.push(("per_page".to_string(), per_page.to_string()));
        }
        let body: OrganizationsPage = self
            .get_json("list_organizations", "/organizations.json", &query)
            .await?;
        let next = parse_next_page(body.next_page.as_deref())?;
        Ok((body.organizations, next))
    }

    async fn group_memberships(
        &self,
        group_id: i64,
        page: u64,
    ) -> Result<Page<GroupMembership>, ClientError> {
        let path = format!("/groups/{}/memberships.json", group_id);
        let mut query = Vec::new();
        if page > 0 {
            query.push(("page".to_string(), page.to_string()));
        }
        let body: GroupMembershipsPage = self
            .get_json("group_memberships", &path, &query)
            .await?;
        let next = parse_next_page(body.next_page.as_deref())?;
        Ok((body.group_memberships, next))
    }

    async fn organization_memberships(
        &self,
        organization_id: i64,
    ) -> Result<Vec<OrganizationMembership>, ClientError> {
        let path = format!("/organizations/{}/organization_memberships.json", organization_id);
        let body: OrganizationMembershipsPage = self
            .get_json("organization_memberships", &path, &[])
            .await?;
        Ok(body.organization_memberships)
    }

    async fn organization_users(
        &self,
        organization_id: i64,
        opts: UserListOptions,
    ) -> Result<Page<User>, ClientError> {
        let path = format!("/organizations/{}/users.json", organization_id);
        let query = user_list_query(&opts);
        let body: UsersPage = self.get_json("organization_users", &path, &query).await?;
        let next = parse_next_page(body.next_page.as_deref())?;
        Ok((body.users, next))
    }

    async fn get_user(&self, user_id: i64) -> Result<User, ClientError> {
        let path = format!("/users/{}.json", user_id);
        let body: UserEnvelope = self.get_json("get_user", &path, &[]).await?;
        Ok(body.user)
    }

    async fn get_group(&self, group_id: i64) -> Result<Group, ClientError> {
        let path = format!("/groups/{}.json", group_id);
        let body: GroupEnvelope = self.get_json("get_group", &path, &[]).await?;
        Ok(body.group)
    }

    async fn custom_roles(&self) -> Result<Vec<CustomRole>, ClientError> {
        let body: CustomRolesPage = self
            .get_json("custom_roles", "/custom_roles.json", &[])
            .await?;
        Ok(body.custom_roles)
    }

    async fn create_group_membership(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<GroupMembership, ClientError> {
        let payload = GroupMembershipEnvelope {
            group_membership: GroupMembership {
                user_id,
                group_id,
                ..GroupMembership::default()
            },
        };
        let echoed: GroupMembershipEnvelope = self
            .post_json("create_group_membership", "/group_memberships.json", &payload)
            .await?;
        Ok(echoed.group_membership)
    }

    async fn create_organization_membership(
        &self,
        user_id: i64,
        organization_id: i64,
    ) -> Result<OrganizationMembership, ClientError> {
        let payload = OrganizationMembershipEnvelope {
            organization_membership: OrganizationMembership {
                user_id,
                organization_id,
                ..OrganizationMembership::default()
            },
        };
        let echoed: OrganizationMembershipEnvelope = self
            .post_json(
                "create_organization_membership",
                "/organization_memberships.json",
                &payload,
            )
            .await?;
        Ok(echoed.organization_membership)
    }

    async fn create_custom_role(&self, name: &str) -> Result<CustomRole, ClientError> {
        let payload = CustomRoleEnvelope {
            custom_role: CustomRole {
                name: name.to_string(),
                ..CustomRole::default()
            },
        };
        let echoed: CustomRoleEnvelope = self
            .post_json("create_custom_role", "/custom_roles.json", &payload)
            .await?;
        Ok(echoed.custom_role)
    }

    async fn delete_group_membership(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<Option<i64>, ClientError> {
        let mut page = 0u64;
        let membership_id = loop {
            let (memberships, next) = self.group_memberships(group_id, page).await?;
            if let Some(id) = find_group_membership(&memberships, user_id, group_id) {
                break id;
            }
            match next {
                Some(token) => {
                    page = token.parse().map_err(|_| ClientError::MalformedCursor {
                        url: token.clone(),
                    })?;
                }
                None => {
                    tracing::debug!(user_id, group_id, "no group membership matched the pair");
                    return Ok(None);
                }
            }
        };

        let path = format!("/group_memberships/{}.json", membership_id);
        self.delete("delete_group_membership", &path).await?;
        Ok(Some(membership_id))
    }

    async fn delete_organization_membership(
        &self,
        user_id: i64,
        organization_id: i64,
    ) -> Result<Option<i64>, ClientError> {
        let memberships = self.organization_memberships(organization_id).await?;
        let Some(membership_id) =
            find_organization_membership(&memberships, user_id, organization_id)
        else {
            tracing::debug!(
                user_id,
                organization_id,
                "no organization membership matched the pair"
            );
            return Ok(None);
        };

        let path = format!("/organization_memberships/{}.json", membership_id);
        self.delete("delete_organization_membership", &path).await?;
        Ok(Some(membership_id))
    }
}

// =============================================================================
// TESTS
// =============================================================================
