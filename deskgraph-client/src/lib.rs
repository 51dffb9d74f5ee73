//! DESKGRAPH CLIENT - Upstream Access Client
//!
//! Wraps the paginated Zendesk REST API behind the [`UpstreamApi`] trait:
//! listing users, groups, organizations, memberships, and custom roles, and
//! creating/deleting memberships for provisioning. This crate is the only
//! component that touches the network; everything above it consumes the
//! trait, so tests substitute a mock.

pub mod api;
pub mod http;
pub mod wire;

pub use api::{OrganizationListOptions, UpstreamApi, UserListOptions};
pub use http::ZendeskClient;
