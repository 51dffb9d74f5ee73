//! Deskgraph sync entry point
//!
//! Loads configuration from the environment and runs one full sync pass over
//! every resource kind, logging per-kind counts. The host sync engine drives
//! the same surface through the library crate; this binary exists for
//! validation runs and operator debugging.

use deskgraph_connector::{Connector, ConnectorConfig, ResourceSyncer};
use deskgraph_core::{ConnectorResult, PageToken, Resource};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ConnectorResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ConnectorConfig::from_env();
    config.validate()?;

    let connector = Connector::new(&config);
    connector.validate().await?;
    let metadata = connector.metadata();
    tracing::info!(connector = %metadata.display_name, "credentials validated");

    for syncer in connector.resource_syncers() {
        let (resources, entitlements, grants) = sync_kind(&syncer).await?;
        tracing::info!(
            kind = %syncer.resource_kind(),
            resources,
            entitlements,
            grants,
            "resource kind synced"
        );
    }

    Ok(())
}

/// Drain one resource kind: list every page, then entitlements and grants
/// for each listed resource.
async fn sync_kind(syncer: &Arc<dyn ResourceSyncer>) -> ConnectorResult<(usize, usize, usize)> {
    let mut resources: Vec<Resource> = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let token = match cursor.take() {
            Some(t) => PageToken::new(t),
            None => PageToken::first(),
        };
        let (page, next) = syncer.list(None, &token).await?;
        resources.extend(page);
        match next {
            Some(t) => cursor = Some(t),
            None => break,
        }
    }

    let mut entitlement_count = 0;
    let mut grant_count = 0;
    for resource in &resources {
        let (entitlements, _) = syncer.entitlements(resource, &PageToken::first()).await?;
        entitlement_count += entitlements.len();

        let mut grant_cursor: Option<String> = None;
        loop {
            let token = match grant_cursor.take() {
                Some(t) => PageToken::new(t),
                None => PageToken::first(),
            };
            let (grants, next) = syncer.grants(resource, &token).await?;
            grant_count += grants.len();
            match next {
                Some(t) => grant_cursor = Some(t),
                None => break,
            }
        }
    }

    Ok((resources.len(), entitlement_count, grant_count))
}
