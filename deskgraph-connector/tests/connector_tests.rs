//! Connector surface: syncer registry, provisioner routing, validation

mod support;

use deskgraph_connector::Connector;
use deskgraph_core::ResourceKind;
use std::sync::Arc;
use support::*;

fn connector() -> Connector {
    let api = Arc::new(MockApi::new().with_users(vec![user(1, "Anna Agent", "agent")]));
    Connector::with_api(api, Vec::new())
}

#[test]
fn one_syncer_per_resource_kind() {
    let syncers = connector().resource_syncers();
    let kinds: Vec<_> = syncers.iter().map(|s| s.resource_kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ResourceKind::Group,
            ResourceKind::Org,
            ResourceKind::Role,
            ResourceKind::TeamMember,
            ResourceKind::User,
        ]
    );
}

#[test]
fn provisioning_is_routed_only_to_mutable_kinds() {
    let connector = connector();
    assert!(connector.provisioner_for(ResourceKind::Group).is_some());
    assert!(connector.provisioner_for(ResourceKind::Org).is_some());
    assert!(connector.provisioner_for(ResourceKind::Role).is_some());
    assert!(connector.provisioner_for(ResourceKind::User).is_none());
    assert!(connector.provisioner_for(ResourceKind::TeamMember).is_none());
}

#[tokio::test]
async fn validate_exercises_the_credentials() {
    connector().validate().await.unwrap();
}
