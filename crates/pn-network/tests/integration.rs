//! Integration tests for pn-network.

use pn_components::PipeSegment;
use pn_core::units::{m, mm};
use pn_network::{Network, NetworkBuilder, NetworkError};

#[test]
fn build_edit_rebuild() {
    let mut builder = NetworkBuilder::new();
    builder.push_pre_default();
    let a = builder.add_branch_default();
    let b = builder.add_branch_default();
    builder
        .push_to_branch(&b, PipeSegment::new(m(20.0), mm(65.0), mm(0.15)))
        .unwrap();
    builder.push_post_default();

    let first = builder.build().unwrap();
    assert_eq!(first.branches().len(), 2);
    assert_eq!(first.branch(&a).unwrap().segments().len(), 1);
    assert_eq!(first.branch(&b).unwrap().segments().len(), 2);

    // The snapshot is independent of further edits
    builder.pop_post();
    builder.remove_last_branch().unwrap();
    let second = builder.build().unwrap();

    assert_eq!(first.post().len(), 1);
    assert_eq!(second.post().len(), 0);
    assert_eq!(second.branches().len(), 1);

    let mut resumed = NetworkBuilder::from_network(second.clone());
    resumed.add_branch_default();
    assert_eq!(resumed.build().unwrap().branches().len(), 2);
}

#[test]
fn network_without_parallel_group() {
    let net = Network::new(vec![NetworkBuilder::default_series_segment()], vec![], vec![]).unwrap();
    assert!(!net.has_parallel_split());
    assert!(net.degenerate_segments().is_empty());
}

#[test]
fn duplicate_names_fail_on_freeze() {
    use pn_network::Branch;
    let seg = NetworkBuilder::default_branch_segment();
    let err = Network::new(
        vec![],
        vec![Branch::new("X", vec![seg.clone()]), Branch::new("X", vec![seg])],
        vec![],
    )
    .unwrap_err();
    assert_eq!(err, NetworkError::DuplicateBranch { name: "X".into() });
}
