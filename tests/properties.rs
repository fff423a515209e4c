//! Property tests for the network store, path finder and ranker.

use proptest::prelude::*;

use link_severance::{
    best_path_to_exit, shortest_path, GraphStore, Network, NodeId, Traversal,
};

type NetworkSpec = (usize, Vec<(usize, usize)>, Vec<usize>);

fn network_spec() -> impl Strategy<Value = NetworkSpec> {
    (2usize..12).prop_flat_map(|node_count| {
        (
            Just(node_count),
            prop::collection::vec((0..node_count, 0..node_count), 0..30),
            prop::collection::vec(0..node_count, 0..4),
        )
    })
}

fn build(node_count: usize, links: &[(usize, usize)], exits: &[usize]) -> Network {
    let mut net = Network::new(node_count);
    for &(u, v) in links.iter().filter(|(u, v)| u != v) {
        net.add_edge(NodeId::new(u), NodeId::new(v)).unwrap();
    }
    for &e in exits {
        net.register_exit(NodeId::new(e)).unwrap();
    }
    net
}

/// Recompute every weight from the adjacency relation.
fn assert_weights_consistent(net: &Network) {
    for index in 0..net.node_count() {
        let node = NodeId::new(index);
        let expected = if net.is_exit(node) {
            0
        } else {
            net.neighbors(node).into_iter().filter(|&k| net.is_exit(k)).count() as u32
        };
        assert_eq!(net.weight(node), expected, "weight of node {node}");
    }
}

proptest! {
    #[test]
    fn weight_matches_live_exit_links(
        (node_count, links, exits) in network_spec(),
        removals in prop::collection::vec((0usize..12, 0usize..12), 0..20),
    ) {
        let mut net = build(node_count, &links, &exits);
        assert_weights_consistent(&net);

        for (u, v) in removals {
            let (u, v) = (NodeId::new(u % node_count), NodeId::new(v % node_count));
            net.remove_edge(u, v).unwrap();
            assert_weights_consistent(&net);
        }
    }

    #[test]
    fn shortest_path_is_valid(
        (node_count, links, exits) in network_spec(),
        from in 0usize..12,
        to in 0usize..12,
        exclude in any::<bool>(),
    ) {
        let net = build(node_count, &links, &exits);
        let (from, to) = (NodeId::new(from % node_count), NodeId::new(to % node_count));

        let traversal = Traversal::run(&net, from, to, exclude);
        let path = shortest_path(&net, from, to, exclude);
        prop_assert_eq!(path.is_some(), traversal.distance(to).is_some());

        if let Some(path) = path {
            prop_assert_eq!(path.source(), Some(from));
            prop_assert_eq!(path.destination(), Some(to));
            prop_assert_eq!(Some(path.len() as u32 - 1), traversal.distance(to));
            for pair in path.nodes().windows(2) {
                prop_assert!(net.has_edge(pair[0], pair[1]));
            }
            if exclude && path.len() > 2 {
                let inner = &path.nodes()[1..path.len() - 1];
                prop_assert!(inner.iter().all(|&k| !net.is_exit(k)));
            }
        }
    }

    #[test]
    fn remove_edge_is_idempotent(
        (node_count, links, exits) in network_spec(),
        u in 0usize..12,
        v in 0usize..12,
    ) {
        let (u, v) = (NodeId::new(u % node_count), NodeId::new(v % node_count));
        let mut once = build(node_count, &links, &exits);
        once.remove_edge(u, v).unwrap();

        let mut twice = once.clone();
        twice.remove_edge(u, v).unwrap();

        prop_assert_eq!(once.snapshot(), twice.snapshot());
        for index in 0..node_count {
            let node = NodeId::new(index);
            prop_assert_eq!(once.weight(node), twice.weight(node));
        }
    }

    #[test]
    fn isolated_node_does_not_change_ranking(
        (node_count, links, exits) in network_spec(),
    ) {
        let small = build(node_count, &links, &exits);
        let large = build(node_count + 1, &links, &exits);

        for index in 0..node_count {
            let from = NodeId::new(index);
            for exit in small.exits() {
                let a = best_path_to_exit(&small, from, exit).map(|s| s.path);
                let b = best_path_to_exit(&large, from, exit).map(|s| s.path);
                prop_assert_eq!(a, b);
            }
        }
    }
}
