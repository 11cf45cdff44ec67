//! Cycle diagnostics for dependency graphs.
//!
//! # Edge Direction
//!
//! Edges run `dependency → dependent`: an edge `A → B` means B declared A
//! in its `depends` list, so A must be emitted before B. Direction does
//! not affect which strongly connected components exist, but keeping it
//! consistent with the engine makes the reported paths read naturally.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::item::Item;

/// Find all dependency cycles among `items`.
///
/// Each entry is a sorted list of item ids in one strongly connected
/// component (SCC). Self-loops are reported as a one-element cycle.
/// Cycles are sorted by their first member, so output is stable across
/// runs.
///
/// Dependency ids that resolve to no item are skipped here, since an
/// unresolvable edge cannot participate in a cycle. The ordering engine
/// rejects such graphs before it ever consults this module.
#[must_use]
pub fn find_cycles(items: &[Item]) -> Vec<Vec<String>> {
    let graph = build_graph(items);

    let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || component.first().is_some_and(|node| has_self_loop(&graph, *node))
        })
        .map(|component| {
            let mut members: Vec<String> = component
                .into_iter()
                .map(|node| graph[node].clone())
                .collect();
            members.sort();
            members
        })
        .collect();

    cycles.sort();
    cycles
}

/// Build the `dependency → dependent` graph over all items.
///
/// Nodes are one-per-item (duplicate ids get duplicate nodes); a
/// `depends` entry resolves to the first item with a matching id, same as
/// the engine's resolution rule.
fn build_graph(items: &[Item]) -> DiGraph<String, ()> {
    let mut graph = DiGraph::with_capacity(items.len(), items.len());
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::with_capacity(items.len());

    let nodes: Vec<NodeIndex> = items
        .iter()
        .map(|item| {
            let node = graph.add_node(item.id.clone());
            node_map.entry(item.id.as_str()).or_insert(node);
            node
        })
        .collect();

    for (item, &node) in items.iter().zip(&nodes) {
        for dep in &item.depends {
            if let Some(&dep_node) = node_map.get(dep.as_str()) {
                graph.add_edge(dep_node, node, ());
            }
        }
    }

    graph
}

fn has_self_loop(graph: &DiGraph<String, ()>, node: NodeIndex) -> bool {
    graph.find_edge(node, node).is_some()
}
