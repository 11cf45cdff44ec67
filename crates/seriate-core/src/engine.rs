//! The linearization engine: a deterministic variant of Kahn's algorithm.
//!
//! # Determinism
//!
//! The ready queue is seeded in ascending index order and drained FIFO, so
//! ties between independent items always break toward input order. For a
//! fixed input the result is identical on every call; there is no state
//! carried between invocations.
//!
//! # The no-dependencies fallback
//!
//! When *zero* items declare a dependency, the engine skips the queue-based
//! sort and returns reverse input order, `[n-1, n-2, ..., 0]`. Callers have
//! historically depended on that exact sequence, so it is part of the
//! contract. Do not "fix" it to identity order.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, instrument};

use crate::cycles::find_cycles;
use crate::error::OrderError;
use crate::item::Item;

/// Compute a dependency-respecting linearization of `items`.
///
/// Returns indices into `items`, one per item, such that for every item the
/// indices of all of its dependencies appear strictly earlier. The input is
/// not mutated and may be shared across concurrent calls.
///
/// An empty input yields an empty result. When no item declares any
/// dependency the result is reverse input order (see the module docs).
/// Dependency ids resolve to the *first* item with a matching `id`.
///
/// # Errors
///
/// - [`OrderError::UnknownDependency`] when a `depends` entry matches no
///   item's `id`.
/// - [`OrderError::DependencyCycle`] when the declared dependencies form a
///   cycle; the error names the members of every cycle found.
#[instrument(skip_all, fields(items = items.len()))]
pub fn order(items: &[Item]) -> Result<Vec<usize>, OrderError> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    if items.iter().all(|item| item.depends.is_empty()) {
        debug!("no declared dependencies, returning reverse input order");
        return Ok((0..items.len()).rev().collect());
    }

    // First occurrence of an id wins resolution.
    let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        index_of.entry(item.id.as_str()).or_insert(i);
    }

    // indegree[i] counts the dependency entries item i declares (duplicates
    // included); dependents[d] lists each item that declared d, once per
    // entry, so the drain below decrements symmetrically.
    let mut indegree = vec![0_usize; items.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); items.len()];

    for (i, item) in items.iter().enumerate() {
        for dep in &item.depends {
            let Some(&d) = index_of.get(dep.as_str()) else {
                return Err(OrderError::UnknownDependency {
                    dependency: dep.clone(),
                    declared_by: item.id.clone(),
                });
            };
            indegree[i] += 1;
            dependents[d].push(i);
        }
    }

    let mut queue: VecDeque<usize> = (0..items.len()).filter(|&i| indegree[i] == 0).collect();
    debug!(seeds = queue.len(), "ready queue seeded");

    let mut result = Vec::with_capacity(items.len());
    while let Some(i) = queue.pop_front() {
        result.push(i);
        for &dependent in &dependents[i] {
            indegree[dependent] -= 1;
            if indegree[dependent] == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if result.len() < items.len() {
        let cycles = find_cycles(items);
        debug!(
            emitted = result.len(),
            cycles = cycles.len(),
            "queue exhausted before all items were emitted"
        );
        return Err(OrderError::DependencyCycle { cycles });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[Item], order: &[usize]) -> Vec<String> {
        order.iter().map(|&i| items[i].id.clone()).collect()
    }

    #[test]
    fn empty_graph_yields_empty_order() {
        assert_eq!(order(&[]), Ok(vec![]));
    }

    #[test]
    fn no_dependencies_yields_reverse_input_order() {
        let items = [Item::new("a"), Item::new("b"), Item::new("c")];
        assert_eq!(order(&items), Ok(vec![2, 1, 0]));
    }

    #[test]
    fn empty_depends_lists_also_take_the_fallback() {
        let items = [
            Item::new("a").depends_on(Vec::<String>::new()),
            Item::new("b"),
            Item::new("c").depends_on(Vec::<String>::new()),
            Item::new("d"),
        ];
        assert_eq!(order(&items), Ok(vec![3, 2, 1, 0]));
    }

    #[test]
    fn single_item_without_deps_takes_the_fallback() {
        let items = [Item::new("only")];
        assert_eq!(order(&items), Ok(vec![0]));
    }

    #[test]
    fn chain_orders_dependencies_first() {
        let items = [
            Item::new("a"),
            Item::new("b").depends_on(["a"]),
            Item::new("c").depends_on(["a", "b"]),
        ];
        assert_eq!(order(&items), Ok(vec![0, 1, 2]));
    }

    #[test]
    fn declaration_order_does_not_matter() {
        let items = [
            Item::new("c").depends_on(["a", "b"]),
            Item::new("b").depends_on(["a"]),
            Item::new("a"),
        ];
        let result = order(&items).expect("acyclic");
        assert_eq!(ids(&items, &result), ["a", "b", "c"]);
    }

    #[test]
    fn diamond_breaks_ties_toward_input_order() {
        // a -> {b, c} -> d; b and c are tied, b wins by lower index.
        let items = [
            Item::new("a"),
            Item::new("b").depends_on(["a"]),
            Item::new("c").depends_on(["a"]),
            Item::new("d").depends_on(["b", "c"]),
        ];
        assert_eq!(order(&items), Ok(vec![0, 1, 2, 3]));
    }

    #[test]
    fn independent_components_interleave_by_index() {
        let items = [
            Item::new("p2").depends_on(["p1"]),
            Item::new("q2").depends_on(["q1"]),
            Item::new("p1"),
            Item::new("q1"),
        ];
        // Seeds: indices 2 and 3 (ascending). FIFO unlocks 0 then 1.
        assert_eq!(order(&items), Ok(vec![2, 3, 0, 1]));
    }

    #[test]
    fn two_cycle_is_rejected() {
        let items = [
            Item::new("x").depends_on(["y"]),
            Item::new("y").depends_on(["x"]),
        ];
        assert_eq!(
            order(&items),
            Err(OrderError::DependencyCycle {
                cycles: vec![vec!["x".to_string(), "y".to_string()]],
            })
        );
    }

    #[test]
    fn self_dependency_is_rejected_as_cycle() {
        let items = [Item::new("a").depends_on(["a"]), Item::new("b")];
        assert_eq!(
            order(&items),
            Err(OrderError::DependencyCycle {
                cycles: vec![vec!["a".to_string()]],
            })
        );
    }

    #[test]
    fn unknown_dependency_is_named() {
        let items = [Item::new("a"), Item::new("b").depends_on(["ghost"])];
        assert_eq!(
            order(&items),
            Err(OrderError::UnknownDependency {
                dependency: "ghost".to_string(),
                declared_by: "b".to_string(),
            })
        );
    }

    #[test]
    fn unknown_dependency_wins_over_later_cycle() {
        // Resolution is a hard stop before any queue work happens.
        let items = [
            Item::new("a").depends_on(["ghost"]),
            Item::new("x").depends_on(["y"]),
            Item::new("y").depends_on(["x"]),
        ];
        assert!(matches!(
            order(&items),
            Err(OrderError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn duplicate_ids_resolve_to_first_occurrence() {
        let items = [
            Item::new("dup"),
            Item::new("dup"),
            Item::new("user").depends_on(["dup"]),
        ];
        // Only index 0 gains a dependent; index 1 stays a free seed.
        assert_eq!(order(&items), Ok(vec![0, 1, 2]));
    }

    #[test]
    fn duplicate_depends_entries_are_counted_symmetrically() {
        let items = [
            Item::new("a"),
            Item::new("b").depends_on(["a", "a"]),
        ];
        assert_eq!(order(&items), Ok(vec![0, 1]));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let items = [
            Item::new("d").depends_on(["b", "c"]),
            Item::new("b").depends_on(["a"]),
            Item::new("c").depends_on(["a"]),
            Item::new("a"),
        ];
        let first = order(&items).expect("acyclic");
        for _ in 0..10 {
            assert_eq!(order(&items).expect("acyclic"), first);
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let items = vec![
            Item::new("a"),
            Item::new("b").depends_on(["a"]),
        ];
        let snapshot = items.clone();
        let _ = order(&items).expect("acyclic");
        assert_eq!(items, snapshot);
    }
}
