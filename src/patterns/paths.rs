//! All-shortest-path search between relation endpoints.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::graph::DocGraph;

/// Shortest paths retained for one relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationPaths {
    /// Node count of every retained path.
    pub length: usize,
    pub paths: Vec<Vec<usize>>,
}

/// Every shortest path from `source` to `target`, in lexicographic node
/// order. `None` when the two nodes are not connected.
pub fn all_shortest_paths(graph: &DocGraph, source: usize, target: usize) -> Option<Vec<Vec<usize>>> {
    if !graph.contains(source) || !graph.contains(target) {
        return None;
    }
    if source == target {
        return Some(vec![vec![source]]);
    }

    let n = graph.node_count();
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut queue = VecDeque::new();
    dist[source] = Some(0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let d = dist[current].unwrap_or_default();
        if let Some(found) = dist[target] {
            if d >= found {
                break;
            }
        }
        for next in graph.neighbors(current) {
            match dist[next] {
                None => {
                    dist[next] = Some(d + 1);
                    preds[next].push(current);
                    queue.push_back(next);
                }
                Some(seen) if seen == d + 1 => preds[next].push(current),
                Some(_) => {}
            }
        }
    }

    dist[target]?;
    for list in &mut preds {
        list.sort_unstable();
    }

    let mut paths = Vec::new();
    let mut stack = vec![vec![target]];
    while let Some(partial) = stack.pop() {
        let Some(&last) = partial.last() else {
            continue;
        };
        if last == source {
            let mut path = partial;
            path.reverse();
            paths.push(path);
            continue;
        }
        for &pred in preds[last].iter().rev() {
            let mut extended = partial.clone();
            extended.push(pred);
            stack.push(extended);
        }
    }
    paths.sort();
    Some(paths)
}

/// Shortest paths over every head/tail node combination, keeping only those
/// that reach the global minimum length. Disconnected pairs are skipped;
/// `None` means no pair was connected at all.
pub fn relation_paths(
    graph: &DocGraph,
    heads: &BTreeSet<usize>,
    tails: &BTreeSet<usize>,
) -> Option<RelationPaths> {
    let mut by_length: BTreeMap<usize, Vec<Vec<usize>>> = BTreeMap::new();
    for &u in heads {
        for &v in tails {
            let Some(paths) = all_shortest_paths(graph, u, v) else {
                continue;
            };
            for path in paths {
                by_length.entry(path.len()).or_default().push(path);
            }
        }
    }
    let (length, paths) = by_length.into_iter().next()?;
    Some(RelationPaths { length, paths })
}
