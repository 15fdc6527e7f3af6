//! Event graph and circular event chain detection
//!
//! Nodes are event names. A handler of event `A` whose body emits `B`
//! contributes the edge `A -> B`.

use indexmap::{IndexMap, IndexSet};
use std::fmt;

/// One simple cycle; `events` starts and ends with the same event
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EventCycle {
    pub events: Vec<String>,
    /// Handlers whose emits form the cycle
    pub feature_sets: Vec<String>,
}

impl EventCycle {
    /// `A → B → A`
    pub fn chain(&self) -> String {
        self.events.join(" → ")
    }

    pub fn is_self_loop(&self) -> bool {
        self.events.len() == 2
    }
}

impl fmt::Display for EventCycle {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.chain())
    }
}

/// Name-keyed adjacency map; nodes keep first-appearance order
#[derive(Debug, Clone, Default)]
pub struct EventGraph {
    adjacency: IndexMap<String, IndexSet<String>>,
    edge_sources: IndexMap<(String, String), IndexSet<String>>,
}

impl EventGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(
        &mut self,
        event: &str,
    ) {
        if !self.adjacency.contains_key(event) {
            self.adjacency.insert(event.to_string(), IndexSet::new());
        }
    }

    /// `from -> to`, contributed by the handler `feature_set`
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        feature_set: &str,
    ) {
        self.add_node(from);
        self.add_node(to);
        if let Some(successors) = self.adjacency.get_mut(from) {
            successors.insert(to.to_string());
        }
        self.edge_sources
            .entry((from.to_string(), to.to_string()))
            .or_default()
            .insert(feature_set.to_string());
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn successors(
        &self,
        event: &str,
    ) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(event)
            .into_iter()
            .flat_map(|s| s.iter().map(String::as_str))
    }

    pub fn contains_edge(
        &self,
        from: &str,
        to: &str,
    ) -> bool {
        self.adjacency
            .get(from)
            .map(|s| s.contains(to))
            .unwrap_or(false)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Every distinct simple cycle, self-loops included
    pub fn find_cycles(&self) -> Vec<EventCycle> {
        self.find_cycles_bounded(usize::MAX).cycles
    }

    /// Simple cycles, stopping after `limit` of them.
    ///
    /// Each cycle is found exactly once, from its earliest node: the search
    /// from node `i` only walks through later nodes that can still lead
    /// back to `i`, so no branch is explored without a cycle at its end
    /// being possible.
    pub fn find_cycles_bounded(
        &self,
        limit: usize,
    ) -> CycleSearch {
        let predecessors = self.predecessors();
        let mut search = Search {
            graph: self,
            limit,
            on_path: vec![false; self.adjacency.len()],
            closes: Vec::new(),
            path: Vec::new(),
            found: CycleSearch::default(),
        };

        for start in 0..self.adjacency.len() {
            search.closes = closes_back_to(start, &predecessors);
            search.path = vec![start];
            search.on_path[start] = true;
            let stopped = search.walk(start, start);
            search.on_path[start] = false;
            if stopped {
                break;
            }
        }

        let found = search.found;
        tracing::debug!(
            "event graph: {} nodes, {} edges, {} cycles{}",
            self.node_count(),
            self.edge_count(),
            found.cycles.len(),
            if found.truncated { " (truncated)" } else { "" }
        );
        found
    }

    fn predecessors(&self) -> Vec<Vec<usize>> {
        let mut predecessors = vec![Vec::new(); self.adjacency.len()];
        for (from, successors) in self.adjacency.values().enumerate() {
            for to in successors.iter().filter_map(|s| self.adjacency.get_index_of(s)) {
                predecessors[to].push(from);
            }
        }
        predecessors
    }

    fn cycle_from_path(
        &self,
        path: &[usize],
    ) -> EventCycle {
        let events: Vec<String> = path
            .iter()
            .filter_map(|&i| self.adjacency.get_index(i).map(|(name, _)| name.clone()))
            .collect();

        let mut feature_sets: IndexSet<String> = IndexSet::new();
        for pair in events.windows(2) {
            if let Some(sources) = self.edge_sources.get(&(pair[0].clone(), pair[1].clone())) {
                feature_sets.extend(sources.iter().cloned());
            }
        }

        EventCycle {
            events,
            feature_sets: feature_sets.into_iter().collect(),
        }
    }
}

/// Outcome of a bounded cycle search
#[derive(Debug, Clone, Default)]
pub struct CycleSearch {
    pub cycles: Vec<EventCycle>,
    /// The limit was reached with more cycles left to report
    pub truncated: bool,
}

/// Nodes at or after `start` that reach `start` without passing an earlier node
fn closes_back_to(
    start: usize,
    predecessors: &[Vec<usize>],
) -> Vec<bool> {
    let mut closes = vec![false; predecessors.len()];
    let mut stack = vec![start];
    closes[start] = true;
    while let Some(node) = stack.pop() {
        for &pred in &predecessors[node] {
            if pred > start && !closes[pred] {
                closes[pred] = true;
                stack.push(pred);
            }
        }
    }
    closes
}

struct Search<'a> {
    graph: &'a EventGraph,
    limit: usize,
    on_path: Vec<bool>,
    closes: Vec<bool>,
    path: Vec<usize>,
    found: CycleSearch,
}

impl Search<'_> {
    /// Extend the path from `node`. Returns true once the limit stops the search.
    fn walk(
        &mut self,
        start: usize,
        node: usize,
    ) -> bool {
        let graph = self.graph;
        let Some((_, successors)) = graph.adjacency.get_index(node) else {
            return false;
        };

        for next in successors.iter().filter_map(|s| graph.adjacency.get_index_of(s)) {
            if next == start {
                if self.found.cycles.len() == self.limit {
                    self.found.truncated = true;
                    return true;
                }
                self.path.push(start);
                self.found.cycles.push(graph.cycle_from_path(&self.path));
                self.path.pop();
            } else if next > start && self.closes[next] && !self.on_path[next] {
                self.path.push(next);
                self.on_path[next] = true;
                let stopped = self.walk(start, next);
                self.on_path[next] = false;
                self.path.pop();
                if stopped {
                    return true;
                }
            }
        }
        false
    }
}
