//! Dependency graph over default rules.
//!
//! An edge runs from the rule computing a path to every rule that reads that
//! path. Evaluating rules in topological order means each rule sees the fully
//! resolved values of everything it reads, independent of declaration order.

use std::collections::HashMap;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use super::rule::DefaultRule;
use crate::error::{ResolveError, Result};

pub struct RuleGraph<'r> {
  graph: DiGraph<&'r DefaultRule, ()>,
}

impl<'r> RuleGraph<'r> {
  pub fn new<I>(rules: I) -> Self
  where
    I: IntoIterator<Item = &'r DefaultRule>,
  {
    let mut graph = DiGraph::new();
    let mut by_path: HashMap<&str, NodeIndex> = HashMap::new();

    for rule in rules {
      let idx = graph.add_node(rule);
      by_path.insert(rule.path.as_str(), idx);
    }

    let edges: Vec<(NodeIndex, NodeIndex)> = graph
      .node_indices()
      .flat_map(|dependent| {
        graph[dependent]
          .reads
          .iter()
          .filter_map(|read| by_path.get(read.as_str()).map(|&dependency| (dependency, dependent)))
          .collect::<Vec<_>>()
      })
      .collect();

    for (dependency, dependent) in edges {
      graph.add_edge(dependency, dependent, ());
    }

    Self { graph }
  }

  pub fn len(&self) -> usize {
    self.graph.node_count()
  }

  pub fn is_empty(&self) -> bool {
    self.graph.node_count() == 0
  }

  /// Rules ordered so that every rule comes after the rules it reads from.
  ///
  /// # Errors
  ///
  /// Returns [`ResolveError::CircularDefault`] naming every path on the cycle.
  pub fn evaluation_order(&self) -> Result<Vec<&'r DefaultRule>> {
    match toposort(&self.graph, None) {
      Ok(order) => Ok(order.into_iter().map(|idx| self.graph[idx]).collect()),
      Err(cycle) => Err(ResolveError::CircularDefault {
        paths: self.cycle_through(cycle.node_id()),
      }),
    }
  }

  /// Paths of the strongly connected component containing `node`, sorted.
  fn cycle_through(&self, node: NodeIndex) -> Vec<String> {
    let mut paths: Vec<String> = tarjan_scc(&self.graph)
      .into_iter()
      .find(|component| component.contains(&node))
      .unwrap_or_else(|| vec![node])
      .into_iter()
      .map(|idx| self.graph[idx].path.clone())
      .collect();
    paths.sort();
    paths
  }
}
