use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::TypeIntrospector;

/// Summary of the type reference graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeGraphSummary {
    pub nodes: usize,
    pub edges: usize,
}

/// Report of type references and the types that can reach themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeGraphReport {
    pub summary: TypeGraphSummary,
    /// Sorted names of types that participate in a reference cycle.
    pub recursive_types: Vec<String>,
}

impl TypeGraphReport {
    pub fn is_recursive(&self, name: &str) -> bool {
        self.recursive_types
            .binary_search_by(|candidate| candidate.as_str().cmp(name))
            .is_ok()
    }
}

/// Build a deterministic type reference report.
///
/// Edges follow members, constructor parameters (through collection and
/// nullable wrappers) and base types. `extra_edges` adds references the
/// catalog cannot see, such as an abstract type resolved to an implementation.
pub fn build_type_graph_report(
    introspector: &dyn TypeIntrospector,
    extra_edges: &[(String, String)],
) -> TypeGraphReport {
    let graph = build_adjacency(introspector, extra_edges);
    let nodes = graph.len();
    let edges = graph.values().map(|targets| targets.len()).sum();

    let recursive_types = graph
        .keys()
        .filter(|node| reaches_itself(&graph, node))
        .cloned()
        .collect();

    TypeGraphReport {
        summary: TypeGraphSummary { nodes, edges },
        recursive_types,
    }
}

fn build_adjacency(
    introspector: &dyn TypeIntrospector,
    extra_edges: &[(String, String)],
) -> BTreeMap<String, BTreeSet<String>> {
    let mut graph: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for name in introspector.type_names() {
        graph.entry(name.to_string()).or_default();
        let Some(descriptor) = introspector.descriptor(name) else {
            continue;
        };

        let targets = graph.entry(name.to_string()).or_default();
        if let Some(base) = &descriptor.base {
            targets.insert(base.clone());
        }
        for ty in descriptor.referenced_types() {
            for referenced in ty.named_refs() {
                targets.insert(referenced.to_string());
            }
        }
    }

    for (from, to) in extra_edges {
        graph.entry(to.clone()).or_default();
        graph.entry(from.clone()).or_default().insert(to.clone());
    }

    graph
}

fn reaches_itself(graph: &BTreeMap<String, BTreeSet<String>>, start: &str) -> bool {
    let mut stack: Vec<&str> = graph
        .get(start)
        .map(|targets| targets.iter().map(String::as_str).collect())
        .unwrap_or_default();
    let mut visited = BTreeSet::new();

    while let Some(node) = stack.pop() {
        if node == start {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        if let Some(targets) = graph.get(node) {
            stack.extend(targets.iter().map(String::as_str));
        }
    }

    false
}
