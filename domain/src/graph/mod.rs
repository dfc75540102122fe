//! Graph descriptions of the debate flow.
//!
//! [`GraphDescription::debate_flow`] is the static node graph (node types and
//! their fixed connections), independent of any run. [`GraphDescription::timeline`]
//! is the runtime chain of turns for one transcript. Both render to
//! Graphviz DOT and are diagnostic artifacts only.

use crate::debate::turn::Turn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub name: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphDescription {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn node(mut self, id: &str, label: &str) -> Self {
        self.nodes.push(GraphNode {
            id: id.to_string(),
            label: label.to_string(),
        });
        self
    }

    fn edge(mut self, from: &str, to: &str) -> Self {
        self.edges.push(GraphEdge {
            from: from.to_string(),
            to: to.to_string(),
        });
        self
    }

    /// The fixed node graph every debate runs on
    pub fn debate_flow() -> Self {
        Self::new("Debate")
            .node("Topic", "User: Topic")
            .node("Scientist", "Scientist")
            .node("Philosopher", "Philosopher")
            .node("Memory", "Memory")
            .node("Judge", "Judge")
            .edge("Topic", "Scientist")
            .edge("Topic", "Philosopher")
            .edge("Scientist", "Memory")
            .edge("Philosopher", "Memory")
            .edge("Memory", "Scientist")
            .edge("Memory", "Philosopher")
            .edge("Scientist", "Philosopher")
            .edge("Philosopher", "Scientist")
            .edge("Memory", "Judge")
    }

    /// Linear chain from the topic through every recorded turn
    pub fn timeline(turns: &[Turn]) -> Self {
        let mut graph = Self::new("DebateTimeline").node("topic", "User: Topic");
        let mut prev = "topic".to_string();
        for turn in turns {
            let id = format!(
                "r{}_{}_{}",
                turn.round(),
                turn.speaker.display_name(),
                turn.index
            );
            let label = format!("R{}\\n{}", turn.round(), turn.speaker.display_name());
            graph = graph.node(&id, &label).edge(&prev, &id);
            prev = id;
        }
        graph
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    /// Render as a Graphviz digraph
    pub fn to_dot(&self) -> String {
        let mut lines = vec![format!("digraph {} {{", self.name), "  rankdir=LR;".to_string()];
        for node in &self.nodes {
            lines.push(format!("  \"{}\" [label=\"{}\"];", node.id, node.label));
        }
        for edge in &self.edges {
            lines.push(format!("  \"{}\" -> \"{}\";", edge.from, edge.to));
        }
        lines.push("}".to_string());
        lines.join("\n")
    }
}
