use std::fmt;

use serde::{Serialize, Deserialize};

use crate::color::{ColorId, VertexId};

/** search tree node id */
pub type NodeId = usize;

/** what a search tree node stands for */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeLabel {
    /// initial state (nothing colored)
    Root,
    /// vertex colored with a color. g and h are only set by the cost-aware strategies
    Assign {
        /// vertex
        vertex: VertexId,
        /// color given to the vertex
        color: ColorId,
        /// accumulated cost
        #[serde(skip_serializing_if = "Option::is_none", default)]
        g: Option<f64>,
        /// heuristic estimate
        #[serde(skip_serializing_if = "Option::is_none", default)]
        h: Option<f64>,
    },
    /// terminal node: complete coloring found
    Solution {
        /// cost of the coloring
        total_cost: f64,
    },
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeLabel::Root => write!(f, "root"),
            NodeLabel::Assign { vertex, color, g:None, .. } => write!(f, "{} = {}", vertex, color),
            NodeLabel::Assign { vertex, color, g:Some(g), h:None } => {
                write!(f, "{}={}\ng={}", vertex, color, g)
            },
            NodeLabel::Assign { vertex, color, g:Some(g), h:Some(h) } => {
                write!(f, "{}={}\ng={}, h={}, f={}", vertex, color, g, h, g+h)
            },
            NodeLabel::Solution { total_cost } => write!(f, "solution\ncost={}", total_cost),
        }
    }
}

/** node of the search tree */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// id (position in the tree)
    pub id: NodeId,
    /// node it was derived from (None for the root)
    pub parent: Option<NodeId>,
    /// description
    pub label: NodeLabel,
}

/**
Append-only record of every state created during a run.
Node ids are given by a per-tree counter, so independent runs never interfere.
*/
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchTree {
    nodes: Vec<TreeNode>,
}

impl SearchTree {
    /// empty tree
    pub fn new() -> Self { Self::default() }

    /// appends a node (and the edge parent -> node if a parent is given). returns its id
    pub fn add_node(&mut self, label:NodeLabel, parent:Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        debug_assert!(parent.map_or(true, |p| p < id));
        self.nodes.push(TreeNode { id, parent, label });
        id
    }

    /// number of nodes
    pub fn len(&self) -> usize { self.nodes.len() }

    /// true iff no node was recorded
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// nodes, in creation order
    pub fn nodes(&self) -> &[TreeNode] { &self.nodes }

    /// node with the given id
    pub fn node(&self, id:NodeId) -> Option<&TreeNode> { self.nodes.get(id) }

    /// parent -> child edges, in creation order
    pub fn edges(&self) -> impl Iterator<Item=(NodeId, NodeId)> + '_ {
        self.nodes.iter().filter_map(|n| n.parent.map(|p| (p, n.id)))
    }

    /// children of a node, in creation order
    pub fn children(&self, id:NodeId) -> Vec<NodeId> {
        self.nodes.iter().filter(|n| n.parent == Some(id)).map(|n| n.id).collect()
    }

    /// ids from the root to the node (included)
    pub fn path_to(&self, id:NodeId) -> Vec<NodeId> {
        let mut res = Vec::new();
        let mut current = self.node(id);
        while let Some(node) = current {
            res.push(node.id);
            current = node.parent.and_then(|p| self.node(p));
        }
        res.reverse();
        res
    }

    /// number of Solution nodes
    pub fn nb_solutions(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n.label, NodeLabel::Solution { .. })).count()
    }

    /** Graphviz representation. Assignment nodes are filled with the color they give. */
    pub fn to_dot(&self) -> String {
        let mut res = String::from("digraph search_tree {\n");
        res += "\tnode [style=filled, fontsize=10];\n";
        for node in &self.nodes {
            let fill = match node.label {
                NodeLabel::Assign { color, .. } => fill_color(color),
                _ => "lightgray",
            };
            res += format!(
                "\t{} [label=\"{}\", fillcolor={}];\n",
                node.id, node.label.to_string().replace('\n', "\\n"), fill
            ).as_str();
        }
        for (p,c) in self.edges() {
            res += format!("\t{} -> {};\n", p, c).as_str();
        }
        res += "}\n";
        res
    }
}

/// Graphviz fill color of a palette color
pub fn fill_color(c:ColorId) -> &'static str {
    match c {
        1 => "red",
        2 => "green",
        3 => "blue",
        4 => "yellow",
        _ => "gray",
    }
}
