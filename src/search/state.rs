use std::fmt;

use serde::{Serialize, Deserialize};

use crate::color::{Assignment, ColorId, VertexId};
use crate::search::tree::NodeId;

/** cost information carried by the states of the cost-aware strategies */
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateCost {
    /// accumulated realized cost
    pub g: f64,
    /// heuristic estimate (best-first by estimate only)
    pub h: Option<f64>,
}

impl StateCost {
    /// g + h (g if there is no heuristic)
    pub fn f(&self) -> f64 { self.g + self.h.unwrap_or(0.) }
}

/**
search state. Owns its assignment: expanding a state clones it, so sibling
branches never observe each other.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// partial coloring
    pub assignment: Assignment,
    /// index (in the processing order) of the next vertex to color
    pub next_index: usize,
    /// search tree node representing this state
    pub tree_node: NodeId,
    /// vertex colored last and its color (None for the initial state)
    pub last: Option<(VertexId, ColorId)>,
    /// cost information (None for the strategies that ignore costs)
    pub cost: Option<StateCost>,
}

impl SearchState {
    /// initial state: nothing colored
    pub fn initial(tree_node:NodeId, cost:Option<StateCost>) -> Self {
        Self { assignment: Assignment::new(), next_index: 0, tree_node, last: None, cost }
    }

    /// lightweight description, used by observers
    pub fn summary(&self) -> StateSummary {
        StateSummary { tree_node: self.tree_node, last: self.last, cost: self.cost }
    }
}

/** what observers get to see from a state */
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateSummary {
    /// search tree node
    pub tree_node: NodeId,
    /// last coloring decision
    pub last: Option<(VertexId, ColorId)>,
    /// cost information
    pub cost: Option<StateCost>,
}

impl fmt::Display for StateSummary {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID {}: ", self.tree_node)?;
        match self.last {
            Some((v,c)) => write!(f, "{}={}", v, c)?,
            None => write!(f, "start")?,
        }
        match self.cost {
            Some(StateCost { g, h:Some(h) }) => write!(f, ", g={}, h={}, f={}", g, h, g+h),
            Some(StateCost { g, h:None }) => write!(f, ", cost={}", g),
            None => Ok(()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let s = SearchState::initial(0, None);
        assert_eq!(s.summary().to_string(), "ID 0: start");
        let t = SearchState {
            assignment: vec![(1,2)].into_iter().collect(),
            next_index: 1,
            tree_node: 3,
            last: Some((1,2)),
            cost: Some(StateCost { g:1., h:Some(2.) }),
        };
        assert_eq!(t.summary().to_string(), "ID 3: 1=2, g=1, h=2, f=3");
        let u = SearchState { cost: Some(StateCost { g:4., h:None }), ..t };
        assert_eq!(u.summary().to_string(), "ID 3: 1=2, cost=4");
        assert_eq!(u.cost.unwrap().f(), 4.);
    }
}
