//! Search strategies for the 4-coloring problem.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Instant;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::color::{Solution, VertexId, WeightedInstance};

/// validity predicate, realized cost and heuristic
pub mod evaluation;

/// search states
pub mod state;

/// search tree recorder
pub mod tree;

/// search space traits and the coloring search space
pub mod space;

/// frontiers (pending states) of the tree searches
pub mod frontier;

/// observation hook (iteration logs)
pub mod observer;

/// open-list driver: depth-first, ordered and A*-style searches
pub mod tree_search;

/// backtracking depth-first search
pub mod backtracking;

/// greedy forward search
pub mod greedy;

use observer::SearchObserver;
use tree::SearchTree;


/** search strategy */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// depth-first search with undo (stops at the first solution)
    Backtracking,
    /// depth-first search on an open list of copied states
    Dfs,
    /// best-first search by accumulated cost
    Ordered,
    /// best-first search by accumulated cost + heuristic
    AStar,
    /// single forward pass, cheapest valid color first, no backtracking
    Greedy,
}

impl Strategy {
    /// every strategy
    pub const ALL:[Strategy ; 5] = [
        Strategy::Backtracking, Strategy::Dfs, Strategy::Ordered, Strategy::AStar, Strategy::Greedy
    ];

    /// name used on the command line and in exports
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Backtracking => "backtracking",
            Strategy::Dfs => "dfs",
            Strategy::Ordered => "ordered",
            Strategy::AStar => "astar",
            Strategy::Greedy => "greedy",
        }
    }

    /// true iff the strategy finds a solution whenever one exists
    pub fn is_complete(&self) -> bool { !matches!(self, Strategy::Greedy) }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.name()) }
}

/** unknown strategy name */
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}' (valid: backtracking, dfs, ordered, astar, greedy)")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s:&str) -> Result<Self, Self::Err> {
        Strategy::ALL.iter().copied()
            .find(|st| st.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}


/** why a search reports no solution */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Failure {
    /// every pending state was expanded without reaching a complete coloring
    FrontierExhausted,
    /// the greedy search found no valid color for this vertex
    NoValidColor {
        /// vertex that could not be colored
        vertex: VertexId
    },
}

/** result of a search */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchResult {
    /// first complete coloring found
    Solved(Solution),
    /// no solution
    NoSolution(Failure),
}

impl SearchResult {
    /// solution, if any
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchResult::Solved(s) => Some(s),
            SearchResult::NoSolution(_) => None,
        }
    }

    /// true iff a solution was found
    pub fn is_solved(&self) -> bool { self.solution().is_some() }
}

/** statistics of a run */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// strategy name
    pub strategy: String,
    /// number of main loop iterations
    pub iterations: usize,
    /// number of expanded states
    pub expanded: usize,
    /// number of states created (root excluded)
    pub generated: usize,
    /// maximum number of pending states
    pub max_frontier: usize,
    /// number of search tree nodes
    pub tree_size: usize,
    /// time spent searching (seconds)
    pub time_searched: f32,
}

/** everything a run produces */
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// strategy used
    pub strategy: Strategy,
    /// solution or failure
    pub result: SearchResult,
    /// every state created during the run
    pub tree: SearchTree,
    /// statistics
    pub stats: SearchStatistics,
}

/**
runs a strategy on an instance. Each call owns its own frontier, counters and search tree,
so runs are independent and deterministic.
*/
pub fn solve(inst:Rc<WeightedInstance>, strategy:Strategy, observer:&mut dyn SearchObserver) -> SearchOutcome {
    let t_start = Instant::now();
    let mut outcome = match strategy {
        Strategy::Backtracking => backtracking::backtracking_search(inst, observer),
        Strategy::Dfs => tree_search::dfs_search(inst, observer),
        Strategy::Ordered => tree_search::ordered_search(inst, observer),
        Strategy::AStar => tree_search::astar_search(inst, observer),
        Strategy::Greedy => greedy::greedy_search(inst, observer),
    };
    outcome.stats.strategy = strategy.name().to_string();
    outcome.stats.tree_size = outcome.tree.len();
    outcome.stats.time_searched = t_start.elapsed().as_secs_f32();
    observer.on_outcome(&outcome.result);
    match &outcome.result {
        SearchResult::Solved(s) => log::info!(
            "{}: solution found (cost {}) in {:.3} seconds, {} tree nodes",
            strategy, s.total_cost, outcome.stats.time_searched, outcome.stats.tree_size
        ),
        SearchResult::NoSolution(f) => log::info!(
            "{}: no solution ({:?}) after {:.3} seconds, {} tree nodes",
            strategy, f, outcome.stats.time_searched, outcome.stats.tree_size
        ),
    }
    outcome
}
