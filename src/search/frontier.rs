use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;

use crate::search::state::{SearchState, StateSummary};

/** pending states of a search */
pub trait Frontier {
    /// inserts a state. `guide` is the ordering key (ignored by non-guided frontiers)
    fn push(&mut self, state:SearchState, guide:OrderedFloat<f64>);

    /// removes the next state to expand
    fn pop(&mut self) -> Option<SearchState>;

    /// number of pending states
    fn len(&self) -> usize;

    /// true iff no state is pending
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// pending states, in the order they would be popped
    fn summaries(&self) -> Vec<StateSummary>;
}


/** LIFO frontier: the last pushed state is expanded first */
#[derive(Debug, Default)]
pub struct StackFrontier {
    stack: Vec<SearchState>,
}

impl StackFrontier {
    /// empty stack
    pub fn new() -> Self { Self::default() }
}

impl Frontier for StackFrontier {
    fn push(&mut self, state:SearchState, _guide:OrderedFloat<f64>) { self.stack.push(state); }

    fn pop(&mut self) -> Option<SearchState> { self.stack.pop() }

    fn len(&self) -> usize { self.stack.len() }

    fn summaries(&self) -> Vec<StateSummary> {
        self.stack.iter().rev().map(|s| s.summary()).collect()
    }
}


/**
Priority frontier: pops the state with the smallest guide.
Ties are broken by insertion order (first inserted, first popped), which keeps runs deterministic.
*/
#[derive(Debug)]
pub struct PriorityFrontier {
    /// insertion number -> (guide, insertion number). max-queue, hence the Reverse
    queue: PriorityQueue<usize, Reverse<(OrderedFloat<f64>, usize)>>,
    /// states[i]: state inserted in i-th position (None once popped)
    states: Vec<Option<SearchState>>,
}

impl PriorityFrontier {
    /// empty frontier
    pub fn new() -> Self {
        Self { queue: PriorityQueue::new(), states: Vec::new() }
    }

    /// number of states inserted so far
    pub fn nb_inserted(&self) -> usize { self.states.len() }
}

impl Default for PriorityFrontier {
    fn default() -> Self { Self::new() }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, state:SearchState, guide:OrderedFloat<f64>) {
        let seq = self.states.len();
        self.states.push(Some(state));
        self.queue.push(seq, Reverse((guide, seq)));
    }

    fn pop(&mut self) -> Option<SearchState> {
        let (seq, _) = self.queue.pop()?;
        self.states[seq].take()
    }

    fn len(&self) -> usize { self.queue.len() }

    fn summaries(&self) -> Vec<StateSummary> {
        let mut entries:Vec<(Reverse<(OrderedFloat<f64>, usize)>, usize)> = self.queue.iter()
            .map(|(seq, p)| (*p, *seq))
            .collect();
        entries.sort_by(|a,b| b.0.cmp(&a.0));
        entries.iter()
            .filter_map(|(_,seq)| self.states[*seq].as_ref().map(|s| s.summary()))
            .collect()
    }
}
