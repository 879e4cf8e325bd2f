use serde::{Serialize, Deserialize};

use crate::color::{ColorId, VertexId};
use crate::search::SearchResult;
use crate::search::state::StateSummary;

/** color candidate considered by the greedy search for a vertex */
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// vertex to color
    pub vertex: VertexId,
    /// candidate color
    pub color: ColorId,
    /// realized cost if the vertex takes this color
    pub additional_cost: f64,
}

/**
Receives snapshots of a search while it runs. Purely observational: nothing an
observer does can change the decisions of the search.
*/
pub trait SearchObserver {
    /// if false, the search does not build snapshots for this observer
    fn enabled(&self) -> bool { true }

    /// called before each state selection with the open and closed lists
    fn on_iteration(&mut self, _iteration:usize, _open:&[StateSummary], _closed:&[StateSummary]) {}

    /// called by the greedy search with the valid colors of each vertex (empty on failure)
    fn on_candidates(&mut self, _vertex:VertexId, _candidates:&[Candidate]) {}

    /// called once the search is over
    fn on_outcome(&mut self, _result:&SearchResult) {}
}

/** ignores everything */
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn enabled(&self) -> bool { false }
}

/** snapshot taken at one iteration */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationSnapshot {
    /// iteration number (starts at 0)
    pub iteration: usize,
    /// open list
    pub open: Vec<StateSummary>,
    /// closed list
    pub closed: Vec<StateSummary>,
}

/** keeps every snapshot in memory */
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RecordingObserver {
    /// snapshots, in order
    pub iterations: Vec<IterationSnapshot>,
    /// greedy candidates per vertex, in order
    pub candidates: Vec<(VertexId, Vec<Candidate>)>,
    /// true once on_outcome was called
    pub finished: bool,
}

impl SearchObserver for RecordingObserver {
    fn on_iteration(&mut self, iteration:usize, open:&[StateSummary], closed:&[StateSummary]) {
        self.iterations.push(IterationSnapshot {
            iteration, open: open.to_vec(), closed: closed.to_vec()
        });
    }

    fn on_candidates(&mut self, vertex:VertexId, candidates:&[Candidate]) {
        self.candidates.push((vertex, candidates.to_vec()));
    }

    fn on_outcome(&mut self, _result:&SearchResult) { self.finished = true; }
}
