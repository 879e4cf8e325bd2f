use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::color::{Solution, WeightedInstance};
use crate::search::{Failure, SearchOutcome, SearchResult, SearchStatistics, Strategy};
use crate::search::frontier::{Frontier, PriorityFrontier, StackFrontier};
use crate::search::observer::SearchObserver;
use crate::search::space::{ColoringSpace, CostModel, GuidedSpace, SearchSpace, ToSolution, TotalNeighborGeneration};
use crate::search::state::{SearchState, StateSummary};

/**
open-list search loop.
    1. pops the next state of the frontier
    2. if it is complete, reports it as the solution
    3. otherwise pushes all its children (keyed by the space guide)
    4. stops when the frontier is empty (no solution)

Nothing is ever revisited: the index of the next vertex strictly increases along a branch.
The closed list is only kept for iterations the observer is enabled on.
*/
pub fn tree_search<Space, F>(
    space:&mut Space,
    frontier:&mut F,
    observer:&mut dyn SearchObserver,
    stats:&mut SearchStatistics,
) -> SearchResult
where
    Space: SearchSpace<SearchState, f64>
        + TotalNeighborGeneration<SearchState>
        + GuidedSpace<SearchState, OrderedFloat<f64>>
        + ToSolution<SearchState, Solution>,
    F: Frontier,
{
    let initial = space.initial();
    let guide = space.guide(&initial);
    frontier.push(initial, guide);
    let mut closed:Vec<StateSummary> = Vec::new();
    while !frontier.is_empty() {
        let observed = observer.enabled();
        if observed {
            observer.on_iteration(stats.iterations, &frontier.summaries(), &closed);
        }
        stats.iterations += 1;
        let mut state = match frontier.pop() {
            None => break,
            Some(s) => s,
        };
        if space.goal(&state) {
            return SearchResult::Solved(space.solution(&mut state));
        }
        let children = space.neighbors(&mut state);
        stats.expanded += 1;
        stats.generated += children.len();
        for child in children {
            let guide = space.guide(&child);
            frontier.push(child, guide);
        }
        stats.max_frontier = stats.max_frontier.max(frontier.len());
        if observed {
            closed.push(state.summary());
        }
    }
    SearchResult::NoSolution(Failure::FrontierExhausted)
}

/// runs the open-list search on a coloring space, packs the outcome
fn run<F:Frontier>(
    inst:Rc<WeightedInstance>,
    strategy:Strategy,
    cost_model:CostModel,
    mut frontier:F,
    observer:&mut dyn SearchObserver
) -> SearchOutcome {
    let mut space = ColoringSpace::new(inst, cost_model);
    let mut stats = SearchStatistics::default();
    let result = tree_search(&mut space, &mut frontier, observer, &mut stats);
    SearchOutcome { strategy, result, tree: space.into_tree(), stats }
}

/**
depth-first search on an open list (stack) of copied states. Children are pushed
in ascending color order, so the largest valid color is explored first.
*/
pub fn dfs_search(inst:Rc<WeightedInstance>, observer:&mut dyn SearchObserver) -> SearchOutcome {
    run(inst, Strategy::Dfs, CostModel::Ignore, StackFrontier::new(), observer)
}

/**
ordered (uniform cost) search: expands the state with the smallest accumulated cost first.
Ties are broken by creation order.
*/
pub fn ordered_search(inst:Rc<WeightedInstance>, observer:&mut dyn SearchObserver) -> SearchOutcome {
    run(inst, Strategy::Ordered, CostModel::Realized, PriorityFrontier::new(), observer)
}

/**
A*-style search: expands the state with the smallest g + h first.
h is computed for the vertex colored last and may overestimate, so the
first solution found is not guaranteed to be the cheapest.
*/
pub fn astar_search(inst:Rc<WeightedInstance>, observer:&mut dyn SearchObserver) -> SearchOutcome {
    run(inst, Strategy::AStar, CostModel::RealizedWithHeuristic, PriorityFrontier::new(), observer)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Assignment;
    use crate::graph_file::read_from_file;
    use crate::search::observer::{NoopObserver, RecordingObserver};
    use crate::search::tree::NodeLabel;

    fn triangle() -> Rc<WeightedInstance> {
        Rc::new(read_from_file("insts/triangle.graph", 1.).unwrap())
    }

    #[test]
    fn test_dfs_explores_last_color_first() {
        let outcome = dfs_search(triangle(), &mut NoopObserver);
        let expected:Assignment = vec![(1,4), (2,3), (3,2)].into_iter().collect();
        assert_eq!(outcome.result.solution().unwrap().assignment, expected);
        // root + 4 + 3 + 2 + solution
        assert_eq!(outcome.tree.len(), 11);
        assert_eq!(outcome.stats.expanded, 3);
    }

    #[test]
    fn test_ordered_triangle() {
        let outcome = ordered_search(triangle(), &mut NoopObserver);
        let sol = outcome.result.solution().unwrap();
        let expected:Assignment = vec![(1,1), (2,2), (3,3)].into_iter().collect();
        assert_eq!(sol.assignment, expected);
        assert_eq!(sol.total_cost, 6.);
        // every cheaper partial state is expanded first: root + 4 + 12 + 24 + solution
        assert_eq!(outcome.tree.len(), 42);
        assert_eq!(outcome.stats.expanded, 1 + 4 + 12);
    }

    #[test]
    fn test_astar_triangle() {
        let outcome = astar_search(triangle(), &mut NoopObserver);
        let sol = outcome.result.solution().unwrap();
        let expected:Assignment = vec![(1,1), (2,2), (3,3)].into_iter().collect();
        assert_eq!(sol.assignment, expected);
        assert_eq!(sol.total_cost, 6.);
        // labels carry g and h
        match outcome.tree.node(1).unwrap().label {
            NodeLabel::Assign { vertex:1, color:1, g:Some(g), h:Some(h) } => {
                assert_eq!(g, 0.);
                assert_eq!(h, 4.);
            },
            ref l => panic!("unexpected label {:?}", l),
        }
        assert_eq!(outcome.tree.len(), 42);
    }

    #[test]
    fn test_astar_is_guided_by_heuristic() {
        let outcome = astar_search(triangle(), &mut NoopObserver);
        // after expanding {1:1}, its children (f = 2.5) are expanded before {1:2} (f = 4)
        let expansion_order:Vec<usize> = outcome.tree.nodes().iter()
            .filter_map(|n| n.parent)
            .collect();
        // parents in creation order: root x4, node 1 x3, node 5 x2
        assert_eq!(&expansion_order[..9], &[0, 0, 0, 0, 1, 1, 1, 5, 5]);
    }

    #[test]
    fn test_observer_snapshots() {
        let mut observer = RecordingObserver::default();
        let outcome = ordered_search(triangle(), &mut observer);
        assert_eq!(observer.iterations.len(), outcome.stats.iterations);
        let first = &observer.iterations[0];
        assert_eq!(first.open.len(), 1);
        assert_eq!(first.open[0].tree_node, 0);
        assert!(first.closed.is_empty());
        let second = &observer.iterations[1];
        assert_eq!(second.open.iter().map(|s| s.tree_node).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(second.closed.len(), 1);
    }

    /// observer that only wakes up after a few iterations
    #[derive(Default)]
    struct LateObserver {
        calls: std::cell::Cell<usize>,
        recorder: RecordingObserver,
    }

    impl SearchObserver for LateObserver {
        fn enabled(&self) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.calls.get() > 3
        }

        fn on_iteration(&mut self, iteration:usize, open:&[StateSummary], closed:&[StateSummary]) {
            self.recorder.on_iteration(iteration, open, closed);
        }
    }

    #[test]
    fn test_closed_list_only_kept_when_observed() {
        let mut observer = LateObserver::default();
        ordered_search(triangle(), &mut observer);
        let snapshots = &observer.recorder.iterations;
        // iterations 0 to 2 expanded 3 states nobody was watching
        assert_eq!(snapshots[0].iteration, 3);
        assert!(snapshots[0].closed.is_empty());
        assert_eq!(snapshots[1].iteration, 4);
        assert_eq!(snapshots[1].closed.len(), 1);
    }

    #[test]
    fn test_exhausted_frontier() {
        let inst = Rc::new(read_from_file("insts/k5.graph", 1.).unwrap());
        let outcome = ordered_search(inst, &mut NoopObserver);
        assert_eq!(outcome.result, SearchResult::NoSolution(Failure::FrontierExhausted));
        // 4 + 12 + 24 + 24 partial colorings, nothing for vertex 5
        assert_eq!(outcome.tree.len(), 1 + 4 + 12 + 24 + 24);
    }
}
