use std::rc::Rc;

use crate::color::{Assignment, ColorId, Solution, VertexId, WeightedInstance};
use crate::search::{Failure, SearchOutcome, SearchResult, SearchStatistics, Strategy};
use crate::search::evaluation::{path_cost, valid_colors};
use crate::search::observer::SearchObserver;
use crate::search::tree::{NodeId, NodeLabel, SearchTree};


/** represents a decision (assigning color c to vertex v, from the state recorded as `parent`) */
#[derive(Debug, Clone)]
struct Decision {
    v: VertexId,
    c: ColorId,
    parent: NodeId,
}

/// either a decision to apply, either a decision to undo
#[derive(Debug)]
enum BacktrackEvent {
    Commit(Decision), // decision to commit
    Restore(Decision) // decision taken
}


/**
Backtracking search: colors vertices in ascending order, tries colors in ascending
order, undoes the last decision when a vertex has no valid color left.

The recursion is replaced by an explicit stack of events, so the search depth is not
limited by the call stack.
*/
#[derive(Debug)]
pub struct BacktrackingSpace {
    /// instance
    inst: Rc<WeightedInstance>,
    /// processing order of the vertices
    order: Vec<VertexId>,
    /// current (partial) coloring, modified in place
    assignment: Assignment,
    /// decision history
    decisions: Vec<BacktrackEvent>,
    /// number of Commit events in the history
    nb_pending: usize,
    /// record of every created state
    tree: SearchTree,
    /// statistics
    stats: SearchStatistics,
}

impl BacktrackingSpace {
    /** creates a new backtracking search space */
    pub fn new(inst:Rc<WeightedInstance>) -> Self {
        let order:Vec<VertexId> = inst.vertices().collect();
        let n = order.len();
        Self {
            inst,
            order,
            assignment: Assignment::new(),
            decisions: Vec::with_capacity(2*n),
            nb_pending: 0,
            tree: SearchTree::new(),
            stats: SearchStatistics::default(),
        }
    }

    /// pushes the decisions for the next vertex (smallest color on top)
    fn push_next_decisions(&mut self, parent:NodeId) {
        let v = self.order[self.assignment.len()];
        let colors = valid_colors(&self.inst, v, &self.assignment);
        if colors.is_empty() {
            log::debug!("no valid color for vertex {} (node {}), backtracking", v, parent);
        }
        for c in colors.iter().rev() {
            let decision = Decision { v, c:*c, parent };
            self.decisions.push(BacktrackEvent::Restore(decision.clone())); // prepare to backtrack
            self.decisions.push(BacktrackEvent::Commit(decision)); // decision to apply
        }
        self.stats.expanded += 1;
        self.nb_pending += colors.len();
        self.stats.max_frontier = self.stats.max_frontier.max(self.nb_pending);
    }

    /// applies a decision, records the new state. returns its tree node
    fn commit(&mut self, decision:&Decision) -> NodeId {
        debug_assert!(!self.assignment.contains(decision.v));
        self.assignment.insert(decision.v, decision.c);
        self.stats.generated += 1;
        self.tree.add_node(
            NodeLabel::Assign { vertex: decision.v, color: decision.c, g: None, h: None },
            Some(decision.parent)
        )
    }

    /// undoes a decision
    fn restore(&mut self, decision:&Decision) {
        debug_assert_eq!(self.assignment.get(decision.v), Some(decision.c));
        self.assignment.remove(decision.v);
    }

    /// records the solution node and builds the solution
    fn solution(&mut self, node:NodeId) -> Solution {
        let total_cost = path_cost(&self.inst, &self.order, &self.assignment);
        self.tree.add_node(NodeLabel::Solution { total_cost }, Some(node));
        Solution { assignment: self.assignment.clone(), total_cost }
    }

    /**
    backtracking search

    Stores the decisions to be taken in a stack.
    pops each decision, tries to apply it.
    stops at the first complete coloring.
    */
    pub fn dfs_search(&mut self) -> SearchResult {
        let root = self.tree.add_node(NodeLabel::Root, None);
        if self.order.is_empty() {
            return SearchResult::Solved(self.solution(root));
        }
        self.push_next_decisions(root);
        while let Some(event) = self.decisions.pop() {
            match event {
                BacktrackEvent::Restore(decision) => { // restore the state
                    self.restore(&decision);
                },
                BacktrackEvent::Commit(decision) => { // apply the decision and generate children
                    self.nb_pending -= 1;
                    self.stats.iterations += 1;
                    let node = self.commit(&decision);
                    if self.assignment.len() == self.order.len() {
                        return SearchResult::Solved(self.solution(node));
                    }
                    self.push_next_decisions(node);
                }
            }
        }
        SearchResult::NoSolution(Failure::FrontierExhausted)
    }

    /// consumes the space, returns its search tree and statistics
    pub fn into_parts(self) -> (SearchTree, SearchStatistics) { (self.tree, self.stats) }
}


/// runs a backtracking search
pub fn backtracking_search(inst:Rc<WeightedInstance>, _observer:&mut dyn SearchObserver) -> SearchOutcome {
    let mut space = BacktrackingSpace::new(inst);
    let result = space.dfs_search();
    let (tree, stats) = space.into_parts();
    SearchOutcome { strategy: Strategy::Backtracking, result, tree, stats }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{checker, CheckerResult};
    use crate::graph_file::read_from_file;
    use crate::search::observer::NoopObserver;

    #[test]
    fn test_triangle() {
        let inst = Rc::new(read_from_file("insts/triangle.graph", 1.).unwrap());
        let outcome = backtracking_search(inst, &mut NoopObserver);
        let sol = outcome.result.solution().unwrap();
        let expected:Assignment = vec![(1,1), (2,2), (3,3)].into_iter().collect();
        assert_eq!(sol.assignment, expected);
        assert_eq!(sol.total_cost, 6.);
        // root, 1 = 1, 2 = 2, 3 = 3, solution
        assert_eq!(outcome.tree.len(), 5);
        assert_eq!(outcome.tree.path_to(4), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_backtracks_on_dead_end() {
        // triangle 1 2 3, 4 adjacent to 1, 5 adjacent to 1 2 3, 6 adjacent to 1 3 4 5.
        // 4 = 2 leaves no color for 6: the search has to undo it and use 4 = 3
        let inst = Rc::new(WeightedInstance::new(6, &[
            (1,2,1.), (1,3,1.), (2,3,1.), (1,4,1.),
            (1,5,1.), (2,5,1.), (3,5,1.),
            (1,6,1.), (3,6,1.), (4,6,1.), (5,6,1.),
        ]).unwrap());
        let outcome = backtracking_search(inst.clone(), &mut NoopObserver);
        let sol = outcome.result.solution().unwrap();
        assert_eq!(checker(&inst, &sol.assignment), CheckerResult::Ok(11.));
        let expected:Assignment = vec![(1,1), (2,2), (3,3), (4,3), (5,4), (6,2)].into_iter().collect();
        assert_eq!(sol.assignment, expected);
        // root, 1=1, 2=2, 3=3, 4=2, 5=4 (dead end), 4=3, 5=4, 6=2, solution
        assert_eq!(outcome.tree.len(), 10);
        assert_eq!(outcome.tree.children(3), vec![4, 6]);
        assert_eq!(outcome.tree.children(5), Vec::<NodeId>::new());
    }

    #[test]
    fn test_dead_ends_stay_in_tree() {
        let inst = Rc::new(read_from_file("insts/k5.graph", 1.).unwrap());
        let outcome = backtracking_search(inst, &mut NoopObserver);
        assert_eq!(outcome.result, SearchResult::NoSolution(Failure::FrontierExhausted));
        assert_eq!(outcome.tree.len(), 1 + 4 + 12 + 24 + 24);
        assert_eq!(outcome.stats.generated, 4 + 12 + 24 + 24);
    }

    #[test]
    fn test_max_frontier_counts_pending_decisions() {
        let edges:Vec<(VertexId, VertexId, f64)> = (1..6).map(|v| (v, v+1, 1.)).collect();
        let inst = Rc::new(WeightedInstance::new(6, &edges).unwrap());
        let outcome = backtracking_search(inst, &mut NoopObserver);
        assert!(outcome.result.is_solved());
        // 3 untried colors left for each of vertices 1 to 5, plus 3 candidates for vertex 6
        assert_eq!(outcome.stats.max_frontier, 14);
    }

    #[test]
    fn test_long_path_does_not_overflow() {
        let n = 20_000;
        let edges:Vec<(VertexId, VertexId, f64)> = (1..n).map(|v| (v, v+1, 1.)).collect();
        let inst = Rc::new(WeightedInstance::new(n, &edges).unwrap());
        let outcome = backtracking_search(inst, &mut NoopObserver);
        let sol = outcome.result.solution().unwrap();
        assert_eq!(sol.assignment.len(), n);
        assert_eq!(sol.assignment.get(n), Some(if n % 2 == 0 { 2 } else { 1 }));
    }
}
