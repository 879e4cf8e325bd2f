use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::color::WeightedInstance;
use crate::search::{Failure, SearchOutcome, SearchResult, SearchStatistics, Strategy};
use crate::search::evaluation::{realized_cost, valid_colors};
use crate::search::observer::{Candidate, SearchObserver};
use crate::search::space::{ColoringSpace, CostModel, SearchSpace, ToSolution};

/** implements a greedy coloring. Single pass, no backtracking:
    1. take the next vertex (ascending ids)
    2. list the colors it can take, with the cost each one realizes
    3. color it with the cheapest one (smallest color on ties)
    4. fail as soon as a vertex has no valid color
*/
pub fn greedy_search(inst:Rc<WeightedInstance>, observer:&mut dyn SearchObserver) -> SearchOutcome {
    let mut space = ColoringSpace::new(inst, CostModel::Realized);
    let mut stats = SearchStatistics::default();
    let mut state = space.initial();
    while let Some(v) = space.next_vertex(&state) {
        stats.iterations += 1;
        let candidates:Vec<Candidate> = valid_colors(space.instance(), v, &state.assignment).into_iter()
            .map(|c| Candidate {
                vertex: v,
                color: c,
                additional_cost: realized_cost(space.instance(), v, &state.assignment),
            })
            .collect();
        observer.on_candidates(v, &candidates);
        let chosen = match candidates.iter().min_by_key(|c| OrderedFloat(c.additional_cost)) {
            Some(c) => c.color,
            None => {
                log::debug!("greedy: no valid color for vertex {}", v);
                let result = SearchResult::NoSolution(Failure::NoValidColor { vertex: v });
                return SearchOutcome { strategy: Strategy::Greedy, result, tree: space.into_tree(), stats };
            }
        };
        state = space.child(&state, v, chosen);
        stats.expanded += 1;
        stats.generated += 1;
    }
    let result = SearchResult::Solved(space.solution(&mut state));
    SearchOutcome { strategy: Strategy::Greedy, result, tree: space.into_tree(), stats }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Assignment;
    use crate::graph_file::read_from_file;
    use crate::search::observer::{NoopObserver, RecordingObserver};
    use crate::search::tree::NodeLabel;

    #[test]
    fn test_triangle() {
        let inst = Rc::new(read_from_file("insts/triangle.graph", 1.).unwrap());
        let mut observer = RecordingObserver::default();
        let outcome = greedy_search(inst, &mut observer);
        let sol = outcome.result.solution().unwrap();
        let expected:Assignment = vec![(1,1), (2,2), (3,3)].into_iter().collect();
        assert_eq!(sol.assignment, expected);
        assert_eq!(sol.total_cost, 6.);
        // root, one node per vertex, solution
        assert_eq!(outcome.tree.len(), 5);
        assert_eq!(outcome.tree.path_to(4), vec![0, 1, 2, 3, 4]);
        assert_eq!(observer.candidates.len(), 3);
        let (v, last) = &observer.candidates[2];
        assert_eq!(*v, 3);
        assert_eq!(last.iter().map(|c| c.color).collect::<Vec<_>>(), vec![3, 4]);
        assert!(last.iter().all(|c| c.additional_cost == 5.));
    }

    #[test]
    fn test_k5() {
        let inst = Rc::new(read_from_file("insts/k5.graph", 1.).unwrap());
        let outcome = greedy_search(inst, &mut NoopObserver);
        assert_eq!(outcome.result, SearchResult::NoSolution(Failure::NoValidColor { vertex: 5 }));
        // root + vertices 1 to 4, no solution node
        assert_eq!(outcome.tree.len(), 5);
        assert_eq!(outcome.tree.nb_solutions(), 0);
    }

    #[test]
    fn test_fails_without_recovery() {
        // 4-colorable, but 4 = 2 (first choice) leaves no color for 6
        let inst = Rc::new(WeightedInstance::new(6, &[
            (1,2,1.), (1,3,1.), (2,3,1.), (1,4,1.),
            (1,5,1.), (2,5,1.), (3,5,1.),
            (1,6,1.), (3,6,1.), (4,6,1.), (5,6,1.),
        ]).unwrap());
        let mut observer = RecordingObserver::default();
        let outcome = greedy_search(inst.clone(), &mut observer);
        assert_eq!(outcome.result, SearchResult::NoSolution(Failure::NoValidColor { vertex: 6 }));
        assert_eq!(observer.candidates.last().unwrap(), &(6, vec![]));
        let backtracking = crate::search::backtracking::backtracking_search(inst, &mut NoopObserver);
        assert!(backtracking.result.is_solved());
    }

    #[test]
    fn test_ties_take_smallest_color() {
        // 3 is adjacent to 1 (weight 5) and 2 (weight 1): every valid color costs the same
        // (both neighbors are colored), so the smallest valid color wins
        let inst = Rc::new(WeightedInstance::new(3, &[(1,3,5.), (2,3,1.)]).unwrap());
        let outcome = greedy_search(inst, &mut NoopObserver);
        let sol = outcome.result.solution().unwrap();
        let expected:Assignment = vec![(1,1), (2,1), (3,2)].into_iter().collect();
        assert_eq!(sol.assignment, expected);
        assert_eq!(sol.total_cost, 6.);
        match outcome.tree.node(3).unwrap().label {
            NodeLabel::Assign { vertex:3, color:2, g:Some(g), .. } => assert_eq!(g, 6.),
            ref l => panic!("unexpected label {:?}", l),
        }
    }
}
