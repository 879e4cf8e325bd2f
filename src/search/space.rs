use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::color::{Assignment, ColorId, Solution, VertexId, WeightedInstance, COLORS};
use crate::search::evaluation::{heuristic, is_valid, path_cost, realized_cost};
use crate::search::state::{SearchState, StateCost};
use crate::search::tree::{NodeLabel, SearchTree};

/** search space: initial node, goal test and cost of a node */
pub trait SearchSpace<N, G> {
    /// initial node of the search
    fn initial(&mut self) -> N;

    /// cost of a node
    fn g_cost(&mut self, node:&N) -> G;

    /// true iff the node is a goal
    fn goal(&mut self, node:&N) -> bool;
}

/** generates all the children of a node at once */
pub trait TotalNeighborGeneration<N> {
    /// children of the node
    fn neighbors(&mut self, node:&mut N) -> Vec<N>;
}

/** provides the key nodes are ordered by (smallest first) */
pub trait GuidedSpace<N, G> {
    /// guide value of the node
    fn guide(&mut self, node:&N) -> G;
}

/** builds a solution from a goal node */
pub trait ToSolution<N, Sol> {
    /// solution represented by the (goal) node
    fn solution(&mut self, node:&mut N) -> Sol;
}


/** which cost information the states carry */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostModel {
    /// no cost (depth-first strategies)
    Ignore,
    /// accumulated realized cost g
    Realized,
    /// g and the heuristic estimate h
    RealizedWithHeuristic,
}

/**
Graph coloring search space. Vertices are colored in ascending order, colors
are tried in ascending order. Every state it creates is recorded in its search tree.
*/
#[derive(Debug)]
pub struct ColoringSpace {
    /// instance
    inst: Rc<WeightedInstance>,
    /// processing order of the vertices
    order: Vec<VertexId>,
    /// cost information computed for the states
    cost_model: CostModel,
    /// record of every created state
    tree: SearchTree,
    /// number of expanded states
    nb_expanded: usize,
}

impl ColoringSpace {
    /// creates a coloring search space
    pub fn new(inst:Rc<WeightedInstance>, cost_model:CostModel) -> Self {
        let order = inst.vertices().collect();
        Self { inst, order, cost_model, tree: SearchTree::new(), nb_expanded: 0 }
    }

    /// instance
    pub fn instance(&self) -> &WeightedInstance { &self.inst }

    /// processing order
    pub fn order(&self) -> &[VertexId] { &self.order }

    /// search tree built so far
    pub fn tree(&self) -> &SearchTree { &self.tree }

    /// consumes the space, returns its search tree
    pub fn into_tree(self) -> SearchTree { self.tree }

    /// number of states expanded so far
    pub fn nb_expanded(&self) -> usize { self.nb_expanded }

    /// vertex to color in the given state (None if the state is complete)
    pub fn next_vertex(&self, state:&SearchState) -> Option<VertexId> {
        self.order.get(state.next_index).copied()
    }

    /// cost information of the state obtained by coloring v (already inserted in `state_assignment`)
    fn cost_after(&self, parent:&SearchState, v:VertexId, state_assignment:&Assignment) -> Option<StateCost> {
        let g = |parent_cost:Option<StateCost>| {
            parent_cost.map_or(0., |c| c.g) + realized_cost(&self.inst, v, state_assignment)
        };
        match self.cost_model {
            CostModel::Ignore => None,
            CostModel::Realized => Some(StateCost { g: g(parent.cost), h: None }),
            CostModel::RealizedWithHeuristic => Some(StateCost {
                g: g(parent.cost),
                h: Some(heuristic(&self.inst, v, state_assignment)),
            }),
        }
    }

    /**
    child of `state` where v (the next vertex) gets color c. The assignment is
    copied, and a new search tree node is recorded.
    */
    pub fn child(&mut self, state:&SearchState, v:VertexId, c:ColorId) -> SearchState {
        debug_assert_eq!(self.next_vertex(state), Some(v));
        let mut assignment = state.assignment.clone();
        assignment.insert(v, c);
        let cost = self.cost_after(state, v, &assignment);
        let tree_node = self.tree.add_node(
            NodeLabel::Assign { vertex: v, color: c, g: cost.map(|x| x.g), h: cost.and_then(|x| x.h) },
            Some(state.tree_node)
        );
        log::trace!("new state {}: {} = {} ({:?})", tree_node, v, c, cost);
        SearchState {
            assignment,
            next_index: state.next_index + 1,
            tree_node,
            last: Some((v, c)),
            cost,
        }
    }
}

impl SearchSpace<SearchState, f64> for ColoringSpace {
    fn initial(&mut self) -> SearchState {
        let root = self.tree.add_node(NodeLabel::Root, None);
        let cost = match self.cost_model {
            CostModel::Ignore => None,
            CostModel::Realized => Some(StateCost { g: 0., h: None }),
            CostModel::RealizedWithHeuristic => {
                let h = self.order.first()
                    .map_or(0., |v| heuristic(&self.inst, *v, &Assignment::new()));
                Some(StateCost { g: 0., h: Some(h) })
            }
        };
        SearchState::initial(root, cost)
    }

    fn g_cost(&mut self, node:&SearchState) -> f64 {
        match node.cost {
            Some(c) => c.g,
            None => path_cost(&self.inst, &self.order, &node.assignment),
        }
    }

    fn goal(&mut self, node:&SearchState) -> bool { node.next_index == self.order.len() }
}

impl GuidedSpace<SearchState, OrderedFloat<f64>> for ColoringSpace {
    fn guide(&mut self, node:&SearchState) -> OrderedFloat<f64> {
        OrderedFloat(node.cost.map_or(0., |c| c.f()))
    }
}

impl TotalNeighborGeneration<SearchState> for ColoringSpace {
    fn neighbors(&mut self, node:&mut SearchState) -> Vec<SearchState> {
        let v = match self.next_vertex(node) {
            None => return Vec::new(),
            Some(v) => v,
        };
        self.nb_expanded += 1;
        let mut res = Vec::with_capacity(COLORS.len());
        for c in COLORS.iter() {
            if is_valid(&self.inst, v, *c, &node.assignment) {
                res.push(self.child(node, v, *c));
            }
        }
        log::debug!("expanded state {} (vertex {}): {} children", node.tree_node, v, res.len());
        res
    }
}

impl ToSolution<SearchState, Solution> for ColoringSpace {
    fn solution(&mut self, node:&mut SearchState) -> Solution {
        debug_assert!(self.goal(node));
        let total_cost = self.g_cost(node);
        self.tree.add_node(NodeLabel::Solution { total_cost }, Some(node.tree_node));
        Solution { assignment: node.assignment.clone(), total_cost }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Rc<WeightedInstance> {
        Rc::new(WeightedInstance::new(3, &[(1,2,1.), (2,3,2.), (1,3,3.)]).unwrap())
    }

    #[test]
    fn test_initial() {
        let mut space = ColoringSpace::new(triangle(), CostModel::RealizedWithHeuristic);
        let s = space.initial();
        assert_eq!(s.next_index, 0);
        assert!(s.assignment.is_empty());
        assert_eq!(s.cost, Some(StateCost { g:0., h:Some(4.) }));
        assert_eq!(space.tree().len(), 1);
        assert!(!space.goal(&s));
    }

    #[test]
    fn test_neighbors() {
        let mut space = ColoringSpace::new(triangle(), CostModel::Realized);
        let mut s = space.initial();
        let mut children = space.neighbors(&mut s);
        assert_eq!(children.len(), 4);
        assert_eq!(space.tree().len(), 5);
        let mut grandchildren = space.neighbors(&mut children[0]);
        // vertex 2 can not take color 1
        assert_eq!(grandchildren.iter().map(|c| c.last).collect::<Vec<_>>(),
            vec![Some((2,2)), Some((2,3)), Some((2,4))]);
        assert_eq!(grandchildren[0].cost.unwrap().g, 1.);
        // the parent assignment is left untouched
        assert_eq!(children[0].assignment.len(), 1);
        let last = space.neighbors(&mut grandchildren[0]);
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].cost.unwrap().g, 6.);
        assert!(space.goal(&last[0]));
        assert_eq!(space.nb_expanded(), 3);
    }

    #[test]
    fn test_guide() {
        let mut space = ColoringSpace::new(triangle(), CostModel::RealizedWithHeuristic);
        let mut s = space.initial();
        let mut children = space.neighbors(&mut s);
        // g = 0, h = 2 * (1+3)/2
        assert_eq!(space.guide(&children[0]), OrderedFloat(4.));
        let grandchildren = space.neighbors(&mut children[0]);
        // g = 1, h = 1 * (1+2)/2
        assert_eq!(space.guide(&grandchildren[0]), OrderedFloat(2.5));
    }

    #[test]
    fn test_solution_without_costs() {
        let mut space = ColoringSpace::new(triangle(), CostModel::Ignore);
        let mut s = space.initial();
        for c in &[1, 2, 3] {
            let v = space.next_vertex(&s).unwrap();
            s = space.child(&s, v, *c);
        }
        assert!(space.goal(&s));
        let sol = space.solution(&mut s);
        assert_eq!(sol.total_cost, 6.);
        assert_eq!(space.tree().nb_solutions(), 1);
    }
}
