use std::collections::BTreeMap;
use std::fmt;
use std::iter::FromIterator;

use bit_set::BitSet;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::error::{ColoringError, Result};

/** Vertex Id (vertices are numbered from 1 to n) */
pub type VertexId = usize;

/** Color Id (colors are numbered from 1 to 4) */
pub type ColorId = u8;

/// palette, in the order colors are tried
pub const COLORS:[ColorId ; 4] = [1, 2, 3, 4];

/// largest number of vertices accepted when reading or generating an instance
pub const MAX_VERTICES:usize = 1_000_000;

/** reasons an edge is refused by the graph model */
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EdgeRejection {
    /// endpoint outside 1..=n
    #[error("vertex {0} is out of range (1..={1})")]
    OutOfRange(VertexId, usize),
    /// u == v
    #[error("self-loop on vertex {0}")]
    SelfLoop(VertexId),
    /// the edge already exists
    #[error("duplicate edge {0} {1}")]
    Duplicate(VertexId, VertexId),
    /// negative, NaN or infinite weight
    #[error("invalid weight {0} (expected a finite non-negative number)")]
    InvalidWeight(f64),
}

/** models an undirected weighted graph coloring instance. */
#[derive(Debug, Clone)]
pub struct WeightedInstance {
    /// nb vertices
    n: usize,
    /// edges of the graph (u < v), in insertion order
    edges: Vec<(VertexId, VertexId, f64)>,
    /// adj_list[v-1]: vertices adjacent to v (sorted)
    adj_list: Vec<Vec<VertexId>>,
    /// adj_weights[v-1][i]: weight of the edge (v, adj_list[v-1][i])
    adj_weights: Vec<Vec<f64>>,
    /// adj_matrix[v-1] represents a bitset of the neighbors of v
    adj_matrix: Vec<BitSet>,
}

impl WeightedInstance {

    /// graph with n vertices and no edges
    pub fn empty(n:usize) -> Self {
        Self {
            n,
            edges: Vec::new(),
            adj_list: vec![Vec::new() ; n],
            adj_weights: vec![Vec::new() ; n],
            adj_matrix: vec![BitSet::default() ; n],
        }
    }

    /** constructor using an edge list (u, v, weight) */
    pub fn new(n:usize, edges:&[(VertexId, VertexId, f64)]) -> Result<Self> {
        let mut res = Self::empty(n);
        for (u,v,w) in edges {
            res.add_edge(*u, *v, *w)
                .map_err(|e| ColoringError::format(0, e.to_string()))?;
        }
        Ok(res)
    }

    /// adds an undirected edge. Only used while the instance is being built.
    pub(crate) fn add_edge(&mut self, u:VertexId, v:VertexId, w:f64) -> std::result::Result<(), EdgeRejection> {
        for x in &[u, v] {
            if !self.contains(*x) { return Err(EdgeRejection::OutOfRange(*x, self.n)); }
        }
        if u == v { return Err(EdgeRejection::SelfLoop(u)); }
        if !w.is_finite() || w < 0. { return Err(EdgeRejection::InvalidWeight(w)); }
        let pos_u = match self.adj_list[u-1].binary_search(&v) {
            Ok(_) => return Err(EdgeRejection::Duplicate(u, v)),
            Err(p) => p,
        };
        self.adj_list[u-1].insert(pos_u, v);
        self.adj_weights[u-1].insert(pos_u, w);
        let pos_v = self.adj_list[v-1].binary_search(&u).unwrap_or_else(|p| p);
        self.adj_list[v-1].insert(pos_v, u);
        self.adj_weights[v-1].insert(pos_v, w);
        self.adj_matrix[u-1].insert(v);
        self.adj_matrix[v-1].insert(u);
        self.edges.push((u.min(v), u.max(v), w));
        Ok(())
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// vertices, in processing order (ascending ids)
    pub fn vertices(&self) -> std::ops::RangeInclusive<VertexId> { 1..=self.n }

    /// true iff v is a vertex of the graph
    pub fn contains(&self, v:VertexId) -> bool { v >= 1 && v <= self.n }

    /// position of v in the adjacency vectors. v must be a vertex of the graph
    fn index(&self, v:VertexId) -> usize {
        debug_assert!(self.contains(v), "vertex {} not in 1..={}", v, self.n);
        v - 1
    }

    /** list of vertices adjacent to v (ascending).

    # Panics
     - if v is not a vertex of the graph
    */
    pub fn neighbors(&self, v:VertexId) -> &[VertexId] { &self.adj_list[self.index(v)] }

    /// neighbors of v together with the weight of the connecting edge (panics if v is not a vertex)
    pub fn weighted_neighbors(&self, v:VertexId) -> impl Iterator<Item=(VertexId, f64)> + '_ {
        let i = self.index(v);
        self.adj_list[i].iter().copied().zip(self.adj_weights[i].iter().copied())
    }

    /// degree of v (panics if v is not a vertex)
    pub fn degree(&self, v:VertexId) -> usize { self.adj_list[self.index(v)].len() }

    /// returns if u and v are adjacent (O(1), uses the adjacency matrix)
    pub fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool {
        self.contains(u) && self.adj_matrix[u-1].contains(v)
    }

    /// weight of the edge {u,v}. Fails with InvalidEdge if u and v are not adjacent.
    pub fn weight(&self, u:VertexId, v:VertexId) -> Result<f64> {
        if !self.are_adjacent(u, v) {
            return Err(ColoringError::InvalidEdge { u, v });
        }
        match self.adj_list[u-1].binary_search(&v) {
            Ok(i) => Ok(self.adj_weights[u-1][i]),
            Err(_) => Err(ColoringError::InvalidEdge { u, v }),
        }
    }

    /// edge list (u < v)
    pub fn edges(&self) -> &[(VertexId, VertexId, f64)] { &self.edges }

    /// sum of all edge weights
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|(_,_,w)| w).sum()
    }

    /// logs statistics of the instance
    pub fn display_statistics(&self) {
        log::info!("\t{} \t vertices", self.nb_vertices());
        log::info!("\t{} \t edges", self.nb_edges());
        let degrees = self.vertices().map(|v| self.degree(v));
        if let (Some(min), Some(max)) = (degrees.clone().min(), degrees.max()) {
            log::info!("\t{} \t min degree", min);
            log::info!("\t{} \t max degree", max);
        }
    }
}


/** partial coloring (vertex -> color). Cloned whenever a search state is expanded. */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(BTreeMap<VertexId, ColorId>);

impl Assignment {
    /// empty assignment
    pub fn new() -> Self { Self::default() }

    /// color of v, if colored
    pub fn get(&self, v:VertexId) -> Option<ColorId> { self.0.get(&v).copied() }

    /// true iff v is colored
    pub fn contains(&self, v:VertexId) -> bool { self.0.contains_key(&v) }

    /// colors v with c (replaces a previous color)
    pub fn insert(&mut self, v:VertexId, c:ColorId) -> Option<ColorId> { self.0.insert(v, c) }

    /// uncolors v
    pub fn remove(&mut self, v:VertexId) -> Option<ColorId> { self.0.remove(&v) }

    /// number of colored vertices
    pub fn len(&self) -> usize { self.0.len() }

    /// true iff nothing is colored
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// (vertex, color) pairs by ascending vertex
    pub fn iter(&self) -> impl Iterator<Item=(VertexId, ColorId)> + '_ {
        self.0.iter().map(|(v,c)| (*v, *c))
    }
}

impl FromIterator<(VertexId, ColorId)> for Assignment {
    fn from_iter<I:IntoIterator<Item=(VertexId, ColorId)>>(iter:I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i,(v,c)) in self.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{}: {}", v, c)?;
        }
        write!(f, "}}")
    }
}

/** complete coloring found by a search */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// color of every vertex
    pub assignment: Assignment,
    /// accumulated realized cost of the coloring
    pub total_cost: f64,
}


/** result of the solution checker */
#[derive(Debug, Clone, PartialEq)]
pub enum CheckerResult {
    /// valid coloring, with its cost (sum of the edge weights)
    Ok(f64),
    /// this vertex is not colored
    MissingVertex(VertexId),
    /// this vertex does not exist in the instance
    UnknownVertex(VertexId),
    /// the color is outside of the palette
    InvalidColor(VertexId, ColorId),
    /// both endpoints of this edge have the same color
    Conflict(VertexId, VertexId),
}

/**
checks that the assignment is a proper and complete coloring.
returns its cost if so.
*/
pub fn checker(inst:&WeightedInstance, assignment:&Assignment) -> CheckerResult {
    for (v,c) in assignment.iter() {
        if !inst.contains(v) { return CheckerResult::UnknownVertex(v); }
        if !COLORS.contains(&c) { return CheckerResult::InvalidColor(v, c); }
    }
    if let Some(v) = inst.vertices().find(|v| !assignment.contains(*v)) {
        return CheckerResult::MissingVertex(v);
    }
    for (u,v,_) in inst.edges() {
        if assignment.get(*u) == assignment.get(*v) {
            return CheckerResult::Conflict(*u, *v);
        }
    }
    CheckerResult::Ok(inst.total_weight())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_file::read_from_file;

    fn triangle() -> WeightedInstance {
        WeightedInstance::new(3, &[(1,2,1.), (2,3,2.), (1,3,3.)]).unwrap()
    }

    #[test]
    fn test_read_instance() {
        let inst = read_from_file("insts/square.graph", 1.).unwrap();
        assert_eq!(inst.nb_vertices(), 4);
        assert_eq!(inst.nb_edges(), 4);
        assert_eq!(inst.neighbors(1), &[2,4]);
    }

    #[test]
    fn test_weight_lookup() {
        let inst = triangle();
        assert_eq!(inst.weight(3, 1).unwrap(), 3.);
        assert_eq!(inst.weight(1, 3).unwrap(), 3.);
        assert!(inst.are_adjacent(2, 3));
        assert_eq!(inst.total_weight(), 6.);
    }

    #[test]
    fn test_weight_non_adjacent() {
        let inst = WeightedInstance::new(3, &[(1,2,1.)]).unwrap();
        match inst.weight(1, 3) {
            Err(ColoringError::InvalidEdge { u:1, v:3 }) => {},
            other => panic!("unexpected result {:?}", other),
        }
        assert!(inst.weight(1, 7).is_err());
    }

    #[test]
    fn test_rejected_edges() {
        let mut inst = WeightedInstance::empty(3);
        assert_eq!(inst.add_edge(1, 1, 1.), Err(EdgeRejection::SelfLoop(1)));
        assert_eq!(inst.add_edge(1, 4, 1.), Err(EdgeRejection::OutOfRange(4, 3)));
        assert_eq!(inst.add_edge(0, 2, 1.), Err(EdgeRejection::OutOfRange(0, 3)));
        assert_eq!(inst.add_edge(1, 2, -1.), Err(EdgeRejection::InvalidWeight(-1.)));
        assert!(inst.add_edge(1, 2, 1.).is_ok());
        assert_eq!(inst.add_edge(2, 1, 5.), Err(EdgeRejection::Duplicate(2, 1)));
        assert_eq!(inst.nb_edges(), 1);
    }

    #[test]
    fn test_checker() {
        let inst = triangle();
        let good:Assignment = vec![(1,1), (2,2), (3,3)].into_iter().collect();
        assert_eq!(checker(&inst, &good), CheckerResult::Ok(6.));
        let conflict:Assignment = vec![(1,1), (2,2), (3,1)].into_iter().collect();
        assert_eq!(checker(&inst, &conflict), CheckerResult::Conflict(1, 3));
        let partial:Assignment = vec![(1,1), (2,2)].into_iter().collect();
        assert_eq!(checker(&inst, &partial), CheckerResult::MissingVertex(3));
        let bad_color:Assignment = vec![(1,5), (2,2), (3,3)].into_iter().collect();
        assert_eq!(checker(&inst, &bad_color), CheckerResult::InvalidColor(1, 5));
    }

    #[test]
    fn test_assignment_display() {
        let a:Assignment = vec![(2,2), (1,1)].into_iter().collect();
        assert_eq!(a.to_string(), "{1: 1, 2: 2}");
        assert_eq!(Assignment::new().to_string(), "{}");
    }

    #[test]
    #[should_panic]
    fn test_neighbors_of_unknown_vertex() {
        let inst = WeightedInstance::new(3, &[(1,2,1.)]).unwrap();
        inst.neighbors(4);
    }

    #[test]
    #[should_panic]
    fn test_degree_of_vertex_zero() {
        let inst = WeightedInstance::new(3, &[(1,2,1.)]).unwrap();
        inst.degree(0);
    }
}
