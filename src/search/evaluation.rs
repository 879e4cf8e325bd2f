use crate::color::{Assignment, ColorId, VertexId, WeightedInstance};

/// true iff no colored neighbor of v already uses color c. O(d(v))
pub fn is_valid(inst:&WeightedInstance, v:VertexId, c:ColorId, assignment:&Assignment) -> bool {
    inst.neighbors(v).iter().all(|u| assignment.get(*u) != Some(c))
}

/// colors that v can take under the assignment, ascending
pub fn valid_colors(inst:&WeightedInstance, v:VertexId, assignment:&Assignment) -> Vec<ColorId> {
    crate::color::COLORS.iter().copied()
        .filter(|c| is_valid(inst, v, *c, assignment))
        .collect()
}

/**
cost realized by coloring v: sum of the weights of the edges between v
and its already colored neighbors.
*/
pub fn realized_cost(inst:&WeightedInstance, v:VertexId, assignment:&Assignment) -> f64 {
    inst.weighted_neighbors(v)
        .filter(|(u,_)| assignment.contains(*u))
        .map(|(_,w)| w)
        .sum()
}

/**
lookahead estimate for v: (number of uncolored neighbors) × (average weight of the edges of v).
0 if v is isolated.

This is a measure of the constraint pressure left around v. It may overestimate the
remaining cost, so it is not admissible and best-first search guided by it is not optimal.
*/
pub fn heuristic(inst:&WeightedInstance, v:VertexId, assignment:&Assignment) -> f64 {
    let degree = inst.degree(v);
    if degree == 0 { return 0.; }
    let uncolored = inst.neighbors(v).iter().filter(|u| !assignment.contains(**u)).count();
    let average = inst.weighted_neighbors(v).map(|(_,w)| w).sum::<f64>() / degree as f64;
    uncolored as f64 * average
}

/// cost of an assignment built by coloring `order` one vertex at a time (sum of realized costs)
pub fn path_cost(inst:&WeightedInstance, order:&[VertexId], assignment:&Assignment) -> f64 {
    let mut partial = Assignment::new();
    let mut res = 0.;
    for v in order {
        if let Some(c) = assignment.get(*v) {
            partial.insert(*v, c);
            res += realized_cost(inst, *v, &partial);
        }
    }
    res
}
