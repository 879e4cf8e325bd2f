use rand::Rng;

use crate::color::{MAX_VERTICES, WeightedInstance};
use crate::error::{ColoringError, Result};

/**
random instance: each pair of vertices is adjacent with probability `density`,
edge weights are drawn uniformly in [min_weight, max_weight] (rounded to one decimal).
*/
pub fn random_instance<R:Rng>(
    rng:&mut R,
    n:usize,
    density:f64,
    min_weight:f64,
    max_weight:f64,
) -> Result<WeightedInstance> {
    if n > MAX_VERTICES {
        return Err(ColoringError::InvalidParameter(format!("{} vertices (at most {})", n, MAX_VERTICES)));
    }
    if !(0. ..=1.).contains(&density) {
        return Err(ColoringError::InvalidParameter(format!("density {} not in [0,1]", density)));
    }
    if !(min_weight >= 0. && min_weight <= max_weight && max_weight.is_finite()) {
        return Err(ColoringError::InvalidParameter(
            format!("weights must satisfy 0 <= min ({}) <= max ({})", min_weight, max_weight)
        ));
    }
    let mut edges = Vec::new();
    for u in 1..=n {
        for v in u+1..=n {
            if rng.gen_bool(density) {
                let w:f64 = rng.gen_range(min_weight..=max_weight);
                edges.push((u, v, ((w * 10.).round() / 10.).max(min_weight).min(max_weight)));
            }
        }
    }
    WeightedInstance::new(n, &edges)
}


#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_density_bounds() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty = random_instance(&mut rng, 10, 0., 1., 2.).unwrap();
        assert_eq!(empty.nb_edges(), 0);
        let complete = random_instance(&mut rng, 10, 1., 1., 2.).unwrap();
        assert_eq!(complete.nb_edges(), 45);
        assert!(complete.edges().iter().all(|(_,_,w)| *w >= 1. && *w <= 2.));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = random_instance(&mut StdRng::seed_from_u64(7), 12, 0.4, 0., 5.).unwrap();
        let b = random_instance(&mut StdRng::seed_from_u64(7), 12, 0.4, 0., 5.).unwrap();
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(random_instance(&mut rng, 5, 1.5, 1., 2.).is_err());
        assert!(random_instance(&mut rng, 5, 0.5, 3., 2.).is_err());
        assert!(random_instance(&mut rng, 5, 0.5, -1., 2.).is_err());
        assert!(random_instance(&mut rng, MAX_VERTICES + 1, 0., 1., 1.).is_err());
    }
}
