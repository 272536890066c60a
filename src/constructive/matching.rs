//! Minimum-weight perfect matching over a vertex subset.
//!
//! Small subsets (up to [`EXACT_LIMIT`] vertices) are matched optimally with
//! a bitmask DP that always pairs the lowest unmatched vertex. Larger
//! subsets fall back to a greedy shortest-edge matching refined by pairwise
//! exchanges until no swap of partners shortens it.

use crate::distance::DistanceMatrix;

/// Largest vertex count matched exactly.
pub const EXACT_LIMIT: usize = 20;

/// Pairs up `vertices` (which must have even length) into a perfect matching.
///
/// Returned pairs use the original city indices.
pub fn perfect_matching(distances: &DistanceMatrix, vertices: &[usize]) -> Vec<(usize, usize)> {
    debug_assert!(vertices.len() % 2 == 0, "perfect matching needs an even vertex count");
    if vertices.len() <= EXACT_LIMIT {
        exact_matching(distances, vertices)
    } else {
        greedy_matching(distances, vertices)
    }
}

fn exact_matching(distances: &DistanceMatrix, vertices: &[usize]) -> Vec<(usize, usize)> {
    let k = vertices.len();
    if k == 0 {
        return Vec::new();
    }
    let full = (1usize << k) - 1;
    let mut cost = vec![f64::INFINITY; 1 << k];
    let mut reached = vec![false; 1 << k];
    let mut pair = vec![(0u8, 0u8); 1 << k];
    cost[0] = 0.0;
    reached[0] = true;

    for mask in 0..full {
        if !reached[mask] {
            continue;
        }
        let i = (!mask).trailing_zeros() as usize;
        for j in (i + 1)..k {
            if mask & (1 << j) != 0 {
                continue;
            }
            let next = mask | (1 << i) | (1 << j);
            let c = cost[mask] + distances.get(vertices[i], vertices[j]);
            if !reached[next] || c < cost[next] {
                reached[next] = true;
                cost[next] = c;
                pair[next] = (i as u8, j as u8);
            }
        }
    }

    let mut matching = Vec::with_capacity(k / 2);
    let mut mask = full;
    while mask != 0 {
        let (i, j) = pair[mask];
        matching.push((vertices[i as usize], vertices[j as usize]));
        mask &= !((1 << i) | (1 << j));
    }
    matching
}

fn greedy_matching(distances: &DistanceMatrix, vertices: &[usize]) -> Vec<(usize, usize)> {
    let mut candidates = Vec::with_capacity(vertices.len() * vertices.len() / 2);
    for (a, &u) in vertices.iter().enumerate() {
        for &v in &vertices[a + 1..] {
            candidates.push((distances.get(u, v), u, v));
        }
    }
    candidates.sort_by(|x, y| x.0.total_cmp(&y.0));

    let n = distances.size();
    let mut matched = vec![false; n];
    let mut matching = Vec::with_capacity(vertices.len() / 2);
    for (_, u, v) in candidates {
        if !matched[u] && !matched[v] {
            matched[u] = true;
            matched[v] = true;
            matching.push((u, v));
        }
    }

    let mut improved = true;
    while improved {
        improved = false;
        for p in 0..matching.len() {
            for q in (p + 1)..matching.len() {
                let (a, b) = matching[p];
                let (c, d) = matching[q];
                let current = distances.get(a, b) + distances.get(c, d);
                let cross = distances.get(a, c) + distances.get(b, d);
                let twist = distances.get(a, d) + distances.get(b, c);
                if cross < current - 1e-10 && cross <= twist {
                    matching[p] = (a, c);
                    matching[q] = (b, d);
                    improved = true;
                } else if twist < current - 1e-10 {
                    matching[p] = (a, d);
                    matching[q] = (b, c);
                    improved = true;
                }
            }
        }
    }
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Atlas;
    use crate::random::create_rng;

    fn weight(dm: &DistanceMatrix, m: &[(usize, usize)]) -> f64 {
        m.iter().map(|&(a, b)| dm.get(a, b)).sum()
    }

    fn covers(m: &[(usize, usize)], vertices: &[usize]) -> bool {
        let mut seen: Vec<usize> = m.iter().flat_map(|&(a, b)| [a, b]).collect();
        seen.sort_unstable();
        let mut expected = vertices.to_vec();
        expected.sort_unstable();
        seen == expected
    }

    #[test]
    fn test_exact_pairs_close_points() {
        let atlas = Atlas::from_coords(vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (0.5, 0.0),
            (10.5, 0.0),
        ]);
        let m = perfect_matching(atlas.matrix(), &[0, 1, 2, 3]);
        assert!(covers(&m, &[0, 1, 2, 3]));
        assert!((weight(atlas.matrix(), &m) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_subset() {
        let atlas = Atlas::from_coords(vec![(0.0, 0.0)]);
        assert!(perfect_matching(atlas.matrix(), &[]).is_empty());
    }

    #[test]
    fn test_greedy_is_perfect_and_not_worse_than_exact_by_much() {
        let mut rng = create_rng(Some(21));
        let atlas = Atlas::random(16, 0.0, 100.0, &mut rng);
        let vertices: Vec<usize> = (0..16).collect();
        let exact = exact_matching(atlas.matrix(), &vertices);
        let greedy = greedy_matching(atlas.matrix(), &vertices);
        assert!(covers(&exact, &vertices));
        assert!(covers(&greedy, &vertices));
        assert!(weight(atlas.matrix(), &exact) <= weight(atlas.matrix(), &greedy) + 1e-9);
    }

    #[test]
    fn test_large_subset_uses_greedy() {
        let mut rng = create_rng(Some(2));
        let atlas = Atlas::random(30, 0.0, 100.0, &mut rng);
        let vertices: Vec<usize> = (0..24).collect();
        let m = perfect_matching(atlas.matrix(), &vertices);
        assert_eq!(m.len(), 12);
        assert!(covers(&m, &vertices));
    }

    #[test]
    fn test_infinite_edge_still_matched() {
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (f64::MAX, 0.0), (-f64::MAX, 0.0)]);
        assert_eq!(atlas.matrix().get(1, 2), f64::INFINITY);
        assert_eq!(perfect_matching(atlas.matrix(), &[1, 2]), vec![(1, 2)]);
    }
}
