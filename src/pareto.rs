//! Pareto dominance, non-dominated sorting and exact hypervolume.
//!
//! All functions work in minimization space: every objective is to be made
//! as small as possible.
//!
//! # Available functions
//!
//! | Function | Purpose |
//! |---|---|
//! | [`dominates`] | Pareto-dominance test between two objective vectors |
//! | [`non_dominated_sort`] | Rank solutions into successive fronts (front 0, 1, …) |
//! | [`pareto_front_indices`] | Filter to non-dominated (Pareto-optimal) solutions only |
//! | [`hypervolume`] | Volume of objective space dominated by a set, bounded by a reference point |
//! | [`hypervolume_contributions`] | Exclusive hypervolume of every point of a set |
//!
//! # Example
//!
//! ```
//! use mocma::pareto::{hypervolume, hypervolume_contributions, non_dominated_sort};
//!
//! let solutions = vec![
//!     vec![1.0, 5.0], // Pareto-optimal
//!     vec![5.0, 1.0], // Pareto-optimal
//!     vec![3.0, 3.0], // Pareto-optimal
//!     vec![4.0, 4.0], // Dominated by (3, 3)
//! ];
//!
//! let fronts = non_dominated_sort(&solutions);
//! assert_eq!(fronts, vec![vec![0, 1, 2], vec![3]]);
//!
//! let front: Vec<_> = fronts[0].iter().map(|&i| solutions[i].clone()).collect();
//! let hv = hypervolume(&front, &[6.0, 6.0]);
//! assert!((hv - 13.0).abs() < 1e-12);
//!
//! let contributions = hypervolume_contributions(&front, &[6.0, 6.0]);
//! assert!((contributions[2] - 4.0).abs() < 1e-12);
//! ```

/// Returns `true` if `a` Pareto-dominates `b`.
///
/// `a` dominates `b` if it is no worse in every objective and strictly
/// better in at least one.
#[must_use]
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len());

    let mut strictly_better = false;
    for (&av, &bv) in a.iter().zip(b) {
        if av > bv {
            return false;
        }
        if av < bv {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Fast non-dominated sorting (Deb et al., 2002).
///
/// Returns `fronts` where `fronts[0]` is the Pareto front. Each inner vec
/// holds indices into `values` in ascending order, so callers that walk a
/// front get a stable, index-based tie-break.
///
/// Complexity: O(M * N^2) where M = objectives, N = solutions.
#[must_use]
pub fn non_dominated_sort(values: &[Vec<f64>]) -> Vec<Vec<usize>> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    // S_p: set of solutions dominated by p
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    // n_p: domination count for p
    let mut domination_count: Vec<usize> = vec![0; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&values[i], &values[j]) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if dominates(&values[j], &values[i]) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current_front.is_empty() {
        let mut next_front: Vec<usize> = Vec::new();
        for &p in &current_front {
            for &q in &dominated_by[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next_front.push(q);
                }
            }
        }
        next_front.sort_unstable();
        fronts.push(current_front);
        current_front = next_front;
    }

    fronts
}

/// Indices of the non-dominated solutions, in ascending order.
///
/// Equivalent to `non_dominated_sort(solutions)[0]`.
#[must_use]
pub fn pareto_front_indices(solutions: &[Vec<f64>]) -> Vec<usize> {
    non_dominated_sort(solutions)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Compute the hypervolume indicator of a point set.
///
/// The hypervolume is the volume of the objective space dominated by the
/// set and bounded by `reference`. A **higher** hypervolume indicates a
/// better set. Points that do not strictly dominate the reference point in
/// every objective contribute nothing and are ignored here; the indicator
/// layer rejects them instead.
///
/// Uses a sweep in two dimensions and recursive slicing above.
#[must_use]
pub fn hypervolume(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    debug_assert!(points.iter().all(|p| p.len() == reference.len()));

    let filtered: Vec<Vec<f64>> = points
        .iter()
        .filter(|p| p.iter().zip(reference).all(|(&pv, &rv)| pv < rv))
        .cloned()
        .collect();

    if filtered.is_empty() || reference.is_empty() {
        return 0.0;
    }

    hv_recursive(&filtered, reference)
}

/// Exclusive hypervolume contribution of each point: the volume lost when
/// that point alone is removed from the set.
///
/// Duplicated points contribute zero each, since every copy is covered by
/// the others.
#[must_use]
pub fn hypervolume_contributions(points: &[Vec<f64>], reference: &[f64]) -> Vec<f64> {
    if points.is_empty() {
        return Vec::new();
    }
    if reference.len() == 2
        && let Some(contributions) = contributions_2d(points, reference)
    {
        return contributions;
    }

    let total = hypervolume(points, reference);
    (0..points.len())
        .map(|i| {
            let others: Vec<Vec<f64>> = points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, p)| p.clone())
                .collect();
            (total - hypervolume(&others, reference)).max(0.0)
        })
        .collect()
}

/// Neighbour formula for a mutually non-dominated 2-D set.
///
/// Returns `None` if the set contains dominated points, in which case the
/// caller falls back to the general computation.
fn contributions_2d(points: &[Vec<f64>], reference: &[f64]) -> Option<Vec<f64>> {
    let n = points.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        points[a][0]
            .total_cmp(&points[b][0])
            .then(points[a][1].total_cmp(&points[b][1]))
    });

    for w in order.windows(2) {
        let (p, q) = (&points[w[0]], &points[w[1]]);
        #[allow(clippy::float_cmp)]
        let duplicate = p[0] == q[0] && p[1] == q[1];
        if !duplicate && !(q[0] > p[0] && q[1] < p[1]) {
            return None;
        }
    }

    let mut contributions = vec![0.0; n];
    for (k, &i) in order.iter().enumerate() {
        let p = &points[i];
        let right = if k + 1 < n {
            points[order[k + 1]][0].min(reference[0])
        } else {
            reference[0]
        };
        let up = if k > 0 {
            points[order[k - 1]][1].min(reference[1])
        } else {
            reference[1]
        };
        contributions[i] = (right - p[0]).max(0.0) * (up - p[1]).max(0.0);
    }
    Some(contributions)
}

/// Recursive hypervolume via slicing on the last objective.
///
/// All points strictly dominate `reference`.
fn hv_recursive(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let d = reference.len();

    // Base case: 1-D hypervolume is just the gap from the best point to ref.
    if d == 1 {
        let min_val = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
        return (reference[0] - min_val).max(0.0);
    }

    // Single point: hypervolume is the product of gaps.
    if points.len() == 1 {
        return points[0]
            .iter()
            .zip(reference)
            .map(|(&p, &r)| (r - p).max(0.0))
            .product();
    }

    if d == 2 {
        return hv_2d(points, reference);
    }

    // Sort by last objective ascending.
    let mut sorted: Vec<&Vec<f64>> = points.iter().collect();
    sorted.sort_by(|a, b| a[d - 1].total_cmp(&b[d - 1]));

    let sub_ref = &reference[..d - 1];
    let mut result = 0.0;

    for i in 0..sorted.len() {
        let height = if i + 1 < sorted.len() {
            sorted[i + 1][d - 1] - sorted[i][d - 1]
        } else {
            reference[d - 1] - sorted[i][d - 1]
        };

        if height <= 0.0 {
            continue;
        }

        // Project points[0..=i] onto the first d-1 dimensions and
        // keep only the non-dominated subset.
        let projected: Vec<Vec<f64>> = sorted[..=i].iter().map(|p| p[..d - 1].to_vec()).collect();
        let non_dom = non_dominated_minimize(&projected);

        if !non_dom.is_empty() {
            result += height * hv_recursive(&non_dom, sub_ref);
        }
    }

    result
}

/// Sweep along the first objective, accumulating the staircase area.
fn hv_2d(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let mut sorted: Vec<&Vec<f64>> = points.iter().collect();
    sorted.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));

    let mut area = 0.0;
    let mut ceiling = reference[1];
    for p in sorted {
        if p[1] < ceiling {
            area += (reference[0] - p[0]) * (ceiling - p[1]);
            ceiling = p[1];
        }
    }
    area
}

/// Return the non-dominated subset of `points`, dropping exact duplicates.
fn non_dominated_minimize(points: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let mut result: Vec<Vec<f64>> = Vec::new();
    'outer: for (i, p) in points.iter().enumerate() {
        for (j, q) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            if dominates(q, p) || (j < i && q == p) {
                continue 'outer;
            }
        }
        result.push(p.clone());
    }
    result
}
