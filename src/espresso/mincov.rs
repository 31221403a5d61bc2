//! Unate covering solver
//!
//! `minimum_cover` picks a minimum-weight set of columns hitting every row
//! of a sparse matrix. The solver alternates row and column dominance,
//! takes essential columns (rows of length one) as forced, splits
//! independent blocks, and otherwise branches on the most valuable column
//! with a lower bound from an independent set of rows pruning the search.
//! In heuristic mode the branch always includes the chosen column and the
//! first complete cover wins.

use super::matrix::SmMatrix;

/// Minimum-weight column cover of `m`.
///
/// `weights` is indexed by column number (weight 1 everywhere when absent).
/// With `heuristic` set, the greedy descent returns the first cover found;
/// otherwise the search is exhaustive branch-and-bound.
pub fn minimum_cover(m: &SmMatrix, weights: Option<&[usize]>, heuristic: bool) -> Vec<usize> {
    // independent blocks are covered independently
    if let Some((a, b)) = m.block_partition() {
        let mut sol = minimum_cover(&a, weights, heuristic);
        sol.extend(minimum_cover(&b, weights, heuristic));
        sol.sort_unstable();
        return sol;
    }

    let mut best: Option<(usize, Vec<usize>)> = None;
    branch(m.clone(), Vec::new(), 0, weights, heuristic, &mut best);
    let mut sol = best.map(|(_, cols)| cols).unwrap_or_default();
    sol.sort_unstable();
    sol
}

fn weight_of(weights: Option<&[usize]>, col: usize) -> usize {
    weights.map_or(1, |w| w[col])
}

fn branch(
    mut m: SmMatrix,
    mut select: Vec<usize>,
    mut weight: usize,
    weights: Option<&[usize]>,
    heuristic: bool,
    best: &mut Option<(usize, Vec<usize>)>,
) {
    // reductions to a fixed point
    loop {
        // essential columns: a row of length one forces its column
        let mut forced = None;
        for r in m.row_numbers() {
            if m.row_len(r) == 1 {
                forced = Some(m.row_cols(r)[0]);
                break;
            }
        }
        if let Some(col) = forced {
            weight += weight_of(weights, col);
            select.push(col);
            cover_column(&mut m, col);
            if bounded(weight, best) {
                return;
            }
            continue;
        }
        let mut changed = m.row_dominance();
        changed |= m.col_dominance(weights);
        if !changed {
            break;
        }
    }

    if m.num_rows() == 0 {
        if best.as_ref().is_none_or(|(bw, _)| weight < *bw) {
            select.sort_unstable();
            *best = Some((weight, select));
        }
        return;
    }

    if bounded(weight + lower_bound(&m, weights), best) {
        return;
    }

    // branch on the column covering the most rows per unit weight; ties go
    // to the lower column number
    let col = m
        .col_numbers()
        .into_iter()
        .max_by(|&a, &b| {
            let ka = m.col_len(a) * weight_of(weights, b).max(1);
            let kb = m.col_len(b) * weight_of(weights, a).max(1);
            ka.cmp(&kb).then(b.cmp(&a))
        })
        .expect("rows remain, so columns remain");

    // include the column
    let mut with = m.clone();
    cover_column(&mut with, col);
    let mut sel = select.clone();
    sel.push(col);
    branch(
        with,
        sel,
        weight + weight_of(weights, col),
        weights,
        heuristic,
        best,
    );

    if heuristic && best.is_some() {
        return;
    }

    // exclude the column, unless some row depends on it alone
    let excludable = m.col_rows(col).iter().all(|&r| m.row_len(r) > 1);
    if excludable {
        m.delete_col(col);
        branch(m, select, weight, weights, heuristic, best);
    }
}

fn bounded(weight: usize, best: &Option<(usize, Vec<usize>)>) -> bool {
    best.as_ref().is_some_and(|(bw, _)| weight >= *bw)
}

/// Select a column: every row it covers is satisfied and disappears.
fn cover_column(m: &mut SmMatrix, col: usize) {
    for r in m.col_rows(col) {
        m.delete_row(r);
    }
    m.delete_col(col);
}

/// Greedy maximal independent row set; pairwise column-disjoint rows each
/// need a distinct column, so their cheapest columns sum to a lower bound.
fn lower_bound(m: &SmMatrix, weights: Option<&[usize]>) -> usize {
    let mut used_cols: Vec<usize> = Vec::new();
    let mut bound = 0;
    let mut rows = m.row_numbers();
    rows.sort_by_key(|&r| m.row_len(r));
    for r in rows {
        let cols = m.row_cols(r);
        if cols.iter().any(|c| used_cols.contains(c)) {
            continue;
        }
        bound += cols
            .iter()
            .map(|&c| weight_of(weights, c))
            .min()
            .unwrap_or(0);
        used_cols.extend(cols);
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[usize]]) -> SmMatrix {
        let mut m = SmMatrix::new();
        for (r, cols) in rows.iter().enumerate() {
            for &c in *cols {
                m.insert(r, c);
            }
        }
        m
    }

    #[test]
    fn essential_column_is_taken() {
        let m = matrix(&[&[0], &[0, 1], &[1, 2]]);
        let sol = minimum_cover(&m, None, false);
        assert!(sol.contains(&0));
        assert_eq!(sol.len(), 2);
    }

    #[test]
    fn finds_minimum_cardinality() {
        // classic: {0,1}, {1,2}, {0,2} is covered by any two columns
        let m = matrix(&[&[0, 1], &[1, 2], &[0, 2]]);
        let sol = minimum_cover(&m, None, false);
        assert_eq!(sol.len(), 2);

        // one column covering everything beats several partial ones
        let m = matrix(&[&[0, 9], &[1, 9], &[2, 9]]);
        let sol = minimum_cover(&m, None, false);
        assert_eq!(sol, vec![9]);
    }

    #[test]
    fn respects_weights() {
        // column 9 covers both rows but costs more than the two cheap ones
        let m = matrix(&[&[0, 9], &[1, 9]]);
        let mut weights = vec![1usize; 10];
        weights[9] = 5;
        let sol = minimum_cover(&m, Some(&weights), false);
        assert_eq!(sol, vec![0, 1]);

        weights[9] = 1;
        let sol = minimum_cover(&m, Some(&weights), false);
        assert_eq!(sol, vec![9]);
    }

    #[test]
    fn heuristic_finds_some_cover() {
        let m = matrix(&[&[0, 1], &[1, 2], &[0, 2], &[3]]);
        let sol = minimum_cover(&m, None, true);
        // every row hit
        for r in 0..4 {
            let cols = m.row_cols(r);
            assert!(cols.iter().any(|c| sol.contains(c)), "row {r} uncovered");
        }
    }

    #[test]
    fn independent_blocks_solved_separately() {
        let m = matrix(&[&[0, 1], &[5], &[5, 6]]);
        let sol = minimum_cover(&m, None, false);
        assert!(sol.contains(&5));
        assert_eq!(sol.len(), 2);
    }

    #[test]
    fn dominance_preserves_optimum() {
        // row 2 dominates row 0; col 2 dominated by col 1
        let mut m = matrix(&[&[1], &[1, 2], &[1, 3]]);
        let plain = minimum_cover(&m, None, false);
        m.row_dominance();
        m.col_dominance(None);
        let reduced = minimum_cover(&m, None, false);
        assert_eq!(plain.len(), reduced.len());
        assert_eq!(plain, vec![1]);
    }
}
