//! IRREDUNDANT: extract a minimal sub-cover
//!
//! The cover splits three ways: relatively essential cubes (E) that no
//! other cube can replace, totally redundant cubes (Rt) already inside
//! E ∪ D, and the partially redundant rest (Rp). For each Rp cube a
//! tautology-shaped recursion walks its cofactor space; wherever no E or D
//! row is full, the Rp cubes that are full there form one row of a
//! covering table ("keep at least one of these"). A unate covering call
//! then picks the cheapest set of Rp cubes, and E plus that set is the
//! irredundant cover.

use tracing::debug;

use super::context::{CubeContext, Word};
use super::count::{binate_split_select, massive_count};
use super::cube::{cdist0, full_row, var_intersects};
use super::cubelist::CubeList;
use super::family::{Attr, Family};
use super::matrix::SmMatrix;
use super::mincov::minimum_cover;
use super::unate::cube_is_covered;

/// Marks each cube of `f`: ACTIVE survives, RELESSEN is relatively
/// essential. The flags are left on `f` for the caller.
pub fn irred_split(ctx: &CubeContext, f: &mut Family, d: &Family) {
    f.set_all(Attr::ACTIVE);
    f.reset_all(Attr::RELESSEN);
    f.reset_all(Attr::NONESSEN);

    // relatively essential: not covered by the rest of F plus D
    let verdicts: Vec<bool> = {
        let fd = CubeList::from_families(ctx, f, d);
        (0..f.count())
            .map(|i| cube_is_covered(ctx, &fd, f.cube(i)))
            .collect()
    };
    for (i, covered) in verdicts.into_iter().enumerate() {
        if covered {
            f.attr_mut(i).set(Attr::NONESSEN);
        } else {
            f.attr_mut(i).set(Attr::RELESSEN);
        }
    }

    let e = f.keep(Attr::RELESSEN);

    // totally redundant: already inside E ∪ D
    let mut rp: Vec<usize> = Vec::new();
    {
        let ed = CubeList::from_families(ctx, &e, d);
        for i in 0..f.count() {
            if f.attr(i).test(Attr::RELESSEN) {
                continue;
            }
            if cube_is_covered(ctx, &ed, f.cube(i)) {
                f.attr_mut(i).reset(Attr::ACTIVE);
                f.attr_mut(i).set(Attr::REDUND);
            } else {
                rp.push(i);
            }
        }
    }
    debug!(
        essential = e.count(),
        partially_redundant = rp.len(),
        total = f.count(),
        "irredundant split"
    );
    if rp.is_empty() {
        return;
    }

    // witness table over the partially redundant cubes
    let mut rp_fam = Family::with_capacity(ctx, rp.len());
    for &i in &rp {
        rp_fam.push(f.cube(i));
    }
    let mut table = SmMatrix::new();
    let mut next_row = 0usize;
    for (col, _) in rp.iter().enumerate() {
        let list = TaggedList::derive(ctx, d, &e, &rp_fam, col);
        derive_rows(ctx, list, col, &mut table, &mut next_row);
    }

    let selected = minimum_cover(&table, None, true);
    for (col, &i) in rp.iter().enumerate() {
        if !selected.contains(&col) {
            f.attr_mut(i).reset(Attr::ACTIVE);
            f.attr_mut(i).set(Attr::REDUND);
        }
    }
}

/// Minimal sub-cover of `f` given the don't-care set.
pub fn irredundant(ctx: &CubeContext, mut f: Family, d: &Family) -> Family {
    irred_split(ctx, &mut f, d);
    f.keep(Attr::ACTIVE)
}

/// Cube list whose members remember whether they came from E ∪ D or from
/// which Rp column.
struct TaggedList<'a> {
    cof: Vec<Word>,
    cubes: Vec<&'a [Word]>,
    /// `None` for E/D rows, `Some(col)` for Rp rows.
    tags: Vec<Option<usize>>,
}

impl<'a> TaggedList<'a> {
    /// The cofactor of D ∪ E ∪ Rp against Rp cube `col` (which excludes
    /// itself by identity).
    fn derive(
        ctx: &CubeContext,
        d: &'a Family,
        e: &'a Family,
        rp: &'a Family,
        col: usize,
    ) -> TaggedList<'a> {
        let c = rp.cube(col);
        let mut cof = ctx.new_cube();
        for (w, x) in cof.iter_mut().enumerate() {
            *x |= ctx.fullset()[w] & !c[w];
        }
        let mut cubes = Vec::new();
        let mut tags = Vec::new();
        for p in d.iter().chain(e.iter()) {
            if cdist0(ctx, p, c) {
                cubes.push(p);
                tags.push(None);
            }
        }
        for (k, p) in rp.iter().enumerate() {
            if k != col && cdist0(ctx, p, c) {
                cubes.push(p);
                tags.push(Some(k));
            }
        }
        TaggedList { cof, cubes, tags }
    }

    fn scofactor(&self, ctx: &CubeContext, c: &[Word], var: usize) -> TaggedList<'a> {
        let mut cof = self.cof.clone();
        let mask = ctx.var_mask(var);
        for w in ctx.first_word(var)..=ctx.last_word(var) {
            cof[w] |= mask[w] & !c[w];
        }
        let mut cubes = Vec::new();
        let mut tags = Vec::new();
        for (p, &t) in self.cubes.iter().zip(&self.tags) {
            if var_intersects(ctx, p, c, var) {
                cubes.push(*p);
                tags.push(t);
            }
        }
        TaggedList { cof, cubes, tags }
    }

    fn as_cubelist(&self) -> CubeList<'a> {
        CubeList {
            cof: self.cof.clone(),
            cubes: self.cubes.clone(),
        }
    }
}

/// The tautology recursion that emits covering rows instead of answering
/// yes/no: a full E/D row means the region is covered for free, otherwise
/// the full Rp rows (plus the cube under test itself) become one
/// at-least-one-of row of the table.
fn derive_rows(
    ctx: &CubeContext,
    t: TaggedList<'_>,
    target: usize,
    table: &mut SmMatrix,
    next_row: &mut usize,
) {
    // covered for free by an essential or don't-care row
    for (p, tag) in t.cubes.iter().zip(&t.tags) {
        if tag.is_none() && full_row(ctx, p, &t.cof) {
            return;
        }
    }
    let full_rp: Vec<usize> = t
        .cubes
        .iter()
        .zip(&t.tags)
        .filter_map(|(p, tag)| {
            tag.filter(|_| full_row(ctx, p, &t.cof))
        })
        .collect();
    if !full_rp.is_empty() {
        let row = *next_row;
        *next_row += 1;
        table.insert(row, target);
        for col in full_rp {
            table.insert(row, col);
        }
        // bound table growth
        if row % 1000 == 999 {
            table.row_dominance();
        }
        return;
    }

    let data = massive_count(ctx, &t.as_cubelist());
    if t.cubes.is_empty() || data.vars_active == 0 || data.zero_column(t.cubes.len()).is_some()
    {
        panic!("partially redundant cube has an uncovered region");
    }
    let (var, cl, cr) = binate_split_select(ctx, &data).expect("active variable exists");
    derive_rows(ctx, t.scofactor(ctx, &cl, var), target, table, next_row);
    derive_rows(ctx, t.scofactor(ctx, &cr, var), target, table, next_row);
}
