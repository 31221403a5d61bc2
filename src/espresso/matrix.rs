//! Sparse row/column matrix
//!
//! A doubly-linked grid: each element knows its row and column number and
//! its four neighbors; rows and columns are addressable by number and know
//! their lengths. Elements live in an arena vector and link by index, with
//! a free list recycling deleted slots. Row and column directories are
//! ordered maps so every traversal is deterministic.
//!
//! The covering solver drives the two reduction passes implemented here:
//! row dominance (a row whose column set contains another row's is
//! dropped) and weighted column dominance (a column covering a subset of
//! another's rows at no smaller cost is dropped).

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
struct Element {
    row: usize,
    col: usize,
    next_in_row: Option<usize>,
    prev_in_row: Option<usize>,
    next_in_col: Option<usize>,
    prev_in_col: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Line {
    first: Option<usize>,
    last: Option<usize>,
    len: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SmMatrix {
    elems: Vec<Option<Element>>,
    free: Vec<usize>,
    rows: BTreeMap<usize, Line>,
    cols: BTreeMap<usize, Line>,
}

impl SmMatrix {
    pub fn new() -> Self {
        SmMatrix::default()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    pub fn row_numbers(&self) -> Vec<usize> {
        self.rows.keys().copied().collect()
    }

    pub fn col_numbers(&self) -> Vec<usize> {
        self.cols.keys().copied().collect()
    }

    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(&row).map_or(0, |l| l.len)
    }

    pub fn col_len(&self, col: usize) -> usize {
        self.cols.get(&col).map_or(0, |l| l.len)
    }

    /// Columns of a row, ascending.
    pub fn row_cols(&self, row: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = self.rows.get(&row).and_then(|l| l.first);
        while let Some(id) = cur {
            let e = self.elems[id].expect("live element");
            out.push(e.col);
            cur = e.next_in_row;
        }
        out
    }

    /// Rows of a column, ascending.
    pub fn col_rows(&self, col: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = self.cols.get(&col).and_then(|l| l.first);
        while let Some(id) = cur {
            let e = self.elems[id].expect("live element");
            out.push(e.row);
            cur = e.next_in_col;
        }
        out
    }

    pub fn find(&self, row: usize, col: usize) -> bool {
        let mut cur = self.rows.get(&row).and_then(|l| l.first);
        while let Some(id) = cur {
            let e = self.elems[id].expect("live element");
            if e.col == col {
                return true;
            }
            if e.col > col {
                return false;
            }
            cur = e.next_in_row;
        }
        false
    }

    /// Insert element (row, col); inserting twice is a no-op.
    pub fn insert(&mut self, row: usize, col: usize) {
        if self.find(row, col) {
            return;
        }
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                self.elems.push(None);
                self.elems.len() - 1
            }
        };
        self.elems[id] = Some(Element {
            row,
            col,
            next_in_row: None,
            prev_in_row: None,
            next_in_col: None,
            prev_in_col: None,
        });
        self.link_into_row(id, row, col);
        self.link_into_col(id, row, col);
    }

    fn link_into_row(&mut self, id: usize, row: usize, col: usize) {
        let line = self.rows.entry(row).or_default();
        // find the first element with a larger column number
        let mut after = line.first;
        while let Some(a) = after {
            if self.elems[a].unwrap().col > col {
                break;
            }
            after = self.elems[a].unwrap().next_in_row;
        }
        let line = self.rows.get_mut(&row).unwrap();
        match after {
            None => {
                let prev = line.last;
                self.elems[id].as_mut().unwrap().prev_in_row = prev;
                if let Some(p) = prev {
                    self.elems[p].as_mut().unwrap().next_in_row = Some(id);
                } else {
                    line.first = Some(id);
                }
                line.last = Some(id);
            }
            Some(a) => {
                let prev = self.elems[a].unwrap().prev_in_row;
                self.elems[id].as_mut().unwrap().next_in_row = Some(a);
                self.elems[id].as_mut().unwrap().prev_in_row = prev;
                self.elems[a].as_mut().unwrap().prev_in_row = Some(id);
                if let Some(p) = prev {
                    self.elems[p].as_mut().unwrap().next_in_row = Some(id);
                } else {
                    line.first = Some(id);
                }
            }
        }
        self.rows.get_mut(&row).unwrap().len += 1;
    }

    fn link_into_col(&mut self, id: usize, row: usize, col: usize) {
        let line = self.cols.entry(col).or_default();
        let mut after = line.first;
        while let Some(a) = after {
            if self.elems[a].unwrap().row > row {
                break;
            }
            after = self.elems[a].unwrap().next_in_col;
        }
        let line = self.cols.get_mut(&col).unwrap();
        match after {
            None => {
                let prev = line.last;
                self.elems[id].as_mut().unwrap().prev_in_col = prev;
                if let Some(p) = prev {
                    self.elems[p].as_mut().unwrap().next_in_col = Some(id);
                } else {
                    line.first = Some(id);
                }
                line.last = Some(id);
            }
            Some(a) => {
                let prev = self.elems[a].unwrap().prev_in_col;
                self.elems[id].as_mut().unwrap().next_in_col = Some(a);
                self.elems[id].as_mut().unwrap().prev_in_col = prev;
                self.elems[a].as_mut().unwrap().prev_in_col = Some(id);
                if let Some(p) = prev {
                    self.elems[p].as_mut().unwrap().next_in_col = Some(id);
                } else {
                    line.first = Some(id);
                }
            }
        }
        self.cols.get_mut(&col).unwrap().len += 1;
    }

    fn unlink(&mut self, id: usize) {
        let e = self.elems[id].expect("live element");
        // row chain
        match e.prev_in_row {
            Some(p) => self.elems[p].as_mut().unwrap().next_in_row = e.next_in_row,
            None => self.rows.get_mut(&e.row).unwrap().first = e.next_in_row,
        }
        match e.next_in_row {
            Some(n) => self.elems[n].as_mut().unwrap().prev_in_row = e.prev_in_row,
            None => self.rows.get_mut(&e.row).unwrap().last = e.prev_in_row,
        }
        let row_line = self.rows.get_mut(&e.row).unwrap();
        row_line.len -= 1;
        if row_line.len == 0 {
            self.rows.remove(&e.row);
        }
        // column chain
        match e.prev_in_col {
            Some(p) => self.elems[p].as_mut().unwrap().next_in_col = e.next_in_col,
            None => self.cols.get_mut(&e.col).unwrap().first = e.next_in_col,
        }
        match e.next_in_col {
            Some(n) => self.elems[n].as_mut().unwrap().prev_in_col = e.prev_in_col,
            None => self.cols.get_mut(&e.col).unwrap().last = e.prev_in_col,
        }
        let col_line = self.cols.get_mut(&e.col).unwrap();
        col_line.len -= 1;
        if col_line.len == 0 {
            self.cols.remove(&e.col);
        }
        self.elems[id] = None;
        self.free.push(id);
    }

    pub fn delete_row(&mut self, row: usize) {
        let mut cur = self.rows.get(&row).and_then(|l| l.first);
        while let Some(id) = cur {
            cur = self.elems[id].unwrap().next_in_row;
            self.unlink(id);
        }
    }

    pub fn delete_col(&mut self, col: usize) {
        let mut cur = self.cols.get(&col).and_then(|l| l.first);
        while let Some(id) = cur {
            cur = self.elems[id].unwrap().next_in_col;
            self.unlink(id);
        }
    }

    /// Drop every row whose column set contains some other row's column
    /// set (the superset row asks for nothing extra). Equal rows keep the
    /// lower number. Returns true when anything was deleted.
    pub fn row_dominance(&mut self) -> bool {
        let rows = self.row_numbers();
        let sets: BTreeMap<usize, Vec<usize>> =
            rows.iter().map(|&r| (r, self.row_cols(r))).collect();
        let mut doomed = Vec::new();
        for &r1 in &rows {
            for &r2 in &rows {
                if r1 == r2 || doomed.contains(&r1) || doomed.contains(&r2) {
                    continue;
                }
                let a = &sets[&r1];
                let b = &sets[&r2];
                if is_subset(b, a) && (a.len() > b.len() || r1 > r2) {
                    doomed.push(r1);
                }
            }
        }
        for &r in &doomed {
            self.delete_row(r);
        }
        !doomed.is_empty()
    }

    /// Drop every column covered by a cheaper-or-equal column with a
    /// superset of its rows. Equal columns keep the lower number.
    pub fn col_dominance(&mut self, weights: Option<&[usize]>) -> bool {
        let w = |c: usize| weights.map_or(1, |ws| ws[c]);
        let cols = self.col_numbers();
        let sets: BTreeMap<usize, Vec<usize>> =
            cols.iter().map(|&c| (c, self.col_rows(c))).collect();
        let mut doomed = Vec::new();
        for &c1 in &cols {
            for &c2 in &cols {
                if c1 == c2 || doomed.contains(&c1) || doomed.contains(&c2) {
                    continue;
                }
                let a = &sets[&c1];
                let b = &sets[&c2];
                if is_subset(a, b)
                    && w(c1) >= w(c2)
                    && (a.len() < b.len() || w(c1) > w(c2) || c1 > c2)
                {
                    doomed.push(c1);
                }
            }
        }
        for &c in &doomed {
            self.delete_col(c);
        }
        !doomed.is_empty()
    }

    /// Split into two row/column-independent blocks, if the rows fall into
    /// disconnected components.
    pub fn block_partition(&self) -> Option<(SmMatrix, SmMatrix)> {
        let rows = self.row_numbers();
        if rows.len() < 2 {
            return None;
        }
        let mut in_block: BTreeMap<usize, bool> = rows.iter().map(|&r| (r, false)).collect();
        let mut block_cols: Vec<usize> = self.row_cols(rows[0]);
        in_block.insert(rows[0], true);
        let mut changed = true;
        while changed {
            changed = false;
            for &r in &rows[1..] {
                if in_block[&r] {
                    continue;
                }
                let cols = self.row_cols(r);
                if cols.iter().any(|c| block_cols.contains(c)) {
                    block_cols.extend(cols);
                    in_block.insert(r, true);
                    changed = true;
                }
            }
        }
        if in_block.values().all(|&b| b) {
            return None;
        }
        let mut a = SmMatrix::new();
        let mut b = SmMatrix::new();
        for &r in &rows {
            let target = if in_block[&r] { &mut a } else { &mut b };
            for c in self.row_cols(r) {
                target.insert(r, c);
            }
        }
        Some((a, b))
    }
}

/// Is sorted `a` a subset of sorted `b`?
fn is_subset(a: &[usize], b: &[usize]) -> bool {
    let mut it = b.iter();
    'outer: for x in a {
        for y in it.by_ref() {
            if y == x {
                continue 'outer;
            }
            if y > x {
                return false;
            }
        }
        return false;
    }
    true
}
