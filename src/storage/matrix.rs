//! Symmetric adjacency matrix with amortized growth.
//!
//! Cells are stored row-major in a square allocation of `capacity × capacity`.
//! The logical dimension (`dim`) is tracked separately; growing past the
//! allocation doubles it, so adding vertices one at a time costs amortized
//! O(1) reallocations per vertex instead of a full copy each time.
//!
//! Each cell carries an explicit presence flag. `weight()` still reports
//! `0.0` for an absent edge, so callers that only look at numbers see the
//! same thing they would see in a plain numeric matrix, but traversal never
//! confuses a real zero-weight edge with no edge.

use std::fmt;

use crate::{Error, Result};

/// Smallest allocation ever made.
const MIN_CAPACITY: usize = 4;

/// Largest up-front reservation. Growth past it is driven by the dimension.
pub const MAX_RESERVED_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    cells: Vec<Option<f64>>,
    capacity: usize,
    dim: usize,
}

impl AdjacencyMatrix {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Empty matrix with room for `capacity` vertices before reallocating.
    ///
    /// The reservation is clamped to `MAX_RESERVED_CAPACITY`.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_RESERVED_CAPACITY);
        Self {
            cells: vec![None; capacity * capacity],
            capacity,
            dim: 0,
        }
    }

    /// Logical dimension (number of vertices).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Allocated dimension.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Extend by `n` vertices. Existing entries are kept, new ones are absent.
    pub fn grow(&mut self, n: usize) {
        let wanted = self.dim + n;
        if wanted > self.capacity {
            let new_capacity = wanted.max(self.capacity * 2).max(MIN_CAPACITY);
            self.reallocate(new_capacity);
        }
        self.dim = wanted;
    }

    fn reallocate(&mut self, new_capacity: usize) {
        tracing::debug!(
            from = self.capacity,
            to = new_capacity,
            dim = self.dim,
            "reallocating adjacency matrix"
        );
        // Only reachable with more vertices than memory can hold.
        let Some(len) = new_capacity.checked_mul(new_capacity) else {
            panic!("adjacency matrix capacity {new_capacity} overflows usize");
        };
        let mut cells = vec![None; len];
        for row in 0..self.dim {
            let old = &self.cells[row * self.capacity..row * self.capacity + self.dim];
            cells[row * new_capacity..row * new_capacity + self.dim].copy_from_slice(old);
        }
        self.cells = cells;
        self.capacity = new_capacity;
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        i * self.capacity + j
    }

    fn check_bounds(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.dim || j >= self.dim {
            return Err(Error::InvalidEdge(format!(
                "({i}, {j}) out of range for dimension {}",
                self.dim
            )));
        }
        Ok(())
    }

    /// Symmetric write. Weight must be finite and non-negative; no self-loops.
    pub fn set_edge(&mut self, i: usize, j: usize, weight: f64) -> Result<()> {
        self.check_bounds(i, j)?;
        if i == j {
            return Err(Error::InvalidEdge(format!("self-loop on vertex {i}")));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight(weight));
        }
        let (a, b) = (self.offset(i, j), self.offset(j, i));
        self.cells[a] = Some(weight);
        self.cells[b] = Some(weight);
        Ok(())
    }

    /// Stored edge, if any. Out-of-range indices read as absent.
    pub fn edge(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.dim || j >= self.dim {
            return None;
        }
        self.cells[self.offset(i, j)]
    }

    /// Numeric view: absent edges read as `0.0`.
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.edge(i, j).unwrap_or(0.0)
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.edge(i, j).is_some()
    }

    /// Every present edge of `i` (zero-weight included), ascending by `j`.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let row = if i < self.dim {
            &self.cells[i * self.capacity..i * self.capacity + self.dim]
        } else {
            &self.cells[0..0]
        };
        row.iter()
            .enumerate()
            .filter_map(|(j, &cell)| cell.map(|w| (j, w)))
    }

    /// Each undirected edge once, as `(i, j, weight)` with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.dim).flat_map(move |i| {
            self.neighbors(i)
                .filter(move |&(j, _)| j > i)
                .map(move |(j, w)| (i, j, w))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// `matrix[i][j] == matrix[j][i]` for every logical cell.
    pub fn is_symmetric(&self) -> bool {
        (0..self.dim).all(|i| (i + 1..self.dim).all(|j| self.edge(i, j) == self.edge(j, i)))
    }
}

impl Default for AdjacencyMatrix {
    fn default() -> Self {
        Self::new()
    }
}

/// Dense numeric dump, one row per line. Absent edges print as `0`.
impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.dim {
            let row: Vec<String> = (0..self.dim).map(|j| format!("{}", self.weight(i, j))).collect();
            writeln!(f, "[{}]", row.join(" "))?;
        }
        Ok(())
    }
}
