//! Fixed-shape matrices over the [`Order`] semiring.

use crate::error::{Result, TerminationError};
use crate::order::Order;

/// A `rows × cols` matrix of [`Order`] values.
///
/// Entry `(r, c)` answers "how does argument `r` of the call relate to
/// pattern `c` of the caller?". Matrices are value-typed and immutable once
/// constructed; every operation returns a new matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallMatrix {
    rows: usize,
    cols: usize,
    entries: Vec<Order>,
}

impl CallMatrix {
    /// Build a matrix from a function of `(row, col)`.
    pub fn make(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Order) -> Self {
        let mut entries = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                entries.push(f(r, c));
            }
        }
        CallMatrix { rows, cols, entries }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, r: usize, c: usize) -> Order {
        self.entries[r * self.cols + c]
    }

    /// Matrix product over the `(compose, min)` semiring: `A: m×n`,
    /// `B: n×p` yields `m×p`.
    ///
    /// Fails with `Impossible` if `A.cols != B.rows`, which can only arise
    /// from a core bug since the walker derives matrix shapes from arities
    /// it establishes itself.
    pub fn compose(&self, other: &CallMatrix) -> Result<CallMatrix> {
        if self.cols != other.rows {
            return Err(TerminationError::impossible(format!(
                "matrix shape mismatch in composition: {}x{} * {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        let mut entries = Vec::with_capacity(self.rows * other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut acc = Order::Unk;
                for k in 0..self.cols {
                    let term = self.get(r, k).compose(other.get(k, c));
                    acc = acc.min(term);
                }
                entries.push(acc);
            }
        }
        Ok(CallMatrix { rows: self.rows, cols: other.cols, entries })
    }

    pub fn equals(&self, other: &CallMatrix) -> bool {
        self == other
    }

    /// The diagonal entries `(i,i)` of a square matrix.
    ///
    /// Fails with `Impossible` on a non-square matrix; only idempotent
    /// self-calls (`rows == cols`, since source == target) are ever asked
    /// for a diagonal.
    pub fn diagonal(&self) -> Result<Vec<Order>> {
        if self.rows != self.cols {
            return Err(TerminationError::impossible(format!(
                "diagonal of non-square matrix: {}x{}",
                self.rows, self.cols
            )));
        }
        Ok((0..self.rows).map(|i| self.get(i, i)).collect())
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }
}
