use std::ops::{Index, IndexMut};

use log::debug;

use crate::{error::OutOfRangeError, vector::Vector};

/// A `rows x cols` grid of `i32` stored as a [`Vector`] of row vectors.
///
/// Dimensions are fixed at construction and every row holds exactly `cols`
/// elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) data: Vector<Vector<i32>>,
}
impl Matrix {
    /// A zero-filled grid.
    pub fn new(rows: isize, cols: isize) -> Result<Self, OutOfRangeError> {
        let (Ok(r), Ok(c)) = (usize::try_from(rows), usize::try_from(cols)) else {
            return Err(OutOfRangeError::NegativeDimensions { rows, cols });
        };
        Ok(Self::zeros(r, c))
    }

    fn zeros(rows: usize, cols: usize) -> Self {
        debug!("matrix: {rows}x{cols}");
        let mut data = Vector::with_capacity(rows);
        for _ in 0..rows {
            let mut row = Vector::with_capacity(cols);
            for _ in 0..cols {
                row.push_back(0);
            }
            data.push_back(row);
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> Result<&i32, OutOfRangeError> {
        self.data.at(i)?.at(j)
    }
    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut i32, OutOfRangeError> {
        self.data.at_mut(i)?.at_mut(j)
    }

    pub fn row(&self, i: usize) -> Result<&[i32], OutOfRangeError> {
        Ok(self.data.at(i)?.as_slice())
    }

    /// Element-wise sum; both operands must have the same dimensions and no
    /// cell may overflow `i32`.
    pub fn try_add(&self, other: &Self) -> Result<Self, OutOfRangeError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(OutOfRangeError::DimensionMismatch {
                rows: self.rows,
                cols: self.cols,
                other_rows: other.rows,
                other_cols: other.cols,
            });
        }
        let mut sum = Self::zeros(self.rows, self.cols);
        for (row, ((out, a), b)) in sum
            .data
            .iter_mut()
            .zip(&self.data)
            .zip(&other.data)
            .enumerate()
        {
            for (col, ((out, a), b)) in out.iter_mut().zip(a).zip(b).enumerate() {
                *out = a
                    .checked_add(*b)
                    .ok_or(OutOfRangeError::Overflow { row, col })?;
            }
        }
        Ok(sum)
    }
}
/// Panics on an out-of-range row or column.
impl Index<(usize, usize)> for Matrix {
    type Output = i32;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[i][j]
    }
}
impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        &mut self.data[i][j]
    }
}
