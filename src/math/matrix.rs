use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rayon::prelude::*;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::{Error, Result, Shape};

/// Offset added before taking a logarithm; also the smallest accepted input.
pub const EPSILON: f64 = 1e-7;

/// Element count above which elementwise work is split across rayon workers.
const PARALLEL_THRESHOLD: usize = 1 << 14;

/// Dense row-major matrix of `f64`.
///
/// `data.len() == rows * cols` always holds; the fields are private so no
/// caller can break it. Every shape-sensitive operation checks its operands
/// and returns `Error::ShapeMismatch` instead of broadcasting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Wraps a row-major buffer; its length must equal `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Matrix> {
        if data.len() != rows * cols {
            return Err(Error::invalid(format!(
                "buffer of {} elements cannot back a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Builds a matrix from nested rows. All rows must have the same length.
    pub fn from_data(rows: Vec<Vec<f64>>) -> Result<Matrix> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(Error::invalid(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n_cols
                )));
            }
            data.extend(row);
        }
        Ok(Matrix {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Each element drawn independently from the uniform distribution over `[min, max]`.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        min: f64,
        max: f64,
        rng: &mut R,
    ) -> Result<Matrix> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(Error::invalid(format!(
                "uniform range [{min}, {max}] is not a finite, ordered interval"
            )));
        }
        let dist = Uniform::new_inclusive(min, max);
        let data = (0..rows * cols).map(|_| dist.sample(rng)).collect();
        Ok(Matrix { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfRange {
                row,
                col,
                shape: self.shape(),
            });
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let idx = self.offset(row, col)?;
        Ok(self.data[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f64> {
        let idx = self.offset(row, col)?;
        Ok(&mut self.data[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    /// Borrow of row `i`. Fails if `i >= rows`.
    pub fn row(&self, i: usize) -> Result<&[f64]> {
        if i >= self.rows {
            return Err(Error::IndexOutOfRange {
                row: i,
                col: 0,
                shape: self.shape(),
            });
        }
        Ok(&self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Column index of the largest value in row `i`; the first maximum wins.
    pub fn argmax_row(&self, i: usize) -> Result<usize> {
        let row = self.row(i)?;
        let mut best = 0;
        for (j, &v) in row.iter().enumerate() {
            if v > row[best] {
                best = j;
            }
        }
        Ok(best)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable view of the row-major buffer. The shape cannot change through it.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Copy of all elements in row-major order.
    pub fn flatten(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Applies `functor` to every element, returning a new matrix of the same shape.
    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        let data = if self.data.len() >= PARALLEL_THRESHOLD {
            self.data.par_iter().map(|&x| functor(x)).collect()
        } else {
            self.data.iter().map(|&x| functor(x)).collect()
        };
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    fn zip_with<F>(&self, rhs: &Matrix, op: &'static str, functor: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64 + Sync + Send,
    {
        self.check_same_shape(rhs, op)?;
        let data = if self.data.len() >= PARALLEL_THRESHOLD {
            self.data
                .par_iter()
                .zip(rhs.data.par_iter())
                .map(|(&a, &b)| functor(a, b))
                .collect()
        } else {
            self.data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| functor(a, b))
                .collect()
        };
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    fn check_same_shape(&self, rhs: &Matrix, op: &'static str) -> Result<()> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(Error::shape(op, self.shape(), rhs.shape()));
        }
        Ok(())
    }

    pub fn try_add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "add", |a, b| a + b)
    }

    pub fn try_sub(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "sub", |a, b| a - b)
    }

    pub fn try_div(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "div", |a, b| a / b)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "hadamard", |a, b| a * b)
    }

    /// In place `self -= scale * rhs`.
    pub fn scaled_sub_assign(&mut self, rhs: &Matrix, scale: f64) -> Result<()> {
        self.check_same_shape(rhs, "scaled_sub_assign")?;
        if self.data.len() >= PARALLEL_THRESHOLD {
            self.data
                .par_iter_mut()
                .zip(rhs.data.par_iter())
                .for_each(|(a, &b)| *a -= scale * b);
        } else {
            self.data
                .iter_mut()
                .zip(rhs.data.iter())
                .for_each(|(a, &b)| *a -= scale * b);
        }
        Ok(())
    }

    /// Linear-algebra product: `(m x k) * (k x n) -> (m x n)`.
    ///
    /// Each output cell accumulates its dot product sequentially over `k`;
    /// output rows are independent and may be computed in parallel.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(Error::shape("matmul", self.shape(), rhs.shape()));
        }
        let mut res = Matrix::zeros(self.rows, rhs.cols);
        if res.is_empty() {
            return Ok(res);
        }

        let inner = self.cols;
        let fill_row = |(i, out_row): (usize, &mut [f64])| {
            for (j, cell) in out_row.iter_mut().enumerate() {
                let mut sum = 0.0;
                for k in 0..inner {
                    sum += self.data[i * inner + k] * rhs.data[k * rhs.cols + j];
                }
                *cell = sum;
            }
        };

        if self.rows * rhs.cols * inner.max(1) >= PARALLEL_THRESHOLD {
            res.data
                .par_chunks_mut(rhs.cols)
                .enumerate()
                .for_each(fill_row);
        } else {
            res.data.chunks_mut(rhs.cols).enumerate().for_each(fill_row);
        }
        Ok(res)
    }

    /// Adds the `1 x cols` row vector `row` to every row of `self`.
    pub fn add_row(&self, row: &Matrix) -> Result<Matrix> {
        if row.rows != 1 || row.cols != self.cols {
            return Err(Error::shape("add_row", self.shape(), row.shape()));
        }
        let mut res = self.clone();
        if self.cols > 0 {
            for out in res.data.chunks_mut(self.cols) {
                for (x, b) in out.iter_mut().zip(row.data.iter()) {
                    *x += b;
                }
            }
        }
        Ok(res)
    }

    /// Column sums as a `1 x cols` matrix.
    pub fn sum_rows(&self) -> Matrix {
        let mut res = Matrix::zeros(1, self.cols);
        if self.cols > 0 {
            for row in self.data.chunks(self.cols) {
                for (acc, x) in res.data.iter_mut().zip(row.iter()) {
                    *acc += x;
                }
            }
        }
        res
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }

        res
    }

    pub fn abs(&self) -> Matrix {
        self.map(f64::abs)
    }

    /// `copysign(1, x)`: zero maps to `+1`, never to `0`.
    pub fn sign(&self) -> Matrix {
        self.map(|x| 1.0_f64.copysign(x))
    }

    /// Element-wise `ln(x + EPSILON)`.
    ///
    /// Fails with `DomainError` if any element is below `EPSILON`, so this is
    /// only defined for effectively positive matrices.
    pub fn ln(&self) -> Result<Matrix> {
        if let Some(&value) = self.data.iter().find(|&&x| x < EPSILON || x.is_nan()) {
            return Err(Error::DomainError { value });
        }
        Ok(self.map(|x| (x + EPSILON).ln()))
    }

    pub fn powi(&self, exponent: i32) -> Matrix {
        self.map(|x| x.powi(exponent))
    }

    /// Sum over every element.
    pub fn sum(&self) -> f64 {
        if self.data.len() >= PARALLEL_THRESHOLD {
            self.data.par_iter().sum()
        } else {
            self.data.iter().sum()
        }
    }

    /// Copy of rows `[start, end)`.
    pub fn slice_rows(&self, start: usize, end: usize) -> Result<Matrix> {
        if start > end || end > self.rows {
            return Err(Error::RowRangeOutOfRange {
                start,
                end,
                rows: self.rows,
            });
        }
        Ok(Matrix {
            rows: end - start,
            cols: self.cols,
            data: self.data[start * self.cols..end * self.cols].to_vec(),
        })
    }
}

macro_rules! impl_scalar_op {
    ($op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident, $op:tt) => {
        impl $op_trait<f64> for &Matrix {
            type Output = Matrix;

            fn $op_fn(self, rhs: f64) -> Matrix {
                self.map(|x| x $op rhs)
            }
        }

        impl $op_trait<f64> for Matrix {
            type Output = Matrix;

            fn $op_fn(mut self, rhs: f64) -> Matrix {
                self.data.iter_mut().for_each(|x| *x = *x $op rhs);
                self
            }
        }

        impl $assign_trait<f64> for Matrix {
            fn $assign_fn(&mut self, rhs: f64) {
                self.data.iter_mut().for_each(|x| *x = *x $op rhs);
            }
        }
    };
}

impl_scalar_op!(Add, add, AddAssign, add_assign, +);
impl_scalar_op!(Sub, sub, SubAssign, sub_assign, -);
impl_scalar_op!(Mul, mul, MulAssign, mul_assign, *);
impl_scalar_op!(Div, div, DivAssign, div_assign, /);

impl Add<&Matrix> for f64 {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        rhs + self
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs * self
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.map(|x| -x)
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        -&self
    }
}
