//! Dense rational matrix and row-level linear algebra
//!
//! Row-major dense matrix of exact rationals. Rows double as lattice
//! vectors; the free functions at the bottom provide the slice-level
//! operations (dot product, squared norm, scaled updates) the reduction
//! kernel performs on them.

use crate::rational::Rational;
use num_bigint::BigInt;
use std::fmt;

/// Dense matrix of exact rationals in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    data: Vec<Rational>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a zero matrix
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![Rational::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Create an identity matrix
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            *m.get_mut(i, i) = Rational::one();
        }
        m
    }

    /// Create a matrix from a flat vector (row-major order)
    pub fn from_flat(data: Vec<Rational>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Create a matrix from integer row vectors
    ///
    /// # Panics
    /// Panics if rows are empty or have inconsistent dimensions
    pub fn from_rows(rows: &[Vec<i64>]) -> Self {
        assert!(!rows.is_empty(), "matrix cannot be empty");
        let cols = rows[0].len();
        assert!(cols > 0, "rows cannot be empty");
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "all rows must have the same dimension"
        );
        let data = rows
            .iter()
            .flat_map(|r| r.iter().map(|&x| Rational::from(x)))
            .collect();
        Self {
            data,
            rows: rows.len(),
            cols,
        }
    }

    /// Create a random integer matrix for testing
    ///
    /// Entries are drawn uniformly from [-2^(bits-1), 2^(bits-1)).
    pub fn random(n: usize, m: usize, bits: u32) -> Self {
        use rand::Rng;
        assert!(bits >= 1 && bits < 63);
        let mut rng = rand::thread_rng();
        let bound = 1i64 << (bits - 1);
        let data = (0..n * m)
            .map(|_| Rational::from(rng.gen_range(-bound..bound)))
            .collect();
        Self {
            data,
            rows: n,
            cols: m,
        }
    }

    /// Get number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Access element at (i, j)
    pub fn get(&self, i: usize, j: usize) -> &Rational {
        &self.data[i * self.cols + j]
    }

    /// Mutable access to element at (i, j)
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut Rational {
        &mut self.data[i * self.cols + j]
    }

    /// Get a row as a slice
    pub fn row(&self, i: usize) -> &[Rational] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Get a row as a mutable slice
    pub fn row_mut(&mut self, i: usize) -> &mut [Rational] {
        let start = i * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Overwrite row i
    pub fn set_row(&mut self, i: usize, row: &[Rational]) {
        assert_eq!(row.len(), self.cols);
        self.row_mut(i).clone_from_slice(row);
    }

    /// Swap rows i and j in place
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for c in 0..self.cols {
            self.data.swap(i * self.cols + c, j * self.cols + c);
        }
    }

    /// Row update: row_i -= q * row_j
    pub fn sub_scaled_row(&mut self, i: usize, j: usize, q: &Rational) {
        assert_ne!(i, j);
        for c in 0..self.cols {
            let delta = q * &self.data[j * self.cols + c];
            let cell = &mut self.data[i * self.cols + c];
            *cell = &*cell - &delta;
        }
    }

    /// Row update: row_i *= c
    pub fn scale_row(&mut self, i: usize, c: &Rational) {
        for cell in self.row_mut(i) {
            *cell = &*cell * c;
        }
    }

    /// Owned rectangular slice starting at (row0, col0)
    pub fn submatrix(&self, row0: usize, col0: usize, nrows: usize, ncols: usize) -> Matrix {
        assert!(row0 + nrows <= self.rows && col0 + ncols <= self.cols);
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(self.data[(row0 + i) * self.cols + col0 + j].clone());
            }
        }
        Matrix {
            data,
            rows: nrows,
            cols: ncols,
        }
    }

    /// Matrix product self * other
    pub fn mul(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.cols, other.rows);
        let mut out = Matrix::new(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut acc = Rational::zero();
                for k in 0..self.cols {
                    acc = acc + (self.get(i, k) * other.get(k, j));
                }
                *out.get_mut(i, j) = acc;
            }
        }
        out
    }

    /// True if every entry is an integer
    pub fn is_integral(&self) -> bool {
        self.data.iter().all(|x| x.denominator == BigInt::from(1))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix ({}x{}):", self.rows, self.cols)?;
        for i in 0..self.rows {
            write!(f, "  [")?;
            for (j, x) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", x)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Dot product of two rows
pub fn dot(a: &[Rational], b: &[Rational]) -> Rational {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .fold(Rational::zero(), |acc, (x, y)| acc + (x * y))
}

/// Squared Euclidean norm of a row
pub fn norm_sq(v: &[Rational]) -> Rational {
    dot(v, v)
}

/// True if every entry is zero
pub fn is_zero_row(v: &[Rational]) -> bool {
    v.iter().all(Rational::is_zero)
}

/// In-place update: v -= q * w
pub fn sub_scaled(v: &mut [Rational], w: &[Rational], q: &Rational) {
    assert_eq!(v.len(), w.len());
    for (x, y) in v.iter_mut().zip(w) {
        *x = &*x - &(q * y);
    }
}

/// In-place update: v += q * w
pub fn add_scaled(v: &mut [Rational], w: &[Rational], q: &Rational) {
    assert_eq!(v.len(), w.len());
    for (x, y) in v.iter_mut().zip(w) {
        *x = &*x + &(q * y);
    }
}

/// New vector c * v
pub fn scaled(v: &[Rational], c: &Rational) -> Vec<Rational> {
    v.iter().map(|x| x * c).collect()
}
