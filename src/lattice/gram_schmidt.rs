//! Incrementally maintained Gram-Schmidt orthogonalisation
//!
//! Given basis B = [b_0, ..., b_{n-1}], maintain orthogonal vectors b*_i,
//! coefficients mu_ij and squared norms S_i = ||b*_i||^2:
//!
//! ```text
//! b*_0 = b_0
//! b*_i = b_i - sum_{j<i} mu_ij b*_j
//! mu_ij = <b_i, b*_j> / S_j        (0 when S_j = 0)
//! ```
//!
//! All arithmetic is exact. Zero rows of b* mark linearly dependent basis
//! vectors; their S_i is 0 and every coefficient against them is 0 by
//! convention. The reduction kernel extends this state one row at a time
//! and repairs it in place after size reductions and swaps instead of
//! recomputing it.

use crate::matrix::{add_scaled, dot, norm_sq, scaled, sub_scaled, Matrix};
use crate::rational::Rational;

/// Gram-Schmidt data for a (possibly partially orthogonalised) basis
#[derive(Debug, Clone)]
pub struct GramSchmidt {
    /// Orthogonalised basis vectors b*_i as rows
    pub(crate) basis_star: Matrix,
    /// Coefficients mu_ij, strictly lower triangular
    pub(crate) mu: Matrix,
    /// Squared norms S_i = ||b*_i||^2
    pub(crate) sizes: Vec<Rational>,
}

impl GramSchmidt {
    /// State covering only row 0 of `basis`; the kernel extends the rest
    pub(crate) fn seed(basis: &Matrix) -> Self {
        let (n, m) = (basis.rows(), basis.cols());
        let mut basis_star = Matrix::new(n, m);
        basis_star.set_row(0, basis.row(0));
        let mut sizes = vec![Rational::zero(); n];
        sizes[0] = norm_sq(basis.row(0));
        Self {
            basis_star,
            mu: Matrix::new(n, n),
            sizes,
        }
    }

    /// Fully orthogonalise a basis in one pass
    pub fn orthogonalize(basis: &Matrix) -> Self {
        if basis.rows() == 0 {
            return Self {
                basis_star: Matrix::new(0, basis.cols()),
                mu: Matrix::new(0, 0),
                sizes: Vec::new(),
            };
        }
        let mut gs = Self::seed(basis);
        for k in 1..basis.rows() {
            gs.extend(k, basis);
        }
        gs
    }

    /// Get mu_ij (i > j)
    pub fn mu(&self, i: usize, j: usize) -> &Rational {
        assert!(j < i, "mu_ij only defined for j < i");
        self.mu.get(i, j)
    }

    /// Get S_i = ||b*_i||^2
    pub fn size(&self, i: usize) -> &Rational {
        &self.sizes[i]
    }

    /// Get the orthogonalised basis
    pub fn orthogonal_basis(&self) -> &Matrix {
        &self.basis_star
    }

    /// Extend the orthogonalisation to row k, rows 0..k already done
    pub(crate) fn extend(&mut self, k: usize, basis: &Matrix) {
        for j in 0..k {
            let m = if self.sizes[j].is_zero() {
                Rational::zero()
            } else {
                &dot(basis.row(k), self.basis_star.row(j)) / &self.sizes[j]
            };
            *self.mu.get_mut(k, j) = m;
        }
        let mut row = basis.row(k).to_vec();
        for j in 0..k {
            let mu_kj = self.mu.get(k, j).clone();
            sub_scaled(&mut row, self.basis_star.row(j), &mu_kj);
        }
        self.sizes[k] = norm_sq(&row);
        self.basis_star.set_row(k, &row);
    }

    /// Repair mu after the basis update b_k -= q * b_l
    ///
    /// The orthogonal vectors and sizes are untouched: subtracting an
    /// integer multiple of an earlier basis vector does not change the
    /// projection of b_k outside the span of b_0..b_{k-1}.
    pub(crate) fn size_reduce_update(&mut self, k: usize, l: usize, q: &Rational) {
        let reduced = self.mu.get(k, l) - q;
        *self.mu.get_mut(k, l) = reduced;
        for i in 0..l {
            let adj = q * self.mu.get(l, i);
            let reduced = self.mu.get(k, i) - &adj;
            *self.mu.get_mut(k, i) = reduced;
        }
    }

    /// Repair b*, mu and S after swapping basis rows n and n-1
    ///
    /// `kmax` is the highest row the orthogonalisation currently covers;
    /// coefficient columns n-1 and n must be fixed up for every row in
    /// (n, kmax].
    pub(crate) fn swap_update(&mut self, n: usize, kmax: usize) {
        if n >= 2 {
            for j in 0..n - 1 {
                let a = self.mu.get(n, j).clone();
                let b = self.mu.get(n - 1, j).clone();
                *self.mu.get_mut(n, j) = b;
                *self.mu.get_mut(n - 1, j) = a;
            }
        }

        let nu = self.mu.get(n, n - 1).clone();
        let b_prime = &self.sizes[n] + &(&(&nu * &nu) * &self.sizes[n - 1]);

        if self.sizes[n].is_zero() && nu.is_zero() {
            // Both rows project to the same span; a plain exchange suffices
            self.sizes.swap(n, n - 1);
            self.basis_star.swap_rows(n, n - 1);
            for i in n + 1..=kmax {
                let a = self.mu.get(i, n).clone();
                let b = self.mu.get(i, n - 1).clone();
                *self.mu.get_mut(i, n) = b;
                *self.mu.get_mut(i, n - 1) = a;
            }
        } else if self.sizes[n].is_zero() {
            // Row n is dependent but still has a component along b*_{n-1}
            self.sizes[n - 1] = b_prime;
            self.basis_star.scale_row(n - 1, &nu);
            *self.mu.get_mut(n, n - 1) = &Rational::one() / &nu;
            for i in n + 1..=kmax {
                let scaled_mu = self.mu.get(i, n - 1) / &nu;
                *self.mu.get_mut(i, n - 1) = scaled_mu;
            }
        } else {
            let t = &self.sizes[n - 1] / &b_prime;
            let mu_new = &nu * &t;
            *self.mu.get_mut(n, n - 1) = mu_new.clone();

            let b = self.basis_star.row(n - 1).to_vec();
            // New b*_{n-1} = b*_n + nu * b
            let mut row_above = self.basis_star.row(n).to_vec();
            add_scaled(&mut row_above, &b, &nu);
            // New b*_n = (S_n / B') * b - mu_new * old b*_n
            let ratio = &self.sizes[n] / &b_prime;
            let mut row_below = scaled(&b, &ratio);
            sub_scaled(&mut row_below, self.basis_star.row(n), &mu_new);
            self.basis_star.set_row(n - 1, &row_above);
            self.basis_star.set_row(n, &row_below);

            self.sizes[n] = &self.sizes[n] * &t;
            self.sizes[n - 1] = b_prime;

            for i in n + 1..=kmax {
                let old = self.mu.get(i, n).clone();
                let updated = self.mu.get(i, n - 1) - &(&nu * &old);
                *self.mu.get_mut(i, n) = updated;
                let updated = &old + &(&mu_new * self.mu.get(i, n));
                *self.mu.get_mut(i, n - 1) = updated;
            }
        }
    }
}
