//! LLL lattice basis reduction over exact rationals
//!
//! Implements the reduction described on page 95 of Henri Cohen's
//! "A Course in Computational Algebraic Number Theory" (algorithm 2.6.3),
//! extended to accept linearly dependent input rows. The kernel drives an
//! index k forward through the basis, size-reducing row k against earlier
//! rows and swapping it downwards whenever the Lovász condition
//!
//! ```text
//! S_k >= (delta - mu_{k,k-1}^2) * S_{k-1}
//! ```
//!
//! fails. Dependent rows collapse to zero and migrate to the front of the
//! working basis; they are stripped from the returned reduced basis and
//! reported through [`Reduction::num_dependent_vectors`]. The Lovász
//! comparison is evaluated over exact rationals, so the loop terminates
//! for every rational input, including delta = 1.

use super::gram_schmidt::GramSchmidt;
use super::params::{Params, Result};
use crate::matrix::{is_zero_row, Matrix};
use crate::rational::Rational;
use log::debug;

/// Outcome of a reduction
///
/// Owns every matrix it hands out; nothing aliases the caller's input.
#[derive(Debug, Clone)]
pub struct Reduction {
    dependent: usize,
    reduced: Matrix,
    transformation: Matrix,
    gram_schmidt_basis: Matrix,
    gram_schmidt_coefficients: Matrix,
    gram_schmidt_sizes: Vec<Rational>,
}

impl Reduction {
    /// Number of linearly dependent input rows (stripped zero rows)
    pub fn num_dependent_vectors(&self) -> usize {
        self.dependent
    }

    /// The reduced basis, zero rows removed
    pub fn reduced_basis(&self) -> &Matrix {
        &self.reduced
    }

    /// Unimodular transformation H with H * input = pre-trim working basis
    pub fn transformation(&self) -> &Matrix {
        &self.transformation
    }

    /// Orthogonalised basis rows matching the reduced basis
    pub fn gram_schmidt_basis(&self) -> &Matrix {
        &self.gram_schmidt_basis
    }

    /// Gram-Schmidt coefficients matching the reduced basis
    pub fn gram_schmidt_coefficients(&self) -> &Matrix {
        &self.gram_schmidt_coefficients
    }

    /// Squared Gram-Schmidt norms matching the reduced basis
    pub fn gram_schmidt_sizes(&self) -> &[Rational] {
        &self.gram_schmidt_sizes
    }
}

/// Reduce a lattice basis with LLL
///
/// Rows of `basis` are the lattice vectors; they may be linearly
/// dependent. Returns an error when `params.delta` is outside (1/4, 1].
pub fn reduce(basis: &Matrix, params: &Params) -> Result<Reduction> {
    params.validate()?;
    assert!(
        basis.rows() >= 1 && basis.cols() >= 1,
        "basis must have at least one row and one column"
    );
    Ok(Reducer::new(basis, params).run())
}

/// Check whether a basis is LLL-reduced for the given delta
pub fn is_reduced(basis: &Matrix, params: &Params) -> bool {
    let gs = GramSchmidt::orthogonalize(basis);
    let n = basis.rows();
    for i in 1..n {
        for j in 0..i {
            if gs.mu(i, j).abs() > Rational::one_half() {
                return false;
            }
        }
    }
    for i in 1..n {
        let mu = gs.mu(i, i - 1);
        let threshold = &(&params.delta - &(mu * mu)) * gs.size(i - 1);
        if *gs.size(i) < threshold {
            return false;
        }
    }
    true
}

/// Mutable reduction state
///
/// Bundles the working basis copy, the accumulated transformation and the
/// Gram-Schmidt data, plus the sweep position (k, kmax). Not shareable
/// across threads; every call to [`reduce`] builds a fresh one.
struct Reducer<'a> {
    basis: Matrix,
    h: Matrix,
    gs: GramSchmidt,
    k: usize,
    kmax: usize,
    update_gs: bool,
    params: &'a Params,
    iterations: usize,
    size_reductions: usize,
    swaps: usize,
}

impl<'a> Reducer<'a> {
    fn new(basis: &Matrix, params: &'a Params) -> Self {
        let working = basis.clone();
        let gs = GramSchmidt::seed(&working);
        let n = working.rows();
        Self {
            h: Matrix::identity(n),
            gs,
            basis: working,
            k: 1,
            kmax: 0,
            update_gs: true,
            params,
            iterations: 0,
            size_reductions: 0,
            swaps: 0,
        }
    }

    fn run(mut self) -> Reduction {
        let n = self.basis.rows();
        while self.k < n {
            if self.k > self.kmax && self.update_gs {
                self.kmax = self.k;
                self.gs.extend(self.k, &self.basis);
            }
            self.test_condition();
            self.iterations += 1;
        }
        self.finish()
    }

    /// Size-reduce row k against row k-1, then either swap downwards or
    /// finish the row and advance
    fn test_condition(&mut self) {
        let k = self.k;
        self.red(k, k - 1);

        let mu = self.gs.mu(k, k - 1).clone();
        let threshold = &(&self.params.delta - &(&mu * &mu)) * self.gs.size(k - 1);
        if *self.gs.size(k) < threshold {
            self.swapg(k);
            self.k = usize::max(1, k - 1);
            self.update_gs = false;
        } else {
            for l in (0..k - 1).rev() {
                self.red(k, l);
            }
            self.k = k + 1;
            self.update_gs = true;
        }
    }

    /// Size reduction of row k against row l
    fn red(&mut self, k: usize, l: usize) {
        if self.gs.mu(k, l).abs() <= Rational::one_half() {
            return;
        }
        let q = Rational::from_bigint(self.gs.mu(k, l).round());
        self.basis.sub_scaled_row(k, l, &q);
        self.h.sub_scaled_row(k, l, &q);
        self.gs.size_reduce_update(k, l, &q);
        self.size_reductions += 1;
    }

    /// Exchange rows k and k-1 and repair the Gram-Schmidt data
    fn swapg(&mut self, k: usize) {
        self.basis.swap_rows(k, k - 1);
        self.h.swap_rows(k, k - 1);
        self.gs.swap_update(k, self.kmax);
        self.swaps += 1;
    }

    /// Strip the zero-row prefix and assemble the result
    fn finish(self) -> Reduction {
        let (n, m) = (self.basis.rows(), self.basis.cols());
        let p = (0..n).filter(|&i| is_zero_row(self.basis.row(i))).count();

        if self.params.debug {
            debug!(
                "lll: {}x{} basis, {} iterations, {} size reductions, {} swaps, {} dependent rows",
                n, m, self.iterations, self.size_reductions, self.swaps, p
            );
        }

        Reduction {
            dependent: p,
            reduced: self.basis.submatrix(p, 0, n - p, m),
            transformation: self.h,
            gram_schmidt_basis: self.gs.basis_star.submatrix(p, 0, n - p, m),
            gram_schmidt_coefficients: self.gs.mu.submatrix(p, p, n - p, n - p),
            gram_schmidt_sizes: self.gs.sizes[p..].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::norm_sq;

    /// Determinant by Laplace expansion, for the small test fixtures
    fn det(m: &Matrix) -> Rational {
        assert_eq!(m.rows(), m.cols());
        let n = m.rows();
        if n == 1 {
            return m.get(0, 0).clone();
        }
        let mut acc = Rational::zero();
        for j in 0..n {
            if m.get(0, j).is_zero() {
                continue;
            }
            let mut minor = Matrix::new(n - 1, n - 1);
            for r in 1..n {
                let mut cc = 0;
                for c in 0..n {
                    if c == j {
                        continue;
                    }
                    *minor.get_mut(r - 1, cc) = m.get(r, c).clone();
                    cc += 1;
                }
            }
            let term = m.get(0, j) * &det(&minor);
            acc = if j % 2 == 0 { acc + term } else { acc - term };
        }
        acc
    }

    fn rows_match_up_to_sign(actual: &[Rational], expected: &[i64]) -> bool {
        let expect: Vec<Rational> = expected.iter().map(|&x| Rational::from(x)).collect();
        let negated: Vec<Rational> = expect.iter().map(|x| -x).collect();
        actual == expect.as_slice() || actual == negated.as_slice()
    }

    #[test]
    fn test_identity_basis() {
        let basis = Matrix::identity(3);
        let result = reduce(&basis, &Params::default()).unwrap();

        assert_eq!(result.num_dependent_vectors(), 0);
        assert_eq!(*result.reduced_basis(), Matrix::identity(3));
        assert_eq!(*result.transformation(), Matrix::identity(3));
        assert_eq!(
            result.gram_schmidt_sizes(),
            &[Rational::one(), Rational::one(), Rational::one()]
        );
        for i in 0..3 {
            for j in 0..3 {
                assert!(result.gram_schmidt_coefficients().get(i, j).is_zero());
            }
        }
    }

    #[test]
    fn test_swap_pair() {
        let basis = Matrix::from_rows(&[vec![1, 2], vec![1, 0]]);
        let result = reduce(&basis, &Params::default()).unwrap();

        assert_eq!(result.num_dependent_vectors(), 0);
        assert_eq!(
            *result.reduced_basis(),
            Matrix::from_rows(&[vec![1, 0], vec![0, 2]])
        );
        // H carries the input onto the output
        assert_eq!(
            result.transformation().mul(&basis),
            *result.reduced_basis()
        );
        assert_eq!(det(result.transformation()).abs(), Rational::one());
    }

    #[test]
    fn test_cohen_example() {
        // Cohen, section 2.6: reduces to {(0,1,0), (1,0,1), (-1,0,2)}
        let basis = Matrix::from_rows(&[vec![1, 1, 1], vec![-1, 0, 2], vec![3, 5, 6]]);
        let result = reduce(&basis, &Params::default()).unwrap();
        let reduced = result.reduced_basis();

        assert_eq!(result.num_dependent_vectors(), 0);
        assert!(rows_match_up_to_sign(reduced.row(0), &[0, 1, 0]));
        assert!(rows_match_up_to_sign(reduced.row(1), &[1, 0, 1]));
        assert!(rows_match_up_to_sign(reduced.row(2), &[-1, 0, 2]));

        assert!(is_reduced(reduced, &Params::default()));
        assert_eq!(result.transformation().mul(&basis), *reduced);
        assert!(result.transformation().is_integral());
        assert_eq!(det(result.transformation()).abs(), Rational::one());
    }

    #[test]
    fn test_size_reduction_bound() {
        let basis = Matrix::from_rows(&[vec![1, 1, 1], vec![-1, 0, 2], vec![3, 5, 6]]);
        let result = reduce(&basis, &Params::default()).unwrap();

        let mu = result.gram_schmidt_coefficients();
        for i in 0..mu.rows() {
            for j in 0..i {
                assert!(mu.get(i, j).abs() <= Rational::one_half());
            }
        }
    }

    #[test]
    fn test_lovasz_condition_holds() {
        let params = Params::default();
        let basis = Matrix::from_rows(&[vec![7, 3, 1], vec![2, 8, 4], vec![5, 5, 9]]);
        let result = reduce(&basis, &params).unwrap();

        let sizes = result.gram_schmidt_sizes();
        let mu = result.gram_schmidt_coefficients();
        for i in 1..sizes.len() {
            let m = mu.get(i, i - 1);
            let threshold = &(&params.delta - &(m * m)) * &sizes[i - 1];
            assert!(sizes[i] >= threshold, "Lovász fails at {}", i);
        }
    }

    #[test]
    fn test_gram_schmidt_consistency() {
        let basis = Matrix::from_rows(&[vec![1, 1, 1], vec![-1, 0, 2], vec![3, 5, 6]]);
        let result = reduce(&basis, &Params::default()).unwrap();

        // Fresh orthogonalisation of R must match the returned GS data
        let gs = GramSchmidt::orthogonalize(result.reduced_basis());
        assert_eq!(gs.orthogonal_basis(), result.gram_schmidt_basis());
        assert_eq!(gs.sizes, result.gram_schmidt_sizes());
        for i in 0..3 {
            assert_eq!(norm_sq(gs.orthogonal_basis().row(i)), gs.sizes[i]);
        }
    }

    #[test]
    fn test_rank_one_input() {
        let basis = Matrix::from_rows(&[vec![2, 4], vec![1, 2], vec![3, 6]]);
        let result = reduce(&basis, &Params::default()).unwrap();

        assert_eq!(result.num_dependent_vectors(), 2);
        assert_eq!(result.reduced_basis().rows(), 1);
        assert!(rows_match_up_to_sign(result.reduced_basis().row(0), &[1, 2]));
    }

    #[test]
    fn test_all_zero_input() {
        let basis = Matrix::from_rows(&[vec![0, 0], vec![0, 0]]);
        let result = reduce(&basis, &Params::default()).unwrap();

        assert_eq!(result.num_dependent_vectors(), 2);
        assert_eq!(result.reduced_basis().rows(), 0);
    }

    #[test]
    fn test_idempotence() {
        let basis = Matrix::from_rows(&[vec![1, 1, 1], vec![-1, 0, 2], vec![3, 5, 6]]);
        let once = reduce(&basis, &Params::default()).unwrap();
        let twice = reduce(once.reduced_basis(), &Params::default()).unwrap();

        assert_eq!(twice.num_dependent_vectors(), 0);
        assert_eq!(twice.reduced_basis(), once.reduced_basis());
        assert_eq!(
            *twice.transformation(),
            Matrix::identity(once.reduced_basis().rows())
        );
    }

    #[test]
    fn test_delta_boundaries() {
        let basis = Matrix::from_rows(&[
            vec![10, -3, 7, 2],
            vec![4, 9, -1, 6],
            vec![-2, 5, 8, 3],
            vec![1, 0, -6, 11],
        ]);

        let loose = Params::default().with_delta(26, 100);
        let tight = Params::default().with_delta(1, 1);

        let loose_result = reduce(&basis, &loose).unwrap();
        let tight_result = reduce(&basis, &tight).unwrap();

        assert!(is_reduced(loose_result.reduced_basis(), &loose));
        assert!(is_reduced(tight_result.reduced_basis(), &tight));

        // delta = 1 enforces S_i >= (1 - mu^2) S_{i-1} with equality allowed
        let sizes = tight_result.gram_schmidt_sizes();
        let mu = tight_result.gram_schmidt_coefficients();
        for i in 1..sizes.len() {
            let m = mu.get(i, i - 1);
            let threshold = &(&Rational::one() - &(m * m)) * &sizes[i - 1];
            assert!(sizes[i] >= threshold);
        }
    }

    #[test]
    fn test_random_basis_invariants() {
        let basis = Matrix::random(5, 5, 8);
        let params = Params::default();
        let result = reduce(&basis, &params).unwrap();

        assert!(is_reduced(result.reduced_basis(), &params));
        assert!(result.transformation().is_integral());
        // H carries the input onto the pre-trim working basis; the trimmed
        // rows are the zero prefix
        let carried = result.transformation().mul(&basis);
        let p = result.num_dependent_vectors();
        for i in 0..p {
            assert!(is_zero_row(carried.row(i)));
        }
        assert_eq!(
            carried.submatrix(p, 0, carried.rows() - p, carried.cols()),
            *result.reduced_basis()
        );
    }

    #[test]
    fn test_invalid_delta_rejected() {
        let basis = Matrix::identity(2);
        assert!(reduce(&basis, &Params::default().with_delta(1, 4)).is_err());
        assert!(reduce(&basis, &Params::default().with_delta(3, 2)).is_err());
    }

    #[test]
    fn test_is_reduced_rejects_unreduced() {
        // (1,2)/(1,0) needs a swap, so it is not reduced as given
        let basis = Matrix::from_rows(&[vec![1, 2], vec![1, 0]]);
        assert!(!is_reduced(&basis, &Params::default()));
        assert!(is_reduced(&Matrix::identity(4), &Params::default()));
    }
}
