//! Exact-rational lattice basis reduction
//!
//! # Overview
//!
//! This library reduces integer lattice bases with the
//! Lenstra-Lenstra-Lovász (LLL) algorithm and its Block
//! Korkine-Zolotarev (BKZ) generalisation. All arithmetic is exact:
//! basis vectors, Gram-Schmidt data and the Lovász comparison live in
//! the rational field over `BigInt`, so the reduction invariants are
//! never at the mercy of floating-point rounding.
//!
//! Input rows may be linearly dependent; dependent rows are detected,
//! stripped from the reduced basis and reported. Every reduction also
//! returns the unimodular transformation carrying the input basis to the
//! output, together with the orthogonalised basis, the coefficient
//! matrix and the squared Gram-Schmidt norms.
//!
//! # Key Components
//!
//! - [`rational`] - exact rational number type
//! - [`matrix`] - dense rational matrix and row operations
//! - [`lattice`] - LLL and BKZ reduction kernels
//!
//! # Example
//!
//! ```
//! use lattice_reduce::{reduce, Matrix, Params};
//!
//! let basis = Matrix::from_rows(&[
//!     vec![1, 2],
//!     vec![1, 0],
//! ]);
//!
//! let result = reduce(&basis, &Params::default()).unwrap();
//! assert_eq!(
//!     *result.reduced_basis(),
//!     Matrix::from_rows(&[vec![1, 0], vec![0, 2]]),
//! );
//! // The transformation carries the input onto the reduced basis
//! assert_eq!(result.transformation().mul(&basis), *result.reduced_basis());
//! ```

pub mod lattice;
pub mod matrix;
pub mod rational;

pub use lattice::{is_reduced, reduce, reduce_bkz, Params, Reduction, ReductionError};
pub use matrix::Matrix;
pub use rational::Rational;
