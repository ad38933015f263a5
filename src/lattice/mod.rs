//! Lattice basis reduction algorithms
//!
//! Exact-rational LLL and BKZ reduction with full transformation
//! tracking.
//!
//! # Overview
//!
//! [`reduce`] runs LLL on a basis given as matrix rows, accepting
//! linearly dependent input; [`reduce_bkz`] wraps it in a
//! Block Korkine-Zolotarev sweep for shorter leading vectors. Both hand
//! back a [`Reduction`] carrying the reduced basis, the unimodular
//! transformation that produced it, and the final Gram-Schmidt data.
//!
//! # Key Components
//!
//! - [`Params`] - Lovász parameter and diagnostics flag
//! - [`GramSchmidt`] - incrementally maintained orthogonalisation
//! - [`reduce`] / [`reduce_bkz`] - the reduction entry points
//!
//! # Example
//!
//! ```
//! use lattice_reduce::{Matrix, Params, lattice::reduce};
//!
//! let basis = Matrix::from_rows(&[
//!     vec![1, 1, 1],
//!     vec![-1, 0, 2],
//!     vec![3, 5, 6],
//! ]);
//!
//! let result = reduce(&basis, &Params::default()).unwrap();
//! assert_eq!(result.num_dependent_vectors(), 0);
//! ```

pub mod bkz;
pub mod gram_schmidt;
pub mod lll;
pub mod params;

pub use bkz::reduce_bkz;
pub use gram_schmidt::GramSchmidt;
pub use lll::{is_reduced, reduce, Reduction};
pub use params::{Params, ReductionError, Result};
