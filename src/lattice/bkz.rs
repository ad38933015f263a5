//! BKZ (Block Korkine-Zolotarev) lattice reduction
//!
//! BKZ sweeps a window of `block_size` consecutive basis vectors across an
//! LLL-reduced basis. For each window it enumerates the integer
//! combinations of the window vectors for one whose Gram-Schmidt length
//! beats the window's leading vector; on success the combination is
//! spliced into the basis and LLL absorbs the resulting dependency. The
//! sweep terminates once every window in a full pass is already optimal.
//!
//! The enumeration is the Schnorr-Euchner depth-first search over integer
//! coefficient vectors, bounded by the running best squared norm. No
//! pruning is applied, so the search is exact.
//!
//! # References
//!
//! - Schnorr, Euchner (1994): "Lattice basis reduction: Improved
//!   practical algorithms and solving subset sum problems"

use super::lll::{self, Reduction};
use super::params::{Params, ReductionError, Result};
use crate::matrix::Matrix;
use crate::rational::Rational;
use log::debug;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Reduce a lattice basis with BKZ
///
/// `block_size` is the window width beta and must be at least 2; larger
/// windows give progressively shorter leading vectors at exponentially
/// growing enumeration cost. Linearly dependent input rows are stripped
/// by the initial LLL call and reported in the result.
pub fn reduce_bkz(basis: &Matrix, block_size: usize, params: &Params) -> Result<Reduction> {
    params.validate()?;
    if block_size < 2 {
        return Err(ReductionError::InvalidBlockSize { block_size });
    }

    let mut result = lll::reduce(basis, params)?;
    let dim = result.reduced_basis().rows();
    if dim <= 1 {
        return Ok(result);
    }
    let cols = result.reduced_basis().cols();

    // Driver state, re-seeded from every inner LLL result. The enumerator
    // consumes only mu and the sizes.
    let mut lattice = result.reduced_basis().clone();
    let mut mu = result.gram_schmidt_coefficients().clone();
    let mut sizes = result.gram_schmidt_sizes().to_vec();

    let mut z = 0usize;
    let mut j = 0usize;
    let mut rounds = 0usize;

    while z < dim - 1 {
        j = (j % (dim - 1)) + 1;
        let k = usize::min(j + block_size - 1, dim);
        let h = usize::min(k + 1, dim);
        rounds += 1;

        let v = enumerate_block(j - 1, k - 1, dim, &sizes, &mu);
        if is_unit_coefficient(&v, j - 1) {
            // Window already holds its shortest vector
            z += 1;
            result = lll::reduce(&lattice, params)?;
            refresh(&mut lattice, &mut mu, &mut sizes, &result);
        } else {
            z = 0;
            // w = sum of v[s] * b_s over the window
            let mut w = vec![Rational::zero(); cols];
            for s in (j - 1)..k {
                if v[s].is_zero() {
                    continue;
                }
                for (l, cell) in w.iter_mut().enumerate() {
                    *cell = &*cell + &lattice.get(s, l).mul_int(&v[s]);
                }
            }

            // Splice w in front of the window; the extra row makes the
            // block one vector over-complete, and LLL drops exactly one
            // dependent row while absorbing w.
            let mut block = Matrix::new(h + 1, cols);
            for row in 0..j - 1 {
                block.set_row(row, lattice.row(row));
            }
            block.set_row(j - 1, &w);
            for row in j..=h {
                block.set_row(row, lattice.row(row - 1));
            }

            result = lll::reduce(&block, params)?;
            refresh(&mut lattice, &mut mu, &mut sizes, &result);
        }
    }

    if params.debug {
        debug!(
            "bkz: {}x{} basis, block size {}, {} rounds",
            dim, cols, block_size, rounds
        );
    }
    Ok(result)
}

/// Overwrite the leading rows of the driver state with an LLL result
fn refresh(lattice: &mut Matrix, mu: &mut Matrix, sizes: &mut Vec<Rational>, result: &Reduction) {
    let reduced = result.reduced_basis();
    for row in 0..reduced.rows() {
        lattice.set_row(row, reduced.row(row));
    }
    *mu = result.gram_schmidt_coefficients().clone();
    *sizes = result.gram_schmidt_sizes().to_vec();
}

/// True iff v is the unit coefficient vector e_index
fn is_unit_coefficient(v: &[BigInt], index: usize) -> bool {
    if !v[index].is_one() {
        return false;
    }
    v.iter()
        .enumerate()
        .all(|(i, x)| i == index || x.is_zero())
}

/// Schnorr-Euchner enumeration over the block [ini, fim]
///
/// Searches integer coefficient vectors u, zero outside [ini, fim], for
/// the one minimising the squared norm of sum u_i b_i, measured exactly
/// through `sizes` and `mu`. The search bound starts at S_ini, so the
/// unit vector e_ini is returned exactly when the block's leading vector
/// is already the shortest.
fn enumerate_block(
    ini: usize,
    fim: usize,
    dim: usize,
    sizes: &[Rational],
    mu: &Matrix,
) -> Vec<BigInt> {
    let mut c_t = vec![Rational::zero(); dim + 1];
    let mut y = vec![Rational::zero(); dim + 1];
    let mut u_t = vec![BigInt::zero(); dim + 1];
    let mut center = vec![BigInt::zero(); dim + 1];
    let mut offset = vec![BigInt::zero(); dim + 1];
    let mut dir = vec![BigInt::one(); dim + 1];
    let mut u = vec![BigInt::zero(); dim];

    let mut c_l = sizes[ini].clone();
    u_t[ini] = BigInt::one();
    u[ini] = BigInt::one();
    let mut s = ini;
    let mut t = ini;

    while t <= fim {
        // cT(t) = cT(t+1) + (y(t) + uT(t))^2 * S(t), expanded as
        // y^2 + 2*y*uT + uT^2 to keep the intermediate rationals small
        let y_sq = &y[t] * &y[t];
        let u_sq = Rational::from_bigint(&u_t[t] * &u_t[t]);
        let cross = y[t].mul_int(&(&u_t[t] + &u_t[t]));
        let contribution = &(&y_sq + &cross) + &u_sq;
        c_t[t] = &c_t[t + 1] + &(&contribution * &sizes[t]);

        if c_t[t] < c_l {
            if t > ini {
                // Descend and centre the next level on -y
                t -= 1;
                let mut acc = Rational::zero();
                for i in t + 1..=s {
                    acc = acc + mu.get(i, t).mul_int(&u_t[i]);
                }
                y[t] = acc;
                let rounded = -y[t].round();
                u_t[t] = rounded.clone();
                center[t] = rounded;
                offset[t] = BigInt::zero();
                let neg_y = -&y[t];
                dir[t] = if neg_y < Rational::from_bigint(u_t[t].clone()) {
                    -BigInt::one()
                } else {
                    BigInt::one()
                };
            } else {
                // New shortest combination
                c_l = c_t[ini].clone();
                for i in ini..=fim {
                    u[i] = u_t[i].clone();
                }
            }
        } else {
            // Climb and zigzag around the centre
            t += 1;
            s = usize::max(s, t);
            if t < s {
                offset[t] = -&offset[t];
            }
            if !(&offset[t] * &dir[t]).is_negative() {
                offset[t] = &offset[t] + &dir[t];
            }
            u_t[t] = &center[t] + &offset[t];
        }
    }
    u
}
