//! Independent verification of a claimed solution.
//!
//! Verification never trusts the solver: it recomputes every partial sum
//! from scratch against the same hash oracle a solver would have used, so
//! a solution can only be accepted if it actually satisfies the puzzle.

use crate::error::Error;
use crate::hash::{HashOracle, HashOracleImpl, HashVariant};
use crate::order::{has_duplicates, verify_order};
use crate::solution::Solution;

/// Indices with a vanishing low-15-bit sum pair up at stage 1.
pub(crate) const STAGE1_MASK: u64 = (1u64 << 15) - 1;
/// Stage-1 pairs with a vanishing low-30-bit sum pair up at stage 2.
pub(crate) const STAGE2_MASK: u64 = (1u64 << 30) - 1;
/// The full solution's 8-hash sum must vanish in its low 60 bits.
pub(crate) const FULL_MASK: u64 = (1u64 << 60) - 1;

fn sum_pair(oracle: &impl HashOracle, a: u16, b: u16) -> u64 {
    oracle.hash(a).wrapping_add(oracle.hash(b))
}

/// Recompute every partial sum this solution claims and check it against
/// the mask required at its level. Mirrors the early-exit order of the
/// reference implementation: cheapest, most-likely-to-fail checks first.
fn verify_sums(oracle: &impl HashOracle, idx: &[u16; 8]) -> Result<(), Error> {
    let pair0 = sum_pair(oracle, idx[0], idx[1]);
    let pair1 = sum_pair(oracle, idx[2], idx[3]);
    if (pair0 & STAGE1_MASK) != 0 || (pair1 & STAGE1_MASK) != 0 {
        return Err(Error::PartialSum);
    }
    let pair4 = pair0.wrapping_add(pair1);
    if (pair4 & STAGE2_MASK) != 0 {
        return Err(Error::PartialSum);
    }

    let pair2 = sum_pair(oracle, idx[4], idx[5]);
    let pair3 = sum_pair(oracle, idx[6], idx[7]);
    if (pair2 & STAGE1_MASK) != 0 || (pair3 & STAGE1_MASK) != 0 {
        return Err(Error::PartialSum);
    }
    let pair5 = pair2.wrapping_add(pair3);
    if (pair5 & STAGE2_MASK) != 0 {
        return Err(Error::PartialSum);
    }

    let pair6 = pair4.wrapping_add(pair5);
    if (pair6 & FULL_MASK) != 0 {
        return Err(Error::FinalSum);
    }
    Ok(())
}

/// Verify `solution` against `challenge` using an already-bound oracle.
pub(crate) fn verify_with_oracle(oracle: &impl HashOracle, solution: Solution) -> Result<(), Error> {
    let idx = solution.to_indices();
    if !verify_order(&idx) {
        return Err(Error::Order);
    }
    if has_duplicates(&idx) {
        return Err(Error::Duplicates);
    }
    verify_sums(oracle, &idx)
}

/// Verify `solution` against `challenge`, binding a fresh oracle of the
/// given variant.
///
/// Checks tree ordering *before* binding the challenge, matching the
/// original's `equix_verify` (order, then challenge bind, then duplicates,
/// then partial sums): ordering needs no oracle, so a mis-ordered solution
/// is rejected with `Error::Order` even if the challenge itself would fail
/// to bind.
pub fn verify_with_variant(
    challenge: &[u8],
    solution: Solution,
    variant: HashVariant,
) -> Result<(), Error> {
    let idx = solution.to_indices();
    if !verify_order(&idx) {
        return Err(Error::Order);
    }
    let oracle = HashOracleImpl::bind(variant, challenge)?;
    verify_with_oracle(&oracle, solution)
}

/// Verify `solution` against `challenge`, using the default (v1) hash
/// oracle. Matches the common call shape of crates built on top of this
/// algorithm, which never need anything but the default variant.
pub fn verify(challenge: &[u8], solution: Solution) -> Result<(), Error> {
    verify_with_variant(challenge, solution, HashVariant::default())
}

/// Verify `solution_bytes` as a raw 16-byte wire-form solution.
pub fn verify_bytes(challenge: &[u8], solution_bytes: &[u8; 16]) -> Result<(), Error> {
    verify(challenge, Solution::from_bytes(solution_bytes))
}
