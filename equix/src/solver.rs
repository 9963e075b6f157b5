//! Bucketed meet-in-the-middle solver.
//!
//! Builds 8-index solutions bottom-up: indices pair into stage-1 items
//! whose hash sum vanishes in its low 15 bits, stage-1 items pair into
//! stage-2 items vanishing in 30 bits, and stage-2 items pair into full
//! solutions vanishing in 60 bits. At every stage, candidates are bucketed
//! by a slice of their sum's next unverified bits so only complementary
//! bucket pairs are ever tried against each other, turning an `O(n^2)`
//! search into an `O(n^2 / NUM_BUCKETS)` one.

use crate::error::Error;
use crate::hash::HashOracle;
use crate::heap::{IndexHash, NUM_BUCKETS, SolverMemory, Stage1Item, Stage2Item};
use crate::order::{canonicalize, has_duplicates};
use crate::solution::{Solution, Solutions, EQUIX_NUM_IDX};
use crate::verify::{FULL_MASK, STAGE1_MASK, STAGE2_MASK};

const BUCKET_KEY_BITS: u32 = 8;
const BUCKET_KEY_MASK: u64 = (1 << BUCKET_KEY_BITS) - 1;

fn complement(key: usize) -> usize {
    (NUM_BUCKETS - key) % NUM_BUCKETS
}

/// Every distinct value in `a` is absent from `b`.
fn disjoint(a: &[u16], b: &[u16]) -> bool {
    a.iter().all(|x| !b.contains(x))
}

/// Fill the index buckets with `H(i)` for every `i` in `0..=u16::MAX`,
/// bucketed by the low 8 bits of the hash.
fn enumerate_indices(oracle: &impl HashOracle, mem: &mut SolverMemory) {
    for index in 0..=u16::MAX {
        let hash = oracle.hash(index);
        let key = (hash & BUCKET_KEY_MASK) as usize;
        mem.heap.index_buckets[key].push(IndexHash { index, hash });
    }
}

/// Pair up indices from complementary buckets whose hash sum vanishes in
/// its low 15 bits, bucketing the survivors by the next 8 bits of that sum.
fn stage1(mem: &mut SolverMemory) {
    for ka in 0..NUM_BUCKETS {
        let kb = complement(ka);
        if ka > kb {
            continue;
        }
        if ka == kb {
            let bucket = mem.heap.index_buckets[ka].as_slice();
            for i in 0..bucket.len() {
                for j in (i + 1)..bucket.len() {
                    try_stage1_pair(mem, bucket[i], bucket[j]);
                }
            }
        } else {
            let bucket_a = mem.heap.index_buckets[ka].as_slice().to_vec();
            let bucket_b = mem.heap.index_buckets[kb].as_slice().to_vec();
            for &a in &bucket_a {
                for &b in &bucket_b {
                    try_stage1_pair(mem, a, b);
                }
            }
        }
    }
}

fn try_stage1_pair(mem: &mut SolverMemory, a: IndexHash, b: IndexHash) {
    let sum = a.hash.wrapping_add(b.hash);
    if sum & STAGE1_MASK != 0 {
        return;
    }
    let (lo, hi) = if a.index <= b.index {
        (a.index, b.index)
    } else {
        (b.index, a.index)
    };
    let key = ((sum >> 15) & BUCKET_KEY_MASK) as usize;
    mem.heap.stage1_buckets[key].push(Stage1Item {
        idx: [lo, hi],
        sum,
    });
}

/// Pair up stage-1 items from complementary buckets whose combined sum
/// vanishes in its low 30 bits, bucketing survivors by the next 8 bits.
fn stage2(mem: &mut SolverMemory) {
    for ka in 0..NUM_BUCKETS {
        let kb = complement(ka);
        if ka > kb {
            continue;
        }
        if ka == kb {
            let bucket = mem.heap.stage1_buckets[ka].as_slice();
            for i in 0..bucket.len() {
                for j in (i + 1)..bucket.len() {
                    try_stage2_pair(mem, bucket[i], bucket[j]);
                }
            }
        } else {
            let bucket_a = mem.heap.stage1_buckets[ka].as_slice().to_vec();
            let bucket_b = mem.heap.stage1_buckets[kb].as_slice().to_vec();
            for &a in &bucket_a {
                for &b in &bucket_b {
                    try_stage2_pair(mem, a, b);
                }
            }
        }
    }
}

fn try_stage2_pair(mem: &mut SolverMemory, a: Stage1Item, b: Stage1Item) {
    if !disjoint(&a.idx, &b.idx) {
        return;
    }
    let sum = a.sum.wrapping_add(b.sum);
    if sum & STAGE2_MASK != 0 {
        return;
    }
    let mut idx = [a.idx[0], a.idx[1], b.idx[0], b.idx[1]];
    idx.sort_unstable();
    let key = ((sum >> 30) & BUCKET_KEY_MASK) as usize;
    mem.heap.stage2_buckets[key].push(Stage2Item { idx, sum });
}

/// Pair up stage-2 items from complementary buckets whose combined sum
/// vanishes in its low 60 bits, emitting a canonicalized solution for
/// every surviving, duplicate-free 8-tuple.
fn stage3(mem: &mut SolverMemory, out: &mut Solutions) {
    'outer: for ka in 0..NUM_BUCKETS {
        let kb = complement(ka);
        if ka > kb {
            continue;
        }
        if ka == kb {
            let bucket = mem.heap.stage2_buckets[ka].as_slice().to_vec();
            for i in 0..bucket.len() {
                for j in (i + 1)..bucket.len() {
                    if try_stage3_pair(bucket[i], bucket[j], out) && out.is_full() {
                        break 'outer;
                    }
                }
            }
        } else {
            let bucket_a = mem.heap.stage2_buckets[ka].as_slice().to_vec();
            let bucket_b = mem.heap.stage2_buckets[kb].as_slice().to_vec();
            for &a in &bucket_a {
                for &b in &bucket_b {
                    if try_stage3_pair(a, b, out) && out.is_full() {
                        break 'outer;
                    }
                }
            }
        }
    }
}

/// Attempt to close one stage-3 pair into a solution. Returns `true` if a
/// solution was emitted (whether or not the container had room).
fn try_stage3_pair(a: Stage2Item, b: Stage2Item, out: &mut Solutions) -> bool {
    if !disjoint(&a.idx, &b.idx) {
        return false;
    }
    let sum = a.sum.wrapping_add(b.sum);
    if sum & FULL_MASK != 0 {
        return false;
    }
    let mut idx = [0u16; EQUIX_NUM_IDX];
    idx[..4].copy_from_slice(&a.idx);
    idx[4..].copy_from_slice(&b.idx);
    if has_duplicates(&idx) {
        return false;
    }
    canonicalize(&mut idx);
    let _ = out.push(Solution::from_indices(idx));
    true
}

/// Run the full pipeline against an already-bound oracle, reusing `mem`'s
/// scratch heap. Infallible: every failure mode in this pipeline (bucket
/// overflow, zero solutions found) is a normal, silently-handled outcome
/// rather than an error.
pub(crate) fn solve_with_oracle(oracle: &impl HashOracle, mem: &mut SolverMemory) -> Solutions {
    mem.clear();
    enumerate_indices(oracle, mem);
    stage1(mem);
    stage2(mem);
    let mut solutions = Solutions::new();
    stage3(mem, &mut solutions);
    solutions
}

/// Solve for `challenge` using the default (v1) hash oracle and a freshly
/// allocated scratch heap. Convenience wrapper; callers solving many
/// challenges should reuse a [`SolverMemory`] via
/// [`crate::EquiX::solve_with_memory`] instead.
pub fn solve(challenge: &[u8]) -> Result<Solutions, Error> {
    let oracle = crate::hash::HashX::new(challenge)?;
    let mut mem = SolverMemory::new();
    Ok(solve_with_oracle(&oracle, &mut mem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::verify;

    #[test]
    fn every_emitted_solution_verifies() {
        let mut checked_any = false;
        for nonce in 0u64..32 {
            let challenge = nonce.to_le_bytes();
            let solutions = solve(&challenge).unwrap();
            for sol in solutions.iter() {
                assert!(verify(&challenge, *sol).is_ok());
                checked_any = true;
            }
        }
        assert!(checked_any, "expected at least one solution across 32 nonces");
    }

    #[test]
    fn solving_is_deterministic() {
        let challenge = b"repeatable-challenge";
        let a = solve(challenge).unwrap();
        let b = solve(challenge).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x, y);
        }
    }

    #[test]
    fn reused_memory_matches_fresh_memory() {
        let challenge = b"memory-reuse-challenge";
        let oracle = crate::hash::HashX::new(challenge).unwrap();
        let mut mem = SolverMemory::new();
        // solve twice through the same scratch heap; stale state from the
        // first run must not leak into the second.
        let first = solve_with_oracle(&oracle, &mut mem);
        let second = solve_with_oracle(&oracle, &mut mem);
        assert_eq!(first.len(), second.len());
    }
}
