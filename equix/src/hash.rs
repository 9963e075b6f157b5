//! Per-index hash oracle.
//!
//! The real HashX (v1) / HashWX (v2) programs are out of scope here: they
//! are generated, challenge-keyed ALU programs with their own compiler and
//! interpreter backends, specified only by the contract below. What this
//! module provides is a single reference oracle that fulfils that contract
//! (deterministic, challenge-keyed, uniform) using a keyed BLAKE2b stream,
//! so the rest of the crate has a concrete, testable `H(i)` to work with.
//! Swapping in the real HashX/HashWX VM later only touches this file.

use crate::error::Error;

/// Seed size fed into the v2 (HashWX) oracle, derived from the challenge via
/// a keyed Blake2b (see [`derive_v2_seed`]).
pub const HASHWX_SEED_SIZE: usize = 32;

/// A per-index hash oracle: deterministic, challenge-bound, and (for this
/// reference implementation) pure with respect to that binding.
pub trait HashOracle {
    /// Evaluate `H(index)`, using only the low 64 bits of the oracle's
    /// underlying digest.
    fn hash(&self, index: u16) -> u64;
}

/// HashX (v1): keyed directly from the raw challenge bytes.
pub struct HashX {
    base: blake2b_simd::State,
}

impl HashX {
    /// Bind a v1 oracle to `challenge`. Accepts a challenge of any length.
    pub fn new(challenge: &[u8]) -> Result<Self, Error> {
        let mut base = blake2b_simd::Params::new()
            .hash_length(8)
            .personal(b"Equi-X v1")
            .to_state();
        base.update(challenge);
        Ok(Self { base })
    }
}

impl HashOracle for HashX {
    fn hash(&self, index: u16) -> u64 {
        let digest = self.base.clone().update(&index.to_le_bytes()).finalize();
        u64::from_le_bytes(digest.as_bytes().try_into().unwrap())
    }
}

/// HashWX (v2): keyed from a fixed-size seed derived from the challenge via
/// [`derive_v2_seed`].
pub struct HashWx {
    base: blake2b_simd::State,
}

impl HashWx {
    /// Bind a v2 oracle to `challenge`.
    pub fn new(challenge: &[u8]) -> Result<Self, Error> {
        let seed = derive_v2_seed(challenge);
        let mut base = blake2b_simd::Params::new()
            .hash_length(8)
            .personal(b"Equi-X v2h")
            .to_state();
        base.update(&seed);
        Ok(Self { base })
    }
}

impl HashOracle for HashWx {
    fn hash(&self, index: u16) -> u64 {
        let digest = self.base.clone().update(&index.to_le_bytes()).finalize();
        u64::from_le_bytes(digest.as_bytes().try_into().unwrap())
    }
}

/// Compress an arbitrary-length challenge into the fixed-size seed that
/// keys the v2 oracle, using the same Blake2b parameter block as the
/// reference implementation: fanout 1, depth 1, salt `"Equi-X v2"`, no key
/// or personalization.
pub fn derive_v2_seed(challenge: &[u8]) -> [u8; HASHWX_SEED_SIZE] {
    let hash = blake2b_simd::Params::new()
        .hash_length(HASHWX_SEED_SIZE)
        .fanout(1)
        .max_depth(1)
        .salt(b"Equi-X v2")
        .to_state()
        .update(challenge)
        .finalize();
    let mut seed = [0u8; HASHWX_SEED_SIZE];
    seed.copy_from_slice(hash.as_bytes());
    seed
}

/// The bound oracle, tagged by hash variant. Dispatch is a single match,
/// monomorphized at the call site rather than through a trait object, so
/// `H(i)` stays inlined in the solver's hot loop.
pub(crate) enum HashOracleImpl {
    V1(HashX),
    V2(HashWx),
}

impl HashOracleImpl {
    pub(crate) fn bind(variant: HashVariant, challenge: &[u8]) -> Result<Self, Error> {
        Ok(match variant {
            HashVariant::V1 => HashOracleImpl::V1(HashX::new(challenge)?),
            HashVariant::V2 => HashOracleImpl::V2(HashWx::new(challenge)?),
        })
    }
}

impl HashOracle for HashOracleImpl {
    fn hash(&self, index: u16) -> u64 {
        match self {
            HashOracleImpl::V1(h) => h.hash(index),
            HashOracleImpl::V2(h) => h.hash(index),
        }
    }
}

/// Which hash oracle backs an [`crate::EquiX`] context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashVariant {
    /// HashX, keyed directly from the challenge bytes.
    #[default]
    V1,
    /// HashWX, keyed from a Blake2b-derived seed.
    V2,
}
