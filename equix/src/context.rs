//! Builder and bound-context API: the crate's main entry point.

use crate::error::Error;
use crate::hash::{HashOracleImpl, HashVariant};
use crate::heap::SolverMemory;
use crate::solution::{Solution, Solutions};
use crate::solver::solve_with_oracle;
use crate::verify::verify_with_oracle;

/// How the hash oracle backing an [`EquiX`] context should be realized.
///
/// The reference HashX/HashWX programs are normally JIT-compiled per
/// challenge; that compiled backend is out of scope for this crate (see
/// `DESIGN.md`), so [`RuntimeOption::TryCompile`] always resolves to
/// [`Error::Unsupported`] rather than silently falling back. Only the
/// interpreted reference oracle in [`crate::hash`] is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeOption {
    /// Use the portable, interpreted reference oracle. Always available.
    #[default]
    InterpretOnly,
    /// Request a compiled backend. Not implemented by this crate.
    TryCompile,
}

/// Configures and builds an [`EquiX`] context.
#[derive(Debug, Clone, Default)]
pub struct EquiXBuilder {
    runtime: RuntimeOption,
    variant: HashVariant,
}

impl EquiXBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select how the hash oracle is realized. Defaults to
    /// [`RuntimeOption::InterpretOnly`].
    pub fn runtime(&mut self, runtime: RuntimeOption) -> &mut Self {
        self.runtime = runtime;
        self
    }

    /// Select the hash variant (v1/HashX or v2/HashWX). Defaults to v1.
    pub fn hash_variant(&mut self, variant: HashVariant) -> &mut Self {
        self.variant = variant;
        self
    }

    /// Bind a context to `challenge`.
    pub fn build(&self, challenge: &[u8]) -> Result<EquiX, Error> {
        if self.runtime == RuntimeOption::TryCompile {
            return Err(Error::Unsupported);
        }
        Ok(EquiX {
            oracle: HashOracleImpl::bind(self.variant, challenge)?,
            variant: self.variant,
        })
    }
}

/// An EquiX puzzle context bound to one challenge.
pub struct EquiX {
    oracle: HashOracleImpl,
    variant: HashVariant,
}

impl EquiX {
    /// Bind a context to `challenge` using the default configuration (v1,
    /// interpreted oracle).
    pub fn new(challenge: &[u8]) -> Result<Self, Error> {
        EquiXBuilder::new().build(challenge)
    }

    /// Solve this context, allocating a fresh scratch heap.
    pub fn solve(&self) -> Solutions {
        let mut mem = SolverMemory::new();
        self.solve_with_memory(&mut mem)
    }

    /// Solve this context, reusing caller-provided scratch memory. Prefer
    /// this when solving many challenges back to back.
    pub fn solve_with_memory(&self, mem: &mut SolverMemory) -> Solutions {
        solve_with_oracle(&self.oracle, mem)
    }

    /// Verify `solution` against this context's challenge and variant.
    pub fn verify(&self, solution: Solution) -> Result<(), Error> {
        verify_with_oracle(&self.oracle, solution)
    }

    /// The hash variant this context is bound with.
    pub fn variant(&self) -> HashVariant {
        self.variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_compile_is_unsupported() {
        let result = EquiXBuilder::new()
            .runtime(RuntimeOption::TryCompile)
            .build(b"challenge");
        assert_eq!(result.err(), Some(Error::Unsupported));
    }

    #[test]
    fn context_solve_and_verify_agree() {
        let mut found = false;
        for nonce in 0u64..32 {
            let challenge = nonce.to_le_bytes();
            let ctx = EquiX::new(&challenge).unwrap();
            let solutions = ctx.solve();
            for sol in solutions.iter() {
                assert!(ctx.verify(*sol).is_ok());
                found = true;
            }
        }
        assert!(found, "expected at least one solution across 32 nonces");
    }

    #[test]
    fn v1_and_v2_contexts_can_diverge() {
        let challenge = b"variant-check";
        let v1 = EquiXBuilder::new()
            .hash_variant(HashVariant::V1)
            .build(challenge)
            .unwrap();
        let v2 = EquiXBuilder::new()
            .hash_variant(HashVariant::V2)
            .build(challenge)
            .unwrap();
        assert_eq!(v1.variant(), HashVariant::V1);
        assert_eq!(v2.variant(), HashVariant::V2);
    }
}
