//! A client puzzle built on the Equihash(60,3) algorithm family, using a
//! keyed per-index hash oracle (HashX / HashWX) in place of a generic
//! compression function.
//!
//! A solver enumerates the oracle over all `2^16` possible indices and
//! combines them through three collision-finding stages until it holds
//! 8-index tuples whose combined hash sum vanishes in its low 60 bits.
//! Verification is cheap: it recomputes the same sum from the claimed
//! indices and checks the claimed tree ordering, so checking a solution
//! costs nothing like finding one.
//!
//! ```
//! let challenge = b"hello equix";
//! let solutions = equix::solve(challenge).unwrap();
//! for solution in solutions.iter() {
//!     assert!(equix::verify(challenge, *solution).is_ok());
//! }
//! ```

mod context;
mod error;
mod hash;
mod heap;
mod order;
mod solution;
mod solver;
mod verify;

pub use context::{EquiX, EquiXBuilder, RuntimeOption};
pub use error::Error;
pub use hash::{HashOracle, HashVariant, HashWx, HashX, HASHWX_SEED_SIZE};
pub use heap::{PageAllocator, SolverMemory, SystemAllocator};
pub use solution::{Solution, Solutions, EQUIX_MAX_SOLS, EQUIX_NUM_IDX};
pub use solver::solve;
pub use verify::{verify, verify_bytes, verify_with_variant};
