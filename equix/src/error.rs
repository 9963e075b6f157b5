/// Everything that can go wrong building an EquiX puzzle, solving it, or
/// verifying a claimed solution.
///
/// `Ok(())` stands in for the C reference's `EQUIX_OK` throughout this
/// crate instead of a sentinel variant. Discriminants are numbered in the
/// same relative order as the C `equix_result` enum but are not ABI-
/// identical to it: the spec (§6) adds a standalone `Duplicates` variant
/// that the C enum has no equivalent for, which shifts `PartialSum` and
/// `FinalSum` off the C values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, num_enum::IntoPrimitive)]
#[repr(u8)]
pub enum Error {
    /// The hash oracle failed to bind to the supplied challenge.
    HashFunction = 1,
    /// The solution's indices are not in canonical tree order.
    Order = 2,
    /// Two or more of the solution's indices coincide.
    Duplicates = 3,
    /// A leaf or level-1 partial sum did not vanish in its required low bits.
    PartialSum = 4,
    /// The full 8-hash sum did not vanish in its low 60 bits.
    FinalSum = 5,
    /// The requested backend/configuration is not supported by this build.
    Unsupported = 6,
    /// The solver heap could not be allocated.
    OutOfMemory = 7,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Error::HashFunction => "hash oracle failed to bind challenge",
                Error::Order => "solution indices are out of canonical order",
                Error::Duplicates => "solution contains duplicate indices",
                Error::PartialSum => "nonzero partial sum",
                Error::FinalSum => "nonzero final sum",
                Error::Unsupported => "requested backend is not supported",
                Error::OutOfMemory => "solver heap allocation failed",
            }
        )
    }
}

impl std::error::Error for Error {}
