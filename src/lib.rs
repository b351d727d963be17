//! Shared-library dependency closure copying.
//!
//! Uses `ldd` to discover the libraries a binary loads at runtime and copies
//! them next to the binary, so a directory of executables becomes
//! self-contained on machines that only carry the base system libraries.
//! Libraries under excluded path prefixes (by default `/lib/`) are assumed
//! present everywhere and left alone.

mod closure;
mod copy;
mod policy;
mod resolve;

pub use closure::{close_dependencies, ClosureReport};
pub use copy::{FsCopier, LibraryCopier};
pub use policy::CopyPolicy;
pub use resolve::{parse_ldd_output, Dependency, DependencyResolver, LddResolver};
