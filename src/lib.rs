//! Graph 4-coloring as a state-space search (backtracking, depth-first, ordered, A*-style and greedy)

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// error type of the crate
pub mod error;

/// weighted instance, assignments, solutions and checker
pub mod color;

/// read/write the DIMENSION/GRAPH instance format
pub mod graph_file;

/// random instance generator
pub mod generator;

/// helper and utility methods for executables (exports)
pub mod util;

/// text log of the search iterations
pub mod iteration_log;

/// search strategies for the 4-coloring problem
pub mod search;
