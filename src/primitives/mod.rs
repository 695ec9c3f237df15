//! Core numeric primitives (Vector, Matrix).
//!
//! Dense f32 storage with exactly the operations the alignment and
//! prediction paths need. Row-major matrices, no backend indirection.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
