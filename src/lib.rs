pub mod error;
pub mod matrix;
mod raw_buf;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod vector;
#[cfg(test)]
mod tests;

pub use error::OutOfRangeError;
pub use matrix::Matrix;
pub use vector::{Cursor, IntoIter, Iter, Vector};
