//! Pairing functions: the arithmetic core of the numbering engine.
//!
//! All functions here are pure bijections over `BigUint`:
//! - [`finite`]: mixed-radix packing of bounded digits
//! - [`infinite`]: two unbounded naturals into one, and the
//!   bounded-tag/unbounded-payload merge
//! - [`list`]: fixed-length tuples of naturals via the combinatorial
//!   number system

pub mod finite;
pub mod infinite;
pub mod list;

pub use finite::{f_to_flist, flist_to_f, radix_product};
pub use infinite::{merge, pair_block, pair_diagonal, unmerge, unpair_block, unpair_diagonal, PairingStrategy};
pub use list::{binomial, i_to_ilist, ilist_to_i, ilist_to_iset, iset_to_ilist};
