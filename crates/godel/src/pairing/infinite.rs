//! Bijections between pairs of naturals and naturals.

use num_bigint::BigUint;
use num_integer::{Integer, Roots};

// =============================================================================
// TWO UNBOUNDED NATURALS
// =============================================================================

/// Block (square-shell) pairing.
///
/// Shell `m = max(x, y)` holds codes `[m², (m+1)²)`: first the cells with
/// `y = m` by ascending `x`, then the cells with `x = m, y < m` by
/// ascending `y`.
pub fn pair_block(x: &BigUint, y: &BigUint) -> BigUint {
    let m = x.max(y);
    let rest = if y == m { x.clone() } else { m + y + 1u32 };
    m * m + rest
}

/// Inverse of [`pair_block`].
pub fn unpair_block(z: &BigUint) -> (BigUint, BigUint) {
    let m = Roots::sqrt(z);
    let rest = z - &m * &m;
    if rest <= m {
        (rest, m)
    } else {
        let y = rest - &m - 1u32;
        (m, y)
    }
}

/// Cantor (diagonal) pairing: ordered by `x + y`, ties broken by `y`.
pub fn pair_diagonal(x: &BigUint, y: &BigUint) -> BigUint {
    let w = x + y;
    let triangle = (&w * (&w + 1u32)) >> 1;
    triangle + y
}

/// Inverse of [`pair_diagonal`].
pub fn unpair_diagonal(z: &BigUint) -> (BigUint, BigUint) {
    // w = floor((sqrt(8z + 1) - 1) / 2)
    let root = Roots::sqrt(&((z << 3) + 1u32));
    let w = (root - 1u32) >> 1;
    let triangle = (&w * (&w + 1u32)) >> 1;
    let y = z - triangle;
    let x = w - &y;
    (x, y)
}

/// Strategy for pairing two unbounded naturals.
///
/// Both are bijections with the same contract; codes differ between them,
/// so data encoded with one must be decoded with the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PairingStrategy {
    /// Square shells (L∞ distance). Keeps both coordinates balanced.
    #[default]
    Block,
    /// Cantor diagonals (L1 distance).
    Diagonal,
}

impl PairingStrategy {
    pub fn pair(self, x: &BigUint, y: &BigUint) -> BigUint {
        match self {
            PairingStrategy::Block => pair_block(x, y),
            PairingStrategy::Diagonal => pair_diagonal(x, y),
        }
    }

    pub fn unpair(self, z: &BigUint) -> (BigUint, BigUint) {
        match self {
            PairingStrategy::Block => unpair_block(z),
            PairingStrategy::Diagonal => unpair_diagonal(z),
        }
    }
}

// =============================================================================
// BOUNDED TAG + UNBOUNDED PAYLOAD
// =============================================================================

/// Merges `tag ∈ [0, m)` with an unbounded `payload`: `m·payload + tag`.
///
/// Interleaves `m` unbounded streams round-robin into one.
pub fn merge(tag: &BigUint, payload: &BigUint, m: &BigUint) -> BigUint {
    debug_assert!(tag < m, "tag {} exceeds bound {}", tag, m);
    m * payload + tag
}

/// Inverse of [`merge`]: returns `(tag, payload)`.
pub fn unmerge(code: &BigUint, m: &BigUint) -> (BigUint, BigUint) {
    let (payload, tag) = code.div_rem(m);
    (tag, payload)
}
