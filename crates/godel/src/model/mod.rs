//! Data model for the numbering engine.
//!
//! - [`Size`]: cardinality of a codec's domain
//! - [`Value`]: self-describing values that codecs map to and from codes
//! - [`Fraction`]: exact rationals for the Stern-Brocot codec

pub mod fraction;
pub mod size;
pub mod value;

pub use fraction::Fraction;
pub use size::Size;
pub use value::{List, Name, Newtype, Record, Symbol, Text, Value};
