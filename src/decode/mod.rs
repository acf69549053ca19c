//! Token-level value decoders (§4.2): pure functions from an already-
//! classified token (plus, for strings/bytes/datetimes, its inner content
//! with delimiters stripped) to a typed value or a diagnostic.

pub mod bytes;
pub mod datetime;
pub mod number;
pub mod string;

pub use datetime::{DateTimeValue, Timezone};
pub use number::{LiteralKind, NumberSplit, Radix, Sign};
