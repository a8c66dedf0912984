//! Zeroth Share Sets
//!
//! Reads the share-set document a dealer hands out, picks which K shares to
//! use, and feeds the decoded points to the reconstruction core.
//!
//! ```text
//! {
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2",  "value": "111" },
//!     "3": { "base": "10", "value": "12" },
//!     "6": { "base": "4",  "value": "213" }
//! }
//! ```

pub mod document;
pub mod error;
pub mod selection;

pub use document::{EncodedPoint, Keys, RadixField, ShareSetDocument};
pub use error::ShareSetError;
pub use selection::Selection;
