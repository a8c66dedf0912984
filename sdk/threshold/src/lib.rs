//! Zeroth Threshold Reconstruction
//!
//! Recovers the secret of a K-of-N Shamir-style sharing whose share values
//! are written in arbitrary numeric bases. Arithmetic is exact over the
//! integers: no finite field, no floating point.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Reconstruction Flow                      │
//! │                                                               │
//! │  (x, base, digits)      Share (x, y)           Secret         │
//! │  ┌──────────────┐      ┌──────────────┐      ┌────────────┐   │
//! │  │ Base Decoder │─────▶│ Interpolator │─────▶│  P(0)      │   │
//! │  │  (radix)     │  K×  │  (Lagrange)  │      │  BigInt    │   │
//! │  └──────────────┘      └──────────────┘      └────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use num_bigint::BigInt;
//! use zeroth_threshold::{Share, interpolate_at_zero};
//!
//! let shares = vec![
//!     Share::decode(1, "4", 10).unwrap(),
//!     Share::decode(2, "111", 2).unwrap(),
//!     Share::decode(3, "12", 10).unwrap(),
//! ];
//! assert_eq!(interpolate_at_zero(&shares).unwrap(), BigInt::from(3));
//! ```

pub mod alphabet;
pub mod radix;
pub mod shares;

pub use alphabet::{MAX_BASE, MIN_BASE, digit_char, digit_value, is_valid_base};
pub use radix::{DecodeError, decode, encode};
pub use shares::{Share, ShareId, ThresholdError, combine_shares, interpolate_at_zero};
