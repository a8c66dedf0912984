//! Share Reconstruction
//!
//! Recovers the constant term of the sharing polynomial from K shares using
//! Lagrange interpolation at x = 0, computed exactly over the integers.

use std::collections::HashSet;

use num_bigint::BigInt;
use num_traits::{One, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::radix::{self, DecodeError};

/// A share identifier (1-indexed), used as the x-coordinate
pub type ShareId = u64;

/// A decoded secret share, the point `(x, y)` on the sharing polynomial
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Share {
    x: ShareId,
    #[serde(
        serialize_with = "serialize_bigint",
        deserialize_with = "deserialize_bigint"
    )]
    y: BigInt,
}

impl Share {
    /// Create a new share
    pub fn new(x: ShareId, y: impl Into<BigInt>) -> Self {
        Self { x, y: y.into() }
    }

    /// Decode a base-encoded share value
    pub fn decode(x: ShareId, digits: &str, base: u32) -> Result<Self, DecodeError> {
        let y = radix::decode(digits, base)?;
        Ok(Self::new(x, y))
    }

    pub fn x(&self) -> ShareId {
        self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }
}

/// Threshold reconstruction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("insufficient shares: got {got}, need {need}")]
    InsufficientShares { got: usize, need: usize },

    #[error("invalid threshold: {0}")]
    InvalidThreshold(usize),

    #[error("duplicate x-coordinate: {0}")]
    DuplicateXCoordinate(ShareId),

    #[error("inexact division: {numerator} / {denominator} is not an integer")]
    InexactDivision {
        numerator: BigInt,
        denominator: BigInt,
    },
}

/// Compute the value at x = 0 of the polynomial through `shares`
///
/// Every basis term `y_j * num_j / den_j` is lifted to the common denominator
/// `D = prod(den_j)`, so the only division is the final `N / D`. It must be
/// exact; a remainder means the shares do not lie on one integer polynomial.
///
/// # Arguments
/// * `shares` - At least one share, x-coordinates pairwise distinct
///
/// # Returns
/// The reconstructed secret P(0)
pub fn interpolate_at_zero(shares: &[Share]) -> Result<BigInt, ThresholdError> {
    if shares.is_empty() {
        return Err(ThresholdError::InsufficientShares { got: 0, need: 1 });
    }
    ensure_distinct(shares)?;

    let x_coords: Vec<BigInt> = shares.iter().map(|s| BigInt::from(s.x)).collect();
    let basis: Vec<(BigInt, BigInt)> = (0..x_coords.len())
        .map(|j| basis_at_zero(&x_coords, j))
        .collect();

    let denominator = basis
        .iter()
        .fold(BigInt::one(), |acc, (_, den)| acc * den);

    let mut numerator = BigInt::zero();
    for (share, (num, den)) in shares.iter().zip(&basis) {
        // den_j divides D by construction
        numerator += &share.y * num * (&denominator / den);
    }

    if !(&numerator % &denominator).is_zero() {
        return Err(ThresholdError::InexactDivision {
            numerator,
            denominator,
        });
    }

    Ok(numerator / denominator)
}

/// Combine the first `threshold` shares to reconstruct the secret
///
/// # Arguments
/// * `shares` - At least K shares
/// * `threshold` - K: the number of shares the polynomial needs
pub fn combine_shares(shares: &[Share], threshold: usize) -> Result<BigInt, ThresholdError> {
    if threshold == 0 {
        return Err(ThresholdError::InvalidThreshold(threshold));
    }
    if shares.len() < threshold {
        return Err(ThresholdError::InsufficientShares {
            got: shares.len(),
            need: threshold,
        });
    }

    interpolate_at_zero(&shares[..threshold])
}

/// Numerator and denominator of the Lagrange basis polynomial L_j(0)
///
/// L_j(0) = prod_{i != j} (0 - x_i) / (x_j - x_i)
fn basis_at_zero(x_coords: &[BigInt], j: usize) -> (BigInt, BigInt) {
    let x_j = &x_coords[j];
    let mut numerator = BigInt::one();
    let mut denominator = BigInt::one();

    for (i, x_i) in x_coords.iter().enumerate() {
        if i != j {
            numerator *= -x_i;
            denominator *= x_j - x_i;
        }
    }

    (numerator, denominator)
}

/// Reject repeated x-coordinates, which would make a denominator zero
fn ensure_distinct(shares: &[Share]) -> Result<(), ThresholdError> {
    let mut seen = HashSet::with_capacity(shares.len());
    for share in shares {
        if !seen.insert(share.x) {
            return Err(ThresholdError::DuplicateXCoordinate(share.x));
        }
    }
    Ok(())
}

/// Serialize a big integer as its decimal string
fn serialize_bigint<S>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

/// Deserialize a big integer from a decimal string
fn deserialize_bigint<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse()
        .map_err(|e| serde::de::Error::custom(format!("invalid integer {:?}: {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(pairs: &[(ShareId, i64)]) -> Vec<Share> {
        pairs.iter().map(|&(x, y)| Share::new(x, y)).collect()
    }

    #[test]
    fn test_worked_example() {
        let shares = vec![
            Share::decode(1, "4", 10).unwrap(),
            Share::decode(2, "111", 2).unwrap(),
            Share::decode(3, "12", 10).unwrap(),
        ];
        assert_eq!(shares[1].y(), &BigInt::from(7));

        let secret = interpolate_at_zero(&shares).unwrap();
        assert_eq!(secret, BigInt::from(3));
    }

    #[test]
    fn test_single_share_is_constant() {
        let shares = points(&[(5, 42)]);
        assert_eq!(interpolate_at_zero(&shares).unwrap(), BigInt::from(42));
    }

    #[test]
    fn test_non_consecutive_indices() {
        // P(x) = x^2 + 3; L_1(0) = 12/5 is not an integer
        let shares = points(&[(1, 4), (2, 7), (6, 39)]);
        assert_eq!(interpolate_at_zero(&shares).unwrap(), BigInt::from(3));

        // P(x) = x; no basis term is integral on its own
        let shares = points(&[(1, 1), (2, 2), (4, 4)]);
        assert_eq!(interpolate_at_zero(&shares).unwrap(), BigInt::zero());
    }

    #[test]
    fn test_negative_secret() {
        // P(x) = -7 + 4x - x^2
        let shares = points(&[(1, -4), (2, -3), (3, -4)]);
        assert_eq!(interpolate_at_zero(&shares).unwrap(), BigInt::from(-7));
    }

    #[test]
    fn test_empty_shares() {
        assert_eq!(
            interpolate_at_zero(&[]),
            Err(ThresholdError::InsufficientShares { got: 0, need: 1 })
        );
    }

    #[test]
    fn test_duplicate_x() {
        let shares = points(&[(1, 4), (2, 7), (1, 4)]);
        assert_eq!(
            interpolate_at_zero(&shares),
            Err(ThresholdError::DuplicateXCoordinate(1))
        );
    }

    #[test]
    fn test_inexact_division() {
        // The line through (1, 1) and (3, 2) crosses x = 0 at 1/2
        let shares = points(&[(1, 1), (3, 2)]);
        assert!(matches!(
            interpolate_at_zero(&shares),
            Err(ThresholdError::InexactDivision { .. })
        ));
    }

    #[test]
    fn test_combine_uses_first_threshold_shares() {
        // (4, 100) is not on x^2 + 3 and must be ignored
        let shares = points(&[(1, 4), (2, 7), (3, 12), (4, 100)]);
        assert_eq!(combine_shares(&shares, 3).unwrap(), BigInt::from(3));
    }

    #[test]
    fn test_combine_insufficient_shares() {
        let shares = points(&[(1, 4), (2, 7)]);
        assert_eq!(
            combine_shares(&shares, 3),
            Err(ThresholdError::InsufficientShares { got: 2, need: 3 })
        );
    }

    #[test]
    fn test_combine_zero_threshold() {
        let shares = points(&[(1, 4)]);
        assert_eq!(
            combine_shares(&shares, 0),
            Err(ThresholdError::InvalidThreshold(0))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ThresholdError::InsufficientShares { got: 2, need: 3 }.to_string(),
            "insufficient shares: got 2, need 3"
        );
        assert_eq!(
            ThresholdError::DuplicateXCoordinate(4).to_string(),
            "duplicate x-coordinate: 4"
        );
        assert_eq!(
            ThresholdError::InexactDivision {
                numerator: BigInt::from(-3),
                denominator: BigInt::from(2),
            }
            .to_string(),
            "inexact division: -3 / 2 is not an integer"
        );
    }

    #[test]
    fn test_share_serde() {
        let share = Share::new(2, BigInt::from(-123456789));
        let json = serde_json::to_string(&share).unwrap();
        assert_eq!(json, r#"{"x":2,"y":"-123456789"}"#);

        let parsed: Share = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, share);

        assert!(serde_json::from_str::<Share>(r#"{"x":2,"y":"12a"}"#).is_err());
    }
}
