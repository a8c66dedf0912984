//! Share-set document
//!
//! A JSON object holding the sharing parameters under `"keys"` and one
//! base-encoded point per share index.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use num_bigint::BigInt;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use zeroth_threshold::{Share, ShareId, interpolate_at_zero};

use crate::error::ShareSetError;
use crate::selection::Selection;

/// Sharing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    /// Total shares handed out
    pub n: usize,
    /// Threshold: shares needed to reconstruct
    pub k: usize,
}

/// Radix as written in the document, either `"16"` or `16`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RadixField {
    Number(u64),
    Text(String),
}

impl RadixField {
    fn parse(&self) -> Option<u32> {
        match self {
            RadixField::Number(n) => u32::try_from(*n).ok(),
            RadixField::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RadixField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadixField::Number(n) => write!(f, "{}", n),
            RadixField::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One share value as stored in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPoint {
    pub base: RadixField,
    pub value: String,
}

/// Entries in document order, repeated keys included
struct RawDocument {
    keys: Keys,
    points: Vec<(String, EncodedPoint)>,
}

impl<'de> Deserialize<'de> for RawDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawDocumentVisitor)
    }
}

struct RawDocumentVisitor;

impl<'de> Visitor<'de> for RawDocumentVisitor {
    type Value = RawDocument;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a share-set object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut keys = None;
        let mut points = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == "keys" {
                if keys.is_some() {
                    return Err(de::Error::duplicate_field("keys"));
                }
                keys = Some(map.next_value()?);
            } else {
                let point = map.next_value()?;
                points.push((key, point));
            }
        }

        let keys = keys.ok_or_else(|| de::Error::missing_field("keys"))?;
        Ok(RawDocument { keys, points })
    }
}

/// A validated share-set document
#[derive(Debug, Clone)]
pub struct ShareSetDocument {
    keys: Keys,
    points: BTreeMap<ShareId, EncodedPoint>,
}

impl ShareSetDocument {
    /// Parse and validate a document from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ShareSetError> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Parse and validate a document from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ShareSetError> {
        let raw: RawDocument = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDocument) -> Result<Self, ShareSetError> {
        let Keys { n, k } = raw.keys;
        if k == 0 || k > n {
            return Err(ShareSetError::InvalidThreshold { k, n });
        }

        let mut points = BTreeMap::new();
        for (key, point) in raw.points {
            let index = parse_index(&key)?;
            // a repeated key, or "1" next to "01", names the same share twice
            if points.insert(index, point).is_some() {
                return Err(ShareSetError::InvalidIndex(key));
            }
        }

        Ok(Self {
            keys: raw.keys,
            points,
        })
    }

    pub fn keys(&self) -> Keys {
        self.keys
    }

    /// Threshold K
    pub fn threshold(&self) -> usize {
        self.keys.k
    }

    /// Total N
    pub fn total(&self) -> usize {
        self.keys.n
    }

    /// Share indices present in the document, ascending
    pub fn indices(&self) -> Vec<ShareId> {
        self.points.keys().copied().collect()
    }

    pub fn point(&self, index: ShareId) -> Option<&EncodedPoint> {
        self.points.get(&index)
    }

    /// Decode the share stored under `index`
    pub fn decode_share(&self, index: ShareId) -> Result<Share, ShareSetError> {
        let point = self
            .points
            .get(&index)
            .ok_or(ShareSetError::MissingShare(index))?;

        let base = point.base.parse().ok_or_else(|| ShareSetError::InvalidBase {
            index,
            base: point.base.to_string(),
        })?;

        let share = Share::decode(index, &point.value, base)
            .map_err(|source| ShareSetError::Decode { index, source })?;
        log::debug!("share {}: base {} value {} -> y={}", index, base, point.value, share.y());
        Ok(share)
    }

    /// Indices chosen by `selection`
    pub fn select(&self, selection: &Selection) -> Result<Vec<ShareId>, ShareSetError> {
        selection.resolve(&self.indices(), self.threshold())
    }

    /// Decode the shares chosen by `selection`, in selection order
    pub fn decode_selected(&self, selection: &Selection) -> Result<Vec<Share>, ShareSetError> {
        self.select(selection)?
            .into_iter()
            .map(|index| self.decode_share(index))
            .collect()
    }

    /// Select, decode and interpolate at zero
    pub fn reconstruct(&self, selection: &Selection) -> Result<BigInt, ShareSetError> {
        let shares = self.decode_selected(selection)?;
        log::info!(
            "reconstructing from {} of {} shares ({})",
            shares.len(),
            self.total(),
            selection
        );
        Ok(interpolate_at_zero(&shares)?)
    }
}

fn parse_index(key: &str) -> Result<ShareId, ShareSetError> {
    let invalid = || ShareSetError::InvalidIndex(key.to_string());
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match key.parse::<ShareId>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(index) => Ok(index),
    }
}
