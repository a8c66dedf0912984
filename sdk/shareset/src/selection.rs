//! Share selection
//!
//! Decides which K of the N shares in a document feed the interpolation.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use zeroth_threshold::ShareId;

use crate::error::ShareSetError;

/// Which shares to reconstruct from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Indices `1..=k`; every one of them must be present
    #[default]
    Leading,
    /// The `k` lowest indices present in the document
    Available,
    /// Exactly these indices, in this order
    Explicit(Vec<ShareId>),
}

impl Selection {
    /// Resolve against the (ascending) indices present in a document
    pub fn resolve(
        &self,
        present: &[ShareId],
        threshold: usize,
    ) -> Result<Vec<ShareId>, ShareSetError> {
        match self {
            Selection::Leading => (1..=threshold as ShareId)
                .map(|index| {
                    if present.contains(&index) {
                        Ok(index)
                    } else {
                        Err(ShareSetError::MissingShare(index))
                    }
                })
                .collect(),
            Selection::Available => {
                if present.len() < threshold {
                    return Err(ShareSetError::NotEnoughShares {
                        available: present.len(),
                        need: threshold,
                    });
                }
                Ok(present[..threshold].to_vec())
            }
            Selection::Explicit(ids) => {
                if ids.len() != threshold {
                    return Err(ShareSetError::SelectionSize {
                        got: ids.len(),
                        need: threshold,
                    });
                }
                let mut seen = HashSet::with_capacity(ids.len());
                for &id in ids {
                    if !seen.insert(id) {
                        return Err(ShareSetError::DuplicateSelection(id));
                    }
                    if !present.contains(&id) {
                        return Err(ShareSetError::MissingShare(id));
                    }
                }
                Ok(ids.clone())
            }
        }
    }
}

impl FromStr for Selection {
    type Err = ShareSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "first" | "leading" => return Ok(Selection::Leading),
            "available" => return Ok(Selection::Available),
            _ => {}
        }

        let invalid = || ShareSetError::InvalidSelection(s.to_string());
        let ids = trimmed
            .split(',')
            .map(|part| match part.trim().parse::<ShareId>() {
                Ok(0) | Err(_) => Err(invalid()),
                Ok(id) => Ok(id),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Selection::Explicit(ids))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Leading => write!(f, "first"),
            Selection::Available => write!(f, "available"),
            Selection::Explicit(ids) => {
                let list: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                write!(f, "{}", list.join(","))
            }
        }
    }
}
