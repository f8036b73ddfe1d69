//! CanonicalKey - use any nested value as a map key or set member

use super::form::{canonicalize, Canonical};
use crate::model::{Fingerprint, Value};
use crate::{Error, Result};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// A value paired with its canonical form
///
/// Hashing, equality and ordering all go through the canonical form, so
/// two maps with the same entries in a different order are the same key.
/// The original value is kept untouched and handed back by [`restore`].
///
/// Ordering follows the natural order of the canonical forms where one
/// exists. Kinds with no order between them are ranked by kind: `None`,
/// numbers, bytes, strings, then tuples (which includes lists, sets and
/// maps). NaNs sort after the other numbers. The result is a total order,
/// so keys of any mix can be sorted; the fingerprint only breaks ties.
///
/// [`restore`]: CanonicalKey::restore
#[derive(Clone, Debug)]
pub struct CanonicalKey {
    original: Value,
    canonical: Canonical,
    fingerprint: Fingerprint,
}

impl CanonicalKey {
    /// Wrap a value, computing its canonical form and fingerprint
    pub fn new(value: impl Into<Value>) -> Result<Self> {
        let original = value.into();
        let canonical = canonicalize(&original)?;
        let fingerprint = canonical.fingerprint()?;
        Ok(CanonicalKey {
            original,
            canonical,
            fingerprint,
        })
    }

    /// The original value, exactly as it was wrapped
    pub fn restore(&self) -> &Value {
        &self.original
    }

    /// Unwrap into the original value
    pub fn into_inner(self) -> Value {
        self.original
    }

    pub fn canonical(&self) -> &Canonical {
        &self.canonical
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Iterate the elements of the canonical form
    ///
    /// Lists and sets yield their elements, maps their `(key, value)`
    /// pairs, scalars nothing.
    pub fn iter(&self) -> std::slice::Iter<'_, Canonical> {
        self.canonical.items().iter()
    }
}

impl TryFrom<Value> for CanonicalKey {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        CanonicalKey::new(value)
    }
}

impl Hash for CanonicalKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

impl PartialEq for CanonicalKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for CanonicalKey {}

impl PartialEq<Canonical> for CanonicalKey {
    fn eq(&self, other: &Canonical) -> bool {
        self.canonical == *other
    }
}

/// Compares against the raw value as given: only scalars and tuples can
/// match, a list never equals the tuple it canonicalizes to.
impl PartialEq<Value> for CanonicalKey {
    fn eq(&self, other: &Value) -> bool {
        other.is_hashable()
            && canonicalize(other).is_ok_and(|canonical| self.canonical == canonical)
    }
}

impl Ord for CanonicalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical
            .total_cmp(&other.canonical)
            .then_with(|| self.fingerprint.cmp(&other.fingerprint))
    }
}

impl PartialOrd for CanonicalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialOrd<Canonical> for CanonicalKey {
    fn partial_cmp(&self, other: &Canonical) -> Option<Ordering> {
        Some(self.canonical.total_cmp(other))
    }
}

impl<'a> IntoIterator for &'a CanonicalKey {
    type Item = &'a Canonical;
    type IntoIter = std::slice::Iter<'a, Canonical>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Drop structurally equal duplicates and return the survivors in key order
///
/// The first of each group of duplicates is kept. Fails if any value cannot
/// be canonicalized.
pub fn dedup<I>(values: I) -> Result<Vec<Value>>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let keys = values
        .into_iter()
        .map(CanonicalKey::new)
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::with_capacity(keys.len());
    let mut unique: Vec<&CanonicalKey> = keys.iter().filter(|key| seen.insert(*key)).collect();
    unique.sort();

    trace!(input = keys.len(), unique = unique.len(), "Deduplicated values");
    Ok(unique.into_iter().map(|key| key.restore().clone()).collect())
}
