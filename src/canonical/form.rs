//! Canonical form - a hashable, orderable rendering of any `Value`
//!
//! Canonicalization is a pure function of a value's structure and content:
//!
//! - scalars keep their value; numbers that compare equal share one
//!   representation (`True` becomes `1`, `2.0` becomes `2`)
//! - tuples and lists become tuples of canonical elements
//! - sets become tuples of their members in natural order
//! - maps become tuples of `(key, value)` pairs ordered by key

use crate::model::{Fingerprint, Value};
use crate::{Error, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// The canonical form of a `Value`
///
/// Build these with [`canonicalize`]; constructing `Float` directly with an
/// integral value bypasses number normalisation.
#[derive(Clone, Debug, Serialize)]
pub enum Canonical {
    None,
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Str(String),
    Tuple(Vec<Canonical>),
}

impl Canonical {
    /// Normalise a float: integral values within `i64` range become `Int`
    pub fn from_f64(x: f64) -> Self {
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
            Canonical::Int(x as i64)
        } else {
            Canonical::Float(x)
        }
    }

    /// Elements of a tuple form; scalars have none
    pub fn items(&self) -> &[Canonical] {
        match self {
            Canonical::Tuple(items) => items,
            _ => &[],
        }
    }

    /// BLAKE3 digest of the bincode encoding
    pub fn fingerprint(&self) -> Result<Fingerprint> {
        let data = bincode::serialize(self)?;
        Ok(Fingerprint::digest(&data))
    }

    /// Order two forms the way their values naturally order
    ///
    /// Numbers order numerically, strings and bytes lexicographically and
    /// tuples by their first unequal element (a prefix sorts first). Returns
    /// `None` when the two kinds have no order between them, such as an int
    /// and a string, or when a NaN is involved.
    pub fn natural_cmp(&self, other: &Canonical) -> Option<Ordering> {
        match (self, other) {
            (Canonical::Int(a), Canonical::Int(b)) => Some(a.cmp(b)),
            (Canonical::Float(a), Canonical::Float(b)) => a.partial_cmp(b),
            (Canonical::Int(a), Canonical::Float(b)) => cmp_int_float(*a, *b),
            (Canonical::Float(a), Canonical::Int(b)) => {
                cmp_int_float(*b, *a).map(Ordering::reverse)
            }
            (Canonical::Str(a), Canonical::Str(b)) => Some(a.cmp(b)),
            (Canonical::Bytes(a), Canonical::Bytes(b)) => Some(a.cmp(b)),
            (Canonical::Tuple(a), Canonical::Tuple(b)) => {
                match a.iter().zip(b).find(|(x, y)| x != y) {
                    Some((x, y)) => x.natural_cmp(y),
                    None => Some(a.len().cmp(&b.len())),
                }
            }
            (Canonical::None, Canonical::None) => Some(Ordering::Equal),
            _ => Option::None,
        }
    }

    /// Total order agreeing with `natural_cmp` wherever that is defined
    ///
    /// Kinds without a natural order are ranked by kind (none, numbers,
    /// bytes, strings, tuples) and floats fall back to `f64::total_cmp`, so
    /// NaNs sort after every other number. `Equal` only for equal forms.
    pub(crate) fn total_cmp(&self, other: &Canonical) -> Ordering {
        match (self, other) {
            (Canonical::Tuple(a), Canonical::Tuple(b)) => {
                match a.iter().zip(b).find(|(x, y)| x != y) {
                    Some((x, y)) => x.total_cmp(y),
                    None => a.len().cmp(&b.len()),
                }
            }
            (Canonical::Float(a), Canonical::Float(b)) => a.total_cmp(b),
            _ => self.natural_cmp(other).unwrap_or_else(|| {
                self.rank()
                    .cmp(&other.rank())
                    .then_with(|| match (self.as_f64(), other.as_f64()) {
                        (Some(a), Some(b)) => a.total_cmp(&b),
                        _ => Ordering::Equal,
                    })
            }),
        }
    }

    /// Order used to sort set members and map keys
    ///
    /// Like `total_cmp` but only between values of the same kind, so NaNs
    /// still sort among numbers. `None` means the pair cannot be sorted.
    fn sortable_cmp(&self, other: &Canonical) -> Option<Ordering> {
        match (self, other) {
            (Canonical::Tuple(a), Canonical::Tuple(b)) => {
                match a.iter().zip(b).find(|(x, y)| x != y) {
                    Some((x, y)) => x.sortable_cmp(y),
                    None => Some(a.len().cmp(&b.len())),
                }
            }
            _ if self.rank() == other.rank() => Some(self.total_cmp(other)),
            _ => Option::None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Canonical::None => 0,
            Canonical::Int(_) | Canonical::Float(_) => 1,
            Canonical::Bytes(_) => 2,
            Canonical::Str(_) => 3,
            Canonical::Tuple(_) => 4,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Canonical::Int(i) => Some(*i as f64),
            Canonical::Float(x) => Some(*x),
            _ => Option::None,
        }
    }
}

/// Compare an int with a float that `from_f64` kept as a float
///
/// Such a float is fractional, non-finite or beyond `i64`, so an equal
/// result after rounding the int means the float lies further out.
fn cmp_int_float(a: i64, b: f64) -> Option<Ordering> {
    match (a as f64).partial_cmp(&b)? {
        Ordering::Equal if b > 0.0 => Some(Ordering::Less),
        Ordering::Equal => Some(Ordering::Greater),
        ord => Some(ord),
    }
}

impl PartialEq for Canonical {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Canonical::None, Canonical::None) => true,
            (Canonical::Int(a), Canonical::Int(b)) => a == b,
            (Canonical::Float(a), Canonical::Float(b)) => a.to_bits() == b.to_bits(),
            (Canonical::Bytes(a), Canonical::Bytes(b)) => a == b,
            (Canonical::Str(a), Canonical::Str(b)) => a == b,
            (Canonical::Tuple(a), Canonical::Tuple(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Canonical {}

impl fmt::Display for Canonical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Canonical::None => write!(f, "None"),
            Canonical::Int(i) => write!(f, "{}", i),
            Canonical::Float(x) => write!(f, "{}", Value::Float(*x)),
            Canonical::Bytes(b) => write!(f, "{}", Value::Bytes(b.clone())),
            Canonical::Str(s) => write!(f, "{}", Value::Str(s.clone())),
            Canonical::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Compute the canonical form of a value
///
/// Fails with [`Error::NonHashableElement`] when a set member or map key is
/// not hashable (a list, set or map) or when two members or keys are of
/// kinds with no order between them, such as an int and a string.
pub fn canonicalize(value: &Value) -> Result<Canonical> {
    let canonical = match value {
        Value::None => Canonical::None,
        Value::Bool(b) => Canonical::Int(i64::from(*b)),
        Value::Int(i) => Canonical::Int(*i),
        Value::Float(x) => Canonical::from_f64(*x),
        Value::Str(s) => Canonical::Str(s.clone()),
        Value::Bytes(b) => Canonical::Bytes(b.clone()),
        Value::Tuple(items) | Value::List(items) => {
            Canonical::Tuple(items.iter().map(canonicalize).collect::<Result<_>>()?)
        }
        Value::Set(members) => {
            let mut members = members
                .iter()
                .map(|m| canonicalize_hashable(m, "set member"))
                .collect::<Result<Vec<_>>>()?;
            sort_naturally(&mut members, |m| m, "set members")?;
            members.dedup();
            Canonical::Tuple(members)
        }
        Value::Map(entries) => {
            let mut pairs = entries
                .iter()
                .map(|(k, v)| Ok((canonicalize_hashable(k, "map key")?, canonicalize(v)?)))
                .collect::<Result<Vec<_>>>()?;
            sort_naturally(&mut pairs, |(k, _)| k, "map keys")?;
            // Sorting is stable, so the last of equal keys is the latest write
            pairs.dedup_by(|later, earlier| {
                let same = later.0 == earlier.0;
                if same {
                    std::mem::swap(&mut later.1, &mut earlier.1);
                }
                same
            });
            Canonical::Tuple(
                pairs
                    .into_iter()
                    .map(|(k, v)| Canonical::Tuple(vec![k, v]))
                    .collect(),
            )
        }
    };
    Ok(canonical)
}

fn canonicalize_hashable(value: &Value, what: &str) -> Result<Canonical> {
    if !value.is_hashable() {
        return Err(Error::NonHashableElement(format!(
            "{} of type {} is not hashable: {}",
            what,
            value.kind(),
            value
        )));
    }
    canonicalize(value)
}

/// Stable sort by natural order, failing if two kinds meet that have none
///
/// NaNs are sortable: they go after the other numbers.
fn sort_naturally<T>(
    items: &mut [T],
    key: impl Fn(&T) -> &Canonical,
    what: &str,
) -> Result<()> {
    let mut incomparable: Option<String> = Option::None;
    items.sort_by(|a, b| {
        let (a, b) = (key(a), key(b));
        a.sortable_cmp(b).unwrap_or_else(|| {
            if incomparable.is_none() {
                incomparable = Some(format!("{} {} and {} have no natural order", what, a, b));
            }
            a.total_cmp(b)
        })
    });
    match incomparable {
        Some(reason) => Err(Error::NonHashableElement(reason)),
        None => Ok(()),
    }
}
