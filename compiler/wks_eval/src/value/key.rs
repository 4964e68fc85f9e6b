//! Hashable keys for dicts and sets.
//!
//! Only immutable scalars and tuples of them are hashable. Keys are kept in
//! a total order so dict and set iteration is deterministic; integral
//! floats collapse onto the matching int so `d[1]` and `d[1.0]` agree.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::Value;
use crate::errors::{unhashable, EvalResult};

#[derive(Clone, Debug)]
pub enum HashKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Tuple(Rc<[HashKey]>),
}

impl HashKey {
    /// Key for `value`, or a `TypeError` if the value is unhashable.
    pub fn from_value(value: &Value) -> EvalResult<HashKey> {
        Ok(match value {
            Value::Null => HashKey::Null,
            Value::Bool(b) => HashKey::Bool(*b),
            Value::Int(i) => HashKey::Int(*i),
            Value::Float(f) => float_key(*f),
            Value::Str(s) => HashKey::Str(Rc::clone(s)),
            Value::Tuple(items) => HashKey::Tuple(
                items
                    .iter()
                    .map(HashKey::from_value)
                    .collect::<EvalResult<Vec<_>>>()?
                    .into(),
            ),
            other => return Err(unhashable(other.type_name())),
        })
    }

    pub fn to_value(&self) -> Value {
        match self {
            HashKey::Null => Value::Null,
            HashKey::Bool(b) => Value::Bool(*b),
            HashKey::Int(i) => Value::Int(*i),
            HashKey::Float(f) => Value::Float(*f),
            HashKey::Str(s) => Value::Str(Rc::clone(s)),
            HashKey::Tuple(items) => Value::tuple(items.iter().map(HashKey::to_value).collect()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            HashKey::Null => 0,
            HashKey::Bool(_) => 1,
            HashKey::Int(_) | HashKey::Float(_) => 2,
            HashKey::Str(_) => 3,
            HashKey::Tuple(_) => 4,
        }
    }
}

fn float_key(f: f64) -> HashKey {
    // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        HashKey::Int(f as i64)
    } else {
        HashKey::Float(f)
    }
}

impl Ord for HashKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (HashKey::Null, HashKey::Null) => Ordering::Equal,
            (HashKey::Bool(a), HashKey::Bool(b)) => a.cmp(b),
            (HashKey::Int(a), HashKey::Int(b)) => a.cmp(b),
            (HashKey::Float(a), HashKey::Float(b)) => a.total_cmp(b),
            // Ties between an int and a non-integral float cannot happen;
            // huge floats break ties after the int.
            (HashKey::Int(a), HashKey::Float(b)) => {
                (*a as f64).total_cmp(b).then(Ordering::Less)
            }
            (HashKey::Float(a), HashKey::Int(b)) => {
                a.total_cmp(&(*b as f64)).then(Ordering::Greater)
            }
            (HashKey::Str(a), HashKey::Str(b)) => a.cmp(b),
            (HashKey::Tuple(a), HashKey::Tuple(b)) => a.iter().cmp(b.iter()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for HashKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HashKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HashKey {}

impl Hash for HashKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            HashKey::Null => {}
            HashKey::Bool(b) => b.hash(state),
            HashKey::Int(i) => i.hash(state),
            HashKey::Float(f) => f.to_bits().hash(state),
            HashKey::Str(s) => s.hash(state),
            HashKey::Tuple(items) => items.hash(state),
        }
    }
}
