use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A polymorphic, cross-representation-comparable key.
///
/// An identity wraps one underlying value. Two identities built from
/// different representations of the same value compare equal: the identity
/// of integer `5` equals the identity built from the text `"5"`, and a
/// text identity holding a well-formed UUID equals the identity built from
/// that UUID. Equality, ordering, and hashing all operate on a normalized
/// form, so the relation is reflexive, symmetric, and transitive across
/// any mix of representations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    /// An integer-backed identity
    Integer(i64),
    /// A UUID-backed identity
    Uuid(Uuid),
    /// A text-backed identity
    Text(String),
}

impl Identity {
    /// Create an identity from any supported underlying value.
    #[inline]
    pub fn new(value: impl Into<Identity>) -> Self {
        value.into()
    }

    /// Normalize to the most specific representation. Text that parses as
    /// an integer or a UUID compares as that type.
    fn normalized(&self) -> Identity {
        match self {
            Identity::Text(text) => {
                if let Ok(number) = text.parse::<i64>() {
                    Identity::Integer(number)
                } else if let Ok(uuid) = Uuid::parse_str(text) {
                    Identity::Uuid(uuid)
                } else {
                    Identity::Text(text.clone())
                }
            }
            other => other.clone(),
        }
    }

    /// Rank used to totally order identities of different normalized kinds.
    fn rank(&self) -> u8 {
        match self {
            Identity::Integer(_) => 0,
            Identity::Uuid(_) => 1,
            Identity::Text(_) => 2,
        }
    }

    /// View the identity as an integer. Returns `None` when the underlying
    /// value is neither an integer nor text that parses as one.
    pub fn as_integer(&self) -> Option<i64> {
        match self.normalized() {
            Identity::Integer(number) => Some(number),
            _ => None,
        }
    }

    /// View the identity as a UUID. Returns `None` when the underlying
    /// value is neither a UUID nor text that parses as one.
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self.normalized() {
            Identity::Uuid(uuid) => Some(uuid),
            _ => None,
        }
    }

    /// View the identity as text. Every identity has a text form.
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Require the identity to be viewable as a UUID.
    ///
    /// Unlike [`Identity::as_uuid`], a failed conversion here is a hard
    /// error, for call sites that promised a UUID-backed identity.
    pub fn require_uuid(&self) -> Result<Uuid, GraphError> {
        self.as_uuid().ok_or_else(|| {
            GraphError::IdentityConversion(format!("identity {self} is not a UUID"))
        })
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        match (self.normalized(), other.normalized()) {
            (Identity::Integer(a), Identity::Integer(b)) => a == b,
            (Identity::Uuid(a), Identity::Uuid(b)) => a == b,
            (Identity::Text(a), Identity::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Identity {}

impl PartialOrd for Identity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identity {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.normalized(), other.normalized());
        match (&a, &b) {
            (Identity::Integer(a), Identity::Integer(b)) => a.cmp(b),
            (Identity::Uuid(a), Identity::Uuid(b)) => a.cmp(b),
            (Identity::Text(a), Identity::Text(b)) => a.cmp(b),
            _ => a.rank().cmp(&b.rank()),
        }
    }
}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normalized = self.normalized();
        normalized.rank().hash(state);
        match normalized {
            Identity::Integer(number) => number.hash(state),
            Identity::Uuid(uuid) => uuid.hash(state),
            Identity::Text(text) => text.hash(state),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Integer(number) => write!(f, "{number}"),
            Identity::Uuid(uuid) => write!(f, "{uuid}"),
            Identity::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<i64> for Identity {
    fn from(value: i64) -> Self {
        Identity::Integer(value)
    }
}

impl From<Uuid> for Identity {
    fn from(value: Uuid) -> Self {
        Identity::Uuid(value)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Identity::Text(value.to_string())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Identity::Text(value)
    }
}
