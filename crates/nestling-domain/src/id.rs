//! Entity identifier generation.
//!
//! Every persisted entity is keyed by a one-letter kind tag followed by ten
//! decimal digits (`p0123456789`). Generation is pure and random; uniqueness
//! is the storage layer's job (collision probe + unique key on insert).

use rand::RngExt;

/// Number of random digits following the kind prefix.
pub const ID_DIGITS: usize = 10;

/// The kinds of entity that carry generated identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Parent,
    Child,
    Expenditure,
}

impl EntityKind {
    /// One-letter tag prefixed to every identifier of this kind.
    pub fn prefix(self) -> char {
        match self {
            Self::Parent => 'p',
            Self::Child => 'c',
            Self::Expenditure => 'e',
        }
    }
}

/// Generate a random identifier candidate for `kind`.
///
/// Not guaranteed unique — callers must probe storage before relying on it.
pub fn random_id(kind: EntityKind) -> String {
    let mut rng = rand::rng();
    let mut id = String::with_capacity(1 + ID_DIGITS);
    id.push(kind.prefix());
    for _ in 0..ID_DIGITS {
        id.push(char::from(b'0' + rng.random_range(0..10u8)));
    }
    id
}

/// Whether `s` matches the identifier pattern for `kind`.
pub fn is_valid(kind: EntityKind, s: &str) -> bool {
    let mut chars = s.chars();
    chars.next() == Some(kind.prefix())
        && s.len() == 1 + ID_DIGITS
        && chars.all(|c| c.is_ascii_digit())
}
