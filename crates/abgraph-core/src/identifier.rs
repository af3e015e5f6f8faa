//! Interned identifiers for peptides, chemical elements and nucleotide chains.
//!
//! Every named element of an antibody model is addressed by an [`Id`]. Ids are
//! cheap to copy and compare, which matters because the layering passes look
//! sequences up by identity many times per peptide.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Process-wide pool of identifier strings.
///
/// The pool only ever grows and holds immutable strings; no layout state lives here.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// Interned identifier of a sequence in an antibody model.
///
/// # Examples
///
/// ```
/// use abgraph_core::identifier::Id;
///
/// let heavy = Id::new("HC1");
/// let domain = heavy.create_nested(Id::new("VH"));
/// assert_eq!(domain, "HC1::VH");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates a nested identifier `parent::child`.
    ///
    /// Domains use this to derive a readable identity from their peptide.
    pub fn create_nested(&self, child_id: Id) -> Self {
        with_interner(|interner| {
            let parent_str = interner.resolve(self.0).unwrap_or_default().to_string();
            let child_str = interner.resolve(child_id.0).unwrap_or_default();
            let nested_name = format!("{parent_str}::{child_str}");
            Self(interner.get_or_intern(nested_name))
        })
    }

    /// Returns the identifier text.
    pub fn as_string(&self) -> String {
        with_interner(|interner| interner.resolve(self.0).unwrap_or_default().to_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("HC1");
        let id2 = Id::new("HC1");
        let id3 = Id::new("LC1");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "HC1");
    }

    #[test]
    fn test_create_nested() {
        let peptide = Id::new("HC2");
        let vh = peptide.create_nested(Id::new("VH"));
        let ch1 = peptide.create_nested(Id::new("CH1"));

        assert_ne!(vh, ch1);
        assert_eq!(vh, "HC2::VH");
        assert_eq!(ch1, "HC2::CH1");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("PEG-linker");
        assert_eq!(format!("{id}"), "PEG-linker");
        assert_eq!(id.as_string(), "PEG-linker");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "siRNA".into();
        let id2 = Id::new("siRNA");

        assert_eq!(id1, id2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("LC1");

        assert!(id == "LC1");
        assert!(id != "LC2");

        let slice: &str = "LC1";
        assert!(id == slice);
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Id::new("key1"), "value1");
        map.insert(Id::new("key2"), "value2");

        assert_eq!(map.get(&Id::new("key1")), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }
}
