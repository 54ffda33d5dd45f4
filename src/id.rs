// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use rand::Rng as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::Result, rng};

/// An opaque, globally unique identifier for users and isolated entities.
///
/// The canonical text form is a hyphenated UUID.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(Uuid);

impl Id {
    /// Creates a fresh random identifier using the current thread's generator.
    #[must_use]
    pub fn new() -> Self {
        rng::map(|rng| Self(uuid::Builder::from_random_bytes(rng.gen()).into_uuid()))
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for Id {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl From<Uuid> for Id {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// The capability to mint new identifiers and to read them back from text.
///
/// Implementations must hand out a distinct identifier on every call to
/// [`IdGenerator::generate`], including when called from several threads at
/// once.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Id;

    fn parse(&self, text: &str) -> Result<Id> {
        text.parse()
    }
}

impl<T: IdGenerator + ?Sized> IdGenerator for Box<T> {
    fn generate(&self) -> Id {
        (**self).generate()
    }

    fn parse(&self, text: &str) -> Result<Id> {
        (**self).parse(text)
    }
}

impl<T: IdGenerator + ?Sized> IdGenerator for &T {
    fn generate(&self) -> Id {
        (**self).generate()
    }

    fn parse(&self, text: &str) -> Result<Id> {
        (**self).parse(text)
    }
}

/// Random (version 4) identifiers drawn from a per-thread ChaCha20 generator.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> Id {
        Id::new()
    }
}

/// Predictable identifiers counting up from a starting value, for tests that
/// need to know which identifier a substitution will produce.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Returns the identifier the `n`th value of a sequence maps to.
    #[must_use]
    pub fn nth(n: u64) -> Id {
        Id(Uuid::from_u128(u128::from(n)))
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> Id {
        Self::nth(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc, thread};

    use serde_test::{assert_tokens, Configure, Token};
    use uuid::uuid;

    use crate::error::Error;

    use super::*;

    #[test]
    fn parse_canonical_text() -> Result<()> {
        let id: Id = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse()?;
        assert_eq!(
            id.as_uuid(),
            &uuid!("67e55044-10b1-426f-9247-bb680e5fe0c8")
        );
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
        Ok(())
    }

    #[test]
    fn parse_rejects_garbage() {
        for text in ["", "abc", "!!notanid!!", "67e55044-10b1-426f-9247-bb680e5fe0c"] {
            assert!(
                matches!(RandomIds.parse(text), Err(Error::MalformedIdentifier(_))),
                "{text:?} should not parse",
            );
        }
    }

    #[test]
    fn serializes_as_text() {
        let id = Id::from_uuid(uuid!("00000000-0000-0000-0000-00000000002a"));
        assert_tokens(&id.readable(), &[Token::Str("00000000-0000-0000-0000-00000000002a")]);
    }

    #[test]
    fn random_ids_are_version_4() {
        let id = RandomIds.generate();
        assert_eq!(id.as_uuid().get_version(), Some(uuid::Version::Random));
    }

    #[test]
    fn random_ids_are_distinct_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| (0..256).map(|_| RandomIds.generate()).collect::<Vec<_>>()))
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate identifier {id}");
            }
        }
        assert_eq!(seen.len(), 8 * 256);
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::starting_at(5);
        assert_eq!(ids.generate(), SequentialIds::nth(5));
        assert_eq!(ids.generate(), SequentialIds::nth(6));
        assert_eq!(
            SequentialIds::nth(6).to_string(),
            "00000000-0000-0000-0000-000000000006"
        );
    }

    #[test]
    fn sequential_ids_are_distinct_across_threads() {
        let ids = Arc::new(SequentialIds::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..100).map(|_| ids.generate()).collect::<Vec<_>>())
            })
            .collect();

        let seen: HashSet<_> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        assert_eq!(seen.len(), 400);
    }
}
