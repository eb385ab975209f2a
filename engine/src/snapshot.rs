//! Snapshot types for persisting and restoring library state.
//!
//! Snapshots are the bridge between the in-memory Store and persistent
//! storage. They serialize deterministically and are validated on import so
//! a corrupted or hand-edited file cannot smuggle in broken invariants.

use crate::{error::Result, Book, BookId, Borrower, BorrowerId, Error, Store};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Version of the snapshot format for future compatibility.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A point-in-time snapshot of the library state.
///
/// Uses BTreeMap for deterministic serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySnapshot {
    /// Snapshot format version
    pub format_version: u32,
    /// All book records by id
    pub books: BTreeMap<BookId, Book>,
    /// All borrower records by id
    pub borrowers: BTreeMap<BorrowerId, Borrower>,
    /// Next identity the store will assign to a book
    pub next_book_id: BookId,
    /// Next identity the store will assign to a borrower
    pub next_borrower_id: BorrowerId,
}

impl LibrarySnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            books: BTreeMap::new(),
            borrowers: BTreeMap::new(),
            next_book_id: 1,
            next_borrower_id: 1,
        }
    }

    pub(crate) fn from_store(store: &Store) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            books: store.books().map(|b| (b.id, b.clone())).collect(),
            borrowers: store.borrowers().map(|b| (b.id, b.clone())).collect(),
            next_book_id: store.next_book_id(),
            next_borrower_id: store.next_borrower_id(),
        }
    }

    pub(crate) fn into_store(self) -> Result<Store> {
        self.validate()?;
        Ok(Store::from_parts(
            self.books,
            self.borrowers,
            self.next_book_id,
            self.next_borrower_id,
        ))
    }

    /// Validate snapshot invariants.
    ///
    /// Checks the format version, key/record agreement, holder references,
    /// email uniqueness, and that the id counters exceed every assigned id.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(Error::InvalidSnapshot(format!(
                "unsupported format version {}",
                self.format_version
            )));
        }

        for (id, book) in &self.books {
            if *id != book.id {
                return Err(Error::InvalidSnapshot(format!(
                    "book key {} does not match record id {}",
                    id, book.id
                )));
            }
            if let Some(holder) = book.holder {
                if !self.borrowers.contains_key(&holder) {
                    return Err(Error::InvalidSnapshot(format!(
                        "book {} references unknown borrower {}",
                        book.id, holder
                    )));
                }
            }
        }

        let mut emails = HashSet::new();
        for (id, borrower) in &self.borrowers {
            if *id != borrower.id {
                return Err(Error::InvalidSnapshot(format!(
                    "borrower key {} does not match record id {}",
                    id, borrower.id
                )));
            }
            if !emails.insert(borrower.email.as_str()) {
                return Err(Error::InvalidSnapshot(format!(
                    "duplicate borrower email {}",
                    borrower.email
                )));
            }
        }

        if let Some(max) = self.books.keys().next_back() {
            if *max >= self.next_book_id {
                return Err(Error::InvalidSnapshot(format!(
                    "next book id {} does not exceed assigned id {}",
                    self.next_book_id, max
                )));
            }
        }
        if let Some(max) = self.borrowers.keys().next_back() {
            if *max >= self.next_borrower_id {
                return Err(Error::InvalidSnapshot(format!(
                    "next borrower id {} does not exceed assigned id {}",
                    self.next_borrower_id, max
                )));
            }
        }

        Ok(())
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Count of book records in the snapshot.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Count of borrower records in the snapshot.
    pub fn borrower_count(&self) -> usize {
        self.borrowers.len()
    }
}

impl Default for LibrarySnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Library;

    fn populated_library() -> Library {
        let mut library = Library::new();
        let book = library
            .register_book("ISBN-1", "Title A", "Author A")
            .unwrap();
        library
            .register_book("ISBN-2", "Title B", "Author B")
            .unwrap();
        let borrower = library.register_borrower("John", "john@x.com").unwrap();
        library.borrow(borrower.id, book.id).unwrap();
        library
    }

    #[test]
    fn export_captures_all_records() {
        let snapshot = populated_library().export_state();

        assert_eq!(snapshot.book_count(), 2);
        assert_eq!(snapshot.borrower_count(), 1);
        assert_eq!(snapshot.next_book_id, 3);
        assert_eq!(snapshot.next_borrower_id, 2);
        assert_eq!(snapshot.books[&1].holder, Some(1));
    }

    #[test]
    fn json_roundtrip_is_lossless() {
        let snapshot = populated_library().export_state();

        let json = snapshot.to_json().unwrap();
        let parsed = LibrarySnapshot::from_json(&json).unwrap();
        assert_eq!(snapshot, parsed);
    }

    #[test]
    fn deterministic_serialization() {
        let a = populated_library().export_state().to_json().unwrap();
        let b = populated_library().export_state().to_json().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_holder_rejected() {
        let mut snapshot = populated_library().export_state();
        snapshot.books.get_mut(&2).unwrap().holder = Some(42);

        assert!(matches!(
            snapshot.validate(),
            Err(Error::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn duplicate_email_rejected() {
        let mut snapshot = populated_library().export_state();
        snapshot
            .borrowers
            .insert(2, Borrower::new(2, "Johnny", "john@x.com"));
        snapshot.next_borrower_id = 3;

        assert!(matches!(
            snapshot.validate(),
            Err(Error::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn stale_id_counter_rejected() {
        let mut snapshot = populated_library().export_state();
        snapshot.next_book_id = 1;

        assert!(matches!(
            snapshot.validate(),
            Err(Error::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn mismatched_key_rejected() {
        let mut snapshot = populated_library().export_state();
        let book = snapshot.books.remove(&2).unwrap();
        snapshot.books.insert(9, book);
        snapshot.next_book_id = 10;

        assert!(matches!(
            snapshot.validate(),
            Err(Error::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn format_version_checked() {
        let mut snapshot = populated_library().export_state();
        snapshot.format_version = 99;

        assert!(matches!(
            snapshot.validate(),
            Err(Error::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn import_failure_leaves_library_unchanged() {
        let mut library = populated_library();
        let mut snapshot = LibrarySnapshot::new();
        snapshot.format_version = 99;

        assert!(library.import_state(snapshot).is_err());
        assert_eq!(library.store().book_count(), 2);
    }
}
