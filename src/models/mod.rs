//! Domain models for the libload normalization pipeline.
//!
//! This module contains the relational entities the normalizer produces:
//!
//! - [`Book`] - one row of `book.csv`, keyed by upper-cased ISBN
//! - [`Author`] - one row of `authors.csv`, with a run-local surrogate id
//! - [`BookAuthor`] - one association row of `book_authors.csv`
//! - [`Borrower`] - one row of `borrower.csv`, keyed by card id
//! - [`Catalog`] - the in-memory lookup tables all four are built in
//!
//! Every table is first-seen-wins: the [`Catalog`] insertion methods are
//! set-if-absent, and iteration order is insertion order (`indexmap`).
//! Entities are created once during the parse pass and never mutated.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

// =============================================================================
// Entities
// =============================================================================

/// A deduplicated book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// ISBN, trimmed and upper-cased. Unique key.
    pub isbn: String,
    /// Title from the first record that carried this ISBN.
    pub title: String,
}

/// A deduplicated author with a run-local surrogate id.
///
/// Ids are dense, start at 1 and follow first-seen order in the source.
/// They are not stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub id: u32,
    pub name: String,
}

/// A book-to-author association.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookAuthor {
    pub isbn: String,
    pub author_id: u32,
}

/// A deduplicated borrower.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Borrower {
    /// Card id. Unique key, first occurrence wins.
    pub card_id: String,
    pub ssn: String,
    /// `first_name` and `last_name` joined with a single space.
    pub name: String,
    /// Street, city and state joined with `", "`.
    pub address: String,
    pub phone: String,
}

// =============================================================================
// Catalog
// =============================================================================

/// In-memory lookup tables for one normalization run.
///
/// Wraps the four collections behind set-if-absent insertion methods so the
/// first-seen-wins policy cannot be bypassed. All iteration is in insertion
/// order, which is what the writers emit.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// isbn -> title
    books: IndexMap<String, String>,
    /// author name -> surrogate id
    authors: IndexMap<String, u32>,
    /// (isbn, author_id), insertion-ordered set
    book_authors: IndexSet<(String, u32)>,
    /// card id -> borrower
    borrowers: IndexMap<String, Borrower>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a book. Returns `false` if the isbn was already present
    /// (the existing title is kept).
    ///
    /// The caller is expected to have normalized the isbn already; this
    /// method does not trim or case-fold.
    pub fn add_book(&mut self, isbn: impl Into<String>, title: impl Into<String>) -> bool {
        let isbn = isbn.into();
        if self.books.contains_key(&isbn) {
            return false;
        }
        self.books.insert(isbn, title.into());
        true
    }

    /// Look up or assign the surrogate id for an author name.
    ///
    /// New names get the next sequential id, starting at 1.
    pub fn intern_author(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.authors.get(name) {
            return id;
        }
        let id = self.authors.len() as u32 + 1;
        self.authors.insert(name.to_string(), id);
        id
    }

    /// Record a book-author association. Duplicate pairs collapse;
    /// returns `false` when the pair was already present.
    pub fn link(&mut self, isbn: impl Into<String>, author_id: u32) -> bool {
        self.book_authors.insert((isbn.into(), author_id))
    }

    /// Record a borrower. Returns `false` if the card id was already
    /// present (the existing record is kept).
    pub fn add_borrower(&mut self, borrower: Borrower) -> bool {
        if self.borrowers.contains_key(&borrower.card_id) {
            return false;
        }
        self.borrowers.insert(borrower.card_id.clone(), borrower);
        true
    }

    // -------------------------------------------------------------------------
    // Views (insertion order)
    // -------------------------------------------------------------------------

    pub fn books(&self) -> impl Iterator<Item = Book> + '_ {
        self.books.iter().map(|(isbn, title)| Book {
            isbn: isbn.clone(),
            title: title.clone(),
        })
    }

    pub fn authors(&self) -> impl Iterator<Item = Author> + '_ {
        self.authors.iter().map(|(name, &id)| Author {
            id,
            name: name.clone(),
        })
    }

    pub fn book_authors(&self) -> impl Iterator<Item = BookAuthor> + '_ {
        self.book_authors.iter().map(|(isbn, author_id)| BookAuthor {
            isbn: isbn.clone(),
            author_id: *author_id,
        })
    }

    pub fn borrowers(&self) -> impl Iterator<Item = &Borrower> + '_ {
        self.borrowers.values()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn association_count(&self) -> usize {
        self.book_authors.len()
    }

    pub fn borrower_count(&self) -> usize {
        self.borrowers.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
