//! The normalization pass: fold raw records into the relational catalog.
//!
//! Two absorbers, one per source:
//!
//! ```text
//! books source (tab)              borrowers source (comma)
//! isbn  _  title  "A, B"          id,ssn,first,last,email,street,city,state,phone
//!        │                                        │
//!        ▼                                        ▼
//! books[isbn] = title (1st wins)      borrowers[id] = Borrower (1st wins)
//! authors[name] = next id
//! book_authors += (isbn, id)
//! ```
//!
//! Both follow the same best-effort policy: a record with too few fields is
//! skipped silently and counted, never reported per-row. Only the aggregate
//! skip count surfaces, in the run summary.

use serde::Serialize;

use crate::models::{Borrower, Catalog};

/// Minimum fields in a book record: `isbn, (unused), title, author_names`.
pub const BOOK_MIN_FIELDS: usize = 4;

/// Minimum fields in a borrower record:
/// `id, ssn, first, last, email, street, city, state, phone`.
pub const BORROWER_MIN_FIELDS: usize = 9;

/// Row accounting for one absorbed source.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SourceStats {
    /// Non-blank records seen.
    pub rows: usize,
    /// Records dropped for having too few fields.
    pub skipped: usize,
}

/// Absorb all book records into the catalog.
pub fn absorb_books(catalog: &mut Catalog, records: &[Vec<String>]) -> SourceStats {
    let mut stats = SourceStats::default();
    for fields in records {
        stats.rows += 1;
        if !absorb_book_record(catalog, fields) {
            stats.skipped += 1;
        }
    }
    stats
}

/// Absorb one book record. Returns `false` if the record was skipped.
///
/// The isbn is trimmed and upper-cased *before* the first-wins check, so two
/// isbns differing only in case are the same book and the later title is
/// dropped. Author names are comma-split, trimmed, interned in first-seen
/// order and linked to the isbn; the association set collapses repeats.
pub fn absorb_book_record(catalog: &mut Catalog, fields: &[String]) -> bool {
    if fields.len() < BOOK_MIN_FIELDS {
        return false;
    }

    let isbn = fields[0].trim().to_uppercase();
    let title = fields[2].trim();
    catalog.add_book(isbn.clone(), title);

    for name in fields[3].split(',') {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let author_id = catalog.intern_author(name);
        catalog.link(isbn.clone(), author_id);
    }

    true
}

/// Absorb all borrower records into the catalog.
pub fn absorb_borrowers(catalog: &mut Catalog, records: &[Vec<String>]) -> SourceStats {
    let mut stats = SourceStats::default();
    for fields in records {
        stats.rows += 1;
        if !absorb_borrower_record(catalog, fields) {
            stats.skipped += 1;
        }
    }
    stats
}

/// Absorb one borrower record. Returns `false` if the record was skipped.
///
/// Field 4 (email) is read positionally but not carried into the entity.
pub fn absorb_borrower_record(catalog: &mut Catalog, fields: &[String]) -> bool {
    if fields.len() < BORROWER_MIN_FIELDS {
        return false;
    }

    let borrower = Borrower {
        card_id: fields[0].trim().to_string(),
        ssn: fields[1].trim().to_string(),
        name: format!("{} {}", fields[2].trim(), fields[3].trim()),
        address: format!(
            "{}, {}, {}",
            fields[5].trim(),
            fields[6].trim(),
            fields[7].trim()
        ),
        phone: fields[8].trim().to_string(),
    };
    catalog.add_borrower(borrower);

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Book, BookAuthor};

    fn record(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_isbn_case_collapses() {
        // Two records whose isbns differ only in case are one book; the
        // second title is dropped but its author references still land on
        // the surviving isbn.
        let mut catalog = Catalog::new();
        let records = vec![
            record(&["ISBN1", "X", "Title One", "Alice, Bob"]),
            record(&["isbn1", "Y", "Title Two", "Alice"]),
        ];
        let stats = absorb_books(&mut catalog, &records);

        assert_eq!(stats.rows, 2);
        assert_eq!(stats.skipped, 0);

        let books: Vec<Book> = catalog.books().collect();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].isbn, "ISBN1");
        assert_eq!(books[0].title, "Title One");

        let authors: Vec<Author> = catalog.authors().collect();
        assert_eq!(authors.len(), 2);
        assert_eq!((authors[0].id, authors[0].name.as_str()), (1, "Alice"));
        assert_eq!((authors[1].id, authors[1].name.as_str()), (2, "Bob"));

        let links: Vec<BookAuthor> = catalog.book_authors().collect();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].author_id, 1);
        assert_eq!(links[1].author_id, 2);
        assert!(links.iter().all(|l| l.isbn == "ISBN1"));
    }

    #[test]
    fn test_short_book_record_skipped() {
        let mut catalog = Catalog::new();
        let records = vec![
            record(&["ISBN1", "X", "Title"]),
            record(&["ISBN2", "X", "Title", "Alice"]),
        ];
        let stats = absorb_books(&mut catalog, &records);

        assert_eq!(stats.skipped, 1);
        assert_eq!(catalog.book_count(), 1);
    }

    #[test]
    fn test_empty_author_names_dropped() {
        let mut catalog = Catalog::new();
        let records = vec![record(&["ISBN1", "X", "Title", "Alice, , Bob,"])];
        absorb_books(&mut catalog, &records);

        assert_eq!(catalog.author_count(), 2);
        assert_eq!(catalog.association_count(), 2);
    }

    #[test]
    fn test_repeated_author_on_record_collapses() {
        let mut catalog = Catalog::new();
        let records = vec![record(&["ISBN1", "X", "Title", "Alice, Alice"])];
        absorb_books(&mut catalog, &records);

        assert_eq!(catalog.author_count(), 1);
        assert_eq!(catalog.association_count(), 1);
    }

    #[test]
    fn test_author_ids_follow_source_order() {
        let mut catalog = Catalog::new();
        let records = vec![
            record(&["A1", "X", "One", "Carol"]),
            record(&["A2", "X", "Two", "Alice, Carol"]),
        ];
        absorb_books(&mut catalog, &records);

        let authors: Vec<Author> = catalog.authors().collect();
        assert_eq!((authors[0].id, authors[0].name.as_str()), (1, "Carol"));
        assert_eq!((authors[1].id, authors[1].name.as_str()), (2, "Alice"));
    }

    #[test]
    fn test_borrower_fields_assembled() {
        let mut catalog = Catalog::new();
        let records = vec![record(&[
            "1001",
            "123-45-6789",
            " Ada ",
            " Lovelace ",
            "ada@example.com",
            "12 Analytical Way",
            "London",
            "UK",
            "555-0101",
        ])];
        let stats = absorb_borrowers(&mut catalog, &records);

        assert_eq!(stats.skipped, 0);
        let kept: Vec<&Borrower> = catalog.borrowers().collect();
        assert_eq!(kept[0].name, "Ada Lovelace");
        assert_eq!(kept[0].address, "12 Analytical Way, London, UK");
        assert_eq!(kept[0].phone, "555-0101");
    }

    #[test]
    fn test_duplicate_card_id_first_wins() {
        let mut catalog = Catalog::new();
        let records = vec![
            record(&[
                "1001", "111-11-1111", "A", "B", "e", "s", "c", "st", "p1",
            ]),
            record(&[
                "1001", "222-22-2222", "C", "D", "e", "s", "c", "st", "p2",
            ]),
        ];
        absorb_borrowers(&mut catalog, &records);

        let kept: Vec<&Borrower> = catalog.borrowers().collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].ssn, "111-11-1111");
        assert_eq!(kept[0].name, "A B");
    }

    #[test]
    fn test_short_borrower_record_skipped() {
        let mut catalog = Catalog::new();
        let records = vec![record(&["1001", "ssn", "first", "last"])];
        let stats = absorb_borrowers(&mut catalog, &records);

        assert_eq!(stats.skipped, 1);
        assert_eq!(catalog.borrower_count(), 0);
    }
}
