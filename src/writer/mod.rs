//! CSV output: field quoting and the generic table writer.
//!
//! One generic operation, [`write_table`], takes a path, a header line, an
//! ordered collection and a row-mapping function, and writes header + one
//! line per item. The four concrete tables are just four calls to it with
//! different row closures ([`write_catalog`]).
//!
//! Quoting is field-level and minimal: a value is wrapped in double quotes
//! only when it contains a comma or a double quote, with internal quotes
//! doubled. Everything else is emitted verbatim.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{WriteError, WriteResult};
use crate::models::Catalog;

/// Output file names, fixed relative to the output directory.
pub const BOOK_FILE: &str = "book.csv";
pub const AUTHORS_FILE: &str = "authors.csv";
pub const BOOK_AUTHORS_FILE: &str = "book_authors.csv";
pub const BORROWER_FILE: &str = "borrower.csv";

/// Quote a field for CSV output if it needs it.
///
/// Values containing a comma or a double quote are wrapped in double quotes
/// with internal quotes doubled; anything else is returned unchanged.
pub fn quote_field(value: &str) -> Cow<'_, str> {
    if value.contains(',') || value.contains('"') {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Write one table: header line, then `row(item)` per item, newline
/// terminated. The file handle is scoped to this call, so it is flushed and
/// closed before the caller moves on to the next table.
pub fn write_table<T, I, F>(path: &Path, header: &str, items: I, row: F) -> WriteResult<()>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> String,
{
    let io_err = |source| WriteError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{header}").map_err(io_err)?;
    for item in items {
        writeln!(out, "{}", row(&item)).map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

/// Write all four normalized tables into `out_dir`, creating it if absent.
///
/// Returns the paths written, in output order. There is no cleanup on
/// failure: tables already written stay on disk.
pub fn write_catalog(out_dir: &Path, catalog: &Catalog) -> WriteResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).map_err(|source| WriteError::CreateDir {
        dir: out_dir.display().to_string(),
        source,
    })?;

    let book_path = out_dir.join(BOOK_FILE);
    write_table(&book_path, "Isbn,Title", catalog.books(), |b| {
        format!("{},{}", b.isbn, quote_field(&b.title))
    })?;

    let authors_path = out_dir.join(AUTHORS_FILE);
    write_table(&authors_path, "Author_id,Name", catalog.authors(), |a| {
        format!("{},{}", a.id, quote_field(&a.name))
    })?;

    let links_path = out_dir.join(BOOK_AUTHORS_FILE);
    write_table(
        &links_path,
        "Isbn,Author_id",
        catalog.book_authors(),
        |link| format!("{},{}", link.isbn, link.author_id),
    )?;

    let borrower_path = out_dir.join(BORROWER_FILE);
    write_table(
        &borrower_path,
        "Card_id,Ssn,Bname,Address,Phone",
        catalog.borrowers(),
        |b| {
            format!(
                "{},{},{},{},{}",
                b.card_id,
                b.ssn,
                quote_field(&b.name),
                quote_field(&b.address),
                quote_field(&b.phone)
            )
        },
    )?;

    Ok(vec![book_path, authors_path, links_path, borrower_path])
}
