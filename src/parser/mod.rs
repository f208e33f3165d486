//! Generic delimited-text reader with encoding auto-detection.
//!
//! Reads a whole source file, decodes it, discards the header line and
//! splits the remaining lines into positional string fields. No quoting is
//! interpreted on input: library exports are plain delimited dumps, and the
//! original migration they come from splits naively.
//!
//! Nothing in here knows about books or borrowers. Field trimming and
//! column-count filtering are the normalizer's contract, not the reader's,
//! so records come back exactly as split.

use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Result of reading one source, with metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Data records in source order, one `Vec<String>` of raw fields per
    /// non-blank line after the header.
    pub records: Vec<Vec<String>>,
    /// Detected encoding.
    pub encoding: String,
    /// Delimiter used for splitting.
    pub delimiter: char,
    /// Header fields (discarded by the normalizer, kept for display).
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the detected encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8_lossy(bytes).to_string()),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()),
        // Fallback: lossy UTF-8
        _ => Ok(String::from_utf8_lossy(bytes).to_string()),
    }
}

/// Detect the delimiter by counting candidate occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = ['\t', ',', ';', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Read a source file and split it into records with the given delimiter.
pub fn read_source<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, delimiter)
}

/// Parse raw source bytes: detect encoding, decode, then split.
pub fn parse_bytes(bytes: &[u8], delimiter: char) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    parse_source(&content, delimiter, encoding)
}

/// Split decoded source text into header and records.
pub fn parse_source(content: &str, delimiter: char, encoding: String) -> CsvResult<ParseResult> {
    let mut lines = content.lines();

    let header_line = lines.next().ok_or(CsvError::EmptyFile)?;
    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<String> = line.split(delimiter).map(str::to_string).collect();
        records.push(fields);
    }

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_discarded_from_records() {
        let src = "Isbn\tPages\tTitle\tAuthors\nX1\t12\tA Title\tAlice";
        let result = parse_source(src, '\t', "utf-8".into()).unwrap();

        assert_eq!(result.headers, vec!["Isbn", "Pages", "Title", "Authors"]);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0], vec!["X1", "12", "A Title", "Alice"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let src = "a,b\n1,2\n\n   \n3,4\n";
        let result = parse_source(src, ',', "utf-8".into()).unwrap();
        assert_eq!(result.records.len(), 2);
    }

    #[test]
    fn test_short_records_pass_through() {
        // Column-count filtering is the normalizer's job.
        let src = "a\tb\tc\td\njust-one-field\n";
        let result = parse_source(src, '\t', "utf-8".into()).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].len(), 1);
    }

    #[test]
    fn test_fields_not_trimmed_by_reader() {
        let src = "a,b\n 1 , 2 \n";
        let result = parse_source(src, ',', "utf-8".into()).unwrap();
        assert_eq!(result.records[0], vec![" 1 ", " 2 "]);
    }

    #[test]
    fn test_empty_source_is_error() {
        let result = parse_source("", ',', "utf-8".into());
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_parse_bytes_detects_encoding() {
        let result = parse_bytes(b"a,b\n1,2\n", ',').unwrap();
        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.delimiter, ',');
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_defaults_to_comma() {
        assert_eq!(detect_delimiter("single-column"), ',');
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert!(decoded.starts_with("Soci"));
        assert_eq!(decoded.chars().count(), 7);
    }
}
