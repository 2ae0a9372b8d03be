use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::model::{Book, QuotesByKey};
use crate::util::read_json;

#[derive(Debug, Clone)]
pub struct DataPaths {
    pub books: PathBuf,
    pub quotes: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct Library {
    pub books: Vec<Book>,
    pub quotes: QuotesByKey,
}

pub fn load_books(path: &Path) -> Result<Vec<Book>> {
    let books: Vec<Book> = read_json(path)?;
    debug!(path = %path.display(), count = books.len(), "loaded books");
    Ok(books)
}

pub fn load_quotes(path: &Path) -> Result<QuotesByKey> {
    let quotes: QuotesByKey = read_json(path)?;
    debug!(path = %path.display(), keys = quotes.len(), "loaded quotes");
    Ok(quotes)
}

/// Reads both files concurrently and returns each result separately, so
/// callers decide whether a missing quotes file is fatal.
pub fn load_both(paths: &DataPaths) -> (Result<Vec<Book>>, Result<QuotesByKey>) {
    rayon::join(|| load_books(&paths.books), || load_quotes(&paths.quotes))
}

pub fn load_library(paths: &DataPaths) -> Result<Library> {
    let (books, quotes) = load_both(paths);
    Ok(Library {
        books: books?,
        quotes: quotes?,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn load_library_reads_both_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = DataPaths {
            books: write(
                dir.path(),
                "libros.json",
                r#"[{"clave": "a", "titulo": "Libro A", "fecha_publicacion": 2001.0}]"#,
            ),
            quotes: write(
                dir.path(),
                "frases.json",
                r#"{"a": [{"frase": "Q1"}, {"frase": "Q2"}]}"#,
            ),
        };

        let library = load_library(&paths).expect("library should load");

        assert_eq!(library.books.len(), 1);
        assert_eq!(library.books[0].year(), Some(2001));
        assert_eq!(library.quotes["a"].len(), 2);
    }

    #[test]
    fn load_library_fails_when_either_file_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = DataPaths {
            books: write(dir.path(), "libros.json", "[]"),
            quotes: dir.path().join("frases.json"),
        };

        let err = load_library(&paths).expect_err("missing quotes must fail");
        assert!(err.to_string().contains("frases.json"));
    }

    #[test]
    fn load_both_reports_parse_failures_per_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = DataPaths {
            books: write(dir.path(), "libros.json", "{not json"),
            quotes: write(dir.path(), "frases.json", "{}"),
        };

        let (books, quotes) = load_both(&paths);

        let err = books.expect_err("malformed books must fail");
        assert!(err.to_string().contains("failed to parse"));
        assert!(quotes.expect("quotes should load").is_empty());
    }
}
