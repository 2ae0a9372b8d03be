use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::catalog::extract_categories;
use crate::cli::StatusArgs;
use crate::loader::{DataPaths, Library, load_library};
use crate::model::{Book, DataFileEntry, DataStatusManifest, LibraryStats, QuotesByKey};
use crate::quotes::build_lookup;
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest = build_manifest(&args.data.paths())?;

    match &manifest.library {
        Some(stats) => {
            for key in &stats.duplicate_keys {
                warn!(clave = %key, "duplicate clave, the last book wins");
            }
            for key in &stats.orphan_quote_keys {
                warn!(clave = %key, "quotes reference a clave with no book");
            }

            info!(
                books = stats.book_count,
                books_without_key = stats.books_without_key,
                categories = stats.category_count,
                quote_keys = stats.quote_key_count,
                quotes = stats.quote_count,
                "data status"
            );
        }
        None => {
            for entry in [&manifest.books_file, &manifest.quotes_file] {
                if !entry.present {
                    warn!(path = %entry.path, "data file missing");
                }
            }
        }
    }

    if let Some(manifest_path) = args.manifest_path {
        write_json_pretty(&manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote data status manifest");
    }

    Ok(())
}

fn describe_file(path: &Path) -> Result<DataFileEntry> {
    let present = path.is_file();
    let sha256 = if present {
        let digest = sha256_file(path)?;
        info!(path = %path.display(), sha256 = %digest, "data file");
        Some(digest)
    } else {
        None
    };

    Ok(DataFileEntry {
        path: path.display().to_string(),
        present,
        sha256,
    })
}

fn build_manifest(paths: &DataPaths) -> Result<DataStatusManifest> {
    let books_file = describe_file(&paths.books)?;
    let quotes_file = describe_file(&paths.quotes)?;

    let library = if books_file.present && quotes_file.present {
        Some(library_stats(&load_library(paths)?))
    } else {
        None
    };

    Ok(DataStatusManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        books_file,
        quotes_file,
        library,
    })
}

fn library_stats(library: &Library) -> LibraryStats {
    LibraryStats {
        book_count: library.books.len(),
        books_without_key: library.books.iter().filter(|book| book.key().is_none()).count(),
        duplicate_keys: duplicate_keys(&library.books),
        category_count: extract_categories(&library.books).len(),
        quote_key_count: library.quotes.len(),
        quote_count: library.quotes.values().map(Vec::len).sum(),
        orphan_quote_keys: orphan_quote_keys(&library.quotes, &library.books),
    }
}

fn duplicate_keys(books: &[Book]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();
    for key in books.iter().filter_map(Book::key) {
        if !seen.insert(key) {
            duplicates.insert(key.to_string());
        }
    }
    duplicates.into_iter().collect()
}

fn orphan_quote_keys(quotes: &QuotesByKey, books: &[Book]) -> Vec<String> {
    let lookup = build_lookup(books);
    quotes
        .keys()
        .filter(|key| !lookup.contains_key(key.as_str()))
        .cloned()
        .collect()
}
