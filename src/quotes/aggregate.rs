use std::collections::HashMap;

use crate::model::{Book, DenormalizedQuote, QuotesByKey, RawQuote, UNKNOWN_AUTHOR, UNKNOWN_TITLE};

/// Books by `clave`. Later books overwrite earlier ones sharing a key.
pub fn build_lookup(books: &[Book]) -> HashMap<&str, &Book> {
    let mut lookup = HashMap::with_capacity(books.len());
    for book in books {
        if let Some(key) = book.key() {
            lookup.insert(key, book);
        }
    }
    lookup
}

pub fn aggregate_all(quotes_by_key: &QuotesByKey, books: &[Book]) -> Vec<DenormalizedQuote> {
    let lookup = build_lookup(books);
    let mut all = Vec::with_capacity(quotes_by_key.values().map(Vec::len).sum());

    for (key, quotes) in quotes_by_key {
        let book = lookup.get(key.as_str()).copied();
        let autor = book
            .map(Book::author)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR);
        let titulo = book
            .map(Book::title)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_TITLE);

        for quote in quotes {
            all.push(DenormalizedQuote {
                frase: quote.frase.clone(),
                clave: key.clone(),
                autor: autor.to_string(),
                titulo: titulo.to_string(),
            });
        }
    }

    all
}

pub fn quotes_for_key<'a>(quotes_by_key: &'a QuotesByKey, key: &str) -> &'a [RawQuote] {
    quotes_by_key.get(key).map(Vec::as_slice).unwrap_or(&[])
}
