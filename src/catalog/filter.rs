use std::borrow::Borrow;
use std::collections::BTreeSet;

use super::collation::CollationKey;
use super::text::{matches_search, normalize};
use super::{CatalogQuery, SortKey};
use crate::model::Book;

pub fn extract_categories(books: &[Book]) -> BTreeSet<String> {
    books
        .iter()
        .filter_map(Book::category)
        .map(ToOwned::to_owned)
        .collect()
}

/// Search, then category, then sort. The input slice is never touched.
pub fn filter(books: &[Book], query: &CatalogQuery) -> Vec<Book> {
    let searched = search_stage(books, &query.search_term);
    let categorized = category_stage(searched, query.category());
    sort(&categorized, query.sort_key)
}

fn search_stage<'a>(books: &'a [Book], search_term: &str) -> Vec<&'a Book> {
    if search_term.is_empty() {
        return books.iter().collect();
    }

    let needle = normalize(search_term);
    books
        .iter()
        .filter(|book| {
            matches_search(
                &[
                    book.title(),
                    book.author(),
                    book.theme(),
                    book.category().unwrap_or(""),
                ],
                &needle,
            )
        })
        .collect()
}

fn category_stage<'a>(books: Vec<&'a Book>, category: Option<&str>) -> Vec<&'a Book> {
    let Some(category) = category else {
        return books;
    };

    books
        .into_iter()
        .filter(|book| book.categoria_normalizada.as_deref() == Some(category))
        .collect()
}

/// Stable sort into a new vector.
pub fn sort<B: Borrow<Book>>(books: &[B], key: SortKey) -> Vec<Book> {
    sort_refs(books.iter().map(<B as Borrow<Book>>::borrow).collect(), key)
}

fn sort_refs(mut books: Vec<&Book>, key: SortKey) -> Vec<Book> {
    match key {
        SortKey::Title => books.sort_by_cached_key(|book| CollationKey::new(book.title())),
        SortKey::Author => books.sort_by_cached_key(|book| CollationKey::new(book.author())),
        SortKey::DateDesc => {
            books.sort_by(|left, right| year_or_zero(right).cmp(&year_or_zero(left)))
        }
        SortKey::DateAsc => books.sort_by_key(|book| year_or_zero(book)),
    }

    books.into_iter().cloned().collect()
}

fn year_or_zero(book: &Book) -> i64 {
    book.year().unwrap_or(0)
}
