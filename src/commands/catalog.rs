use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use super::output::{
    NO_CATEGORY, NO_DESCRIPTION, or_placeholder, quote_count_label, write_json_stdout,
};
use crate::catalog::{CatalogQuery, extract_categories, filter};
use crate::cli::CatalogArgs;
use crate::loader::load_both;
use crate::model::{Book, QuotesByKey, UNKNOWN_AUTHOR};
use crate::quotes::quotes_for_key;
use crate::util::truncate_chars;

const DESCRIPTION_PREVIEW_CHARS: usize = 160;

#[derive(Debug, Serialize)]
struct BookCard {
    clave: Option<String>,
    titulo: String,
    autor: String,
    categoria: String,
    year: Option<i64>,
    tema: Option<String>,
    isbn: Option<String>,
    portada: Option<String>,
    descripcion: String,
    frases_count: usize,
}

#[derive(Debug, Serialize)]
struct CatalogResponse {
    search: String,
    category: Option<String>,
    sort: &'static str,
    total: usize,
    returned: usize,
    categories: Vec<String>,
    books: Vec<BookCard>,
}

pub fn run(args: CatalogArgs) -> Result<()> {
    let paths = args.data.paths();
    let (books, quotes) = load_both(&paths);
    let books = books?;
    let quotes = quotes.unwrap_or_else(|err| {
        warn!(error = %err, "quotes unavailable, continuing without quote counts");
        QuotesByKey::new()
    });

    let categories: Vec<String> = extract_categories(&books).into_iter().collect();

    if args.categories {
        if args.json {
            write_json_stdout(&categories, "category")?;
        } else {
            let mut output = io::BufWriter::new(io::stdout().lock());
            for category in &categories {
                writeln!(output, "{category}")?;
            }
            output.flush()?;
        }
        info!(category_count = categories.len(), "categories listed");
        return Ok(());
    }

    let query = CatalogQuery {
        search_term: args.search,
        category: args.category,
        sort_key: args.sort.into(),
    };
    let matched = filter(&books, &query);
    let cards: Vec<BookCard> = matched
        .iter()
        .map(|book| to_card(book, &quotes))
        .collect();

    info!(
        search = %query.search_term,
        category = ?query.category(),
        sort = query.sort_key.as_str(),
        total = books.len(),
        result_count = cards.len(),
        "catalog query completed"
    );

    if args.json {
        let response = CatalogResponse {
            search: query.search_term.clone(),
            category: query.category().map(ToOwned::to_owned),
            sort: query.sort_key.as_str(),
            total: books.len(),
            returned: cards.len(),
            categories,
            books: cards,
        };
        write_json_stdout(&response, "catalog")
    } else {
        write_text_response(&query, books.len(), &cards)
    }
}

fn to_card(book: &Book, quotes: &QuotesByKey) -> BookCard {
    let frases_count = book
        .key()
        .map(|key| quotes_for_key(quotes, key).len())
        .unwrap_or(0);

    BookCard {
        clave: book.key().map(ToOwned::to_owned),
        titulo: book.title().to_string(),
        autor: or_placeholder(book.author(), UNKNOWN_AUTHOR).to_string(),
        categoria: book.category().unwrap_or(NO_CATEGORY).to_string(),
        year: book.year(),
        tema: book.tema.clone().filter(|value| !value.is_empty()),
        isbn: book.isbn.clone().filter(|value| !value.is_empty()),
        portada: book.portada.clone().filter(|value| !value.is_empty()),
        descripcion: book.description().unwrap_or(NO_DESCRIPTION).to_string(),
        frases_count,
    }
}

fn write_text_response(query: &CatalogQuery, total: usize, cards: &[BookCard]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(
        output,
        "Search: {:?} category={} sort={}",
        query.search_term,
        query.category().unwrap_or("(all)"),
        query.sort_key.as_str()
    )?;
    writeln!(output, "Libros: {} of {}", cards.len(), total)?;

    if cards.is_empty() {
        writeln!(output, "No se encontraron libros.")?;
    }

    for (index, card) in cards.iter().enumerate() {
        let year = card
            .year
            .map(|year| format!("\t{year}"))
            .unwrap_or_default();
        writeln!(
            output,
            "{}.\t{}\t{}\t[{}]{}",
            index + 1,
            card.titulo,
            card.autor,
            card.categoria,
            year
        )?;
        if let Some(clave) = card.clave.as_ref().filter(|_| card.frases_count > 0) {
            writeln!(
                output,
                "\tclave={clave} {}",
                quote_count_label(card.frases_count)
            )?;
        }
        writeln!(
            output,
            "\t{}",
            truncate_chars(&card.descripcion, DESCRIPTION_PREVIEW_CHARS)
        )?;
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawQuote;

    #[test]
    fn card_counts_quotes_and_fills_placeholders() {
        let book = Book {
            clave: Some("k".to_string()),
            titulo: Some("Libro".to_string()),
            fecha_publicacion: Some(2003.2),
            ..Book::default()
        };
        let mut quotes = QuotesByKey::new();
        quotes.insert(
            "k".to_string(),
            vec![
                RawQuote {
                    frase: "uno".to_string(),
                },
                RawQuote {
                    frase: "dos".to_string(),
                },
            ],
        );

        let card = to_card(&book, &quotes);

        assert_eq!(card.frases_count, 2);
        assert_eq!(card.autor, "Autor desconocido");
        assert_eq!(card.categoria, "Sin categoría");
        assert_eq!(card.descripcion, "Sin descripción disponible.");
        assert_eq!(card.year, Some(2003));
    }

    #[test]
    fn card_without_key_has_no_quotes() {
        let book = Book {
            titulo: Some("Suelto".to_string()),
            ..Book::default()
        };

        let card = to_card(&book, &QuotesByKey::new());

        assert_eq!(card.frases_count, 0);
        assert!(card.clave.is_none());
    }
}
