use std::io::{self, Write};

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::info;

use super::output::{card_color, or_placeholder, quote_count_label, write_json_stdout};
use crate::cli::FrasesArgs;
use crate::loader::load_library;
use crate::model::{Book, DenormalizedQuote, RawQuote, UNKNOWN_AUTHOR, UNKNOWN_TITLE};
use crate::quotes::{StdRandom, aggregate_all, build_lookup, quotes_for_key, shuffle};

const ALL_QUOTES_TITLE: &str = "Todas las Frases Chingonas";
const ALL_QUOTES_SUBTITLE: &str = "Colección completa de frases inspiradas en libros técnicos";

#[derive(Debug, Clone, Serialize)]
struct QuoteCard {
    color: &'static str,
    frase: String,
    autor: String,
    titulo: String,
    clave: String,
}

#[derive(Debug, Serialize)]
struct BookHeader {
    clave: String,
    titulo: String,
    autor: String,
    categoria: Option<String>,
    year: Option<i64>,
    isbn: Option<String>,
    tema: Option<String>,
    portada: Option<String>,
    descripcion: Option<String>,
}

#[derive(Debug, Serialize)]
struct FrasesResponse {
    book: Option<BookHeader>,
    count: usize,
    cards: Vec<QuoteCard>,
}

pub fn run(args: FrasesArgs) -> Result<()> {
    let library = load_library(&args.data.paths())?;
    let mut rng = StdRandom::from_seed(args.seed);

    let clave = requested_clave(args.clave.as_deref());

    let (header, quotes) = match clave {
        None => (None, aggregate_all(&library.quotes, &library.books)),
        Some(clave) => {
            let lookup = build_lookup(&library.books);
            let Some(book) = lookup.get(clave).copied() else {
                bail!("no book found with clave \"{clave}\"");
            };
            let quotes = book_quotes(book, clave, quotes_for_key(&library.quotes, clave));
            if quotes.is_empty() {
                bail!(
                    "no quotes available for book \"{}\"",
                    or_placeholder(book.title(), UNKNOWN_TITLE)
                );
            }
            (Some(to_header(book, clave)), quotes)
        }
    };

    if quotes.is_empty() {
        bail!("no quotes available");
    }

    let cards: Vec<QuoteCard> = shuffle(&quotes, &mut rng)
        .into_iter()
        .enumerate()
        .map(|(index, quote)| QuoteCard {
            color: card_color(index),
            frase: quote.frase,
            autor: quote.autor,
            titulo: quote.titulo,
            clave: quote.clave,
        })
        .collect();

    info!(
        clave = ?clave,
        seed = ?args.seed,
        quote_count = cards.len(),
        "frases rendered"
    );

    if args.json {
        let response = FrasesResponse {
            book: header,
            count: cards.len(),
            cards,
        };
        write_json_stdout(&response, "frases")
    } else {
        write_text_response(header.as_ref(), &cards)
    }
}

/// An empty `--clave` selects every quote. Other values are looked up as given.
fn requested_clave(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.is_empty())
}

fn book_quotes(book: &Book, clave: &str, raw: &[RawQuote]) -> Vec<DenormalizedQuote> {
    let autor = or_placeholder(book.author(), UNKNOWN_AUTHOR);
    let titulo = or_placeholder(book.title(), UNKNOWN_TITLE);
    raw.iter()
        .map(|quote| DenormalizedQuote {
            frase: quote.frase.clone(),
            clave: clave.to_string(),
            autor: autor.to_string(),
            titulo: titulo.to_string(),
        })
        .collect()
}

fn to_header(book: &Book, clave: &str) -> BookHeader {
    BookHeader {
        clave: clave.to_string(),
        titulo: or_placeholder(book.title(), UNKNOWN_TITLE).to_string(),
        autor: or_placeholder(book.author(), UNKNOWN_AUTHOR).to_string(),
        categoria: book.category().map(ToOwned::to_owned),
        year: book.year(),
        isbn: book.isbn.clone().filter(|value| !value.is_empty()),
        tema: book.tema.clone().filter(|value| !value.is_empty()),
        portada: book.portada.clone().filter(|value| !value.is_empty()),
        descripcion: book.description().map(ToOwned::to_owned),
    }
}

fn write_text_response(header: Option<&BookHeader>, cards: &[QuoteCard]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    match header {
        Some(header) => {
            writeln!(output, "{}", header.titulo)?;
            writeln!(output, "{}", header.autor)?;
            let mut meta = Vec::new();
            if let Some(categoria) = &header.categoria {
                meta.push(categoria.clone());
            }
            if let Some(year) = header.year {
                meta.push(year.to_string());
            }
            if let Some(isbn) = &header.isbn {
                meta.push(format!("ISBN: {isbn}"));
            }
            if !meta.is_empty() {
                writeln!(output, "{}", meta.join(" | "))?;
            }
            if let Some(tema) = &header.tema {
                writeln!(output, "Tema: {tema}")?;
            }
            if let Some(descripcion) = &header.descripcion {
                writeln!(output, "{descripcion}")?;
            }
        }
        None => {
            writeln!(output, "{ALL_QUOTES_TITLE}")?;
            writeln!(output, "{ALL_QUOTES_SUBTITLE}")?;
        }
    }
    writeln!(output, "{}", quote_count_label(cards.len()))?;

    for card in cards {
        writeln!(output)?;
        writeln!(output, "[{}] {}", card.color, card.frase)?;
        writeln!(output, "\t{}, {}", card.autor, card.titulo)?;
    }

    output.flush()?;
    Ok(())
}
