use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use super::output::write_json_stdout;
use crate::cli::RandomArgs;
use crate::loader::load_library;
use crate::model::DenormalizedQuote;
use crate::quotes::{StdRandom, aggregate_all, pick_random};

#[derive(Debug, Serialize)]
struct RandomResponse<'a> {
    frase: &'a str,
    autor: &'a str,
    titulo: &'a str,
    clave: &'a str,
    pool_size: usize,
}

pub fn run(args: RandomArgs) -> Result<()> {
    let library = load_library(&args.data.paths())?;
    let all = aggregate_all(&library.quotes, &library.books);

    let mut rng = StdRandom::from_seed(args.seed);
    let quote = pick_random(&all, &mut rng).context("no quotes available")?;

    info!(
        clave = %quote.clave,
        pool_size = all.len(),
        seed = ?args.seed,
        "random quote selected"
    );

    if args.json {
        write_json_stdout(
            &RandomResponse {
                frase: &quote.frase,
                autor: &quote.autor,
                titulo: &quote.titulo,
                clave: &quote.clave,
                pool_size: all.len(),
            },
            "random quote",
        )
    } else {
        write_text_response(quote)
    }
}

fn write_text_response(quote: &DenormalizedQuote) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "\u{201c}{}\u{201d}", quote.frase)?;
    writeln!(output, "\u{2014} {}, {}", quote.autor, quote.titulo)?;
    writeln!(output, "frases --clave {}", quote.clave)?;
    output.flush()?;
    Ok(())
}
