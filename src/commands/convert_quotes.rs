use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::cli::ConvertQuotesArgs;
use crate::model::{QuotesByKey, RawQuote};
use crate::util::write_json_pretty;

/// One row of the quotes spreadsheet. Columns other than these are ignored.
#[derive(Debug, Deserialize)]
struct QuoteRow {
    #[serde(default)]
    clave: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    frase: Option<String>,
}

impl QuoteRow {
    /// The `clave` column, or the prefix of a legacy `CLAVE-NNN` id when that
    /// column is blank.
    fn key(&self) -> &str {
        let clave = trimmed(self.clave.as_deref());
        if !clave.is_empty() {
            return clave;
        }

        let id = trimmed(self.id.as_deref());
        id.split_once('-')
            .map(|(prefix, _)| prefix.trim())
            .unwrap_or(id)
    }

    fn text(&self) -> &str {
        trimmed(self.frase.as_deref())
    }
}

fn trimmed(value: Option<&str>) -> &str {
    value.map(str::trim).unwrap_or("")
}

pub fn run(args: ConvertQuotesArgs) -> Result<()> {
    let quotes = read_quotes_csv(&args.input)?;
    write_json_pretty(&args.output, &quotes)?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        book_count = quotes.len(),
        quote_count = quotes.values().map(Vec::len).sum::<usize>(),
        "converted quote export"
    );
    Ok(())
}

/// Groups rows by key in first-seen order. Rows missing a key or a quote are
/// dropped; rows that fail to parse are logged and skipped.
fn read_quotes_csv(path: &Path) -> Result<QuotesByKey> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut quotes = QuotesByKey::new();
    let mut skipped = 0_usize;
    for (index, record) in reader.deserialize::<QuoteRow>().enumerate() {
        // Row 1 is the header.
        let row_number = index + 2;
        let row = match record {
            Ok(row) => row,
            Err(err) => {
                warn!(row = row_number, error = %err, "skipping malformed row");
                continue;
            }
        };

        let (key, frase) = (row.key(), row.text());
        if key.is_empty() || frase.is_empty() {
            skipped += 1;
            continue;
        }

        quotes.entry(key.to_string()).or_default().push(RawQuote {
            frase: frase.to_string(),
        });
    }

    if skipped > 0 {
        info!(skipped, "skipped rows without clave or frase");
    }

    Ok(quotes)
}
