use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

pub(super) const CARD_COLORS: [&str; 16] = [
    "verde", "azul", "amarillo", "morado", "rojo", "gris", "naranja", "turquesa", "menta", "lila",
    "mostaza", "grafito", "cian", "magenta", "cafe", "blanco",
];

pub(super) const NO_CATEGORY: &str = "Sin categoría";
pub(super) const NO_DESCRIPTION: &str = "Sin descripción disponible.";

pub(super) fn card_color(index: usize) -> &'static str {
    CARD_COLORS[index % CARD_COLORS.len()]
}

pub(super) fn quote_count_label(count: usize) -> String {
    if count == 1 {
        format!("{count} frase")
    } else {
        format!("{count} frases")
    }
}

pub(super) fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

pub(super) fn write_json_stdout<T: Serialize>(value: &T, what: &str) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, value)
        .with_context(|| format!("failed to serialize {what} json output"))?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
