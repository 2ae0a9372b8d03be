use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::ConvertBooksArgs;
use crate::util::write_json_pretty;

pub fn run(args: ConvertBooksArgs) -> Result<()> {
    let books = read_jsonl(&args.input)?;
    write_json_pretty(&args.output, &books)?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        book_count = books.len(),
        "converted book export"
    );
    Ok(())
}

/// Parses one JSON value per line. Blank lines are ignored and malformed
/// lines are logged and skipped.
fn read_jsonl(path: &Path) -> Result<Vec<Value>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let mut values = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| {
            format!("failed to read line {line_number} of {}", path.display())
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => values.push(value),
            Err(err) => warn!(line = line_number, error = %err, "skipping malformed line"),
        }
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::model::Book;
    use crate::util::read_json;

    #[test]
    fn converts_jsonl_preserving_fields_and_skipping_bad_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("libros.jsonl");
        let output = dir.path().join("public").join("data").join("libros.json");
        fs::write(
            &input,
            concat!(
                r#"{"clave": "a", "titulo": "Uno", "frases_generadas": 4}"#,
                "\n\n",
                "{broken\n",
                r#"{"clave": "b", "titulo": "Dos"}"#,
                "\n",
            ),
        )
        .expect("write jsonl");

        run(ConvertBooksArgs {
            input: input.clone(),
            output: output.clone(),
        })
        .expect("convert");

        let raw: Vec<Value> = read_json(&output).expect("read raw output");
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0]["frases_generadas"], 4);

        let books: Vec<Book> = read_json(&output).expect("read books");
        assert_eq!(books[1].key(), Some("b"));
    }

    #[test]
    fn converted_objects_keep_their_field_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("libros.jsonl");
        let output = dir.path().join("libros.json");
        fs::write(
            &input,
            r#"{"titulo": "Uno", "clave": "a", "autor": "Z", "frases_generadas": 4}"#,
        )
        .expect("write jsonl");

        run(ConvertBooksArgs {
            input,
            output: output.clone(),
        })
        .expect("convert");

        let raw: Vec<Value> = read_json(&output).expect("read raw output");
        let fields: Vec<&String> = raw[0]
            .as_object()
            .expect("book should be an object")
            .keys()
            .collect();
        assert_eq!(fields, vec!["titulo", "clave", "autor", "frases_generadas"]);
    }

    #[test]
    fn missing_input_is_an_error() {
        let err = read_jsonl(&PathBuf::from("/nonexistent/libros.jsonl"))
            .expect_err("missing input must fail");
        assert!(err.to_string().contains("failed to open"));
    }
}
