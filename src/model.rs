use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_AUTHOR: &str = "Autor desconocido";
pub const UNKNOWN_TITLE: &str = "Libro desconocido";

/// One entry of `libros.json`. Every field is optional; accessors degrade to
/// empty strings so partial metadata never breaks a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clave: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria_normalizada: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_publicacion: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portada: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion_es: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resumen_ficha: Option<String>,
}

impl Book {
    pub fn key(&self) -> Option<&str> {
        non_empty(self.clave.as_deref())
    }

    pub fn title(&self) -> &str {
        self.titulo.as_deref().unwrap_or("")
    }

    pub fn author(&self) -> &str {
        self.autor.as_deref().unwrap_or("")
    }

    pub fn theme(&self) -> &str {
        self.tema.as_deref().unwrap_or("")
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(self.categoria_normalizada.as_deref())
    }

    /// Publication year, truncated. Zero, negative zero and non-finite values
    /// count as missing.
    pub fn year(&self) -> Option<i64> {
        self.fecha_publicacion
            .filter(|value| value.is_finite())
            .map(|value| value.trunc() as i64)
            .filter(|year| *year != 0)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(self.descripcion_es.as_deref())
            .or_else(|| non_empty(self.descripcion.as_deref()))
            .or_else(|| non_empty(self.resumen_ficha.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuote {
    pub frase: String,
}

/// `frases.json`: quotes grouped by book key. Keys keep their document order.
pub type QuotesByKey = IndexMap<String, Vec<RawQuote>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenormalizedQuote {
    pub frase: String,
    pub clave: String,
    pub autor: String,
    pub titulo: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataFileEntry {
    pub path: String,
    pub present: bool,
    pub sha256: Option<String>,
}

/// Written by `status`. `library` stays empty unless both data files exist.
#[derive(Debug, Clone, Serialize)]
pub struct DataStatusManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub books_file: DataFileEntry,
    pub quotes_file: DataFileEntry,
    pub library: Option<LibraryStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LibraryStats {
    pub book_count: usize,
    pub books_without_key: usize,
    pub duplicate_keys: Vec<String>,
    pub category_count: usize,
    pub quote_key_count: usize,
    pub quote_count: usize,
    pub orphan_quote_keys: Vec<String>,
}
