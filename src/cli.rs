use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::catalog::SortKey;
use crate::loader::DataPaths;

#[derive(Parser, Debug)]
#[command(
    name = "frases",
    version,
    about = "Browse the book catalog and the quotes extracted from it"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search, filter and sort the book catalog.
    Catalog(CatalogArgs),
    /// Show the quotes of one book, or every quote when no key is given.
    Frases(FrasesArgs),
    /// Show one random quote.
    Random(RandomArgs),
    /// Summarize the data files.
    Status(StatusArgs),
    /// Convert a JSONL book export into the JSON array the site reads.
    ConvertBooks(ConvertBooksArgs),
    /// Convert the quotes spreadsheet (CSV) into the grouped JSON the site reads.
    ConvertQuotes(ConvertQuotesArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    #[arg(long, default_value = "public/data")]
    pub data_dir: PathBuf,

    #[arg(long)]
    pub books_path: Option<PathBuf>,

    #[arg(long)]
    pub quotes_path: Option<PathBuf>,
}

impl DataArgs {
    pub fn paths(&self) -> DataPaths {
        DataPaths {
            books: self
                .books_path
                .clone()
                .unwrap_or_else(|| self.data_dir.join("libros.json")),
            quotes: self
                .quotes_path
                .clone()
                .unwrap_or_else(|| self.data_dir.join("frases.json")),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortOrder {
    Title,
    Author,
    DateDesc,
    DateAsc,
}

impl From<SortOrder> for SortKey {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Title => Self::Title,
            SortOrder::Author => Self::Author,
            SortOrder::DateDesc => Self::DateDesc,
            SortOrder::DateAsc => Self::DateAsc,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long, default_value = "")]
    pub search: String,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_enum, default_value_t = SortOrder::Title)]
    pub sort: SortOrder,

    #[arg(long, default_value_t = false)]
    pub categories: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FrasesArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long)]
    pub clave: Option<String>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RandomArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertBooksArgs {
    #[arg(long, default_value = "libros.jsonl")]
    pub input: PathBuf,

    #[arg(long, default_value = "public/data/libros.json")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertQuotesArgs {
    #[arg(long, default_value = "frases.csv")]
    pub input: PathBuf,

    #[arg(long, default_value = "public/data/frases.json")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn data_paths_default_to_data_dir() {
        let cli = Cli::parse_from(["frases", "catalog", "--data-dir", "site/data"]);
        let Commands::Catalog(args) = cli.command else {
            panic!("expected catalog command");
        };

        let paths = args.data.paths();
        assert_eq!(paths.books, PathBuf::from("site/data/libros.json"));
        assert_eq!(paths.quotes, PathBuf::from("site/data/frases.json"));
        assert_eq!(SortKey::from(args.sort), SortKey::Title);
    }

    #[test]
    fn explicit_paths_override_data_dir() {
        let cli = Cli::parse_from([
            "frases",
            "frases",
            "--books-path",
            "b.json",
            "--quotes-path",
            "q.json",
            "--clave",
            "abc",
        ]);
        let Commands::Frases(args) = cli.command else {
            panic!("expected frases command");
        };

        let paths = args.data.paths();
        assert_eq!(paths.books, PathBuf::from("b.json"));
        assert_eq!(paths.quotes, PathBuf::from("q.json"));
        assert_eq!(args.clave.as_deref(), Some("abc"));
    }

    #[test]
    fn convert_quotes_defaults_to_site_layout() {
        let cli = Cli::parse_from(["frases", "convert-quotes"]);
        let Commands::ConvertQuotes(args) = cli.command else {
            panic!("expected convert-quotes command");
        };
        assert_eq!(args.input, PathBuf::from("frases.csv"));
        assert_eq!(args.output, PathBuf::from("public/data/frases.json"));
    }

    #[test]
    fn sort_values_use_kebab_case() {
        let cli = Cli::parse_from(["frases", "catalog", "--sort", "date-desc"]);
        let Commands::Catalog(args) = cli.command else {
            panic!("expected catalog command");
        };
        assert_eq!(SortKey::from(args.sort), SortKey::DateDesc);
    }
}
