pub mod catalog;
pub mod convert_books;
pub mod convert_quotes;
pub mod frases;
mod output;
pub mod random;
pub mod status;
