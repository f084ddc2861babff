//! Corpus adapters

mod csv_corpus;

pub use csv_corpus::CsvCorpus;
