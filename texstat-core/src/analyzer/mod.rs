//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Strips comments and removes non-prose LaTeX
//! - **Structure**: Counts sectioning, floats, equations and references
//! - **Tokenizer**: Splits cleaned text into lowercase word tokens
//! - **Filters**: Drops non-alphabetic and stray single-letter tokens
//! - **Stemmer**: Snowball and RSLP stemmers behind one trait
//! - **Stopwords**: Built-in and file-backed stopword lists

pub mod filters;
pub mod normalizer;
mod patterns;
pub mod stemmer;
pub mod stopwords;
pub mod structure;
pub mod tokenizer;

pub use filters::TokenFilter;
pub use normalizer::{strip_comments, CleaningPass, LatexNormalizer};
pub use stemmer::Stemmer;
pub use stopwords::StopwordList;
pub use tokenizer::WordTokenizer;
