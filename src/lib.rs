//! mango-n1ql - Mango selector to N1QL translation
//!
//! This crate turns Mango-style document queries into N1QL statements through:
//! - Selector normalization into a typed tree
//! - Operand compilation with NULL-safe comparison rewriting
//! - WHERE clause, SELECT, COUNT and CREATE INDEX generation
//! - A translate-only HTTP service and command line tool

pub mod config;
pub mod mango_query;
pub mod n1ql_query_generator;
pub mod server;
pub mod translator;

pub use translator::{N1qlTranslator, TranslatorOptions};
