//! Mango → N1QL translation entry point
//!
//! [`N1qlTranslator`] ties the pipeline together:
//! selector normalization → operand compilation → WHERE assembly →
//! statement assembly. It is immutable and cheap to clone, so one instance
//! can be shared by every request handler.

use serde_json::Value;

use crate::config::ServerConfig;
use crate::mango_query::{
    IndexDefinition, IndexRequest, IndexSpec, MangoQuery, Selector, SelectorError,
    SelectorNormalizer, DEFAULT_MAX_SELECTOR_DEPTH,
};
use crate::n1ql_query_generator::{
    self, N1qlQueryGeneratorError, OperandCompiler, OutputCompat, TopLevelKey,
};

pub type TranslationResult<T> = Result<T, N1qlQueryGeneratorError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatorOptions {
    pub compat: OutputCompat,
    pub max_selector_depth: usize,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            compat: OutputCompat::default(),
            max_selector_depth: DEFAULT_MAX_SELECTOR_DEPTH,
        }
    }
}

impl From<&ServerConfig> for TranslatorOptions {
    fn from(config: &ServerConfig) -> Self {
        Self {
            compat: config.compat,
            max_selector_depth: config.max_selector_depth,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct N1qlTranslator {
    options: TranslatorOptions,
    normalizer: SelectorNormalizer,
}

impl N1qlTranslator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self {
            options,
            normalizer: SelectorNormalizer::new(options.max_selector_depth),
        }
    }

    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    pub fn normalize_selector(&self, selector: &Value) -> Result<Selector, SelectorError> {
        self.normalizer.normalize(selector)
    }

    /// Compile a single predicate such as `{"f": {"$in": ["a", "b"]}}` into
    /// a boolean expression, without the `WHERE` keyword.
    pub fn compile_operand(&self, predicate: &Value) -> TranslationResult<String> {
        let selector = self.normalize_selector(predicate)?;
        OperandCompiler::new(self.options.compat).compile(&selector)
    }

    pub fn build_where_clause(&self, query: &MangoQuery) -> TranslationResult<String> {
        let (_, where_clause) = self.selector_and_where(query)?;
        Ok(where_clause)
    }

    fn selector_and_where(&self, query: &MangoQuery) -> TranslationResult<(Selector, String)> {
        let selector = self.normalize_selector(&query.selector)?;
        let where_clause = n1ql_query_generator::build_where_clause(
            &selector,
            TopLevelKey::of(&query.selector),
            self.options.compat,
        )?;
        Ok((selector, where_clause))
    }

    pub fn build_find_statement(&self, query: &MangoQuery) -> TranslationResult<String> {
        let (_, where_clause) = self.selector_and_where(query)?;

        let sql = n1ql_query_generator::find_statement(
            &query.bucket_name,
            &query.fields,
            &where_clause,
            query.effective_limit(),
        )?;
        log::debug!("Generated find statement: {}", sql);
        Ok(sql)
    }

    /// Counts `fields[0]` when given, otherwise the first field named by the
    /// selector, otherwise `*`.
    pub fn build_count_statement(&self, query: &MangoQuery) -> TranslationResult<String> {
        let (selector, where_clause) = self.selector_and_where(query)?;

        let count_field = query
            .fields
            .first()
            .map(String::as_str)
            .or_else(|| selector.first_field());

        let sql = n1ql_query_generator::count_statement(&query.bucket_name, count_field, &where_clause)?;
        log::debug!("Generated count statement: {}", sql);
        Ok(sql)
    }

    /// Build `CREATE INDEX` from an explicit field list, or from the fields
    /// of `request.selector` when one is given.
    pub fn build_index_statement(&self, request: &IndexRequest) -> TranslationResult<String> {
        let fields = match &request.selector {
            Some(selector) => self.derive_index_from_selector(selector)?.index.fields,
            None => request
                .index
                .as_ref()
                .map(|index| index.fields.clone())
                .unwrap_or_default(),
        };

        let sql = n1ql_query_generator::index_statement(&request.bucket_name, &fields)?;
        log::debug!("Generated index statement: {}", sql);
        Ok(sql)
    }

    /// Index fields for a selector: every distinct field it compares, in
    /// order of first appearance. Members of `$and` and `$or` groups both
    /// contribute their own field names. The returned spec has no bucket.
    pub fn derive_index_from_selector(&self, selector: &Value) -> Result<IndexSpec, SelectorError> {
        let normalized = self.normalize_selector(selector)?;
        let fields = normalized
            .fields()
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(IndexSpec {
            bucket_name: String::new(),
            index: IndexDefinition { fields },
        })
    }
}
