//! Mango query model
//!
//! Request types accepted by the translator and the typed selector tree the
//! rest of the pipeline works on.

mod errors;
mod normalizer;
mod request;
mod selector;

pub use errors::SelectorError;
pub use normalizer::{SelectorNormalizer, DEFAULT_MAX_SELECTOR_DEPTH};
pub use request::{IndexDefinition, IndexRequest, IndexSpec, MangoQuery};
pub use selector::{ComparisonOp, Literal, Operand, Selector, AND_TOKEN, OR_TOKEN};
