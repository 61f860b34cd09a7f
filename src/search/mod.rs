//! Text normalization and similarity scoring shared by the catalogue
//! store and the dialogue matcher.

mod normalize;
mod similarity;

pub use normalize::{normalize_text, query_tokens};
pub use similarity::{best_match, similarity_score};
