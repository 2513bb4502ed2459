//! Search-argument construction and result faceting.

mod args;
mod facets;

pub use args::SearchArguments;
pub use facets::{Facet, FacetCount, FacetSelection};
