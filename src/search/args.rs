use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// Immutable holder for the arguments of a specific search: the query, each
/// of the search terms, the diagram id etc. All query terms are stored in
/// lowercase.
///
/// Two instances are interchangeable for caching purposes if and only if
/// query, diagram id, species and facets all match; the derived term list and
/// highlighting pattern do not participate in equality or hashing.
#[derive(Debug, Clone)]
pub struct SearchArguments {
    query: String,
    diagram_st_id: String,
    species: String,
    facets: BTreeSet<String>,
    terms: Vec<String>,
    highlighting: Option<Regex>,
}

impl SearchArguments {
    pub fn new(
        query: &str,
        diagram_st_id: &str,
        species: &str,
        facets: BTreeSet<String>,
    ) -> Self {
        let query = query.to_lowercase();
        let terms: Vec<String> = query.split_whitespace().map(str::to_owned).collect();

        // (term1|term2): the group lets a replacement reference the exact
        // substring that matched, so the source text keeps its own casing
        // instead of inheriting the query's.
        let highlighting = if terms.is_empty() {
            None
        } else {
            let alternation = terms
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            RegexBuilder::new(&format!("({alternation})"))
                .case_insensitive(true)
                .build()
                .ok()
        };

        Self {
            query,
            diagram_st_id: diagram_st_id.to_owned(),
            species: species.to_owned(),
            facets,
            terms,
            highlighting,
        }
    }

    /// False for empty or whitespace-only queries.
    pub fn has_valid_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn diagram_st_id(&self) -> &str {
        &self.diagram_st_id
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn facets(&self) -> &BTreeSet<String> {
        &self.facets
    }

    /// Lowercased query terms, split on runs of whitespace.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn size_of_terms(&self) -> usize {
        self.terms.len()
    }

    /// Case-insensitive alternation over the terms; `None` when the query
    /// produced no terms.
    pub fn highlighting_expression(&self) -> Option<&Regex> {
        self.highlighting.as_ref()
    }

    /// Whether any term occurs in `text` (case-insensitively).
    pub fn matches(&self, text: &str) -> bool {
        self.highlighting
            .as_ref()
            .is_some_and(|re| re.is_match(text))
    }

    /// Wrap every matched term occurrence in `text` via `wrap`, preserving
    /// the original casing of the matched substring.
    pub fn highlight_with<F>(&self, text: &str, wrap: F) -> String
    where
        F: Fn(&str) -> String,
    {
        match &self.highlighting {
            Some(re) => re
                .replace_all(text, |caps: &regex::Captures| wrap(&caps[1]))
                .into_owned(),
            None => text.to_owned(),
        }
    }

    /// The bold-underline markup used for result labels.
    pub fn highlight_markup(&self, text: &str) -> String {
        self.highlight_with(text, |m| format!("<b><u>{m}</u></b>"))
    }
}

impl PartialEq for SearchArguments {
    fn eq(&self, other: &Self) -> bool {
        self.query == other.query
            && self.diagram_st_id == other.diagram_st_id
            && self.species == other.species
            && self.facets == other.facets
    }
}

impl Eq for SearchArguments {}

impl Hash for SearchArguments {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.query.hash(state);
        self.diagram_st_id.hash(state);
        self.species.hash(state);
        self.facets.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(query: &str) -> SearchArguments {
        SearchArguments::new(query, "R-HSA-68886", "Homo sapiens", BTreeSet::new())
    }

    #[test]
    fn test_terms_are_lowercased_and_split() {
        let a = args("Foo  Bar");
        assert!(a.has_valid_query());
        assert_eq!(a.terms(), ["foo", "bar"]);
        assert_eq!(a.size_of_terms(), 2);
    }

    #[test]
    fn test_blank_query_is_invalid() {
        let a = args("  ");
        assert!(!a.has_valid_query());
        assert!(a.terms().is_empty());
        assert!(a.highlighting_expression().is_none());
        assert_eq!(a.highlight_markup("Foo"), "Foo");
    }

    #[test]
    fn test_highlighting_preserves_source_casing() {
        let a = args("foo bar");
        assert!(a.matches("FooBar Baz Foo"));
        let out = a.highlight_with("FooBar Baz Foo", |m| format!("[{m}]"));
        assert_eq!(out, "[Foo][Bar] Baz [Foo]");
    }

    #[test]
    fn test_regex_metacharacters_in_query_are_literal() {
        let a = args("a+b");
        assert!(a.matches("A+B complex"));
        assert!(!a.matches("aab"));
    }
}
