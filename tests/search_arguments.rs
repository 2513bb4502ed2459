use pathview::search::SearchArguments;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

fn facets(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| (*n).to_owned()).collect()
}

fn hash_of(arguments: &SearchArguments) -> u64 {
    let mut hasher = DefaultHasher::new();
    arguments.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_query_normalization() {
    let a = SearchArguments::new("Foo Bar", "R-HSA-1", "Homo sapiens", BTreeSet::new());
    assert!(a.has_valid_query());
    assert_eq!(a.query(), "foo bar");
    assert_eq!(a.terms(), ["foo", "bar"]);

    let blank = SearchArguments::new("  ", "R-HSA-1", "Homo sapiens", BTreeSet::new());
    assert!(!blank.has_valid_query());
    assert_eq!(blank.size_of_terms(), 0);
}

#[test]
fn test_highlighting_pattern() {
    let a = SearchArguments::new("foo bar", "R-HSA-1", "Homo sapiens", BTreeSet::new());
    let re = a.highlighting_expression().expect("pattern for valid query");
    assert!(re.is_match("FooBar Baz Foo"));
    // Substitution keeps the casing of the source text, not the query's.
    assert_eq!(
        a.highlight_markup("FooBar Baz Foo"),
        "<b><u>Foo</u></b><b><u>Bar</u></b> Baz <b><u>Foo</u></b>"
    );
}

#[test]
fn test_structural_equality_and_hashing() {
    let a = SearchArguments::new("kinase", "R-HSA-1", "Homo sapiens", facets(&["Protein"]));
    let b = SearchArguments::new("Kinase", "R-HSA-1", "Homo sapiens", facets(&["Protein"]));
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let other_query =
        SearchArguments::new("kinases", "R-HSA-1", "Homo sapiens", facets(&["Protein"]));
    let other_diagram =
        SearchArguments::new("kinase", "R-HSA-2", "Homo sapiens", facets(&["Protein"]));
    let other_species =
        SearchArguments::new("kinase", "R-HSA-1", "Mus musculus", facets(&["Protein"]));
    let other_facets =
        SearchArguments::new("kinase", "R-HSA-1", "Homo sapiens", facets(&["Chemical"]));
    for other in [other_query, other_diagram, other_species, other_facets] {
        assert_ne!(a, other);
    }
}

#[test]
fn test_single_term_query() {
    let a = SearchArguments::new("ATP", "R-HSA-1", "Homo sapiens", BTreeSet::new());
    assert_eq!(a.terms(), ["atp"]);
    assert!(a.matches("atp synthase"));
    assert!(a.matches("ATP"));
    assert!(!a.matches("GTP"));
}
