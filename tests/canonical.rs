use pathminer::patterns::canonical::{interior, render, type_tag, EMPTY_PATTERN};

fn is_placeholder(token: &str) -> bool {
    token.starts_with("GENE_") || token.starts_with("CHEMICAL_")
}

#[test]
fn endpoints_are_dropped() {
    let path = ["GENE_0", "cat", "sat", "DISEASE_1"];
    assert_eq!(render(interior(&path).iter().copied(), is_placeholder), "cat sat");
}

#[test]
fn adjacent_endpoints_render_single_space() {
    let path = ["GENE_0", "DISEASE_1"];
    let pattern = render(interior(&path).iter().copied(), is_placeholder);
    assert_eq!(pattern, EMPTY_PATTERN);
    assert_eq!(pattern, " ");
}

#[test]
fn single_node_path_renders_single_space() {
    let path = ["GENE_0_1"];
    assert!(interior(&path).is_empty());
    assert_eq!(render(interior(&path).iter().copied(), is_placeholder), " ");
}

#[test]
fn interior_entities_collapse_to_type_and_words_lowercase() {
    let path = ["GENE_0", "Inhibits", "CHEMICAL_2_3", "Binding", "DISEASE_1"];
    assert_eq!(
        render(interior(&path).iter().copied(), is_placeholder),
        "inhibits CHEMICAL binding"
    );
}

#[test]
fn type_tag_is_prefix_before_underscore() {
    assert_eq!(type_tag("VARIANT_4_5"), "VARIANT");
    assert_eq!(type_tag("GENE"), "GENE");
}
