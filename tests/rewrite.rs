mod common;

use common::{annotation, causes_document, document, passage};
use pathminer::{
    error::MiningError,
    patterns::{
        rewrite::{apply_edits, collapse_whitespace, rewrite_document, Edit},
        MentionNormalizer,
    },
};
use proptest::prelude::*;

#[test]
fn substitutes_mentions_with_placeholders() {
    let doc = causes_document();
    let mut normalizer = MentionNormalizer::new();
    let text = rewrite_document(&doc, &mut normalizer).unwrap();
    assert_eq!(text, "GENE_0 causes DISEASE_1 .");
}

#[test]
fn composite_identifier_becomes_one_placeholder() {
    let doc = document(
        "doc-2",
        vec![passage(
            "Aspirin and ibuprofen reduce pain; aspirin too.",
            100,
            vec![
                annotation("ChemicalEntity", "c1,c2", 100, "Aspirin and ibuprofen"),
                annotation("ChemicalEntity", "c1", 135, "aspirin"),
            ],
        )],
        vec![],
    );
    let mut normalizer = MentionNormalizer::new();
    let text = rewrite_document(&doc, &mut normalizer).unwrap();
    assert_eq!(text, "CHEMICAL_0_1 reduce pain; CHEMICAL_0 too.");
    let for_c1: Vec<&str> = normalizer.placeholders_for("c1").collect();
    assert_eq!(for_c1, vec!["CHEMICAL_0_1", "CHEMICAL_0"]);
}

#[test]
fn unrecognised_types_are_left_alone() {
    let doc = document(
        "doc-3",
        vec![passage(
            "Mice carry BRCA1.",
            0,
            vec![
                annotation("OrganismTaxon", "10090", 0, "Mice"),
                annotation("GENE", "672", 11, "BRCA1"),
            ],
        )],
        vec![],
    );
    let mut normalizer = MentionNormalizer::new();
    let text = rewrite_document(&doc, &mut normalizer).unwrap();
    assert_eq!(text, "Mice carry GENE_0 .");
    assert_eq!(normalizer.len(), 1);
}

#[test]
fn passages_join_with_single_space_and_shared_ids() {
    let doc = document(
        "doc-4",
        vec![
            passage("TP53 title", 0, vec![annotation("GENE", "7157", 0, "TP53")]),
            passage("Loss of TP53.", 11, vec![annotation("GENE", "7157", 19, "TP53")]),
        ],
        vec![],
    );
    let mut normalizer = MentionNormalizer::new();
    let text = rewrite_document(&doc, &mut normalizer).unwrap();
    assert_eq!(text, "GENE_0 title Loss of GENE_0 .");
}

#[test]
fn offsets_count_characters_not_bytes() {
    let doc = document(
        "doc-5",
        vec![passage(
            "β-catenin binds APC.",
            0,
            vec![
                annotation("GENE", "1499", 0, "β-catenin"),
                annotation("GENE", "324", 16, "APC"),
            ],
        )],
        vec![],
    );
    let mut normalizer = MentionNormalizer::new();
    let text = rewrite_document(&doc, &mut normalizer).unwrap();
    assert_eq!(text, "GENE_0 binds GENE_1 .");
}

#[test]
fn location_outside_passage_is_fatal() {
    let doc = document(
        "doc-6",
        vec![passage("Short.", 50, vec![annotation("GENE", "1", 40, "Short")])],
        vec![],
    );
    let mut normalizer = MentionNormalizer::new();
    let err = rewrite_document(&doc, &mut normalizer).unwrap_err();
    assert!(matches!(err, MiningError::InvalidSpan { start: -10, .. }));
}

#[test]
fn overlapping_spans_are_deterministic() {
    let edits = || {
        vec![
            Edit { start: 0, end: 8, placeholder: "GENE_0".into() },
            Edit { start: 5, end: 12, placeholder: "GENE_1".into() },
        ]
    };
    let first = apply_edits("abcdefghijklmnop", edits());
    let second = apply_edits("abcdefghijklmnop", edits());
    assert_eq!(first, second);
    assert!(first.contains("GENE_0"));
}

#[test]
fn edits_sharing_a_start_apply_wider_span_first() {
    let narrow = Edit { start: 2, end: 4, placeholder: "A".into() };
    let wide = Edit { start: 2, end: 6, placeholder: "B".into() };
    let forward = apply_edits("abcdefghij", vec![narrow.clone(), wide.clone()]);
    let backward = apply_edits("abcdefghij", vec![wide, narrow]);
    assert_eq!(forward, "ab A ghij");
    assert_eq!(backward, forward);

    let x = Edit { start: 2, end: 4, placeholder: "X".into() };
    let y = Edit { start: 2, end: 4, placeholder: "Y".into() };
    assert_eq!(apply_edits("abcdefghij", vec![x.clone(), y.clone()]), "ab X efghij");
    assert_eq!(apply_edits("abcdefghij", vec![y, x]), "ab X efghij");
}

fn segments() -> impl Strategy<Value = (Vec<(String, String)>, String)> {
    (
        proptest::collection::vec(("[a-z ]{0,6}", "[a-z]{1,6}"), 0..6),
        "[a-z ]{0,6}",
    )
}

proptest! {
    #[test]
    fn non_overlapping_spans_keep_order_and_context((pieces, tail) in segments()) {
        let mut text = String::new();
        let mut edits = Vec::new();
        let mut expected = String::new();
        for (i, (gap, span)) in pieces.iter().enumerate() {
            text.push_str(gap);
            expected.push_str(gap);
            let start = text.chars().count();
            text.push_str(span);
            let placeholder = format!("X_{i}");
            expected.push_str(&format!(" {placeholder} "));
            edits.push(Edit { start, end: text.chars().count(), placeholder });
        }
        text.push_str(&tail);
        expected.push_str(&tail);

        let rewritten = apply_edits(&text, edits);
        prop_assert_eq!(&rewritten, &collapse_whitespace(&expected));

        let seen: Vec<&str> = rewritten.split(' ').filter(|t| t.starts_with("X_")).collect();
        let wanted: Vec<String> = (0..pieces.len()).map(|i| format!("X_{i}")).collect();
        prop_assert_eq!(seen, wanted.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
