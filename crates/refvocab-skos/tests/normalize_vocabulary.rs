//! End-to-end normalization of an NVS-shaped JSON-LD collection.

use std::path::PathBuf;

use refvocab_skos::{AliasTable, ConceptField, Normalizer, RelationKind, RelationMap};

const TOOL0022: &str = "http://vocab.nerc.ac.uk/collection/L22/current/TOOL0022/";
const TOOL1457: &str = "http://vocab.nerc.ac.uk/collection/L22/current/TOOL1457/";
const TOOL1458: &str = "http://vocab.nerc.ac.uk/collection/L22/current/TOOL1458/";
const COLLECTION: &str = "http://vocab.nerc.ac.uk/collection/L22/current/";

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/l22_sample.json")
}

#[test]
fn test_records_follow_graph_order() {
    let vocab = Normalizer::default().normalize_file(&fixture()).unwrap();

    let uris: Vec<&str> = vocab.records.iter().map(|r| r.uri.as_str()).collect();
    assert_eq!(uris, vec![TOOL0022, TOOL1457, TOOL1458]);
    for record in &vocab.records {
        assert!(!record.uri.is_empty());
    }
}

#[test]
fn test_scalar_fields() {
    let vocab = Normalizer::default().normalize_file(&fixture()).unwrap();

    let ctd = &vocab.records[0];
    assert_eq!(ctd.identifier.as_deref(), Some("SDN:L22::TOOL0022"));
    assert_eq!(ctd.pref_label.as_deref(), Some("Sea-Bird SBE 911plus CTD"));
    assert_eq!(ctd.alt_label.as_deref(), Some("SBE 911plus"));
    assert_eq!(
        ctd.definition.as_deref(),
        Some("The Sea-Bird SBE 911plus is a type of CTD.")
    );

    // Bare prefLabel is listed before skos:prefLabel; its first element wins.
    let microcat = &vocab.records[1];
    assert_eq!(microcat.identifier.as_deref(), Some("SDN:L22::TOOL1457"));
    assert_eq!(
        microcat.pref_label.as_deref(),
        Some("Sea-Bird SBE 37-SMP MicroCAT")
    );

    let placeholder = &vocab.records[2];
    assert_eq!(placeholder.pref_label, None);
    assert_eq!(placeholder.get(ConceptField::Definition), Some("Deprecated placeholder concept."));
}

#[test]
fn test_relation_maps() {
    let vocab = Normalizer::default().normalize_file(&fixture()).unwrap();

    assert_eq!(
        vocab.broader.get(TOOL0022).unwrap(),
        ["http://vocab.nerc.ac.uk/collection/L05/current/130/"]
    );
    assert_eq!(
        vocab.related.get(TOOL0022).unwrap(),
        ["http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/", TOOL1457]
    );
    assert_eq!(vocab.narrower.get(TOOL1457).unwrap(), [TOOL1458]);
    assert!(vocab.narrower.get(TOOL1458).unwrap().is_empty());
}

#[test]
fn test_every_concept_has_all_relations() {
    let vocab = Normalizer::default().normalize_file(&fixture()).unwrap();

    for record in &vocab.records {
        for kind in RelationKind::ALL {
            assert!(
                vocab.relation(kind).contains_key(&record.uri),
                "{} missing {} entry",
                record.uri,
                kind
            );
        }
    }
    for kind in RelationKind::ALL {
        assert_eq!(vocab.relation(kind).len(), vocab.records.len());
    }
}

#[test]
fn test_collection_node_is_ignored() {
    let vocab = Normalizer::default().normalize_file(&fixture()).unwrap();

    assert!(vocab.records.iter().all(|r| r.uri != COLLECTION));
    for kind in RelationKind::ALL {
        assert!(!vocab.relation(kind).contains_key(COLLECTION));
    }
}

#[test]
fn test_columns_are_renamed() {
    let vocab = Normalizer::default().normalize_file(&fixture()).unwrap();
    assert_eq!(
        vocab.columns(),
        vec!["uri", "prefLabel", "definition", "altLabel", "id"]
    );
}

#[test]
fn test_normalization_is_idempotent() {
    let normalizer = Normalizer::default();
    let first = normalizer.normalize_file(&fixture()).unwrap();
    let second = normalizer.normalize_file(&fixture()).unwrap();

    assert_eq!(first, second);
    for kind in RelationKind::ALL {
        assert_eq!(
            serde_json::to_string(first.relation(kind)).unwrap(),
            serde_json::to_string(second.relation(kind)).unwrap()
        );
    }
}

#[test]
fn test_relation_files_round_trip() {
    let vocab = Normalizer::default().normalize_file(&fixture()).unwrap();
    let dir = tempfile::tempdir().unwrap();

    for kind in RelationKind::ALL {
        let path = dir.path().join(format!("L22.{}.json", kind));
        std::fs::write(&path, serde_json::to_string(vocab.relation(kind)).unwrap()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let back: RelationMap = serde_json::from_str(&raw).unwrap();
        assert_eq!(&back, vocab.relation(kind));
        assert_eq!(
            back.keys().collect::<Vec<_>>(),
            vocab.relation(kind).keys().collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_custom_alias_table_changes_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let aliases = dir.path().join("aliases.json");
    std::fs::write(
        &aliases,
        r#"{
            "prefLabel": ["skos:prefLabel", "prefLabel"],
            "identifier": ["dc:identifier", "dce:identifier"],
            "uri": ["@id"]
        }"#,
    )
    .unwrap();

    let normalizer = Normalizer::new(AliasTable::from_json_file(&aliases).unwrap());
    let vocab = normalizer.normalize_file(&fixture()).unwrap();

    assert_eq!(
        vocab.records[1].pref_label.as_deref(),
        Some("ignored namespaced label")
    );
    // No alias entry for definition: only the exact key "definition" is tried.
    assert_eq!(vocab.records[0].definition, None);
    assert_eq!(
        vocab.records[2].definition.as_deref(),
        Some("Deprecated placeholder concept.")
    );
}

#[test]
fn test_normalizer_is_shareable_across_threads() {
    let normalizer = std::sync::Arc::new(Normalizer::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let normalizer = normalizer.clone();
            std::thread::spawn(move || normalizer.normalize_file(&fixture()).unwrap())
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for vocab in &results[1..] {
        assert_eq!(vocab, &results[0]);
    }
}
