//! Relation graphs → `relations/<VOCAB>.<kind>.json`.

use std::io;
use std::path::Path;

use refvocab_core::Result;
use refvocab_skos::{NormalizedVocabulary, RelationKind, RelationMap};
use serde::Serialize;
use serde_json::ser::Formatter;
use tracing::debug;

use crate::manifest::Artifact;

/// Write narrower, broader and related maps for `vocab_name` under `root`.
///
/// Returns the written artifacts keyed `<VOCAB>.<kind>`, in
/// narrower/related/broader order (the manifest's published order).
pub fn write_relation_files(
    root: &Path,
    vocab_name: &str,
    vocab: &NormalizedVocabulary,
) -> Result<Vec<Artifact>> {
    for kind in RelationKind::ALL {
        let relative = relation_path(vocab_name, kind);
        let json = relation_json(vocab.relation(kind))?;
        std::fs::write(root.join(&relative), json)?;
        debug!(
            "Wrote {} ({} concepts, {} edges)",
            relative,
            vocab.relation(kind).len(),
            vocab.relation(kind).edge_count()
        );
    }

    Ok([RelationKind::Narrower, RelationKind::Related, RelationKind::Broader]
        .into_iter()
        .map(|kind| Artifact::new(format!("{}.{}", vocab_name, kind), relation_path(vocab_name, kind)))
        .collect())
}

fn relation_path(vocab_name: &str, kind: RelationKind) -> String {
    format!("relations/{}.{}.json", vocab_name, kind)
}

/// Serialize a relation map in the published layout: `{"a": ["b", "c"]}`,
/// non-ASCII escaped as `\uXXXX`.
fn relation_json(map: &RelationMap) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PublishedFormatter);
    map.serialize(&mut ser)?;
    Ok(buf)
}

/// Single-line JSON with `", "` and `": "` separators and ASCII-only output.
struct PublishedFormatter;

impl Formatter for PublishedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
