//! Concept records → union-of-columns CSV table.

use std::path::Path;

use refvocab_core::Result;
use refvocab_skos::{ConceptField, NormalizedVocabulary};
use tracing::debug;

/// Row-oriented view of a vocabulary's records.
///
/// Columns are the union of fields present across records, in order of
/// first appearance. Cells for fields a record lacks are `None`. A
/// vocabulary without concepts gets every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptTable {
    fields: Vec<ConceptField>,
    rows: Vec<Vec<Option<String>>>,
}

impl ConceptTable {
    pub fn from_vocabulary(vocab: &NormalizedVocabulary) -> Self {
        let mut fields = vocab.fields();
        if fields.is_empty() {
            fields = ConceptField::COLUMN_ORDER.to_vec();
        }
        let rows = vocab
            .records
            .iter()
            .map(|record| {
                fields
                    .iter()
                    .map(|f| record.get(*f).map(str::to_string))
                    .collect()
            })
            .collect();
        Self { fields, rows }
    }

    /// Header names as published.
    pub fn columns(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.column_name()).collect()
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table with a header row; missing cells are empty.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(self.columns())?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        debug!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(())
    }
}
