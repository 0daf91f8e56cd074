//! LanceDB storage for the grounding corpus.
//!
//! Two tables share one schema ([`corpus::snippet_schema`]): `statutes` holds
//! one row per statute article, `precedents` one row per court decision
//! summary. Both carry an `embedding` column for similarity search. The tables
//! are built by the ingestion tooling; this layer only reads them, apart from
//! [`LanceStore::create_table_from_batches`] which fixtures use.

use std::path::Path;

use arrow::array::{Array, LargeStringArray, RecordBatchIterator, StringArray};
use arrow::record_batch::RecordBatch;
use fairclause_core::corpus;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use tracing::{debug, info};

use crate::StoreError;

/// LanceDB connection holding the statute and precedent tables.
pub struct LanceStore {
    db: lancedb::Connection,
}

impl LanceStore {
    /// Connect to a LanceDB database at the given path.
    ///
    /// Creates the database directory if it doesn't exist.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let uri = path
            .to_str()
            .ok_or_else(|| StoreError::Other("non-UTF8 database path".into()))?;
        let db = lancedb::connect(uri).execute().await?;
        Ok(Self { db })
    }

    /// Open a table by name, mapping a missing table to [`StoreError::TableNotFound`].
    pub async fn table(&self, name: &str) -> Result<lancedb::Table, StoreError> {
        match self.db.open_table(name).execute().await {
            Ok(table) => Ok(table),
            Err(lancedb::Error::TableNotFound { .. }) => {
                Err(StoreError::TableNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn count_rows(&self, name: &str) -> Result<usize, StoreError> {
        let table = self.table(name).await?;
        Ok(table.count_rows(None).await?)
    }

    /// List table names in the database.
    pub async fn table_names(&self) -> Result<Vec<String>, StoreError> {
        let names = self.db.table_names().execute().await?;
        Ok(names)
    }

    /// Nearest-neighbour search on a snippet table.
    ///
    /// Returns up to `limit` snippet texts, closest first.
    pub async fn search_snippets(
        &self,
        table_name: &str,
        query_vector: &[f32],
        limit: usize,
    ) -> Result<Vec<String>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let table = self.table(table_name).await?;
        let batches: Vec<RecordBatch> = table
            .vector_search(query_vector)?
            .column(corpus::EMBEDDING_COLUMN)
            .limit(limit)
            .execute()
            .await?
            .try_collect()
            .await?;

        let mut texts = snippet_texts(&batches)?;
        texts.truncate(limit);
        debug!(table = table_name, hits = texts.len(), "snippet search");
        Ok(texts)
    }

    /// Create (or replace) a table from pre-built RecordBatches.
    pub async fn create_table_from_batches(
        &self,
        table_name: &str,
        batches: Vec<RecordBatch>,
    ) -> Result<(), StoreError> {
        let Some(first) = batches.first() else {
            return Err(StoreError::Other("no record batches provided".into()));
        };

        let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        let schema = first.schema();
        let reader = RecordBatchIterator::new(batches.into_iter().map(Ok), schema);

        let existing = self.db.table_names().execute().await?;
        if existing.iter().any(|n| n == table_name) {
            self.db.drop_table(table_name, &[]).await?;
        }

        self.db
            .create_table(table_name, Box::new(reader))
            .execute()
            .await?;

        info!(
            table = table_name,
            rows = total_rows,
            "created LanceDB table from batches"
        );
        Ok(())
    }
}

/// Pull the `text` column out of search results, preserving row order.
///
/// Handles both `Utf8` (StringArray) and `LargeUtf8` (LargeStringArray). Null
/// rows are skipped.
pub fn snippet_texts(batches: &[RecordBatch]) -> Result<Vec<String>, StoreError> {
    let mut texts = Vec::new();

    for batch in batches {
        let col = batch
            .column_by_name(corpus::TEXT_COLUMN)
            .ok_or(StoreError::BadTextColumn(corpus::TEXT_COLUMN))?;

        if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
            texts.extend(
                (0..arr.len())
                    .filter(|&i| !arr.is_null(i))
                    .map(|i| arr.value(i).to_string()),
            );
        } else if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
            texts.extend(
                (0..arr.len())
                    .filter(|&i| !arr.is_null(i))
                    .map(|i| arr.value(i).to_string()),
            );
        } else {
            return Err(StoreError::BadTextColumn(corpus::TEXT_COLUMN));
        }
    }

    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{FixedSizeListBuilder, Float32Builder, StringBuilder};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;
    use tempfile::TempDir;

    const DIM: i32 = 4; // Small dim for tests.

    fn snippet_batch(rows: &[(&str, &str, [f32; 4])]) -> RecordBatch {
        let mut text_builder = StringBuilder::new();
        let mut source_builder = StringBuilder::new();
        let mut emb_builder = FixedSizeListBuilder::new(Float32Builder::new(), DIM);

        for (text, source, emb) in rows {
            text_builder.append_value(text);
            source_builder.append_value(source);
            let values = emb_builder.values();
            for &v in emb {
                values.append_value(v);
            }
            emb_builder.append(true);
        }

        RecordBatch::try_new(
            Arc::new(corpus::snippet_schema(DIM)),
            vec![
                Arc::new(text_builder.finish()),
                Arc::new(source_builder.finish()),
                Arc::new(emb_builder.finish()),
            ],
        )
        .unwrap()
    }

    async fn store_with_statutes(tmp: &TempDir) -> LanceStore {
        let store = LanceStore::open(&tmp.path().join("corpus")).await.unwrap();
        let batch = snippet_batch(&[
            ("제26조(해고의 예고)", "근로기준법", [1.0, 0.0, 0.0, 0.0]),
            ("제20조(위약 예정의 금지)", "근로기준법", [0.0, 1.0, 0.0, 0.0]),
            ("제8조(퇴직금제도의 설정)", "근로자퇴직급여 보장법", [0.0, 0.0, 1.0, 0.0]),
        ]);
        store
            .create_table_from_batches(corpus::STATUTES_TABLE, vec![batch])
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn open_creates_database() {
        let tmp = TempDir::new().unwrap();
        let store = LanceStore::open(&tmp.path().join("corpus")).await.unwrap();
        assert!(store.table_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_returns_closest_first() {
        let tmp = TempDir::new().unwrap();
        let store = store_with_statutes(&tmp).await;

        let hits = store
            .search_snippets(corpus::STATUTES_TABLE, &[0.1, 0.9, 0.0, 0.0], 2)
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], "제20조(위약 예정의 금지)");
        assert_eq!(hits[1], "제26조(해고의 예고)");
    }

    #[tokio::test]
    async fn search_with_zero_limit_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = store_with_statutes(&tmp).await;
        let hits = store
            .search_snippets(corpus::STATUTES_TABLE, &[1.0, 0.0, 0.0, 0.0], 0)
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn missing_table_errors() {
        let tmp = TempDir::new().unwrap();
        let store = store_with_statutes(&tmp).await;
        let result = store
            .search_snippets(corpus::PRECEDENTS_TABLE, &[1.0, 0.0, 0.0, 0.0], 1)
            .await;
        assert!(matches!(result, Err(StoreError::TableNotFound(_))));
    }

    #[tokio::test]
    async fn recreate_replaces_table() {
        let tmp = TempDir::new().unwrap();
        let store = store_with_statutes(&tmp).await;
        assert_eq!(store.count_rows(corpus::STATUTES_TABLE).await.unwrap(), 3);

        let batch = snippet_batch(&[("제43조(임금 지급)", "근로기준법", [0.0, 0.0, 0.0, 1.0])]);
        store
            .create_table_from_batches(corpus::STATUTES_TABLE, vec![batch])
            .await
            .unwrap();
        assert_eq!(store.count_rows(corpus::STATUTES_TABLE).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_batches_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = LanceStore::open(&tmp.path().join("corpus")).await.unwrap();
        let result = store
            .create_table_from_batches(corpus::STATUTES_TABLE, vec![])
            .await;
        assert!(matches!(result, Err(StoreError::Other(_))));
    }

    #[test]
    fn snippet_texts_reads_large_utf8_and_skips_nulls() {
        let schema = Schema::new(vec![Field::new("text", DataType::LargeUtf8, true)]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(LargeStringArray::from(vec![
                Some("판례 A"),
                None,
                Some("판례 B"),
            ]))],
        )
        .unwrap();

        assert_eq!(snippet_texts(&[batch]).unwrap(), vec!["판례 A", "판례 B"]);
    }

    #[test]
    fn snippet_texts_requires_text_column() {
        let schema = Schema::new(vec![Field::new("body", DataType::Utf8, false)]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(StringArray::from(vec!["x"]))],
        )
        .unwrap();
        assert!(matches!(
            snippet_texts(&[batch]),
            Err(StoreError::BadTextColumn("text"))
        ));
    }
}
