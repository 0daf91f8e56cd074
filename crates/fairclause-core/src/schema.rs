/// Arrow schema and table names for the snippet corpus stored in LanceDB.
pub mod corpus {
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    /// Statute articles (근로기준법, 최저임금법, 근로자퇴직급여 보장법, ...).
    pub const STATUTES_TABLE: &str = "statutes";
    /// Court decision summaries.
    pub const PRECEDENTS_TABLE: &str = "precedents";

    pub const TEXT_COLUMN: &str = "text";
    pub const SOURCE_COLUMN: &str = "source";
    pub const EMBEDDING_COLUMN: &str = "embedding";

    /// ko-sbert-nli output width.
    pub const DEFAULT_EMBED_DIM: i32 = 768;

    /// Schema shared by both snippet tables.
    pub fn snippet_schema(dim: i32) -> Schema {
        Schema::new(vec![
            Field::new(TEXT_COLUMN, DataType::Utf8, false),
            Field::new(SOURCE_COLUMN, DataType::Utf8, true),
            Field::new(
                EMBEDDING_COLUMN,
                DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), dim),
                true,
            ),
        ])
    }
}
