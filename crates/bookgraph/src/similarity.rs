//! The reader-similarity pipeline: FastRP embeddings + KNN, delegated to the
//! Neo4j Graph Data Science plugin over the named projection `read_books`.
//!
//! Fixed five-step sequence: project, embed (mutate), KNN write, query
//! similar pairs, query recommendations. Once the projection exists it is
//! dropped on every exit path, so a failure mid-pipeline cannot leave the
//! projection behind.

use crate::catalog::{
    bind, Value, RECOMMENDATIONS, SIMILARITY_DROP, SIMILARITY_EMBED, SIMILARITY_KNN_WRITE,
    SIMILARITY_PROJECT, SIMILAR_PAIRS,
};
use crate::client::{GraphClient, GraphError};
use crate::queries::required;

/// Summary of the KNN write step.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct KnnSummary {
    pub nodes_compared: i64,
    pub relationships_written: i64,
    pub mean_similarity: f64,
}

/// A pair of readers with their SIMILAR score (> 0.8).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SimilarPair {
    pub reader1_name: String,
    pub reader1_surname: String,
    pub reader2_name: String,
    pub reader2_surname: String,
    pub similarity: f64,
}

/// A book recommended to the target reader, ranked by the mean similarity
/// score of the neighbors who read it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub score: f64,
}

/// Everything the pipeline produces for one target reader.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SimilarityReport {
    pub knn: KnnSummary,
    pub similar_pairs: Vec<SimilarPair>,
    pub recommendations: Vec<Recommendation>,
}

impl GraphClient {
    /// Run the full similarity pipeline for one target reader.
    ///
    /// The SIMILAR relationships written by KNN stay in the store; only the
    /// in-memory projection is ephemeral.
    pub async fn similar_readers(
        &self,
        reader_name: &str,
        reader_surname: &str,
    ) -> Result<SimilarityReport, GraphError> {
        self.execute(bind(&SIMILARITY_PROJECT, vec![])?).await?;

        // The projection now exists; drop it no matter how the remaining
        // steps end.
        let outcome = self.similarity_steps(reader_name, reader_surname).await;
        let dropped = self.execute(bind(&SIMILARITY_DROP, vec![])?).await;

        let report = match outcome {
            Ok(report) => report,
            Err(step_err) => {
                if let Err(drop_err) = dropped {
                    tracing::warn!(
                        error = %drop_err,
                        "failed to drop the read_books projection after a pipeline failure"
                    );
                }
                return Err(step_err);
            }
        };
        dropped?;
        Ok(report)
    }

    async fn similarity_steps(
        &self,
        reader_name: &str,
        reader_surname: &str,
    ) -> Result<SimilarityReport, GraphError> {
        self.execute(bind(&SIMILARITY_EMBED, vec![])?).await?;

        let knn_rows = self.execute(bind(&SIMILARITY_KNN_WRITE, vec![])?).await?;
        let knn = decode_knn(&knn_rows)?;

        let pair_rows = self.execute(bind(&SIMILAR_PAIRS, vec![])?).await?;
        let mut similar_pairs = Vec::with_capacity(pair_rows.len());
        for row in pair_rows {
            similar_pairs.push(SimilarPair {
                reader1_name: required(&row, "n.name")?,
                reader1_surname: required(&row, "reader1")?,
                reader2_name: required(&row, "m.name")?,
                reader2_surname: required(&row, "reader2")?,
                similarity: required(&row, "similarity")?,
            });
        }

        let rec_rows = self
            .execute(bind(
                &RECOMMENDATIONS,
                vec![
                    ("reader_name", Value::from(reader_name)),
                    ("reader_surname", Value::from(reader_surname)),
                ],
            )?)
            .await?;
        let mut recommendations = Vec::with_capacity(rec_rows.len());
        for row in rec_rows {
            recommendations.push(Recommendation {
                title: required(&row, "name")?,
                score: required(&row, "score")?,
            });
        }

        Ok(SimilarityReport {
            knn,
            similar_pairs,
            recommendations,
        })
    }
}

fn decode_knn(rows: &[neo4rs::Row]) -> Result<KnnSummary, GraphError> {
    let row = rows.first().ok_or_else(|| {
        GraphError::Serialization("gds.knn.write returned no summary row".to_string())
    })?;
    Ok(KnnSummary {
        nodes_compared: required(row, "nodesCompared")?,
        relationships_written: required(row, "relationshipsWritten")?,
        mean_similarity: required(row, "meanSimilarity")?,
    })
}

#[cfg(test)]
mod tests {
    use crate::catalog::{SIMILARITY_PIPELINE, SIMILARITY_PROJECT, TxKind};

    #[test]
    fn pipeline_starts_with_project_and_ends_with_drop() {
        assert_eq!(SIMILARITY_PIPELINE.first().unwrap().name, "similarity_project");
        assert_eq!(SIMILARITY_PIPELINE.last().unwrap().name, "similarity_drop");
    }

    #[test]
    fn projection_is_undirected_and_weighted_by_mark() {
        assert!(SIMILARITY_PROJECT.cypher.contains("'UNDIRECTED'"));
        assert!(SIMILARITY_PROJECT.cypher.contains("properties: 'mark'"));
        assert_eq!(SIMILARITY_PROJECT.kind, TxKind::Write);
    }

    #[test]
    fn knn_settings_are_deterministic() {
        let cypher = crate::catalog::SIMILARITY_KNN_WRITE.cypher;
        assert!(cypher.contains("randomSeed: 42"));
        assert!(cypher.contains("concurrency: 1"));
        assert!(cypher.contains("topK: 2"));
    }
}
