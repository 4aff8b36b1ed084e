//! Neo4j connection management and statement execution.

use neo4rs::{ConfigBuilder, Graph};

use crate::catalog::{BoundStatement, TxKind};

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Parameter error: {0}")]
    Parameter(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "mybase".to_string(),
            max_connections: 16,
            fetch_size: 256,
        }
    }
}

/// Thread-safe Neo4j client over the books/readers graph.
///
/// Holds the connection pool; every operation is an independent unit of work
/// against it. Clone is cheap (inner Arc). Teardown is RAII: dropping the
/// last clone releases the pool, and no operation closes it implicitly.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Get a reference to the underlying neo4rs Graph for direct operations.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }

    /// Execute a bound catalog statement and collect all result rows.
    ///
    /// A failing write statement is logged with its name, Cypher text, and
    /// bound parameters before the error propagates unchanged. Reads get no
    /// extra handling.
    pub async fn execute(&self, bound: BoundStatement) -> Result<Vec<neo4rs::Row>, GraphError> {
        let statement = bound.statement();
        let params = format!("{:?}", bound.params());

        match self.collect(bound).await {
            Ok(rows) => Ok(rows),
            Err(e) => {
                if statement.kind == TxKind::Write {
                    tracing::error!(
                        statement = statement.name,
                        cypher = statement.cypher,
                        params = %params,
                        error = %e,
                        "write statement failed"
                    );
                }
                Err(e)
            }
        }
    }

    async fn collect(&self, bound: BoundStatement) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(bound.into_query()).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }
}
