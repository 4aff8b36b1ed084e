//! bookgraph — Neo4j client for a books/readers graph.
//!
//! This crate is a thin façade over an external Neo4j database: it owns the
//! connection pool, a fixed catalog of parameterized Cypher statements, and
//! the decoding of result rows into typed records. All graph computation
//! (aggregation, FastRP embeddings, KNN similarity) runs inside the Neo4j
//! server and its GDS/APOC plugins; nothing is computed locally.

pub mod catalog;
pub mod client;
pub mod mutations;
pub mod queries;
pub mod similarity;

pub use client::{GraphClient, GraphConfig, GraphError};
