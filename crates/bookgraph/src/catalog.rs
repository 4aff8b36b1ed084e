//! The fixed statement catalog: every Cypher statement the client can issue,
//! with its declared parameter names and transaction kind.
//!
//! Statement text is the wire contract of this client; the `occurance`
//! column spelling and the Polish literary-period labels are part of that
//! contract. Parameters are always bound by name, never interpolated into
//! the statement text.

use neo4rs::{query, Query};

use crate::client::GraphError;

/// Declared transaction kind of a statement.
///
/// Assigned by actual effect: statements containing a write clause (CREATE,
/// MERGE, SET, DELETE, or a GDS project/mutate/write/drop call) are `Write`;
/// pure reads are `Read`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Read,
    Write,
}

/// One entry of the statement catalog.
#[derive(Debug)]
pub struct Statement {
    /// Stable operation name, used in logs.
    pub name: &'static str,
    /// The Cypher text with `$name` placeholders.
    pub cypher: &'static str,
    /// Exact set of parameter names the statement expects.
    pub params: &'static [&'static str],
    /// Declared dispatch kind.
    pub kind: TxKind,
}

/// A scalar parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

/// A statement with its parameters bound and validated.
///
/// Construction via [`bind`] guarantees the parameter names match the
/// statement's declared set exactly, so a malformed call fails before
/// anything touches the wire.
#[derive(Debug)]
pub struct BoundStatement {
    statement: &'static Statement,
    params: Vec<(&'static str, Value)>,
}

impl BoundStatement {
    pub fn statement(&self) -> &'static Statement {
        self.statement
    }

    pub fn params(&self) -> &[(&'static str, Value)] {
        &self.params
    }

    /// Build the driver-level query with all parameters bound by name.
    pub fn into_query(self) -> Query {
        let mut q = query(self.statement.cypher);
        for (name, value) in self.params {
            q = match value {
                Value::Str(s) => q.param(name, s),
                Value::Int(i) => q.param(name, i),
                Value::Float(f) => q.param(name, f),
            };
        }
        q
    }
}

/// Bind named parameters to a catalog statement.
///
/// The supplied names must be exactly the statement's declared parameter set
/// (no missing, no extra, no duplicates).
pub fn bind(
    statement: &'static Statement,
    params: Vec<(&'static str, Value)>,
) -> Result<BoundStatement, GraphError> {
    for declared in statement.params {
        let count = params.iter().filter(|(name, _)| name == declared).count();
        if count != 1 {
            return Err(GraphError::Parameter(format!(
                "statement `{}` expects parameter `{}` exactly once, got {}",
                statement.name, declared, count
            )));
        }
    }
    if params.len() != statement.params.len() {
        let extra: Vec<&str> = params
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| !statement.params.contains(name))
            .collect();
        return Err(GraphError::Parameter(format!(
            "statement `{}` does not accept parameters {:?}",
            statement.name, extra
        )));
    }
    Ok(BoundStatement { statement, params })
}

// ── Write statements ─────────────────────────────────────────────

pub static CREATE_READER: Statement = Statement {
    name: "create_reader",
    cypher: "CREATE (r1:Reader {name: $reader_name, surname: $reader_surname})",
    params: &["reader_name", "reader_surname"],
    kind: TxKind::Write,
};

pub static CREATE_AUTHOR: Statement = Statement {
    name: "create_author",
    cypher: "CREATE (a1:Author {name: $author_name, surname: $author_surname})",
    params: &["author_name", "author_surname"],
    kind: TxKind::Write,
};

pub static CREATE_PUBLISHER: Statement = Statement {
    name: "create_publisher",
    cypher: "CREATE (p:Publisher {name: $publisher_name})",
    params: &["publisher_name"],
    kind: TxKind::Write,
};

pub static CREATE_BOOK: Statement = Statement {
    name: "create_book",
    cypher: "MATCH ((a:Author {name: $author_name, surname: $author_surname})),
             ((p:Publisher {name: $publisher_name}))
             CREATE (a)-[:WROTE]->(b:Book {name: $book_name, years: $book_years, category: $book_category})<-[:PUBLISH]-(p)",
    params: &[
        "book_name",
        "book_years",
        "book_category",
        "author_name",
        "author_surname",
        "publisher_name",
    ],
    kind: TxKind::Write,
};

pub static CREATE_READ_RELATION: Statement = Statement {
    name: "create_read_relation",
    cypher: "MATCH (r:Reader {name: $person_name, surname: $person_surname}), (b:Book {name: $book_name})
             MERGE (r)-[rel:READ {mark: $mark}]->(b)
             RETURN r, rel, b",
    params: &["person_name", "person_surname", "mark", "book_name"],
    kind: TxKind::Write,
};

pub static DELETE_READER: Statement = Statement {
    name: "delete_reader",
    cypher: "MATCH (r:Reader {name: $reader_name, surname: $reader_surname})
             DETACH DELETE r",
    params: &["reader_name", "reader_surname"],
    kind: TxKind::Write,
};

// ── Read statements ──────────────────────────────────────────────

pub static AUTHOR_BOOKS: Statement = Statement {
    name: "author_books",
    cypher: "MATCH (auth:Author)-[:WROTE]->(authBooks)
             WHERE auth.name = $author_name AND auth.surname = $author_surname
             RETURN authBooks.name AS name",
    params: &["author_name", "author_surname"],
    kind: TxKind::Read,
};

pub static CO_READ: Statement = Statement {
    name: "co_read",
    cypher: "MATCH (b:Book {name: $book_name})
             OPTIONAL MATCH (b)<-[:READ]-(reader)-[r:READ]->(other_book)
             RETURN other_book.name AS title, count(*) AS occurance
             ORDER BY occurance DESC",
    params: &["book_name"],
    kind: TxKind::Read,
};

pub static BOOKS_BY_YEAR_AND_CATEGORY: Statement = Statement {
    name: "books_by_year_and_category",
    cypher: "MATCH (b:Book {category: $category})
             WHERE $year_to_book_created >= b.years >= $year_since_book_created
             RETURN b.name AS title, b.years AS year
             ORDER BY year",
    params: &["year_since_book_created", "year_to_book_created", "category"],
    kind: TxKind::Read,
};

/// Persists the computed `MeanMark` back onto each Book, so this is a write
/// despite being a ranking query.
pub static TOP_RATED_BOOKS: Statement = Statement {
    name: "top_rated_books",
    cypher: "MATCH ()-[relation:READ]->(book:Book)
             WITH book, avg(relation.mark) AS mark
             SET book += {MeanMark: mark}
             RETURN book.name, mark
             ORDER BY mark DESC
             LIMIT 3",
    params: &[],
    kind: TxKind::Write,
};

pub static PUBLISHER_BOOK_COUNTS: Statement = Statement {
    name: "publisher_book_counts",
    cypher: "MATCH (p1:Publisher)-[r:PUBLISH]->(b:Book)
             RETURN p1.name, count(b)",
    params: &[],
    kind: TxKind::Read,
};

/// Classifies each Book into a Polish literary period by publication year and
/// persists it as `period`.
pub static ASSIGN_LITERARY_PERIODS: Statement = Statement {
    name: "assign_literary_periods",
    cypher: r#"MATCH (b:Book)
             CALL apoc.do.case([
             b.years >= 1822 AND b.years < 1863, 'SET b.period = "romantyzm" RETURN b',
             b.years >= 1863 AND b.years < 1890, 'SET b.period = "pozytywizm" RETURN b',
             b.years >= 1890 AND b.years < 1918, 'SET b.period = "Młoda Polska" RETURN b',
             b.years >= 1918 AND b.years < 1939, 'SET b.period = "XX-lecie międzywojenne" RETURN b'],
             'SET b.period = "literatura współczesna" RETURN b', {b: b})
             YIELD value
             RETURN value.b.name AS title, value.b.years AS year,
             value.b.period AS LiteraryPeriod
             ORDER BY year"#,
    params: &[],
    kind: TxKind::Write,
};

pub static LITERARY_PERIOD_DESCRIPTIONS: Statement = Statement {
    name: "literary_period_descriptions",
    cypher: r#"MATCH (b:Book)
             CALL apoc.case([
             b.period = "romantyzm", 'RETURN "Romantyzm wywodzi się z rewolucji francuskiej, opartej na haśle wolność, równość, braterstwo. W tej epoce literaci często skupiali się na uczuciach i wolności."
             AS description',
             b.period = "pozytywizm", 'RETURN "Pozytywizm z założenia opierał się na wiedzy naukowej oraz odrzuceniem religijności."
             AS description',
             b.period = "Młoda Polska", 'RETURN "Młoda Polska promowała swobodę wyrażania uczuć i ekspresjonizm."
             AS description',
             b.period = "XX-lecie międzywojenne", 'RETURN "Okres między dwoma najtragiczniejszymi wojnami w dziejach ludzkości obfitował w wysyp idei, poglądów i postaw."
             AS description',
             b.period = "literatura współczesna", 'RETURN "W praktyce od czasów II wojny literatura wymknęła się wszelkim ramom i nie ma dominujących nurtów, choć mocno ewoluowała w stronę rozrywki."
             AS description'],
             '', {b: b})
             YIELD value
             RETURN b.name AS title, b.years AS year,
             b.period AS LiteraryPeriod, value.description AS LiteraryPeriodDescription
             ORDER BY year"#,
    params: &[],
    kind: TxKind::Read,
};

// ── Best-author ranking (three sequential writes) ────────────────

pub static SET_BOOK_AMOUNT: Statement = Statement {
    name: "set_book_amount",
    cypher: "MATCH (author:Author)-[:WROTE]->(book:Book)
             WITH author, count(book) AS bookAmount
             SET author += {BookAmount: bookAmount}",
    params: &[],
    kind: TxKind::Write,
};

pub static SET_READER_AMOUNT: Statement = Statement {
    name: "set_reader_amount",
    cypher: "MATCH (author:Author)-[:WROTE]->(book:Book)<-[r:READ]-(reader:Reader)
             WITH author, count(reader) AS readerAmount
             SET author += {ReaderAmount: readerAmount}",
    params: &[],
    kind: TxKind::Write,
};

pub static SET_AVG_MARK_BOOKS: Statement = Statement {
    name: "set_avg_mark_books",
    cypher: "MATCH (author:Author)-[:WROTE]->(book:Book)<-[r:READ]-(reader:Reader)
             WITH author, sum(book.MeanMark)/author.BookAmount AS score
             SET author += {AvgMarkBook: score}
             RETURN author.name, author.surname, author.BookAmount, author.ReaderAmount, round(author.AvgMarkBook, 2) AS rate
             ORDER BY rate DESCENDING",
    params: &[],
    kind: TxKind::Write,
};

// ── Similarity pipeline (GDS, named projection `read_books`) ─────

pub static SIMILARITY_PROJECT: Statement = Statement {
    name: "similarity_project",
    cypher: "CALL gds.graph.project(
             'read_books',
             ['Reader', 'Book'],
             {
                 READ: {
                 orientation: 'UNDIRECTED',
                 properties: 'mark'
                 }
             }
             )",
    params: &[],
    kind: TxKind::Write,
};

pub static SIMILARITY_EMBED: Statement = Statement {
    name: "similarity_embed",
    cypher: "CALL gds.fastRP.mutate('read_books',
             {
                 embeddingDimension: 5,
                 randomSeed: 42,
                 mutateProperty: 'embedding',
                 relationshipWeightProperty: 'mark',
                 iterationWeights: [1, 1]
             }
             )
             YIELD nodePropertiesWritten",
    params: &[],
    kind: TxKind::Write,
};

pub static SIMILARITY_KNN_WRITE: Statement = Statement {
    name: "similarity_knn_write",
    cypher: "CALL gds.knn.write('read_books', {
                 topK: 2,
                 nodeProperties: ['embedding'],
                 randomSeed: 42,
                 concurrency: 1,
                 sampleRate: 1.0,
                 deltaThreshold: 0.0,
                 writeRelationshipType: \"SIMILAR\",
                 writeProperty: \"score\"
             })
             YIELD nodesCompared, relationshipsWritten, similarityDistribution
             RETURN nodesCompared, relationshipsWritten, similarityDistribution.mean as meanSimilarity",
    params: &[],
    kind: TxKind::Write,
};

pub static SIMILAR_PAIRS: Statement = Statement {
    name: "similar_pairs",
    cypher: "MATCH (n:Reader)-[r:SIMILAR]->(m:Reader)
             WHERE r.score > 0.8
             RETURN n.name, n.surname as reader1, m.name, m.surname as reader2, r.score as similarity
             ORDER BY similarity DESCENDING, reader1, reader2",
    params: &[],
    kind: TxKind::Read,
};

pub static RECOMMENDATIONS: Statement = Statement {
    name: "recommendations",
    cypher: "MATCH (n:Reader {name: $reader_name, surname: $reader_surname})-[r:SIMILAR]->(m:Reader)-[:READ]->(b:Book)
             WITH collect({name: b.name, score: r.score}) as BooksFromSimilarities
             UNWIND BooksFromSimilarities as RecommendedBooks
             RETURN RecommendedBooks.name as name, avg(RecommendedBooks.score) as score
             ORDER BY score DESCENDING
             LIMIT 5",
    params: &["reader_name", "reader_surname"],
    kind: TxKind::Read,
};

pub static SIMILARITY_DROP: Statement = Statement {
    name: "similarity_drop",
    cypher: "CALL gds.graph.drop('read_books') YIELD graphName",
    params: &[],
    kind: TxKind::Write,
};

/// The full catalog, for exhaustive contract tests.
pub static CATALOG: &[&Statement] = &[
    &CREATE_READER,
    &CREATE_AUTHOR,
    &CREATE_PUBLISHER,
    &CREATE_BOOK,
    &CREATE_READ_RELATION,
    &DELETE_READER,
    &AUTHOR_BOOKS,
    &CO_READ,
    &BOOKS_BY_YEAR_AND_CATEGORY,
    &TOP_RATED_BOOKS,
    &PUBLISHER_BOOK_COUNTS,
    &ASSIGN_LITERARY_PERIODS,
    &LITERARY_PERIOD_DESCRIPTIONS,
    &SET_BOOK_AMOUNT,
    &SET_READER_AMOUNT,
    &SET_AVG_MARK_BOOKS,
    &SIMILARITY_PROJECT,
    &SIMILARITY_EMBED,
    &SIMILARITY_KNN_WRITE,
    &SIMILAR_PAIRS,
    &RECOMMENDATIONS,
    &SIMILARITY_DROP,
];

/// The similarity pipeline steps, in dispatch order. The trailing drop runs
/// on every exit path once the projection exists.
pub static SIMILARITY_PIPELINE: &[&Statement] = &[
    &SIMILARITY_PROJECT,
    &SIMILARITY_EMBED,
    &SIMILARITY_KNN_WRITE,
    &SIMILAR_PAIRS,
    &RECOMMENDATIONS,
    &SIMILARITY_DROP,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Extract `$name` placeholders from Cypher text.
    ///
    /// None of the catalog statements embed a `$` inside a string literal,
    /// so a plain scan is sufficient.
    fn placeholders(cypher: &str) -> BTreeSet<&str> {
        let mut found = BTreeSet::new();
        let bytes = cypher.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len()
                    && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
                {
                    end += 1;
                }
                if end > start {
                    found.insert(&cypher[start..end]);
                }
                i = end;
            } else {
                i += 1;
            }
        }
        found
    }

    #[test]
    fn declared_params_match_placeholders_exactly() {
        for stmt in CATALOG {
            let declared: BTreeSet<&str> = stmt.params.iter().copied().collect();
            assert_eq!(
                declared.len(),
                stmt.params.len(),
                "duplicate declared parameter in `{}`",
                stmt.name
            );
            assert_eq!(
                placeholders(stmt.cypher),
                declared,
                "placeholder/declaration mismatch in `{}`",
                stmt.name
            );
        }
    }

    #[test]
    fn statement_names_are_unique() {
        let names: BTreeSet<&str> = CATALOG.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn transaction_kinds_follow_effect_policy() {
        // Every statement that writes (CREATE/MERGE/SET/DELETE or a GDS
        // project/mutate/write/drop call) must be declared Write.
        let write_markers = [
            "CREATE ",
            "CREATE(",
            "MERGE ",
            "SET ",
            "DETACH DELETE",
            "gds.graph.project",
            "gds.fastRP.mutate",
            "gds.knn.write",
            "gds.graph.drop",
        ];
        for stmt in CATALOG {
            let writes = write_markers.iter().any(|m| stmt.cypher.contains(m));
            match stmt.kind {
                TxKind::Write => assert!(
                    writes,
                    "`{}` is declared Write but contains no write clause",
                    stmt.name
                ),
                TxKind::Read => assert!(
                    !writes,
                    "`{}` is declared Read but contains a write clause",
                    stmt.name
                ),
            }
        }
    }

    #[test]
    fn read_statements_are_declared_read() {
        for name in [
            "author_books",
            "co_read",
            "books_by_year_and_category",
            "publisher_book_counts",
            "literary_period_descriptions",
            "similar_pairs",
            "recommendations",
        ] {
            let stmt = CATALOG.iter().find(|s| s.name == name).unwrap();
            assert_eq!(stmt.kind, TxKind::Read, "`{name}` should be Read");
        }
    }

    #[test]
    fn mutating_rankings_are_declared_write() {
        // These persist node properties as a side effect of ranking, so the
        // effect-based policy declares them Write.
        for name in ["top_rated_books", "assign_literary_periods"] {
            let stmt = CATALOG.iter().find(|s| s.name == name).unwrap();
            assert_eq!(stmt.kind, TxKind::Write, "`{name}` should be Write");
        }
    }

    #[test]
    fn similarity_pipeline_is_ordered_and_names_the_projection() {
        let names: Vec<&str> = SIMILARITY_PIPELINE.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "similarity_project",
                "similarity_embed",
                "similarity_knn_write",
                "similar_pairs",
                "recommendations",
                "similarity_drop",
            ]
        );
        // Every GDS step operates on the same named projection.
        for stmt in [
            &SIMILARITY_PROJECT,
            &SIMILARITY_EMBED,
            &SIMILARITY_KNN_WRITE,
            &SIMILARITY_DROP,
        ] {
            assert!(
                stmt.cypher.contains("'read_books'"),
                "`{}` must target the read_books projection",
                stmt.name
            );
        }
    }

    #[test]
    fn bind_accepts_exact_parameter_set() {
        let bound = bind(
            &CREATE_READER,
            vec![
                ("reader_name", Value::from("Jan")),
                ("reader_surname", Value::from("Kowalski")),
            ],
        )
        .unwrap();
        assert_eq!(bound.statement().name, "create_reader");
        assert_eq!(bound.params().len(), 2);
    }

    #[test]
    fn bind_rejects_missing_parameter() {
        let err = bind(&CREATE_READER, vec![("reader_name", Value::from("Jan"))]);
        assert!(matches!(err, Err(GraphError::Parameter(_))));
    }

    #[test]
    fn bind_rejects_extra_parameter() {
        let err = bind(
            &CREATE_PUBLISHER,
            vec![
                ("publisher_name", Value::from("PWN")),
                ("city", Value::from("Warszawa")),
            ],
        );
        assert!(matches!(err, Err(GraphError::Parameter(_))));
    }

    #[test]
    fn bind_rejects_duplicate_parameter() {
        let err = bind(
            &CREATE_READER,
            vec![
                ("reader_name", Value::from("Jan")),
                ("reader_name", Value::from("Adam")),
            ],
        );
        assert!(matches!(err, Err(GraphError::Parameter(_))));
    }
}
