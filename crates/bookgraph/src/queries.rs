//! Read and analytic operations, with their typed result records.
//!
//! Rows come back as ordered column/value mappings; each operation decodes
//! them into a named record where the caller needs structure. Some column
//! names are bare expressions (`book.name`, `count(b)`) because those
//! statements return unaliased expressions; decoding uses the exact names.

use crate::catalog::{
    bind, Value, ASSIGN_LITERARY_PERIODS, AUTHOR_BOOKS, BOOKS_BY_YEAR_AND_CATEGORY, CO_READ,
    LITERARY_PERIOD_DESCRIPTIONS, PUBLISHER_BOOK_COUNTS, SET_AVG_MARK_BOOKS, SET_BOOK_AMOUNT,
    SET_READER_AMOUNT, TOP_RATED_BOOKS,
};
use crate::client::{GraphClient, GraphError};

/// A co-read result: a book other readers of the queried book also read.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CoRead {
    pub title: String,
    pub occurrences: i64,
}

/// A book matched by the year-range/category filter.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BookMatch {
    pub title: String,
    pub year: i64,
}

/// A book with its persisted mean READ mark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RatedBook {
    pub title: String,
    pub mean_mark: f64,
}

/// A publisher with its published-book count.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PublisherCount {
    pub publisher: String,
    pub books: i64,
}

/// A book classified into a literary period.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PeriodRow {
    pub title: String,
    pub year: i64,
    pub period: String,
}

/// A book with its period and the period's description.
///
/// The description is absent for books whose `period` property has not been
/// assigned yet (the APOC lookup falls through to an empty branch).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PeriodDescriptionRow {
    pub title: String,
    pub year: i64,
    pub period: Option<String>,
    pub description: Option<String>,
}

/// An author's persisted aggregates and final rating.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AuthorRating {
    pub name: String,
    pub surname: String,
    pub book_amount: i64,
    pub reader_amount: i64,
    pub rate: f64,
}

impl GraphClient {
    /// Titles of all books written by an author.
    pub async fn author_books(
        &self,
        author_name: &str,
        author_surname: &str,
    ) -> Result<Vec<String>, GraphError> {
        let rows = self
            .execute(bind(
                &AUTHOR_BOOKS,
                vec![
                    ("author_name", Value::from(author_name)),
                    ("author_surname", Value::from(author_surname)),
                ],
            )?)
            .await?;

        let mut titles = Vec::with_capacity(rows.len());
        for row in rows {
            titles.push(required::<String>(&row, "name")?);
        }
        Ok(titles)
    }

    /// "Other users read also": books co-read with the given one, by
    /// co-occurrence count descending. Rows with no co-read book (the
    /// OPTIONAL MATCH misses) are skipped.
    pub async fn co_read(&self, book_name: &str) -> Result<Vec<CoRead>, GraphError> {
        let rows = self
            .execute(bind(&CO_READ, vec![("book_name", Value::from(book_name))])?)
            .await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let title: Option<String> = required(&row, "title")?;
            let Some(title) = title else { continue };
            results.push(CoRead {
                title,
                occurrences: required(&row, "occurance")?,
            });
        }
        Ok(results)
    }

    /// Books of a category published within an inclusive year range,
    /// ordered by year.
    pub async fn books_by_year_and_category(
        &self,
        year_since: i64,
        year_to: i64,
        category: &str,
    ) -> Result<Vec<BookMatch>, GraphError> {
        let rows = self
            .execute(bind(
                &BOOKS_BY_YEAR_AND_CATEGORY,
                vec![
                    ("year_since_book_created", Value::from(year_since)),
                    ("year_to_book_created", Value::from(year_to)),
                    ("category", Value::from(category)),
                ],
            )?)
            .await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(BookMatch {
                title: required(&row, "title")?,
                year: required(&row, "year")?,
            });
        }
        Ok(results)
    }

    /// The three best-rated books by mean READ mark. Persists `MeanMark`
    /// onto each Book as a side effect, so it dispatches as a write.
    pub async fn top_rated_books(&self) -> Result<Vec<RatedBook>, GraphError> {
        let rows = self.execute(bind(&TOP_RATED_BOOKS, vec![])?).await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(RatedBook {
                title: required(&row, "book.name")?,
                mean_mark: required(&row, "mark")?,
            });
        }
        Ok(results)
    }

    /// Published-book counts per publisher.
    pub async fn publisher_book_counts(&self) -> Result<Vec<PublisherCount>, GraphError> {
        let rows = self.execute(bind(&PUBLISHER_BOOK_COUNTS, vec![])?).await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(PublisherCount {
                publisher: required(&row, "p1.name")?,
                books: required(&row, "count(b)")?,
            });
        }
        Ok(results)
    }

    /// Classify every Book into a literary period by publication year,
    /// persisting `period` onto the node, and return the classification.
    pub async fn assign_literary_periods(&self) -> Result<Vec<PeriodRow>, GraphError> {
        let rows = self.execute(bind(&ASSIGN_LITERARY_PERIODS, vec![])?).await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(PeriodRow {
                title: required(&row, "title")?,
                year: required(&row, "year")?,
                period: required(&row, "LiteraryPeriod")?,
            });
        }
        Ok(results)
    }

    /// Look up the description of each book's literary period.
    pub async fn literary_period_descriptions(
        &self,
    ) -> Result<Vec<PeriodDescriptionRow>, GraphError> {
        let rows = self
            .execute(bind(&LITERARY_PERIOD_DESCRIPTIONS, vec![])?)
            .await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(PeriodDescriptionRow {
                title: required(&row, "title")?,
                year: required(&row, "year")?,
                period: required(&row, "LiteraryPeriod")?,
                description: required(&row, "LiteraryPeriodDescription")?,
            });
        }
        Ok(results)
    }

    /// Rank authors by the mean persisted mark of their books.
    ///
    /// Three sequential write statements: persist `BookAmount`, then
    /// `ReaderAmount`, then `AvgMarkBook` with the final ranking. The steps
    /// share no transaction; a failure between them leaves earlier
    /// aggregates persisted.
    pub async fn best_authors(&self) -> Result<Vec<AuthorRating>, GraphError> {
        self.execute(bind(&SET_BOOK_AMOUNT, vec![])?).await?;
        self.execute(bind(&SET_READER_AMOUNT, vec![])?).await?;
        let rows = self.execute(bind(&SET_AVG_MARK_BOOKS, vec![])?).await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(AuthorRating {
                name: required(&row, "author.name")?,
                surname: required(&row, "author.surname")?,
                book_amount: required(&row, "author.BookAmount")?,
                reader_amount: required(&row, "author.ReaderAmount")?,
                rate: required(&row, "rate")?,
            });
        }
        Ok(results)
    }
}

/// Decode a named column from a row, mapping driver errors to
/// [`GraphError::Serialization`].
pub(crate) fn required<T>(row: &neo4rs::Row, column: &str) -> Result<T, GraphError>
where
    T: serde::de::DeserializeOwned,
{
    row.get::<T>(column).map_err(|e| {
        GraphError::Serialization(format!("failed to decode column `{column}`: {e}"))
    })
}
