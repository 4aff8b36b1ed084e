//! Write operations: node and edge creation, reader deletion.
//!
//! Each operation binds caller arguments by name to its catalog statement and
//! executes it as a single unit of work. Identity of Reader/Author is the
//! (name, surname) pair; no uniqueness constraint is enforced here, so
//! repeated creation duplicates nodes unless the store has a constraint.

use crate::catalog::{
    bind, BoundStatement, Value, CREATE_AUTHOR, CREATE_BOOK, CREATE_PUBLISHER,
    CREATE_READER, CREATE_READ_RELATION, DELETE_READER,
};
use crate::client::{GraphClient, GraphError};

impl GraphClient {
    /// Create a Reader node.
    pub async fn create_reader(&self, name: &str, surname: &str) -> Result<(), GraphError> {
        self.execute(create_reader_stmt(name, surname)?).await?;
        Ok(())
    }

    /// Create an Author node.
    pub async fn create_author(&self, name: &str, surname: &str) -> Result<(), GraphError> {
        self.execute(create_author_stmt(name, surname)?).await?;
        Ok(())
    }

    /// Create a Publisher node.
    pub async fn create_publisher(&self, name: &str) -> Result<(), GraphError> {
        self.execute(create_publisher_stmt(name)?).await?;
        Ok(())
    }

    /// Create a Book node wired to its existing Author (WROTE) and
    /// Publisher (PUBLISH). Nothing is created if either match fails.
    pub async fn create_book(
        &self,
        name: &str,
        years: i64,
        category: &str,
        author_name: &str,
        author_surname: &str,
        publisher_name: &str,
    ) -> Result<(), GraphError> {
        self.execute(create_book_stmt(
            name,
            years,
            category,
            author_name,
            author_surname,
            publisher_name,
        )?)
        .await?;
        Ok(())
    }

    /// MERGE a READ relationship from a Reader to a Book, weighted by `mark`.
    pub async fn rate_book(
        &self,
        person_name: &str,
        person_surname: &str,
        mark: f64,
        book_name: &str,
    ) -> Result<(), GraphError> {
        self.execute(rate_book_stmt(person_name, person_surname, mark, book_name)?)
            .await?;
        Ok(())
    }

    /// DETACH DELETE a Reader by (name, surname).
    pub async fn delete_reader(&self, name: &str, surname: &str) -> Result<(), GraphError> {
        self.execute(delete_reader_stmt(name, surname)?).await?;
        Ok(())
    }
}

fn create_reader_stmt(name: &str, surname: &str) -> Result<BoundStatement, GraphError> {
    bind(
        &CREATE_READER,
        vec![
            ("reader_name", Value::from(name)),
            ("reader_surname", Value::from(surname)),
        ],
    )
}

fn create_author_stmt(name: &str, surname: &str) -> Result<BoundStatement, GraphError> {
    bind(
        &CREATE_AUTHOR,
        vec![
            ("author_name", Value::from(name)),
            ("author_surname", Value::from(surname)),
        ],
    )
}

fn create_publisher_stmt(name: &str) -> Result<BoundStatement, GraphError> {
    bind(&CREATE_PUBLISHER, vec![("publisher_name", Value::from(name))])
}

fn create_book_stmt(
    name: &str,
    years: i64,
    category: &str,
    author_name: &str,
    author_surname: &str,
    publisher_name: &str,
) -> Result<BoundStatement, GraphError> {
    bind(
        &CREATE_BOOK,
        vec![
            ("book_name", Value::from(name)),
            ("book_years", Value::from(years)),
            ("book_category", Value::from(category)),
            ("author_name", Value::from(author_name)),
            ("author_surname", Value::from(author_surname)),
            ("publisher_name", Value::from(publisher_name)),
        ],
    )
}

fn rate_book_stmt(
    person_name: &str,
    person_surname: &str,
    mark: f64,
    book_name: &str,
) -> Result<BoundStatement, GraphError> {
    bind(
        &CREATE_READ_RELATION,
        vec![
            ("person_name", Value::from(person_name)),
            ("person_surname", Value::from(person_surname)),
            ("mark", Value::from(mark)),
            ("book_name", Value::from(book_name)),
        ],
    )
}

fn delete_reader_stmt(name: &str, surname: &str) -> Result<BoundStatement, GraphError> {
    bind(
        &DELETE_READER,
        vec![
            ("reader_name", Value::from(name)),
            ("reader_surname", Value::from(surname)),
        ],
    )
}
