//! CLI entry point for the bookgraph demonstration client.
//!
//! One subcommand per façade operation; the connection is opened once,
//! exactly one operation runs, and the pool is released when the process
//! exits. Failures propagate as a nonzero exit.

mod seed;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use bookgraph::{GraphClient, GraphConfig};

#[derive(Parser)]
#[command(name = "bookgraph")]
#[command(about = "Demonstration client for a Neo4j books/readers graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: bookgraph).
    #[arg(short, long, default_value = "bookgraph", global = true)]
    config: String,

    /// Print results as JSON instead of numbered listings.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create a Reader node.
    CreateReader { name: String, surname: String },
    /// Create an Author node.
    CreateAuthor { name: String, surname: String },
    /// Create a Publisher node.
    CreatePublisher { name: String },
    /// Create a Book wired to an existing author and publisher.
    CreateBook {
        name: String,
        years: i64,
        category: String,
        author_name: String,
        author_surname: String,
        publisher: String,
    },
    /// Record that a reader read a book, with a mark.
    Rate {
        name: String,
        surname: String,
        mark: f64,
        book: String,
    },
    /// Delete a Reader and all of its relationships.
    DeleteReader { name: String, surname: String },
    /// List all books by an author.
    AuthorBooks { name: String, surname: String },
    /// Books other readers of the given book also read.
    CoRead { book: String },
    /// Books of a category within an inclusive year range.
    FindBooks {
        since: i64,
        to: i64,
        category: String,
    },
    /// The three best-rated books (persists MeanMark).
    TopRated,
    /// Published-book counts per publisher.
    PublisherCounts,
    /// Classify books into literary periods (persists period).
    Periods,
    /// Describe each book's literary period.
    PeriodDescriptions,
    /// Rank authors by the mean mark of their books.
    BestAuthors,
    /// Run the FastRP/KNN similarity pipeline for one reader.
    Similar { name: String, surname: String },
    /// Load the demonstration dataset.
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let graph_config = load_graph_config(&cli.config);
    let client = GraphClient::connect(&graph_config).await?;

    match cli.command {
        Command::CreateReader { name, surname } => {
            client.create_reader(&name, &surname).await?;
        }
        Command::CreateAuthor { name, surname } => {
            client.create_author(&name, &surname).await?;
        }
        Command::CreatePublisher { name } => {
            client.create_publisher(&name).await?;
        }
        Command::CreateBook {
            name,
            years,
            category,
            author_name,
            author_surname,
            publisher,
        } => {
            client
                .create_book(&name, years, &category, &author_name, &author_surname, &publisher)
                .await?;
        }
        Command::Rate {
            name,
            surname,
            mark,
            book,
        } => {
            client.rate_book(&name, &surname, mark, &book).await?;
        }
        Command::DeleteReader { name, surname } => {
            client.delete_reader(&name, &surname).await?;
        }
        Command::AuthorBooks { name, surname } => {
            let titles = client.author_books(&name, &surname).await?;
            render(cli.json, &format!("{name} {surname} books:"), &titles, |t| t.clone());
        }
        Command::CoRead { book } => {
            let rows = client.co_read(&book).await?;
            render(cli.json, "Other users read also:", &rows, |r| {
                format!("{} ({})", r.title, r.occurrences)
            });
        }
        Command::FindBooks { since, to, category } => {
            let rows = client.books_by_year_and_category(since, to, &category).await?;
            render(cli.json, "Books you are looking for:", &rows, |r| {
                format!("{} ({})", r.title, r.year)
            });
        }
        Command::TopRated => {
            let rows = client.top_rated_books().await?;
            render(cli.json, "Books you are looking for:", &rows, |r| {
                format!("{} — mean mark {:.2}", r.title, r.mean_mark)
            });
        }
        Command::PublisherCounts => {
            let rows = client.publisher_book_counts().await?;
            render(cli.json, "Publishers:", &rows, |r| {
                format!("{}: {} books", r.publisher, r.books)
            });
        }
        Command::Periods => {
            let rows = client.assign_literary_periods().await?;
            render(cli.json, "Books and literary periods", &rows, |r| {
                format!("{} ({}) — {}", r.title, r.year, r.period)
            });
        }
        Command::PeriodDescriptions => {
            let rows = client.literary_period_descriptions().await?;
            render(cli.json, "Books and literary periods description", &rows, |r| {
                format!(
                    "{} ({}) — {}: {}",
                    r.title,
                    r.year,
                    r.period.as_deref().unwrap_or("?"),
                    r.description.as_deref().unwrap_or("")
                )
            });
        }
        Command::BestAuthors => {
            let rows = client.best_authors().await?;
            render(cli.json, "Best authors:", &rows, |r| {
                format!(
                    "{} {} — {} books, {} readers, rate {:.2}",
                    r.name, r.surname, r.book_amount, r.reader_amount, r.rate
                )
            });
        }
        Command::Similar { name, surname } => {
            let report = client.similar_readers(&name, &surname).await?;
            if cli.json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                println!("Mean similarity for the graph:");
                println!(
                    "compared {} nodes, wrote {} relationships, mean {:.4}",
                    report.knn.nodes_compared,
                    report.knn.relationships_written,
                    report.knn.mean_similarity
                );
                print_numbered("Similar readers:", &report.similar_pairs, |p| {
                    format!(
                        "{} {} ~ {} {} ({:.4})",
                        p.reader1_name, p.reader1_surname, p.reader2_name, p.reader2_surname,
                        p.similarity
                    )
                });
                print_numbered(
                    &format!("For {name} {surname} is recommended:"),
                    &report.recommendations,
                    |r| format!("{} ({:.4})", r.title, r.score),
                );
            }
        }
        Command::Seed => {
            seed::seed(&client).await?;
        }
    }

    Ok(())
}

/// Print rows as JSON or as the labeled 1-based listing.
fn render<T: Serialize>(json: bool, label: &str, rows: &[T], line: impl Fn(&T) -> String) {
    if json {
        match serde_json::to_string(rows) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("failed to serialize results: {e}"),
        }
    } else {
        print_numbered(label, rows, line);
    }
}

fn print_numbered<T>(label: &str, rows: &[T], line: impl Fn(&T) -> String) {
    println!("{label}");
    for (i, row) in rows.iter().enumerate() {
        println!("{}. {}", i + 1, line(row));
    }
}

fn load_graph_config(file_prefix: &str) -> GraphConfig {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("BOOKGRAPH")
                .separator("__")
                .try_parsing(true),
        )
        .build();

    match cfg {
        Ok(c) => GraphConfig {
            uri: c
                .get_string("neo4j.uri")
                .unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            user: c
                .get_string("neo4j.user")
                .unwrap_or_else(|_| "neo4j".to_string()),
            password: c
                .get_string("neo4j.password")
                .unwrap_or_else(|_| "mybase".to_string()),
            ..Default::default()
        },
        Err(_) => GraphConfig::default(),
    }
}
