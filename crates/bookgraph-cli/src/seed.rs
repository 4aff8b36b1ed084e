//! The demonstration dataset: Polish-library authors, publishers, books,
//! readers, and READ ratings.

use bookgraph::{GraphClient, GraphError};

pub const AUTHORS: &[(&str, &str)] = &[
    ("Lucy", "Montgomery"),
    ("Magdalena", "Witkiewicz"),
    ("John", "Steinbeck"),
    ("J.R.R.", "Tolkien"),
    ("J.D.", "Salinger"),
    ("J.K.", "Rowling"),
    ("Stephen", "King"),
    ("Graham", "Masterton"),
    ("Karol", "Dickens"),
    ("Paulo", "Coelho"),
    ("Antoine", "Saint-Exupéry"),
];

pub const PUBLISHERS: &[&str] = &["PWN", "Sowa", "Gordon", "Radkom"];

/// (title, year, category, author name, author surname, publisher)
pub const BOOKS: &[(&str, i64, &str, &str, &str, &str)] = &[
    ("Ania z Zielonego wzgórza", 1908, "obyczajowe", "Lucy", "Montgomery", "PWN"),
    ("Ania z Avonlea", 1909, "obyczajowe", "Lucy", "Montgomery", "PWN"),
    ("Dziewczę z sadu", 1910, "obyczajowe", "Lucy", "Montgomery", "PWN"),
    ("Historynka", 1911, "obyczajowe", "Lucy", "Montgomery", "PWN"),
    ("Złocista droga", 1913, "obyczajowe", "Lucy", "Montgomery", "PWN"),
    ("Ania na Uniwersytecie", 1915, "obyczajowe", "Lucy", "Montgomery", "PWN"),
    ("Władca Pierścieni. Drużyna Pierścienia", 1954, "fantasy", "J.R.R.", "Tolkien", "Sowa"),
    ("Władca Pierścieni. Dwie wieże", 1954, "fantasy", "J.R.R.", "Tolkien", "Sowa"),
    ("Władca Pierścieni. Powrót króla", 1955, "fantasy", "J.R.R.", "Tolkien", "Sowa"),
    ("Hobbit, czyli tam i z powrotem", 1937, "fantasy", "J.R.R.", "Tolkien", "Sowa"),
    ("Buszujący w zbożu", 1951, "realizm", "J.D.", "Salinger", "Gordon"),
    ("Dziewięć opowiadań", 1953, "realizm", "J.D.", "Salinger", "Gordon"),
    ("Harry Potter i kamień Filozoficzny", 1997, "fantasy", "J.K.", "Rowling", "PWN"),
    ("Harry Potter i Komnata Tajemnic", 1998, "fantasy", "J.K.", "Rowling", "PWN"),
    ("Harry Potter i więzień Azkabanu", 1999, "fantasy", "J.K.", "Rowling", "PWN"),
    ("Harry Potter i Czara Ognia", 2000, "fantasy", "J.K.", "Rowling", "PWN"),
    ("Harry Potter i Zakon Feniksa", 2003, "fantasy", "J.K.", "Rowling", "PWN"),
    ("Harry Potter i Książę Półkrwi", 2005, "fantasy", "J.K.", "Rowling", "PWN"),
    ("Harry Potter i Insygnia Śmierci", 2007, "fantasy", "J.K.", "Rowling", "PWN"),
    ("Carrie", 1974, "horror", "Stephen", "King", "Gordon"),
    ("Lśnienie", 1977, "horror", "Stephen", "King", "Gordon"),
    ("Miasteczko Salem", 1975, "horror", "Stephen", "King", "Gordon"),
    ("Martwa strefa", 1979, "horror", "Stephen", "King", "Gordon"),
    ("Wyklęty", 1983, "horror", "Graham", "Masterton", "Gordon"),
    ("Opowieść o dwóch miastach", 1859, "historyczna", "Karol", "Dickens", "Gordon"),
    ("Alchemik", 1943, "powiastka filozoficzna", "Paulo", "Coelho", "Radkom"),
    ("Mały Książę", 1943, "powiastka filozoficzna", "Antoine", "Saint-Exupéry", "Radkom"),
    ("Córka generała", 2022, "obyczajowe", "Magdalena", "Witkiewicz", "Sowa"),
    ("Ulica Nadbrzezna", 1972, "obyczajowe", "John", "Steinbeck", "Sowa"),
];

pub const READERS: &[(&str, &str)] = &[
    ("Jan", "Kowalski"),
    ("Karolina", "Piasecka"),
    ("Natalia", "Krawczyk"),
    ("Krystian", "Tomczyk"),
    ("Janina", "Stolarek"),
    ("Jakub", "Kawka"),
    ("Jan", "Kownacki"),
    ("Alicja", "Antecka"),
    ("Julia", "Kamyk"),
    ("Kryspin", "Nowak"),
    ("Grzegorz", "Zwierzyński"),
];

/// (reader name, reader surname, mark, book title)
pub const RATINGS: &[(&str, &str, f64, &str)] = &[
    ("Jan", "Kowalski", 9.0, "Ania z Zielonego wzgórza"),
    ("Karolina", "Piasecka", 9.5, "Ania z Zielonego wzgórza"),
    ("Natalia", "Krawczyk", 7.0, "Ania z Zielonego wzgórza"),
    ("Julia", "Kamyk", 8.5, "Ania z Zielonego wzgórza"),
    ("Karolina", "Piasecka", 6.0, "Ania z Avonlea"),
    ("Karolina", "Piasecka", 7.0, "Ania na Uniwersytecie"),
    ("Julia", "Kamyk", 10.0, "Ania z Avonlea"),
    ("Julia", "Kamyk", 5.0, "Ania na Uniwersytecie"),
    ("Karolina", "Piasecka", 9.5, "Buszujący w zbożu"),
    ("Natalia", "Krawczyk", 8.0, "Buszujący w zbożu"),
    ("Grzegorz", "Zwierzyński", 8.0, "Harry Potter i kamień Filozoficzny"),
    ("Grzegorz", "Zwierzyński", 8.0, "Harry Potter i Komnata Tajemnic"),
    ("Julia", "Kamyk", 6.5, "Harry Potter i kamień Filozoficzny"),
    ("Julia", "Kamyk", 8.5, "Harry Potter i Komnata Tajemnic"),
    ("Julia", "Kamyk", 7.5, "Harry Potter i więzień Azkabanu"),
    ("Julia", "Kamyk", 8.5, "Harry Potter i Czara Ognia"),
    ("Julia", "Kamyk", 5.5, "Opowieść o dwóch miastach"),
    ("Jan", "Kownacki", 6.5, "Opowieść o dwóch miastach"),
    ("Jan", "Kownacki", 8.5, "Mały Książę"),
    ("Jan", "Kownacki", 6.5, "Alchemik"),
    ("Alicja", "Antecka", 8.5, "Lśnienie"),
    ("Alicja", "Antecka", 7.5, "Carrie"),
    ("Jakub", "Kawka", 8.5, "Carrie"),
    ("Jakub", "Kawka", 6.5, "Alchemik"),
    ("Kryspin", "Nowak", 5.0, "Opowieść o dwóch miastach"),
    ("Kryspin", "Nowak", 7.5, "Buszujący w zbożu"),
    ("Karolina", "Piasecka", 9.5, "Córka generała"),
    ("Karolina", "Piasecka", 5.5, "Ulica Nadbrzezna"),
];

/// Load the full demonstration dataset. Creation order matters: authors and
/// publishers before books, readers before ratings.
pub async fn seed(client: &GraphClient) -> Result<(), GraphError> {
    for (name, surname) in AUTHORS {
        client.create_author(name, surname).await?;
    }
    for name in PUBLISHERS {
        client.create_publisher(name).await?;
    }
    for (title, year, category, author_name, author_surname, publisher) in BOOKS {
        client
            .create_book(title, *year, category, author_name, author_surname, publisher)
            .await?;
    }
    for (name, surname) in READERS {
        client.create_reader(name, surname).await?;
    }
    for (name, surname, mark, title) in RATINGS {
        client.rate_book(name, surname, *mark, title).await?;
    }

    tracing::info!(
        authors = AUTHORS.len(),
        publishers = PUBLISHERS.len(),
        books = BOOKS.len(),
        readers = READERS.len(),
        ratings = RATINGS.len(),
        "Seeded demonstration dataset"
    );
    Ok(())
}
