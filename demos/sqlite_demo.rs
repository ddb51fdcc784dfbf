use sql_tables::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let db = ConnectionOptions::builder()
        .backend(DatabaseType::Sqlite)
        .database(":memory:")
        .table("books")
        .debug(true)
        .connect()
        .await?;

    db.query(
        "CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT NOT NULL, year INTEGER)",
        &[],
    )
    .await?;

    let books = db.get_table("books").ok_or("books not pre-bound")?;
    let id = books
        .save(&Record::new().with("title", "Dune").with("year", 1965))
        .await?;
    books
        .save(&Record::new().with("id", id.clone()).with("year", 1966))
        .await?;

    for row in books.find(None).await? {
        println!("{:?}", row.to_record());
    }

    if let Err(err) = books.truncate().await {
        println!("sqlite has no TRUNCATE: {err}");
    }
    Ok(())
}
