#![cfg(feature = "sqlite")]

use sql_tables::prelude::*;
use tempfile::tempdir;

async fn memory_db(tables: &[&str]) -> Result<Db, SqlTablesError> {
    let options = ConnectionOptions::builder()
        .backend(DatabaseType::Sqlite)
        .database(":memory:")
        .tables(tables.iter().copied())
        .debug(true)
        .finish();
    let db = Db::connect(options).await?;
    db.query(
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, age INTEGER)",
        &[],
    )
    .await?;
    Ok(db)
}

#[tokio::test]
async fn crud_round_trip_on_sqlite() -> Result<(), SqlTablesError> {
    let db = memory_db(&["users"]).await?;
    let users = db.get_table("users").expect("pre-bound");

    let alice = users
        .insert(&Record::new().with("name", "alice").with("age", 30))
        .await?;
    let bob = users
        .save(&Record::new().with("name", "bob").with("age", 30))
        .await?;
    assert_eq!(alice, RowValues::Int(1));
    assert_eq!(bob, RowValues::Int(2));

    let thirty = users.find(Some(&Record::new().with("age", 30))).await?;
    assert_eq!(thirty.len(), 2);

    let updated = users
        .save(&Record::new().with("id", bob.clone()).with("age", 31))
        .await?;
    assert_eq!(updated, bob);

    let row = users
        .find_one(Some(&Record::new().with("name", "bob").with("age", 31)))
        .await?
        .expect("bob after update");
    assert_eq!(row.get("id"), Some(&RowValues::Int(2)));

    assert!(
        users
            .find_one(Some(&Record::new().with("name", "nobody")))
            .await?
            .is_none()
    );
    Ok(())
}

#[tokio::test]
async fn insert_returns_explicit_negative_ids() -> Result<(), SqlTablesError> {
    let db = memory_db(&[]).await?;
    db.query("CREATE TABLE kv (id INTEGER PRIMARY KEY, v TEXT)", &[])
        .await?;

    let id = db
        .table("kv")
        .insert(&Record::new().with("id", -5).with("v", "x"))
        .await?;
    assert_eq!(id, RowValues::Int(-5));
    Ok(())
}

#[tokio::test]
async fn fetched_rows_can_be_saved_back() -> Result<(), SqlTablesError> {
    let db = memory_db(&[]).await?;
    let users = db.table("users");
    users
        .insert(&Record::new().with("name", "carol").with("age", 40))
        .await?;

    let mut carol = users
        .find_one(None)
        .await?
        .expect("one row")
        .to_record();
    carol.set("age", 41);
    users.save(&carol).await?;

    let rows = users.find(None).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("age"), Some(&RowValues::Int(41)));
    Ok(())
}

#[tokio::test]
async fn constraint_violations_surface_as_sqlite_errors() -> Result<(), SqlTablesError> {
    let db = memory_db(&[]).await?;
    let users = db.table("users");

    // name is NOT NULL
    let err = users
        .insert(&Record::new().with("age", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, SqlTablesError::SqliteError(_)), "{err:?}");

    // empty records produce SQL the database rejects
    let err = users.insert(&Record::new()).await.unwrap_err();
    assert!(matches!(err, SqlTablesError::SqliteError(_)), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn truncate_is_rejected_by_sqlite() -> Result<(), SqlTablesError> {
    let db = memory_db(&[]).await?;

    let err = db.table("users").truncate().await.unwrap_err();
    assert!(matches!(err, SqlTablesError::SqliteError(_)), "{err:?}");

    // the connection is still usable afterwards
    assert!(db.table("users").find(None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn file_database_persists_between_connections() -> Result<(), SqlTablesError> {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tables.db").to_string_lossy().into_owned();

    {
        let db = Db::connect(ConnectionOptions::sqlite(path.clone())).await?;
        db.query("CREATE TABLE kv (id INTEGER PRIMARY KEY, v TEXT)", &[])
            .await?;
        db.table("kv").insert(&Record::new().with("v", "kept")).await?;
    }

    let db = Db::connect(ConnectionOptions::sqlite(path)).await?;
    let row = db.table("kv").find_one(None).await?.expect("row survived");
    assert_eq!(row.get("v"), Some(&RowValues::Text("kept".into())));
    Ok(())
}

#[tokio::test]
async fn missing_database_path_is_a_config_error() {
    let options = ConnectionOptions::builder()
        .backend(DatabaseType::Sqlite)
        .finish();
    let err = Db::connect(options).await.unwrap_err();
    assert!(matches!(err, SqlTablesError::ConfigError(_)));
}
