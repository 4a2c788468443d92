use rusqlite::Connection;
use student_core::db::migrations::{apply_migrations, latest_version};
use student_core::db::{connect_db, connect_db_in_memory, verify_schema, DbError};
use student_core::{RecordStore, StoreError};

#[test]
fn apply_migrations_creates_students_table() {
    let mut conn = connect_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "students");
    verify_schema(&conn).unwrap();
}

#[test]
fn students_table_has_expected_columns() {
    let mut conn = connect_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();

    let mut stmt = conn
        .prepare("SELECT name, type, \"notnull\", pk FROM pragma_table_info('students');")
        .unwrap();
    let columns: Vec<(String, String, i64, i64)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        columns,
        vec![
            ("id".to_string(), "INTEGER".to_string(), 0, 1),
            ("name".to_string(), "TEXT".to_string(), 1, 0),
            ("address".to_string(), "TEXT".to_string(), 0, 0),
            ("faculty".to_string(), "TEXT".to_string(), 0, 0),
            ("email".to_string(), "TEXT".to_string(), 0, 0),
        ]
    );
}

#[test]
fn applying_migrations_twice_on_same_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");

    let mut first = connect_db(&path).unwrap();
    apply_migrations(&mut first).unwrap();
    first
        .execute("INSERT INTO students (id, name) VALUES (1, 'Kept');", [])
        .unwrap();
    drop(first);

    let mut second = connect_db(&path).unwrap();
    apply_migrations(&mut second).unwrap();
    assert_eq!(schema_version(&second), latest_version());

    let name: String = second
        .query_row("SELECT name FROM students WHERE id = 1;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(name, "Kept");
}

#[test]
fn connect_does_not_create_tables() {
    let conn = connect_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn), 0);

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let mut store = RecordStore::open(&path).unwrap();
    match store.initialize().unwrap_err() {
        StoreError::StorageUnavailable(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        }) => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn mismatched_existing_table_rolls_back_version_bump() {
    let mut conn = connect_db_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE students (id INTEGER PRIMARY KEY, pib TEXT NOT NULL);")
        .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(
        err,
        DbError::MissingRequiredColumn {
            table: "students",
            column: "name"
        }
    ));
    assert_eq!(schema_version(&conn), 0);
}

#[test]
fn up_to_date_database_is_rechecked() {
    let mut conn = connect_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    conn.execute_batch("DROP TABLE students;").unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(err, DbError::MissingRequiredTable("students")));
    assert_eq!(schema_version(&conn), latest_version());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
