use diesel::connection::SimpleConnection;

use lognest::db::{get_connection, run_migrations};

mod common;

#[test]
fn test_creates_and_migrates_db_file() {
    let test_db = common::TestDb::new("test_migrations.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_pending_migrations_are_idempotent() {
    let test_db = common::TestDb::new("test_idempotent.db");
    let pool = test_db.pool();
    let mut conn = get_connection(&pool).unwrap();

    assert_eq!(run_migrations(&mut conn, false).unwrap(), 0);
}

#[test]
fn test_fresh_migration_drops_existing_rows() {
    let test_db = common::TestDb::new("test_fresh.db");
    let pool = test_db.pool();
    let mut conn = get_connection(&pool).unwrap();

    conn.batch_execute("INSERT INTO tags (id, name) VALUES ('t-1', 'wood');")
        .unwrap();

    assert!(run_migrations(&mut conn, true).unwrap() > 0);

    let repo = test_db.repository();
    let page = lognest::repository::TagReader::list_tags(&repo, Default::default()).unwrap();
    assert_eq!(page.pagination.total_rows, 0);
}

#[test]
fn test_foreign_keys_are_enforced() {
    let test_db = common::TestDb::new("test_foreign_keys.db");
    let pool = test_db.pool();
    let mut conn = get_connection(&pool).unwrap();

    let result = conn.batch_execute(
        "INSERT INTO project_tags (project_id, tag_id) VALUES ('missing', 'missing');",
    );
    assert!(result.is_err());
}
