//! Database schema and migrations for tutorlink.
//!
//! Migrations are applied in order the first time a database is opened
//! or when it is upgraded.

/// Database migrations.
///
/// Each entry is one SQL script. `schema_version` records which have run.
pub const MIGRATIONS: &[&str] = &[
    // v1: student accounts
    r#"
CREATE TABLE students (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    username        TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash   TEXT NOT NULL,           -- Argon2id PHC string
    salt            TEXT NOT NULL,           -- B64 salt used for password_hash
    name            TEXT,
    age             INTEGER,
    class_year      INTEGER,
    major           TEXT,
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: tutor accounts
    r#"
CREATE TABLE tutors (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    username            TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash       TEXT NOT NULL,
    salt                TEXT NOT NULL,
    name                TEXT,
    age                 INTEGER,
    area_of_expertise   TEXT,
    cost                INTEGER,
    created_at          TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v3: hiring relations
    //
    // No foreign keys: accounts are referenced by id only and deleting an
    // account leaves its relations dangling.
    r#"
CREATE TABLE hiring_relations (
    student_id  INTEGER NOT NULL,
    tutor_id    INTEGER NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (student_id, tutor_id)
);

CREATE INDEX idx_hiring_relations_tutor_id ON hiring_relations(tutor_id);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_account_tables_have_credential_columns() {
        for (migration, table) in [(MIGRATIONS[0], "students"), (MIGRATIONS[1], "tutors")] {
            assert!(migration.contains(&format!("CREATE TABLE {table}")));
            assert!(migration.contains("UNIQUE COLLATE NOCASE"));
            assert!(migration.contains("password_hash"));
            assert!(migration.contains("salt"));
        }
    }

    #[test]
    fn test_relation_table_is_keyed_by_pair() {
        let relations = MIGRATIONS[2];
        assert!(relations.contains("CREATE TABLE hiring_relations"));
        assert!(relations.contains("PRIMARY KEY (student_id, tutor_id)"));
        assert!(!relations.contains("REFERENCES"));
    }
}
