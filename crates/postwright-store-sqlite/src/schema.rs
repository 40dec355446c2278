//! SQL schema for the Postwright SQLite store.
//!
//! Versioned through `PRAGMA user_version`; [`SCHEMA_VERSION`] is the newest
//! layout this crate writes.

pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per saved record. `id` is caller-supplied and deliberately not a
-- key: the store does not police uniqueness.
CREATE TABLE IF NOT EXISTS content (
    id          TEXT    NOT NULL,
    kind        TEXT    NOT NULL,   -- 'strategy' | 'post'
    prompt      TEXT    NOT NULL,
    content     TEXT    NOT NULL,
    rating      TEXT,               -- 'good' | 'bad' | NULL
    created_at  INTEGER NOT NULL    -- epoch milliseconds
);

CREATE INDEX IF NOT EXISTS content_id_idx ON content(id);

PRAGMA user_version = 1;
";
