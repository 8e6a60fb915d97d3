//! SQL schema for the Quillt SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS identities (
    identity_id   TEXT PRIMARY KEY,
    display_name  TEXT NOT NULL,
    avatar        TEXT NOT NULL,
    handle        TEXT NOT NULL
);

-- Plans are never updated in place; they are created and deleted.
-- owner_id has no foreign key: plans may reference owners the directory
-- has not seen yet.
CREATE TABLE IF NOT EXISTS plans (
    plan_id       TEXT PRIMARY KEY,
    owner_id      TEXT NOT NULL,
    location      TEXT NOT NULL,
    start_date    TEXT NOT NULL,   -- YYYY-MM-DD
    end_date      TEXT NOT NULL,   -- YYYY-MM-DD
    description   TEXT,
    visibility    TEXT NOT NULL DEFAULT 'public',
    author_name   TEXT,
    author_avatar TEXT,
    author_handle TEXT
);

CREATE TABLE IF NOT EXISTS sessions (
    key           TEXT PRIMARY KEY,
    value         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS plans_start_idx ON plans(start_date);
CREATE INDEX IF NOT EXISTS plans_owner_idx ON plans(owner_id);

PRAGMA user_version = 1;
";
