//! Migration v1: initial schema
//!
//! Asset urls are unique per game, not globally.

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS creators (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    version TEXT NOT NULL,
    creator_id INTEGER NOT NULL REFERENCES creators(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS covers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES games(id),
    url TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE(game_id, url)
);

CREATE TABLE IF NOT EXISTS previews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES games(id),
    url TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE(game_id, url)
);

CREATE TABLE IF NOT EXISTS game_tags (
    game_id INTEGER NOT NULL REFERENCES games(id),
    tag_id INTEGER NOT NULL,
    PRIMARY KEY (game_id, tag_id)
);

CREATE TABLE IF NOT EXISTS game_prefixes (
    game_id INTEGER NOT NULL REFERENCES games(id),
    prefix_id INTEGER NOT NULL,
    PRIMARY KEY (game_id, prefix_id)
);
";
