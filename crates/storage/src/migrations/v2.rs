//! Migration v2: indexes for per-game facet lookups

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_games_creator ON games(creator_id);
CREATE INDEX IF NOT EXISTS idx_games_updated ON games(updated_at);
CREATE INDEX IF NOT EXISTS idx_covers_game ON covers(game_id, id);
CREATE INDEX IF NOT EXISTS idx_previews_game ON previews(game_id, id);
";
