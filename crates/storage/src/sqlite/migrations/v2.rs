//! Migration v2: indexes backing newest-first pages and category filters

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_events_datetime ON events(datetime DESC);
CREATE INDEX IF NOT EXISTS idx_events_category ON events(category);
";
