use crate::models::Kind;

pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL UNIQUE,
    kind       TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    kind        TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
    amount      TEXT NOT NULL,
    category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE RESTRICT,
    description TEXT,
    date        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category_id);
"#;

/// Seeded on every open with insert-if-absent semantics.
pub(crate) const DEFAULT_CATEGORIES: &[(&str, Kind)] = &[
    ("Gaji", Kind::Income),
    ("Investasi", Kind::Income),
    ("Hadiah", Kind::Income),
    ("Makanan", Kind::Expense),
    ("Transportasi", Kind::Expense),
    ("Hiburan", Kind::Expense),
    ("Tagihan", Kind::Expense),
];
