mod error;
mod schema;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

pub(crate) use error::{DeleteOutcome, StoreError};

pub(crate) struct Database {
    conn: Connection,
}

const TRANSACTION_COLUMNS: &str = "t.id, t.kind, t.amount, t.category_id, t.description, \
     t.date, t.created_at, c.name, c.kind";

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        // Foreign keys stay unenforced; category references are checked in
        // application code on insert only.
        conn.execute_batch("PRAGMA foreign_keys=OFF; PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.init_schema().context("Database initialization failed")?;
        db.seed_default_categories()
            .context("Failed to seed default categories")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        // Match open(): keep FK references unenforced so app-level checks are
        // the single source of truth, regardless of the sqlite build default.
        conn.execute_batch("PRAGMA foreign_keys=OFF;")?;
        let mut db = Self { conn };
        db.init_schema()?;
        db.seed_default_categories()?;
        Ok(db)
    }

    fn init_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(schema::SCHEMA)?;
        Ok(())
    }

    fn seed_default_categories(&mut self) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        let now = Utc::now().to_rfc3339();
        for (name, kind) in schema::DEFAULT_CATEGORIES {
            tx.execute(
                "INSERT OR IGNORE INTO categories (name, kind, created_at) VALUES (?1, ?2, ?3)",
                params![name, kind.as_str(), now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    /// All categories, or only those of one kind. Filtered results are
    /// ordered by name; the full listing groups by kind first.
    pub(crate) fn get_categories(&self, kind: Option<Kind>) -> Result<Vec<Category>, StoreError> {
        if let Some(k) = kind {
            let mut stmt = self.conn.prepare(
                "SELECT id, name, kind, created_at FROM categories WHERE kind = ?1 ORDER BY name",
            )?;
            let rows = stmt.query_map(params![k.as_str()], map_category_row)?;
            Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
        } else {
            let mut stmt = self.conn.prepare(
                "SELECT id, name, kind, created_at FROM categories ORDER BY kind, name",
            )?;
            let rows = stmt.query_map([], map_category_row)?;
            Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
        }
    }

    pub(crate) fn get_category_by_id(&self, id: i64) -> Result<Option<Category>, StoreError> {
        let result = self.conn.query_row(
            "SELECT id, name, kind, created_at FROM categories WHERE id = ?1",
            params![id],
            map_category_row,
        );
        match result {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Exact-match (case-sensitive) name lookup.
    pub(crate) fn get_category_id_by_name(&self, name: &str) -> Result<Option<i64>, StoreError> {
        let result = self.conn.query_row(
            "SELECT id FROM categories WHERE name = ?1",
            params![name],
            |row| row.get(0),
        );
        match result {
            Ok(id) => Ok(Some(id)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Name uniqueness is global across both kinds.
    pub(crate) fn insert_category(&self, name: &str, kind: Kind) -> Result<i64, StoreError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE name = ?1)",
            params![name],
            |row| row.get(0),
        )?;
        if exists {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        self.conn.execute(
            "INSERT INTO categories (name, kind, created_at) VALUES (?1, ?2, ?3)",
            params![name, kind.as_str(), Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Restrict-on-delete: a category with transactions stays put.
    pub(crate) fn delete_category(&self, id: i64) -> Result<DeleteOutcome, StoreError> {
        let references: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE category_id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        if references > 0 {
            return Ok(DeleteOutcome::Blocked);
        }
        let deleted = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        if deleted == 0 {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }

    // ── Transactions ──────────────────────────────────────────

    /// Zero amounts are accepted here; rejecting them is the input layer's
    /// job. The transaction's kind is not checked against the category's.
    pub(crate) fn insert_transaction(
        &self,
        kind: Kind,
        amount: Decimal,
        category_id: i64,
        description: Option<&str>,
        date: &str,
    ) -> Result<i64, StoreError> {
        if amount < Decimal::ZERO {
            return Err(StoreError::NegativeAmount);
        }
        let known: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)",
            params![category_id],
            |row| row.get(0),
        )?;
        if !known {
            return Err(StoreError::UnknownCategory(category_id));
        }
        self.conn.execute(
            "INSERT INTO transactions (kind, amount, category_id, description, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                kind.as_str(),
                amount.to_string(),
                category_id,
                description,
                date,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent transactions first, each joined with its category.
    pub(crate) fn get_transactions(
        &self,
        kind: Option<Kind>,
        limit: u32,
    ) -> Result<Vec<TransactionWithCategory>, StoreError> {
        let mut sql = format!(
            "SELECT {TRANSACTION_COLUMNS}
             FROM transactions t
             JOIN categories c ON t.category_id = c.id"
        );
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(k) = kind {
            sql.push_str(&format!(" WHERE t.kind = ?{}", param_values.len() + 1));
            param_values.push(Box::new(k.as_str()));
        }

        sql.push_str(" ORDER BY t.date DESC, t.created_at DESC, t.id DESC");
        sql.push_str(&format!(" LIMIT {limit}"));

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_ref.as_slice(), map_transaction_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction_by_id(
        &self,
        id: i64,
    ) -> Result<Option<TransactionWithCategory>, StoreError> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS}
             FROM transactions t
             JOIN categories c ON t.category_id = c.id
             WHERE t.id = ?1"
        );
        let result = self
            .conn
            .query_row(&sql, params![id], map_transaction_row);
        match result {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrites the four mutable fields. The category id is not
    /// re-validated here; callers are expected to pass an existing one.
    pub(crate) fn update_transaction(
        &self,
        id: i64,
        amount: Decimal,
        category_id: i64,
        description: Option<&str>,
        date: &str,
    ) -> Result<bool, StoreError> {
        let updated = self.conn.execute(
            "UPDATE transactions
             SET amount = ?1, category_id = ?2, description = ?3, date = ?4
             WHERE id = ?5",
            params![amount.to_string(), category_id, description, date, id],
        )?;
        Ok(updated > 0)
    }

    pub(crate) fn delete_transaction(&self, id: i64) -> Result<DeleteOutcome, StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if deleted == 0 {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }

    /// Inclusive bounds; "YYYY-MM-DD" strings compare chronologically.
    pub(crate) fn get_transactions_by_date_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<TransactionWithCategory>, StoreError> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS}
             FROM transactions t
             JOIN categories c ON t.category_id = c.id
             WHERE t.date BETWEEN ?1 AND ?2
             ORDER BY t.date DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![start_date, end_date], map_transaction_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_all_transactions_for_export(
        &self,
    ) -> Result<Vec<TransactionWithCategory>, StoreError> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS}
             FROM transactions t
             JOIN categories c ON t.category_id = c.id
             ORDER BY t.date DESC, t.created_at DESC, t.id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], map_transaction_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Reports ───────────────────────────────────────────────

    /// Overall totals plus per-category sums. Categories with no
    /// transactions are absent; income categories come first, larger sums
    /// before smaller ones.
    pub(crate) fn get_balance_summary(&self) -> Result<BalanceSummary, StoreError> {
        let (income_str, expense_str): (String, String) = self.conn.query_row(
            "SELECT
                CAST(COALESCE(SUM(CASE WHEN kind = 'income' THEN amount ELSE 0 END), 0) AS TEXT),
                CAST(COALESCE(SUM(CASE WHEN kind = 'expense' THEN amount ELSE 0 END), 0) AS TEXT)
             FROM transactions",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let total_income = Decimal::from_str(&income_str).unwrap_or_default();
        let total_expense = Decimal::from_str(&expense_str).unwrap_or_default();

        let mut stmt = self.conn.prepare(
            "SELECT c.kind, c.name, CAST(SUM(t.amount) AS TEXT)
             FROM transactions t
             JOIN categories c ON t.category_id = c.id
             GROUP BY c.kind, c.id
             ORDER BY c.kind DESC, SUM(t.amount) DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let kind_str: String = row.get(0)?;
            let total_str: String = row.get(2)?;
            Ok(CategoryTotal {
                kind: Kind::parse(&kind_str).unwrap_or(Kind::Expense),
                name: row.get(1)?,
                total: Decimal::from_str(&total_str).unwrap_or_default(),
            })
        })?;
        let by_category = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(BalanceSummary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
            by_category,
        })
    }
}

// ── Row mapping ───────────────────────────────────────────────

fn map_category_row(row: &rusqlite::Row) -> rusqlite::Result<Category> {
    let kind_str: String = row.get(2)?;
    Ok(Category {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        kind: Kind::parse(&kind_str).unwrap_or(Kind::Expense),
        created_at: row.get(3)?,
    })
}

fn map_transaction_row(row: &rusqlite::Row) -> rusqlite::Result<TransactionWithCategory> {
    let kind_str: String = row.get(1)?;
    let amount_str: String = row.get(2)?;
    let category_kind_str: String = row.get(8)?;
    Ok(TransactionWithCategory {
        transaction: Transaction {
            id: Some(row.get(0)?),
            kind: Kind::parse(&kind_str).unwrap_or(Kind::Expense),
            amount: Decimal::from_str(&amount_str).unwrap_or_default(),
            category_id: row.get(3)?,
            description: row.get(4)?,
            date: row.get(5)?,
            created_at: row.get(6)?,
        },
        category_name: row.get(7)?,
        category_kind: Kind::parse(&category_kind_str).unwrap_or(Kind::Expense),
    })
}
