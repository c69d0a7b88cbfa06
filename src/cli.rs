mod format;

use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::db::{Database, DeleteOutcome, StoreError};
use crate::models::{Kind, TransactionWithCategory};
use crate::validate::{validate_amount, validate_date};
use format::{format_amount, format_date};

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], db),
        "list" | "ls" => cli_list(&args[2..], db),
        "show" => cli_show(&args[2..], db),
        "edit" => cli_edit(&args[2..], db),
        "delete" | "rm" => cli_delete(&args[2..], db),
        "categories" => cli_categories(&args[2..], db),
        "add-category" => cli_add_category(&args[2..], db),
        "delete-category" => cli_delete_category(&args[2..], db),
        "summary" | "s" => cli_summary(db),
        "range" => cli_range(&args[2..], db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("kasku {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("Kasku — local-only income & expense ledger");
    println!();
    println!("Usage: kasku <command>");
    println!();
    println!("Commands:");
    println!("  add <income|expense> <amount> <category> [description]");
    println!("    --date <YYYY-MM-DD>         Transaction date (default: today)");
    println!("  list [income|expense]         List recent transactions");
    println!("    --limit <N>                 Maximum rows to show (default: 50)");
    println!("  show <id>                     Show one transaction");
    println!("  edit <id>                     Change a transaction's fields");
    println!("    --amount <N>  --category <name>  --desc <text>  --date <YYYY-MM-DD>");
    println!("  delete <id>                   Delete a transaction");
    println!("  categories [income|expense]   List categories");
    println!("  add-category <name> <income|expense>");
    println!("  delete-category <id>          Delete a category with no transactions");
    println!("  summary                       Balance and per-category breakdown");
    println!("  range <start> <end>           Transactions between two dates (inclusive)");
    println!("  export [path]                 Export all transactions to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

// ── Transactions ─────────────────────────────────────────────

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!(
            "Usage: kasku add <income|expense> <amount> <category> [description] [--date YYYY-MM-DD]"
        );
    }

    let kind = parse_kind(&args[0])?;
    let amount = validate_amount(&args[1]).ok_or_else(|| {
        anyhow::anyhow!("Invalid amount '{}': expected a positive number", args[1])
    })?;
    let category_id = resolve_category(db, &args[2])?;
    let description = args
        .get(3)
        .filter(|a| !a.starts_with('-'))
        .map(|s| s.as_str());

    let date = flag_value(args, "--date")
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
    if !validate_date(&date) {
        anyhow::bail!("Invalid date '{date}': expected YYYY-MM-DD");
    }

    let id = db.insert_transaction(kind, amount, category_id, description, &date)?;
    println!("Recorded {kind} of {} (id {id})", format_amount(amount));
    Ok(())
}

fn cli_list(args: &[String], db: &mut Database) -> Result<()> {
    let kind = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|s| parse_kind(s))
        .transpose()?;
    let limit: u32 = match flag_value(args, "--limit") {
        Some(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid --limit '{v}'"))?,
        None => 50,
    };

    let txns = db.get_transactions(kind, limit)?;
    if txns.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    print_transaction_table(&txns);

    let income: Decimal = txns
        .iter()
        .filter(|r| r.transaction.is_income())
        .map(|r| r.transaction.amount)
        .sum();
    let expense: Decimal = txns
        .iter()
        .filter(|r| r.transaction.is_expense())
        .map(|r| r.transaction.amount)
        .sum();
    println!("{}", "─".repeat(78));
    match kind {
        Some(Kind::Income) => println!("Total income: {}", format_amount(income)),
        Some(Kind::Expense) => println!("Total expense: {}", format_amount(expense)),
        None => println!(
            "Income: {}   Expense: {}   Net: {}",
            format_amount(income),
            format_amount(expense),
            format_amount(income - expense),
        ),
    }
    Ok(())
}

fn cli_show(args: &[String], db: &mut Database) -> Result<()> {
    let Some(arg) = args.first() else {
        anyhow::bail!("Usage: kasku show <id>");
    };
    let id = parse_id(arg)?;
    let Some(row) = db.get_transaction_by_id(id)? else {
        anyhow::bail!("No transaction with id {id}");
    };
    let t = &row.transaction;

    println!("Transaction {id}");
    println!("  Kind        : {}", t.kind);
    println!("  Date        : {}", format_date(&t.date));
    println!("  Category    : {} ({})", row.category_name, row.category_kind);
    println!("  Amount      : {}", format_amount(t.amount));
    println!("  Description : {}", t.description.as_deref().unwrap_or("-"));
    Ok(())
}

fn cli_edit(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!(
            "Usage: kasku edit <id> [--amount N] [--category <name>] [--desc <text>] [--date YYYY-MM-DD]"
        );
    }
    let id = parse_id(&args[0])?;
    let Some(current) = db.get_transaction_by_id(id)? else {
        anyhow::bail!("No transaction with id {id}");
    };
    let t = current.transaction;

    let amount = match flag_value(args, "--amount") {
        Some(v) => validate_amount(&v)
            .ok_or_else(|| anyhow::anyhow!("Invalid amount '{v}': expected a positive number"))?,
        None => t.amount,
    };
    let category_id = match flag_value(args, "--category") {
        Some(v) => resolve_category(db, &v)?,
        None => t.category_id,
    };
    let description = match flag_value(args, "--desc") {
        Some(v) => Some(v),
        None => t.description,
    };
    let date = match flag_value(args, "--date") {
        Some(v) => {
            if !validate_date(&v) {
                anyhow::bail!("Invalid date '{v}': expected YYYY-MM-DD");
            }
            v
        }
        None => t.date,
    };

    if db.update_transaction(id, amount, category_id, description.as_deref(), &date)? {
        println!("Updated transaction {id}");
    }
    Ok(())
}

fn cli_delete(args: &[String], db: &mut Database) -> Result<()> {
    let Some(arg) = args.first() else {
        anyhow::bail!("Usage: kasku delete <id>");
    };
    let id = parse_id(arg)?;
    match db.delete_transaction(id)? {
        DeleteOutcome::Deleted => {
            println!("Deleted transaction {id}");
            Ok(())
        }
        DeleteOutcome::NotFound => anyhow::bail!("No transaction with id {id}"),
        DeleteOutcome::Blocked => anyhow::bail!("Transaction {id} could not be deleted"),
    }
}

fn cli_range(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: kasku range <start> <end>  (dates as YYYY-MM-DD)");
    }
    for date in &args[..2] {
        if !validate_date(date) {
            anyhow::bail!("Invalid date '{date}': expected YYYY-MM-DD");
        }
    }

    let txns = db.get_transactions_by_date_range(&args[0], &args[1])?;
    if txns.is_empty() {
        println!("No transactions between {} and {}", args[0], args[1]);
        return Ok(());
    }
    print_transaction_table(&txns);
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/kasku-export.csv")
        });

    let rows = db.get_all_transactions_for_export()?;
    if rows.is_empty() {
        println!("No transactions to export");
        return Ok(());
    }

    let mut wtr = csv::Writer::from_path(&output_path)
        .with_context(|| format!("Failed to create {output_path}"))?;
    wtr.write_record(["id", "kind", "date", "category", "amount", "description", "created_at"])?;
    for row in &rows {
        let t = &row.transaction;
        wtr.write_record([
            t.id.unwrap_or(0).to_string(),
            t.kind.as_str().to_string(),
            t.date.clone(),
            row.category_name.clone(),
            t.amount.to_string(),
            t.description.clone().unwrap_or_default(),
            t.created_at.clone(),
        ])?;
    }
    wtr.flush()?;
    println!("Exported {} transactions to {output_path}", rows.len());
    Ok(())
}

// ── Categories ───────────────────────────────────────────────

fn cli_categories(args: &[String], db: &mut Database) -> Result<()> {
    let kind = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|s| parse_kind(s))
        .transpose()?;

    let cats = db.get_categories(kind)?;
    if cats.is_empty() {
        println!("No categories");
        return Ok(());
    }

    println!("{:<5} {:<8} Name", "ID", "Kind");
    println!("{}", "─".repeat(32));
    for cat in &cats {
        println!("{:<5} {:<8} {}", cat.id.unwrap_or(0), cat.kind, cat.name);
    }
    Ok(())
}

fn cli_add_category(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: kasku add-category <name> <income|expense>");
    }
    let name = args[0].trim();
    if name.is_empty() {
        anyhow::bail!("Category name must not be empty");
    }
    let kind = parse_kind(&args[1])?;

    match db.insert_category(name, kind) {
        Ok(id) => {
            println!("Added category '{name}' ({kind}) with id {id}");
            Ok(())
        }
        Err(StoreError::DuplicateName(_)) => {
            anyhow::bail!("A category named '{name}' already exists")
        }
        Err(e) => Err(e.into()),
    }
}

fn cli_delete_category(args: &[String], db: &mut Database) -> Result<()> {
    let Some(arg) = args.first() else {
        anyhow::bail!("Usage: kasku delete-category <id>");
    };
    let id = parse_id(arg)?;
    match db.delete_category(id)? {
        DeleteOutcome::Deleted => {
            println!("Deleted category {id}");
            Ok(())
        }
        DeleteOutcome::NotFound => anyhow::bail!("No category with id {id}"),
        DeleteOutcome::Blocked => {
            anyhow::bail!("Category {id} still has transactions; delete those first")
        }
    }
}

// ── Reports ──────────────────────────────────────────────────

fn cli_summary(db: &mut Database) -> Result<()> {
    let summary = db.get_balance_summary()?;

    println!("Total income  : {:>20}", format_amount(summary.total_income));
    println!("Total expense : {:>20}", format_amount(summary.total_expense));
    println!("{}", "─".repeat(36));
    if summary.balance >= Decimal::ZERO {
        println!("Balance       : {:>20}", format_amount(summary.balance));
    } else {
        println!("Deficit       : {:>20}", format_amount(summary.balance.abs()));
    }

    for kind in [Kind::Income, Kind::Expense] {
        let rows: Vec<_> = summary
            .by_category
            .iter()
            .filter(|r| r.kind == kind)
            .collect();
        if rows.is_empty() {
            continue;
        }
        let total_of_kind = match kind {
            Kind::Income => summary.total_income,
            Kind::Expense => summary.total_expense,
        };

        println!();
        println!("By category ({kind}):");
        for row in rows {
            let pct = if total_of_kind > Decimal::ZERO {
                (row.total / total_of_kind).to_f64().unwrap_or(0.0) * 100.0
            } else {
                0.0
            };
            let bar = "█".repeat((pct / 5.0) as usize); // one block per 5%
            println!(
                "  {:<15} {:>18} {pct:>5.1}% {bar}",
                row.name,
                format_amount(row.total),
            );
        }
    }
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────

fn print_transaction_table(rows: &[TransactionWithCategory]) {
    println!(
        "{:<5} {:<8} {:<12} {:<15} {:>18} Description",
        "ID", "Kind", "Date", "Category", "Amount"
    );
    println!("{}", "─".repeat(78));
    for row in rows {
        let t = &row.transaction;
        println!(
            "{:<5} {:<8} {:<12} {:<15} {:>18} {}",
            t.id.unwrap_or(0),
            t.kind,
            format_date(&t.date),
            row.category_name,
            format_amount(t.amount),
            t.description.as_deref().unwrap_or("-"),
        );
    }
}

fn parse_kind(s: &str) -> Result<Kind> {
    Kind::parse(s).ok_or_else(|| anyhow::anyhow!("Invalid kind '{s}': expected income or expense"))
}

fn parse_id(s: &str) -> Result<i64> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid id '{s}': expected a number"))
}

/// Resolve a category given by name (exact match) or numeric id.
fn resolve_category(db: &Database, input: &str) -> Result<i64> {
    if let Some(id) = db.get_category_id_by_name(input)? {
        return Ok(id);
    }
    if let Ok(id) = input.parse::<i64>() {
        if db.get_category_by_id(id)?.is_some() {
            return Ok(id);
        }
    }
    anyhow::bail!("Category '{input}' not found. Run `kasku categories` to list them.")
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
