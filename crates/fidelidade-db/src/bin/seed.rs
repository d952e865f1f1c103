//! # Seed Data Generator
//!
//! Populates a development database with stock, sales and open credit.
//!
//! ## Usage
//! ```bash
//! # Seed ./fidelidade_dev.db
//! cargo run -p fidelidade-db --bin seed
//!
//! # Specify database path
//! cargo run -p fidelidade-db --bin seed -- --db ./data/fidelidade.db
//! ```
//!
//! Nothing is written if the database already holds stock or sales.

use std::path::PathBuf;

use clap::Parser;

use fidelidade_core::{Money, NewCreditEntry, NewSale, NewStockItem};
use fidelidade_db::{Database, DbConfig};

/// Fidelidade POS seed data generator.
#[derive(Parser, Debug)]
#[command(name = "seed")]
struct Args {
    /// Database file to populate.
    #[arg(short, long, value_name = "PATH", default_value = "./fidelidade_dev.db")]
    db: PathBuf,
}

/// (product, quantity, unit price in cents)
const STOCK: &[(&str, i64, i64)] = &[
    ("Arroz 5kg", 24, 2790),
    ("Feijão 1kg", 30, 899),
    ("Açúcar 1kg", 18, 549),
    ("Café 500g", 12, 1890),
    ("Óleo de soja", 20, 749),
    ("Leite integral", 36, 529),
    ("Pão francês", 80, 90),
    ("Sabão em pó", 10, 1590),
];

/// (customer, phone, product, quantity, amount in cents)
const CREDIT: &[(&str, Option<&str>, &str, i64, i64)] = &[
    ("Ana", Some("11 98888-1111"), "Pão francês", 10, 900),
    ("Ana", Some("11 98888-1111"), "Leite integral", 2, 1058),
    ("Bruno", None, "Café 500g", 1, 1890),
    ("Carla", Some("11 97777-2222"), "Arroz 5kg", 1, 2790),
    ("Carla", Some("11 96666-3333"), "Açúcar 1kg", 2, 1098),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Fidelidade POS Seed Data Generator");
    println!("==================================");
    println!("Database: {}", args.db.display());
    println!();

    let db = Database::new(DbConfig::new(args.db)).await?;
    let result = seed(&db).await;
    db.close().await;
    result
}

async fn seed(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let status = db.migration_status().await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied ({}/{})", status.applied, status.embedded);

    let existing_stock = db.stock().count().await?;
    let existing_sales = db.sales().count().await?;
    if existing_stock > 0 || existing_sales > 0 {
        println!(
            "⚠ Database already has {} stock rows and {} sales",
            existing_stock, existing_sales
        );
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Stocking shelves...");
    for (product, quantity, cents) in STOCK {
        db.stock()
            .upsert(&NewStockItem {
                product: product.to_string(),
                quantity: *quantity,
                unit_price: Money::from_cents(*cents),
            })
            .await?;
    }
    println!("  {} products", STOCK.len());

    println!("Recording sales...");
    let mut sales = 0;
    for (index, (product, _, cents)) in STOCK.iter().enumerate() {
        let quantity = (index % 3 + 1) as i64;
        db.sales()
            .record(&NewSale {
                product: product.to_string(),
                quantity,
                amount: Money::from_cents(cents * quantity),
            })
            .await?;
        sales += 1;
    }
    println!("  {} sales", sales);

    println!("Registering fiado...");
    for (customer, phone, product, quantity, cents) in CREDIT {
        db.credits()
            .register(&NewCreditEntry {
                customer: customer.to_string(),
                phone: phone.map(str::to_string),
                product: product.to_string(),
                quantity: *quantity,
                amount: Money::from_cents(*cents),
            })
            .await?;
    }
    println!("  {} entries", CREDIT.len());

    let summary = db.summary().compute().await?;
    println!();
    println!("Total stock:  {}", summary.total_stock_quantity);
    println!("Total sales:  {}", summary.total_sales);
    println!(
        "Open fiado:   {} entries ({})",
        summary.open_credit_count, summary.open_credit_total
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args() {
        Args::command().debug_assert();

        let args = Args::try_parse_from(["seed"]).unwrap();
        assert_eq!(args.db, PathBuf::from("./fidelidade_dev.db"));

        let args = Args::try_parse_from(["seed", "-d", "/tmp/shop.db"]).unwrap();
        assert_eq!(args.db, PathBuf::from("/tmp/shop.db"));

        assert!(Args::try_parse_from(["seed", "--bogus"]).is_err());
    }
}
