//! # Command-Line Arguments
//!
//! ```text
//! fidelidade [--db PATH] [--json] [-v] <COMMAND>
//!
//!   summary
//!   sale   record --product P --quantity Q --amount A
//!   sale   list [--limit N]
//!   stock  set --product P --quantity Q --price U
//!   stock  list
//!   credit add --customer C [--phone T] --product P --quantity Q --amount A
//!   credit list
//!   credit settle --customer C [--phone T | --no-phone]
//!   credit settle --ids 1,2,3
//! ```
//!
//! Form fields stay raw text here; parsing and range checks happen in
//! `fidelidade_core::forms` so every front end reports the same errors.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::commands::credit::{AccountPhone, SettleTarget};
use fidelidade_core::forms::{CreditForm, SaleForm, StockForm};

#[derive(Parser, Debug)]
#[command(name = "fidelidade", version)]
#[command(about = "Sales, stock and fiado (store credit) ledger for a single shop")]
pub struct Cli {
    /// Database file. Overrides FIDELIDADE_DB_PATH and the platform data
    /// directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log progress to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dashboard: stock on hand, sales total, open fiado, last sale.
    Summary,
    /// Record and list sales.
    Sale(Sale),
    /// Set and list stock levels.
    Stock(Stock),
    /// Register, list and settle fiado.
    Credit(Credit),
}

// ===== Sales =====

#[derive(Args, Debug)]
pub struct Sale {
    #[command(subcommand)]
    pub command: SaleCommand,
}

#[derive(Subcommand, Debug)]
pub enum SaleCommand {
    /// Append a sale.
    Record(SaleRecordArgs),
    /// Show the most recent sales.
    List {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

#[derive(Args, Debug)]
pub struct SaleRecordArgs {
    #[arg(long)]
    pub product: String,
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: String,
    /// Amount charged, e.g. 10 or 10.50.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
}

impl SaleRecordArgs {
    pub fn into_form(self) -> SaleForm {
        SaleForm {
            product: self.product,
            quantity: self.quantity,
            amount: self.amount,
        }
    }
}

// ===== Stock =====

#[derive(Args, Debug)]
pub struct Stock {
    #[command(subcommand)]
    pub command: StockCommand,
}

#[derive(Subcommand, Debug)]
pub enum StockCommand {
    /// Set quantity and unit price, replacing the previous values.
    Set(StockSetArgs),
    /// List every product in stock.
    List,
}

#[derive(Args, Debug)]
pub struct StockSetArgs {
    #[arg(long)]
    pub product: String,
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: String,
    /// Unit price, e.g. 2.50.
    #[arg(long, allow_hyphen_values = true)]
    pub price: String,
}

impl StockSetArgs {
    pub fn into_form(self) -> StockForm {
        StockForm {
            product: self.product,
            quantity: self.quantity,
            unit_price: self.price,
        }
    }
}

// ===== Credit =====

#[derive(Args, Debug)]
pub struct Credit {
    #[command(subcommand)]
    pub command: CreditCommand,
}

#[derive(Subcommand, Debug)]
pub enum CreditCommand {
    /// Register a purchase on credit.
    Add(CreditAddArgs),
    /// List open accounts with what each one owes.
    List,
    /// Mark an account's debts (or specific entries) as paid.
    Settle(CreditSettleArgs),
}

#[derive(Args, Debug)]
pub struct CreditAddArgs {
    #[arg(long)]
    pub customer: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long)]
    pub product: String,
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: String,
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
}

impl CreditAddArgs {
    pub fn into_form(self) -> CreditForm {
        CreditForm {
            customer: self.customer,
            phone: self.phone,
            product: self.product,
            quantity: self.quantity,
            amount: self.amount,
        }
    }
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["customer", "ids"])))]
pub struct CreditSettleArgs {
    /// Customer whose open account is settled.
    #[arg(long)]
    pub customer: Option<String>,
    /// Phone of the account, needed when the name has several.
    #[arg(long, requires = "customer", conflicts_with = "no_phone")]
    pub phone: Option<String>,
    /// Pick the customer's account registered without a phone.
    #[arg(long, requires = "customer")]
    pub no_phone: bool,
    /// Comma-separated entry ids, as shown by `credit list`.
    #[arg(long, value_name = "ID,ID,...")]
    pub ids: Option<String>,
}

impl CreditSettleArgs {
    pub fn into_target(self) -> SettleTarget {
        match self.ids {
            Some(ids) => SettleTarget::Entries(ids),
            None => SettleTarget::Account {
                customer: self.customer.unwrap_or_default(),
                phone: match (self.phone, self.no_phone) {
                    (Some(number), _) => AccountPhone::Number(number),
                    (None, true) => AccountPhone::NoPhone,
                    (None, false) => AccountPhone::Unspecified,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_credit_add_without_phone() {
        let cli = Cli::try_parse_from([
            "fidelidade", "credit", "add", "--customer", "Ana", "--product", "Bread",
            "--quantity", "2", "--amount", "10.00",
        ])
        .unwrap();

        let Command::Credit(Credit { command: CreditCommand::Add(args) }) = cli.command else {
            panic!("expected credit add");
        };
        let form = args.into_form();
        assert_eq!(form.customer, "Ana");
        assert_eq!(form.phone, "");
    }

    #[test]
    fn test_negative_amount_reaches_validation() {
        let cli = Cli::try_parse_from([
            "fidelidade", "sale", "record", "--product", "Bread", "--quantity", "1",
            "--amount", "-5",
        ])
        .unwrap();

        let Command::Sale(Sale { command: SaleCommand::Record(args) }) = cli.command else {
            panic!("expected sale record");
        };
        assert_eq!(args.amount, "-5");
    }

    #[test]
    fn test_settle_requires_customer_or_ids() {
        assert!(Cli::try_parse_from(["fidelidade", "credit", "settle"]).is_err());
        assert!(Cli::try_parse_from([
            "fidelidade", "credit", "settle", "--customer", "Ana", "--ids", "1"
        ])
        .is_err());
    }

    #[test]
    fn test_settle_target() {
        let cli = Cli::try_parse_from([
            "fidelidade", "--json", "credit", "settle", "--customer", "Ana", "--phone", "111",
        ])
        .unwrap();
        assert!(cli.json);

        let Command::Credit(Credit { command: CreditCommand::Settle(args) }) = cli.command else {
            panic!("expected credit settle");
        };
        assert_eq!(
            args.into_target(),
            SettleTarget::Account {
                customer: "Ana".to_string(),
                phone: AccountPhone::Number("111".to_string()),
            }
        );
    }

    fn settle_args(args: &[&str]) -> Result<CreditSettleArgs, clap::Error> {
        let argv = ["fidelidade", "credit", "settle"]
            .into_iter()
            .chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv)?;
        match cli.command {
            Command::Credit(Credit { command: CreditCommand::Settle(args) }) => Ok(args),
            other => panic!("expected credit settle, got {other:?}"),
        }
    }

    #[test]
    fn test_settle_no_phone_target() {
        let args = settle_args(&["--customer", "Ana", "--no-phone"]).unwrap();
        assert_eq!(
            args.into_target(),
            SettleTarget::Account {
                customer: "Ana".to_string(),
                phone: AccountPhone::NoPhone,
            }
        );

        let args = settle_args(&["--customer", "Ana"]).unwrap();
        assert!(matches!(
            args.into_target(),
            SettleTarget::Account { phone: AccountPhone::Unspecified, .. }
        ));

        assert!(settle_args(&["--customer", "Ana", "--phone", "111", "--no-phone"]).is_err());
        assert!(settle_args(&["--ids", "1", "--no-phone"]).is_err());
    }

    #[test]
    fn test_db_flag_is_not_read_from_environment() {
        let cli = Cli::try_parse_from(["fidelidade", "summary"]).unwrap();
        assert!(cli.db.is_none());
    }
}
