//! # Forms
//!
//! Raw text as submitted by the cashier, and its conversion into validated
//! inputs for the repositories.
//!
//! ```text
//! StockForm  { "Rice", "10", "2.50" } ──validate()──► NewStockItem
//! SaleForm   { "Bread", "2", "10" }   ──validate()──► NewSale
//! CreditForm { "Ana", "111", ... }    ──validate()──► NewCreditEntry
//! ```
//!
//! Fields are checked in form order and the first failure is returned.

use serde::{Deserialize, Serialize};

use crate::types::{NewCreditEntry, NewSale, NewStockItem};
use crate::validation::{
    normalize_phone, parse_amount, parse_quantity, validate_customer_name,
    validate_product_name, ValidationResult,
};

/// Stock form: product, quantity, unit price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockForm {
    pub product: String,
    pub quantity: String,
    pub unit_price: String,
}

impl StockForm {
    pub fn validate(&self) -> ValidationResult<NewStockItem> {
        Ok(NewStockItem {
            product: validate_product_name(&self.product)?,
            quantity: parse_quantity("quantity", &self.quantity)?,
            unit_price: parse_amount("unit price", &self.unit_price)?,
        })
    }
}

/// Sale form: product, quantity, amount charged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleForm {
    pub product: String,
    pub quantity: String,
    pub amount: String,
}

impl SaleForm {
    pub fn validate(&self) -> ValidationResult<NewSale> {
        Ok(NewSale {
            product: validate_product_name(&self.product)?,
            quantity: parse_quantity("quantity", &self.quantity)?,
            amount: parse_amount("amount", &self.amount)?,
        })
    }
}

/// Credit form. Everything but `phone` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditForm {
    pub customer: String,
    pub phone: String,
    pub product: String,
    pub quantity: String,
    pub amount: String,
}

impl CreditForm {
    pub fn validate(&self) -> ValidationResult<NewCreditEntry> {
        Ok(NewCreditEntry {
            customer: validate_customer_name(&self.customer)?,
            phone: normalize_phone(&self.phone)?,
            product: validate_product_name(&self.product)?,
            quantity: parse_quantity("quantity", &self.quantity)?,
            amount: parse_amount("amount", &self.amount)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::money::Money;

    #[test]
    fn test_stock_form() {
        let form = StockForm {
            product: "Rice".into(),
            quantity: "10".into(),
            unit_price: "2.50".into(),
        };
        let item = form.validate().unwrap();
        assert_eq!(item.product, "Rice");
        assert_eq!(item.quantity, 10);
        assert_eq!(item.unit_price, Money::from_cents(250));
    }

    #[test]
    fn test_stock_form_rejects_non_numeric_price() {
        let form = StockForm {
            product: "Rice".into(),
            quantity: "10".into(),
            unit_price: "cheap".into(),
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::invalid_number("unit price", "cheap")
        );
    }

    #[test]
    fn test_sale_form_reports_first_missing_field() {
        let form = SaleForm {
            product: "".into(),
            quantity: "".into(),
            amount: "".into(),
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::required("product"));
    }

    #[test]
    fn test_credit_form_phone_is_optional() {
        let form = CreditForm {
            customer: "Ana".into(),
            phone: "".into(),
            product: "Milk".into(),
            quantity: "1".into(),
            amount: "5".into(),
        };
        let entry = form.validate().unwrap();
        assert_eq!(entry.phone, None);
        assert_eq!(entry.amount, Money::from_cents(500));
    }

    #[test]
    fn test_credit_form_requires_customer() {
        let form = CreditForm {
            customer: "  ".into(),
            phone: "111".into(),
            product: "Milk".into(),
            quantity: "1".into(),
            amount: "5".into(),
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::required("customer"));
    }

    #[test]
    fn test_zero_amount_is_valid() {
        let form = CreditForm {
            customer: "Ana".into(),
            phone: "111".into(),
            product: "Sample".into(),
            quantity: "1".into(),
            amount: "0".into(),
        };
        assert!(form.validate().unwrap().amount.is_zero());
    }
}
