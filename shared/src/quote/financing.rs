//! Financing Quote Types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One amortized installment plan for the quoted total
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancingOption {
    pub months: u32,
    /// Rounded monthly installment in CLP
    pub monthly_payment: i64,
    /// Sum of all installments in CLP
    pub total_amount: i64,
    /// Annual interest rate; 0 means interest-free
    pub interest_rate: Decimal,
    /// total − total_amount; negative for interest-bearing plans
    pub savings: i64,
}
