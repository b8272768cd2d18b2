//! Price Formatting
//!
//! Locale-aware currency strings for display. The formatter is injected
//! into the engine so tests (or another storefront locale) can substitute
//! their own implementation.

use shared::quote::{FormattedTotals, QuoteState};

/// Formats integer CLP amounts for display
pub trait PriceFormatter: Send + Sync {
    fn format(&self, amount: i64) -> String;
}

/// es-CL formatting: `$` prefix, `.` thousands separator, no decimals
#[derive(Debug, Clone, Copy, Default)]
pub struct ChileanPesoFormatter;

impl PriceFormatter for ChileanPesoFormatter {
    fn format(&self, amount: i64) -> String {
        let digits = amount.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);

        for (index, digit) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        if amount < 0 {
            format!("-${grouped}")
        } else {
            format!("${grouped}")
        }
    }
}

/// Format the six quote totals for display
pub fn format_totals(state: &QuoteState, formatter: &dyn PriceFormatter) -> FormattedTotals {
    FormattedTotals {
        subtotal: formatter.format(state.subtotal),
        shipping: formatter.format(state.shipping),
        installation: formatter.format(state.installation),
        discounts: formatter.format(state.discounts),
        taxes: formatter.format(state.taxes),
        total: formatter.format(state.total),
    }
}
