use crate::domain::ports::PriceSource;
use crate::domain::quote::MIN_TOKEN_PRICE;
use crate::error::{PayrollError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::io::Read;

/// A fixed token -> USD price table.
///
/// Stands in for a live market-data feed. Every stored price is at least
/// [`MIN_TOKEN_PRICE`].
#[derive(Debug, Default, Clone)]
pub struct StaticPriceTable {
    prices: HashMap<String, Decimal>,
}

impl StaticPriceTable {
    /// Creates an empty table. Every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo price table.
    pub fn mock() -> Self {
        let prices = [
            ("ETH", dec!(3200)),
            ("MATIC", dec!(0.74)),
            ("OP", dec!(2.2)),
            ("ARB", dec!(1.25)),
            ("SOL", dec!(145)),
            ("AVAX", dec!(24.5)),
        ]
        .into_iter()
        .map(|(token, price)| (token.to_string(), price))
        .collect();
        Self { prices }
    }

    /// Loads a JSON object of `{"TOKEN": price}` pairs.
    ///
    /// Prices may be given as JSON numbers or decimal strings.
    pub fn from_json_reader<R: Read>(source: R) -> Result<Self> {
        let raw: HashMap<String, Decimal> = serde_json::from_reader(source)?;
        let mut table = Self::new();
        for (token, price) in raw {
            table.insert(token, price)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, token: impl Into<String>, price: Decimal) -> Result<()> {
        let token = token.into();
        if price < MIN_TOKEN_PRICE {
            return Err(PayrollError::InvalidPrice { token, price });
        }
        self.prices.insert(token, price);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceSource for StaticPriceTable {
    fn price_of(&self, token: &str) -> Option<Decimal> {
        self.prices.get(token).copied()
    }
}
