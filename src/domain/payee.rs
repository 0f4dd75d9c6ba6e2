use super::money::Usd;
use crate::error::{PayrollError, Result};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a wallet address body in hex digits, excluding the `0x` prefix.
const WALLET_HEX_LEN: usize = 40;

/// Returns true if `address` is `0x` followed by exactly 40 hex digits.
pub fn is_wallet_address(address: &str) -> bool {
    let Some(body) = address.strip_prefix("0x") else {
        return false;
    };
    let mut raw = [0u8; WALLET_HEX_LEN / 2];
    body.len() == WALLET_HEX_LEN && hex::decode_to_slice(body, &mut raw).is_ok()
}

/// Rejects anything that is not a well-formed wallet address.
pub fn validate_wallet(address: &str) -> Result<()> {
    if is_wallet_address(address) {
        Ok(())
    } else {
        Err(PayrollError::InvalidWalletAddress(address.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stablecoin {
    Usdc,
    Usdt,
    Dai,
    Usdp,
}

impl Stablecoin {
    pub const ALL: [Stablecoin; 4] = [
        Stablecoin::Usdc,
        Stablecoin::Usdt,
        Stablecoin::Dai,
        Stablecoin::Usdp,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Stablecoin::Usdc => "USDC",
            Stablecoin::Usdt => "USDT",
            Stablecoin::Dai => "DAI",
            Stablecoin::Usdp => "USDP",
        }
    }
}

impl fmt::Display for Stablecoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Stablecoin {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self> {
        Stablecoin::ALL
            .into_iter()
            .find(|coin| coin.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| PayrollError::ValidationError(format!("Unknown stablecoin: {s}")))
    }
}

/// How a payee's salary is divided between stablecoin, fiat off-ramp and an
/// alternative asset. Each share is a whole percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutSplit {
    pub stable: u8,
    pub offramp: u8,
    pub alt: u8,
}

impl PayoutSplit {
    pub fn new(stable: u8, offramp: u8, alt: u8) -> Result<Self> {
        let split = Self {
            stable,
            offramp,
            alt,
        };
        split.validate()?;
        Ok(split)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, pct) in [
            ("stable", self.stable),
            ("offramp", self.offramp),
            ("alt", self.alt),
        ] {
            if pct > 100 {
                return Err(PayrollError::InvalidSplit(format!(
                    "{name} share {pct}% is outside 0..=100"
                )));
            }
        }
        Ok(())
    }

    /// Whether the three shares add up to 100%.
    pub fn is_balanced(&self) -> bool {
        u16::from(self.stable) + u16::from(self.offramp) + u16::from(self.alt) == 100
    }
}

impl Default for PayoutSplit {
    fn default() -> Self {
        Self {
            stable: 70,
            offramp: 20,
            alt: 10,
        }
    }
}

/// Per-payee breakdown of one month's salary along the payout split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoutPreview {
    pub stablecoin: Stablecoin,
    /// Stablecoin units, rounded to cents.
    pub stable_amount: Usd,
    /// Fiat received after the off-ramp fee.
    pub offramp_usd: Usd,
    pub alt_usd: Usd,
}

/// An individual receiving a payroll disbursement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payee {
    pub id: String,
    pub name: String,
    /// Kept verbatim; a malformed address flags the payee rather than rejecting it.
    pub wallet: String,
    pub verified: bool,
    /// Monthly salary.
    pub salary_usd: Usd,
    pub split: PayoutSplit,
    pub stablecoin: Stablecoin,
    pub jurisdiction: String,
}

impl Payee {
    /// Share of the off-ramp amount kept after conversion fees.
    pub const OFFRAMP_NET_RATE: rust_decimal::Decimal = dec!(0.995);
    /// Largest accepted monthly salary. Keeps roster totals and token
    /// conversions well inside `Decimal` range.
    pub const MAX_SALARY_USD: rust_decimal::Decimal = dec!(1000000000);

    /// Checks the invariants every roster entry must hold.
    ///
    /// The wallet format is deliberately not checked here; see
    /// [`Payee::has_valid_wallet`].
    pub fn validate(&self) -> Result<()> {
        if self.salary_usd.is_negative() {
            return Err(PayrollError::NegativeSalary(self.salary_usd.value()));
        }
        if self.salary_usd.value() > Self::MAX_SALARY_USD {
            return Err(PayrollError::SalaryOutOfRange(self.salary_usd.value()));
        }
        self.split.validate()?;
        if !self.split.is_balanced() {
            tracing::warn!(
                payee = %self.id,
                stable = self.split.stable,
                offramp = self.split.offramp,
                alt = self.split.alt,
                "payout split does not sum to 100"
            );
        }
        Ok(())
    }

    pub fn has_valid_wallet(&self) -> bool {
        is_wallet_address(&self.wallet)
    }

    pub fn payout_preview(&self) -> PayoutPreview {
        PayoutPreview {
            stablecoin: self.stablecoin,
            stable_amount: self.salary_usd.percent(self.split.stable).round_cents(),
            offramp_usd: self.salary_usd.percent(self.split.offramp) * Self::OFFRAMP_NET_RATE,
            alt_usd: self.salary_usd.percent(self.split.alt),
        }
    }
}

/// A payee as entered by a user, before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayee {
    pub name: String,
    pub wallet: String,
    pub salary_usd: Usd,
    pub split: PayoutSplit,
    pub stablecoin: Stablecoin,
    pub jurisdiction: String,
}

impl NewPayee {
    /// Builds an unverified payee, applying the stricter entry rules: a
    /// non-empty name and a well-formed wallet.
    pub fn into_payee(self, id: String) -> Result<Payee> {
        if self.name.trim().is_empty() {
            return Err(PayrollError::ValidationError(
                "Payee name must not be empty".to_string(),
            ));
        }
        validate_wallet(&self.wallet)?;

        let payee = Payee {
            id,
            name: self.name,
            wallet: self.wallet,
            verified: false,
            salary_usd: self.salary_usd,
            split: self.split,
            stablecoin: self.stablecoin,
            jurisdiction: self.jurisdiction,
        };
        payee.validate()?;
        Ok(payee)
    }
}
