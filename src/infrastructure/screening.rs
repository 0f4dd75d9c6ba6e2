use crate::domain::payee::Payee;
use crate::domain::ports::{ComplianceFlag, ComplianceScreen};

/// Flags malformed wallets and wallets containing a known vanity pattern.
///
/// A placeholder for a real sanctions or risk-screening provider.
#[derive(Debug, Clone)]
pub struct PatternScreen {
    pattern: String,
}

impl PatternScreen {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into().to_ascii_lowercase(),
        }
    }
}

impl Default for PatternScreen {
    fn default() -> Self {
        Self::new("dead")
    }
}

impl ComplianceScreen for PatternScreen {
    fn screen(&self, payee: &Payee) -> Option<ComplianceFlag> {
        if !payee.has_valid_wallet() {
            return Some(ComplianceFlag::MalformedWallet);
        }
        payee
            .wallet
            .to_ascii_lowercase()
            .contains(&self.pattern)
            .then_some(ComplianceFlag::KnownVanityPattern)
    }
}
