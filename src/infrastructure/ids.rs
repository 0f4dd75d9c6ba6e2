use crate::domain::ports::IdSource;
use rand::{Rng, RngCore};

const ID_SPACE: u32 = 1_000_000;

/// Pseudo-random identifiers. Uniqueness is not guaranteed.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl RandomIds {
    pub fn new() -> Self {
        Self
    }
}

impl IdSource for RandomIds {
    fn run_id(&self) -> String {
        format!("run_{}", rand::thread_rng().gen_range(0..ID_SPACE))
    }

    fn payee_id(&self) -> String {
        format!("e{}", rand::thread_rng().gen_range(0..ID_SPACE))
    }

    /// `0x` followed by 64 hex digits.
    fn tx_hash(&self) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        format!("0x{}", hex::encode(bytes))
    }
}
