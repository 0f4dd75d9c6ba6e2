use crate::domain::ports::AllocationPolicy;
use crate::domain::quote::StableBasket;

/// Always returns the same basket.
#[derive(Debug, Clone)]
pub struct FixedBasketPolicy {
    basket: StableBasket,
}

impl FixedBasketPolicy {
    pub fn new(basket: StableBasket) -> Self {
        Self { basket }
    }
}

impl Default for FixedBasketPolicy {
    fn default() -> Self {
        Self::new(StableBasket::diversified())
    }
}

impl AllocationPolicy for FixedBasketPolicy {
    fn allocation(&self) -> StableBasket {
        self.basket.clone()
    }
}
