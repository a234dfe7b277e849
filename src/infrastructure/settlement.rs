use crate::domain::money::Amount;
use crate::domain::ports::PaymentSettler;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Charges a payment card. Only the masked number is kept.
#[derive(Debug, Clone)]
pub struct CardSettler {
    card_number: String,
}

impl CardSettler {
    pub fn new(card_number: impl Into<String>) -> Self {
        Self {
            card_number: card_number.into(),
        }
    }
}

impl Default for CardSettler {
    fn default() -> Self {
        Self::new("**** **** **** 1234")
    }
}

#[async_trait]
impl PaymentSettler for CardSettler {
    async fn attempt(&self, amount: Amount) -> bool {
        info!(%amount, card = %self.card_number, "Processing card payment");
        true
    }

    fn channel(&self) -> &str {
        "Card"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CashSettler;

#[async_trait]
impl PaymentSettler for CashSettler {
    async fn attempt(&self, amount: Amount) -> bool {
        info!(%amount, "Processing cash payment");
        true
    }

    fn channel(&self) -> &str {
        "Cash"
    }
}

/// Pays through a digital wallet such as PayPal or Apple Pay.
#[derive(Debug, Clone)]
pub struct DigitalSettler {
    wallet: String,
}

impl DigitalSettler {
    pub fn new(wallet: impl Into<String>) -> Self {
        Self {
            wallet: wallet.into(),
        }
    }
}

impl Default for DigitalSettler {
    fn default() -> Self {
        Self::new("DefaultWallet")
    }
}

#[async_trait]
impl PaymentSettler for DigitalSettler {
    async fn attempt(&self, amount: Amount) -> bool {
        info!(%amount, wallet = %self.wallet, "Processing digital payment");
        true
    }

    fn channel(&self) -> &str {
        "Digital"
    }
}

/// Declines every payment and counts the attempts.
#[derive(Debug, Default)]
pub struct DecliningSettler {
    attempts: AtomicUsize,
}

impl DecliningSettler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PaymentSettler for DecliningSettler {
    async fn attempt(&self, amount: Amount) -> bool {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        info!(%amount, "Payment declined");
        false
    }

    fn channel(&self) -> &str {
        "Declined"
    }
}
