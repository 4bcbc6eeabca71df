//! Premium gating.

use question_store::AppConfig;

/// Answers whether the user owns the premium unlock.
///
/// The purchase store itself (products, purchase, receipt checks) lives
/// outside this crate; only its verdict is consumed here.
pub trait Entitlements {
    fn is_premium(&self) -> bool;
}

impl Entitlements for AppConfig {
    fn is_premium(&self) -> bool {
        self.is_premium
    }
}

impl Entitlements for bool {
    fn is_premium(&self) -> bool {
        *self
    }
}
