//! Coupon validation with a one-day grace window.
//!
//! A coupon counts as expired only once its listed expiry date is
//! more than a full day in the past, so a coupon expiring "today"
//! stays redeemable through the whole day.

use chrono::{DateTime, Duration, Utc};
use pulse_core::PulseError;
use pulse_core::error::PulseResult;
use pulse_core::models::coupon::Coupon;
use pulse_core::repository::CouponRepository;

/// Outcome of checking a coupon code.
///
/// `Expired` is distinct from `NotFound`: an expired coupon reports a
/// zero discount, while an unknown code reports nothing at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponStanding {
    NotFound,
    Expired,
    Valid { discount: i64 },
}

/// Expiry rule: `expires_at < now - 1 day`.
pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at < now - Duration::days(1)
}

/// Coupon lookups with expiry evaluated at read time.
pub struct CouponValidator<R: CouponRepository> {
    coupons: R,
}

impl<R: CouponRepository> CouponValidator<R> {
    pub fn new(coupons: R) -> Self {
        Self { coupons }
    }

    /// Check a code against the store.
    ///
    /// A stored coupon without a positive discount is treated the
    /// same as an unknown code.
    pub async fn check(&self, code: &str) -> PulseResult<CouponStanding> {
        let coupon = match self.coupons.get_by_code(code).await {
            Ok(c) => c,
            Err(PulseError::NotFound { .. }) => return Ok(CouponStanding::NotFound),
            Err(e) => return Err(e),
        };

        if coupon.discount <= 0 {
            return Ok(CouponStanding::NotFound);
        }
        if is_expired(coupon.expires_at, Utc::now()) {
            return Ok(CouponStanding::Expired);
        }

        Ok(CouponStanding::Valid {
            discount: coupon.discount,
        })
    }

    /// Every stored coupon that has not expired, for display.
    pub async fn list_active(&self) -> PulseResult<Vec<Coupon>> {
        let now = Utc::now();
        let all = self.coupons.list().await?;
        Ok(all
            .into_iter()
            .filter(|c| !is_expired(c.expires_at, now))
            .collect())
    }
}
