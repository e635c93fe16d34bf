//! Tier and interval to Stripe price ID lookup.

use aegis_core::enums::{BillingInterval, BillingTier};

/// Static price table. Price IDs come from the Stripe dashboard and are
/// stable per environment.
const PRICE_TABLE: &[(BillingTier, BillingInterval, &str)] = &[
    (
        BillingTier::Starter,
        BillingInterval::Monthly,
        "price_starter_monthly",
    ),
    (
        BillingTier::Starter,
        BillingInterval::Yearly,
        "price_starter_yearly",
    ),
    (
        BillingTier::Professional,
        BillingInterval::Monthly,
        "price_professional_monthly",
    ),
    (
        BillingTier::Professional,
        BillingInterval::Yearly,
        "price_professional_yearly",
    ),
    (
        BillingTier::Enterprise,
        BillingInterval::Monthly,
        "price_enterprise_monthly",
    ),
    (
        BillingTier::Enterprise,
        BillingInterval::Yearly,
        "price_enterprise_yearly",
    ),
];

/// Resolve the Stripe price ID for a tier and interval.
#[must_use]
pub fn price_id(tier: BillingTier, interval: BillingInterval) -> Option<&'static str> {
    PRICE_TABLE
        .iter()
        .find(|(t, i, _)| *t == tier && *i == interval)
        .map(|(_, _, id)| *id)
}

#[cfg(test)]
mod tests {
    use super::price_id;
    use aegis_core::enums::{BillingInterval, BillingTier};

    #[test]
    fn every_tier_interval_pair_has_a_price() {
        for &tier in &[
            BillingTier::Starter,
            BillingTier::Professional,
            BillingTier::Enterprise,
        ] {
            for &interval in &[BillingInterval::Monthly, BillingInterval::Yearly] {
                assert!(price_id(tier, interval).is_some(), "{tier} {interval}");
            }
        }
    }

    #[test]
    fn prices_are_distinct() {
        assert_ne!(
            price_id(BillingTier::Starter, BillingInterval::Monthly),
            price_id(BillingTier::Starter, BillingInterval::Yearly),
        );
    }
}
