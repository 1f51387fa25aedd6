use sitewide_core::{Percentage, Price};

/// `price` minus `percentage` percent of it.
///
/// Non-positive prices yield zero. The result always lies in `[0, price]`.
pub fn discounted_price(price: Price, percentage: Percentage) -> Price {
    let amount = price.amount();
    if amount <= 0.0 {
        return Price::ZERO;
    }
    let pct = f64::from(percentage.value());
    Price::saturating(amount - (pct * amount / 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(amount: f64) -> Price {
        Price::saturating(amount)
    }

    fn pct(value: u64) -> Percentage {
        Percentage::clamped(value)
    }

    #[test]
    fn half_off_one_hundred_is_fifty() {
        assert_eq!(discounted_price(p(100.0), pct(50)), p(50.0));
    }

    #[test]
    fn ten_percent_off_thirty_five() {
        assert_eq!(discounted_price(p(35.0), pct(10)), p(31.5));
    }

    #[test]
    fn zero_price_stays_zero() {
        assert_eq!(discounted_price(Price::ZERO, pct(50)), Price::ZERO);
        assert_eq!(discounted_price(Price::ZERO, pct(0)), Price::ZERO);
    }

    #[test]
    fn zero_percent_is_identity_and_hundred_is_free() {
        assert_eq!(discounted_price(p(19.99), pct(0)), p(19.99));
        assert_eq!(discounted_price(p(19.99), pct(100)), Price::ZERO);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: 0 <= discounted <= price.
            #[test]
            fn result_is_bounded(amount in 0.0f64..1.0e9, percentage in 0u64..=100) {
                let price = p(amount);
                let out = discounted_price(price, pct(percentage));
                prop_assert!(out.amount() >= 0.0);
                prop_assert!(out <= price);
            }

            /// Property: a bigger percentage never gives a bigger price.
            #[test]
            fn monotonic_in_percentage(amount in 0.0f64..1.0e9, a in 0u64..=100, b in 0u64..=100) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let price = p(amount);
                prop_assert!(discounted_price(price, pct(hi)) <= discounted_price(price, pct(lo)));
            }
        }
    }
}
