/// Reviews at which a rating is trusted at full strength.
const MAX_REVIEW: f64 = 200.0;
/// Strength of the prior pulling thinly reviewed ratings towards 1.0.
const OFFSET: f64 = 50.0;

/// Promotion-adjusted rating. Restaurants with few reviews are pulled towards a prior of 1.0,
/// so a handful of perfect scores cannot outrank a well established slightly lower rating.
///
/// The result is a convex combination of `rating` and the prior and approaches `rating` as
/// `review_count` grows. A zero review count uses the full prior weight instead of dividing.
pub fn promote(rating: f64, review_count: u32) -> f64 {
    let n = f64::from(review_count);
    let weight = if review_count == 0 {
        1.0
    } else {
        (MAX_REVIEW / n).min(1.0)
    };
    (n * rating + OFFSET * weight) / (n + OFFSET * weight)
}

#[cfg(test)]
mod tests {
    use super::promote;
    use proptest::prelude::*;

    #[track_caller]
    fn assert_within(value: f64, expected: f64, tolerance: f64) {
        let diff = (value - expected).abs();
        assert!(
            diff <= tolerance,
            "Expected value of {expected} +- {tolerance} but got {value} which is off by {diff}",
        );
    }

    #[test]
    fn few_reviews_pull_towards_prior() {
        // weight = min(1, 200/10) = 1, (45 + 50) / (10 + 50)
        assert_within(promote(4.5, 10), 95.0 / 60.0, 1e-9);
    }

    #[test]
    fn many_reviews_use_scaled_offset() {
        // weight = 200/400 = 0.5, (1600 + 25) / (400 + 25)
        assert_within(promote(4.0, 400), 1625.0 / 425.0, 1e-9);
    }

    #[test]
    fn zero_reviews_yield_prior() {
        let promoted = promote(4.9, 0);
        assert!(promoted.is_finite());
        assert_within(promoted, 1.0, 1e-12);
    }

    #[test]
    fn converges_to_rating() {
        assert_within(promote(4.2, 1_000_000), 4.2, 1e-6);
    }

    proptest! {
        #[test]
        fn bounded_by_rating_and_prior(rating in 0.0_f64..=5.0, reviews in 0_u32..100_000) {
            let promoted = promote(rating, reviews);
            prop_assert!(promoted >= rating.min(1.0) - 1e-12);
            prop_assert!(promoted <= rating.max(1.0) + 1e-12);
        }

        #[test]
        fn non_decreasing_in_reviews_above_prior(rating in 1.0_f64..=5.0, reviews in 1_u32..100_000) {
            prop_assert!(promote(rating, reviews + 1) >= promote(rating, reviews) - 1e-12);
        }
    }
}
