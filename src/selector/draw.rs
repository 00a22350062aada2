use crate::model::{CoreError, WeightedRestaurant};
use rand::rngs::{OsRng, StdRng};
use rand::seq::IndexedRandom as _;
use rand::{CryptoRng, Rng as _, SeedableRng, TryCryptoRng};

/// CSPRNG seeded from the operating system's entropy pool.
pub fn os_rng() -> Result<StdRng, CoreError> {
    seed_from(&mut OsRng)
}

/// Seeds a CSPRNG from `source`; a failing source is reported, never unwrapped.
pub fn seed_from<S: TryCryptoRng>(source: &mut S) -> Result<StdRng, CoreError> {
    let mut seed = <StdRng as SeedableRng>::Seed::default();
    source
        .try_fill_bytes(seed.as_mut())
        .map_err(|e| CoreError::Entropy(e.to_string()))?;
    Ok(StdRng::from_seed(seed))
}

/// Uniform index in `[0, count)`.
pub fn random_index<R: CryptoRng>(rng: &mut R, count: usize) -> Result<usize, CoreError> {
    if count == 0 {
        return Err(CoreError::InvalidParameter("count must be positive".into()));
    }
    Ok(rng.random_range(0..count))
}

/// Picks one candidate with equal probability. Weights are not consulted.
pub fn select_one<'c, R, T>(rng: &mut R, candidates: &'c [T]) -> Result<&'c T, CoreError>
where
    R: CryptoRng,
{
    if candidates.is_empty() {
        return Err(CoreError::EmptyInput);
    }
    let index = random_index(rng, candidates.len())?;
    candidates.get(index).ok_or(CoreError::EmptyInput)
}

/// Picks one candidate with probability proportional to its promotion weight.
pub fn select_weighted<'c, R>(
    rng: &mut R,
    candidates: &'c [WeightedRestaurant],
) -> Result<&'c WeightedRestaurant, CoreError>
where
    R: CryptoRng,
{
    if candidates.is_empty() {
        return Err(CoreError::EmptyInput);
    }
    candidates
        .choose_weighted(rng, |candidate| candidate.weight())
        .map_err(|e| CoreError::InvalidParameter(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Restaurant;
    use crate::selector::test_support::restaurant;
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    #[test]
    fn empty_input_is_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let none: [Restaurant; 0] = [];
        assert_eq!(select_one(&mut rng, &none), Err(CoreError::EmptyInput));
        assert_eq!(select_weighted(&mut rng, &[]), Err(CoreError::EmptyInput));
    }

    struct DrainedSource;

    impl rand::TryRngCore for DrainedSource {
        type Error = std::fmt::Error;

        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            Err(std::fmt::Error)
        }

        fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
            Err(std::fmt::Error)
        }

        fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> Result<(), Self::Error> {
            Err(std::fmt::Error)
        }
    }

    impl TryCryptoRng for DrainedSource {}

    #[test]
    fn failing_entropy_source_is_an_error() {
        assert!(matches!(
            seed_from(&mut DrainedSource),
            Err(CoreError::Entropy(_))
        ));
        assert!(os_rng().is_ok());
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            random_index(&mut rng, 0),
            Err(CoreError::InvalidParameter(_))
        ));
    }

    #[test]
    fn single_candidate_always_wins() {
        let only = [restaurant(1, 4.0, 10)];
        let picked = select_one(&mut os_rng().unwrap(), &only).unwrap();
        assert_eq!(picked.id, 1);
    }

    #[test]
    fn uniform_draw_passes_chi_square() {
        const N: usize = 5;
        const DRAWS: usize = 50_000;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        // Wildly different ratings must not skew the draw.
        let candidates: Vec<Restaurant> = (0..N)
            .map(|i| restaurant(i as i64, i as f64, (i as u32) * 300))
            .collect();

        let mut counts = [0_usize; N];
        for _ in 0..DRAWS {
            let picked = select_one(&mut rng, &candidates).unwrap();
            counts[picked.id as usize] += 1;
        }

        let expected = DRAWS as f64 / N as f64;
        let chi_square: f64 = counts
            .iter()
            .map(|&observed| (observed as f64 - expected).powi(2) / expected)
            .sum();
        // 4 degrees of freedom, p = 0.001
        assert!(chi_square < 18.467, "chi-square {chi_square} for {counts:?}");
    }

    #[test]
    fn weighted_draw_favours_heavier_candidates() {
        let mut rng = StdRng::seed_from_u64(42);
        let candidates = vec![
            WeightedRestaurant::new(restaurant(0, 0.0, 10_000)),
            WeightedRestaurant::new(restaurant(1, 5.0, 10_000)),
        ];
        let heavy = (0..2_000)
            .filter(|_| select_weighted(&mut rng, &candidates).unwrap().restaurant.id == 1)
            .count();
        assert!(heavy > 1_800, "heavier candidate picked {heavy} times");
    }
}
