//! Reproducible demo flights.

use super::DAYS_PER_YEAR;
use super::logbook::{FlightDay, FlightLog};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Share of days with flights.
const FLIGHT_PROBABILITY: f64 = 0.4;
/// Share of flight days with fuel bought abroad.
const ABROAD_PROBABILITY: f64 = 0.2;

fn random_day(rng: &mut StdRng) -> FlightDay {
    let hours = rng.random_range(0..=3);
    let minutes = if hours == 0 {
        rng.random_range(15..60)
    } else {
        rng.random_range(0..60)
    };
    let landings = rng.random_range(1..=6);
    let cycles = rng.random_range(1..=landings);
    let fuel_inland = rng.random_range(50..=400);
    let fuel_abroad = if rng.random_bool(ABROAD_PROBABILITY) {
        rng.random_range(50..=300)
    } else {
        0
    };

    FlightDay {
        hours,
        minutes,
        landings,
        cycles,
        fuel_inland,
        fuel_abroad,
    }
}

/// A year of pseudo-random flights for the aircraft at `index`.
///
/// The same seed and index always give the same log.
///
/// ```
/// use sheetsmith::generators::fleet::demo_log;
///
/// assert_eq!(demo_log(47, 0), demo_log(47, 0));
/// assert_ne!(demo_log(47, 0), demo_log(47, 1));
/// ```
pub fn demo_log(seed: u64, index: usize) -> FlightLog {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
    let days = (0..DAYS_PER_YEAR)
        .map(|_| {
            rng.random_bool(FLIGHT_PROBABILITY)
                .then(|| random_day(&mut rng))
        })
        .collect();
    // Always exactly one entry per day
    FlightLog::from_days(days).unwrap_or_else(|_| FlightLog::blank())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        assert_eq!(demo_log(1, 3), demo_log(1, 3));
        assert_ne!(demo_log(1, 3), demo_log(2, 3));
    }

    #[test]
    fn test_values_in_range() {
        let log = demo_log(47, 0);
        let days = log.flight_days();
        // Roughly 40% of 365 days
        assert!((90..=200).contains(&days), "{} flight days", days);

        for i in 0..DAYS_PER_YEAR {
            let Some(day) = log.day(i) else { continue };
            assert!(day.hours <= 3);
            assert!(day.minutes < 60);
            if day.hours == 0 {
                assert!(day.minutes >= 15);
            }
            assert!((1..=6).contains(&day.landings));
            assert!((1..=day.landings).contains(&day.cycles));
            assert!((50..=400).contains(&day.fuel_inland));
            assert!(day.fuel_abroad == 0 || (50..=300).contains(&day.fuel_abroad));
        }
    }
}
