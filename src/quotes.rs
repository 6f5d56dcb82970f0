//! Day-part quote table and hourly rotation

use rand::Rng;
use std::time::{Duration, Instant};

use crate::clock::DayPart;

const MORNING: &[&str] = &[
    "The secret of getting ahead is getting started.",
    "Well begun is half done.",
    "Every morning we are born again. What we do today matters most.",
    "Eat a live frog first thing in the morning and nothing worse will happen to you the rest of the day.",
    "Lose an hour in the morning, and you will spend all day looking for it.",
];

const AFTERNOON: &[&str] = &[
    "Focus on being productive instead of busy.",
    "It is not enough to be busy; so are the ants. The question is: what are we busy about?",
    "Amateurs sit and wait for inspiration, the rest of us just get up and go to work.",
    "The best way out is always through.",
    "Don't watch the clock; do what it does. Keep going.",
];

const EVENING: &[&str] = &[
    "Finish each day and be done with it. You have done what you could.",
    "Rest when you're weary. Refresh and renew yourself.",
    "Reflect upon your present blessings, of which every man has plenty.",
    "What we do during our working hours determines what we have; what we do in our leisure hours determines what we are.",
];

const NIGHT: &[&str] = &[
    "The night is the hardest time to be alive and 4am knows all my secrets.",
    "Sleep is the best meditation.",
    "Never stay up late on a night before a day you want to remember.",
    "Tomorrow is the first blank page of a 365-page book.",
];

/// How long one quote stays up before a new draw
const ROTATION_INTERVAL: Duration = Duration::from_secs(60 * 60);

pub fn bucket(part: DayPart) -> &'static [&'static str] {
    match part {
        DayPart::Morning => MORNING,
        DayPart::Afternoon => AFTERNOON,
        DayPart::Evening => EVENING,
        DayPart::Night => NIGHT,
    }
}

/// Draw uniformly from the bucket covering `hour`
pub fn pick(hour: u32, rng: &mut impl Rng) -> &'static str {
    let bucket = bucket(DayPart::from_hour(hour));
    bucket[rng.random_range(0..bucket.len())]
}

/// Holds the quote currently on screen, re-drawing it hourly and whenever
/// the day-part bucket changes under it
pub struct QuoteRotation {
    current: Option<(&'static str, DayPart)>,
    picked_at: Instant,
}

impl QuoteRotation {
    pub fn new() -> Self {
        Self {
            current: None,
            picked_at: Instant::now(),
        }
    }

    pub fn current(&mut self, hour: u32) -> &'static str {
        let part = DayPart::from_hour(hour);
        let stale = match self.current {
            None => true,
            // A quote drawn late in one bucket must not outlive the bucket
            Some((_, picked_part)) => {
                picked_part != part || self.picked_at.elapsed() >= ROTATION_INTERVAL
            }
        };
        if stale {
            self.current = Some((pick(hour, &mut rand::rng()), part));
            self.picked_at = Instant::now();
        }
        self.current.map(|(quote, _)| quote).unwrap_or(MORNING[0])
    }
}

impl Default for QuoteRotation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_bucket_is_empty() {
        for part in [
            DayPart::Morning,
            DayPart::Afternoon,
            DayPart::Evening,
            DayPart::Night,
        ] {
            assert!(!bucket(part).is_empty());
        }
    }

    #[test]
    fn test_pick_stays_within_hour_bucket() {
        let mut rng = rand::rng();
        for (hour, part) in [
            (6, DayPart::Morning),
            (13, DayPart::Afternoon),
            (19, DayPart::Evening),
            (2, DayPart::Night),
            (23, DayPart::Night),
        ] {
            let expected = bucket(part);
            for _ in 0..50 {
                let quote = pick(hour, &mut rng);
                assert!(
                    expected.contains(&quote),
                    "hour {hour} drew from the wrong bucket: {quote}"
                );
            }
        }
    }

    #[test]
    fn test_rotation_keeps_quote_within_interval() {
        let mut rotation = QuoteRotation::new();
        let first = rotation.current(9);
        // Well inside the rotation interval the same quote stays up
        for _ in 0..10 {
            assert_eq!(rotation.current(9), first);
        }
    }

    #[test]
    fn test_rotation_redraws_when_bucket_changes() {
        let mut rotation = QuoteRotation::new();
        rotation.current(11);

        // Crossing from morning into afternoon must re-draw immediately,
        // even though the rotation interval has not elapsed
        let quote = rotation.current(12);
        assert!(bucket(DayPart::Afternoon).contains(&quote));

        // And the new draw is stable within its own bucket
        assert_eq!(rotation.current(13), quote);
    }
}
