//! Reading status and the parameters it drives.
//!
//! Every per-status knob of the generator lives on [`ReadingStatus`], so a
//! new status only needs a table entry and a match arm here.

use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;

use super::DAY_MS;
use crate::model::PublicationStatus;

/// How far a reader has got with a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingStatus {
    /// Currently reading
    Reading,
    /// Finished
    Completed,
    /// Paused
    OnHold,
    /// Not started
    PlanToRead,
    /// Abandoned
    Dropped,
}

/// Draw weights of each status; they sum to 1.0
pub const READING_STATUS_WEIGHTS: [(ReadingStatus, f64); 5] = [
    (ReadingStatus::Reading, 0.25),
    (ReadingStatus::Completed, 0.20),
    (ReadingStatus::OnHold, 0.15),
    (ReadingStatus::PlanToRead, 0.25),
    (ReadingStatus::Dropped, 0.15),
];

const UNFINISHED_PUBLICATION_WEIGHTS: [(PublicationStatus, f64); 3] = [
    (PublicationStatus::Ongoing, 0.6),
    (PublicationStatus::Completed, 0.3),
    (PublicationStatus::OnHiatus, 0.1),
];

const FINISHED_PUBLICATION_WEIGHTS: [(PublicationStatus, f64); 2] = [
    (PublicationStatus::Completed, 0.5),
    (PublicationStatus::PublishingFinished, 0.5),
];

/// Draw one entry of `table` by comparing a uniform value against the
/// running sum of the weights.
pub fn sample_weighted<T: Copy, R: Rng + ?Sized, const N: usize>(
    table: &[(T, f64); N],
    rng: &mut R,
) -> T {
    let r: f64 = rng.gen();
    let mut cumulative = 0.0;
    for &(value, weight) in table {
        cumulative += weight;
        if r <= cumulative {
            return value;
        }
    }
    // Rounding can leave the sum a hair under 1.0
    table[N - 1].0
}

impl ReadingStatus {
    /// All statuses in table order
    pub const ALL: [ReadingStatus; 5] = [
        ReadingStatus::Reading,
        ReadingStatus::Completed,
        ReadingStatus::OnHold,
        ReadingStatus::PlanToRead,
        ReadingStatus::Dropped,
    ];

    /// Draws a status from [`READING_STATUS_WEIGHTS`]
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        sample_weighted(&READING_STATUS_WEIGHTS, rng)
    }

    /// Position in [`ReadingStatus::ALL`]
    pub fn index(self) -> usize {
        match self {
            ReadingStatus::Reading => 0,
            ReadingStatus::Completed => 1,
            ReadingStatus::OnHold => 2,
            ReadingStatus::PlanToRead => 3,
            ReadingStatus::Dropped => 4,
        }
    }

    /// Short machine-friendly name
    pub fn as_str(self) -> &'static str {
        match self {
            ReadingStatus::Reading => "reading",
            ReadingStatus::Completed => "completed",
            ReadingStatus::OnHold => "on_hold",
            ReadingStatus::PlanToRead => "plan_to_read",
            ReadingStatus::Dropped => "dropped",
        }
    }

    /// Label used in reports
    pub fn label(self) -> &'static str {
        match self {
            ReadingStatus::Reading => "Currently Reading",
            ReadingStatus::Completed => "Completed",
            ReadingStatus::OnHold => "On Hold",
            ReadingStatus::PlanToRead => "Plan to Read",
            ReadingStatus::Dropped => "Dropped",
        }
    }

    /// Range the book's chapter count is drawn from
    pub fn chapter_count_range(self) -> RangeInclusive<usize> {
        match self {
            ReadingStatus::Completed => 50..=300,
            ReadingStatus::Reading => 30..=500,
            ReadingStatus::PlanToRead => 10..=200,
            ReadingStatus::OnHold | ReadingStatus::Dropped => 20..=150,
        }
    }

    /// Fraction of chapters read, before jitter
    pub fn read_fraction<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        match self {
            ReadingStatus::Completed => 1.0,
            ReadingStatus::Reading => rng.gen_range(0.3..0.85),
            ReadingStatus::OnHold => rng.gen_range(0.1..0.5),
            ReadingStatus::Dropped => rng.gen_range(0.05..0.3),
            ReadingStatus::PlanToRead => 0.0,
        }
    }

    /// How long ago (ms) the book was last read, or `None` if it never was
    pub fn last_read_age<R: Rng + ?Sized>(self, rng: &mut R) -> Option<i64> {
        match self {
            ReadingStatus::Reading => Some(rng.gen_range(0..=7 * DAY_MS)),
            ReadingStatus::Completed => Some(rng.gen_range(1..=60) * DAY_MS),
            ReadingStatus::OnHold => Some(rng.gen_range(14..=56) * DAY_MS),
            ReadingStatus::Dropped => Some(rng.gen_range(30..=180) * DAY_MS),
            ReadingStatus::PlanToRead => None,
        }
    }

    /// Progress recorded on the most recent history entry
    pub fn progress_range(self) -> RangeInclusive<i64> {
        match self {
            ReadingStatus::Completed => 80..=100,
            _ => 20..=95,
        }
    }

    /// Order of the category the book is always filed under
    pub fn primary_category(self) -> i64 {
        match self {
            ReadingStatus::Reading => 1,
            ReadingStatus::Completed => 2,
            ReadingStatus::OnHold => 3,
            ReadingStatus::PlanToRead => 4,
            ReadingStatus::Dropped => 5,
        }
    }

    /// Whether the book may also land in Favorites
    pub fn can_be_favorite(self) -> bool {
        matches!(self, ReadingStatus::Reading | ReadingStatus::Completed)
    }

    /// Draws the publication status of a book read this far
    pub fn publication_status<R: Rng + ?Sized>(self, rng: &mut R) -> PublicationStatus {
        match self {
            ReadingStatus::Completed => sample_weighted(&FINISHED_PUBLICATION_WEIGHTS, rng),
            _ => sample_weighted(&UNFINISHED_PUBLICATION_WEIGHTS, rng),
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = READING_STATUS_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_matches_index() {
        for (i, status) in ReadingStatus::ALL.iter().enumerate() {
            assert_eq!(status.index(), i);
            assert_eq!(READING_STATUS_WEIGHTS[i].0, *status);
        }
    }

    #[test]
    fn test_sample_weighted_edges() {
        // StepRng(0, 0) always yields 0.0, the first bucket
        let mut low = StepRng::new(0, 0);
        assert_eq!(ReadingStatus::sample(&mut low), ReadingStatus::Reading);

        // All ones maps to just under 1.0, the last bucket
        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(ReadingStatus::sample(&mut high), ReadingStatus::Dropped);
    }

    #[test]
    fn test_sample_distribution() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut counts = [0usize; 5];
        let draws = 20_000;
        for _ in 0..draws {
            counts[ReadingStatus::sample(&mut rng).index()] += 1;
        }
        for (status, weight) in READING_STATUS_WEIGHTS {
            let observed = counts[status.index()] as f64 / draws as f64;
            assert!(
                (observed - weight).abs() < 0.02,
                "{} drawn {:.3}, expected {:.2}",
                status,
                observed,
                weight
            );
        }
    }

    #[test]
    fn test_completed_publication_status() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let status = ReadingStatus::Completed.publication_status(&mut rng);
            assert!(matches!(
                status,
                PublicationStatus::Completed | PublicationStatus::PublishingFinished
            ));
        }
    }

    #[test]
    fn test_plan_to_read_never_read() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(ReadingStatus::PlanToRead.read_fraction(&mut rng), 0.0);
        assert_eq!(ReadingStatus::PlanToRead.last_read_age(&mut rng), None);
    }
}
