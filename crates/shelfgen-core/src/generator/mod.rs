//! Synthetic reading-library generation.
//!
//! [`LibraryGenerator`] builds books whose chapters, reading progress,
//! history and categories agree with each other:
//!
//! 1. A [`ReadingStatus`] is drawn (or pinned by the caller).
//! 2. The status picks the chapter count and the fraction already read.
//! 3. Chapters are spread evenly over the book's age; the first
//!    `chapters_read` are marked read and the last of those is the
//!    "current" chapter, with a deeper scroll offset than any other.
//! 4. History points at the current chapter and is never dated before that
//!    chapter was uploaded. Books not started have no history.
//! 5. The status decides the primary category; Favorites and a language
//!    category are added at random.
//!
//! All randomness comes from one [`StdRng`] seeded from
//! [`GeneratorConfig::seed`], and "now" is [`GeneratorConfig::now_millis`],
//! so equal configs yield equal libraries.

mod stats;
mod status;
mod vocabulary;

use std::ops::RangeInclusive;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::model::{Backup, Book, Category, Chapter, History, PublicationStatus};

pub use stats::LibraryStats;
pub use status::{sample_weighted, ReadingStatus, READING_STATUS_WEIGHTS};

/// One day in milliseconds
pub const DAY_MS: i64 = 86_400_000;

/// Scroll offset range of a fully read chapter
pub const READ_PAGE_OFFSET: RangeInclusive<i64> = 1_000..=3_000;

/// Scroll offset range of the chapter the reader stopped in
pub const CURRENT_PAGE_OFFSET: RangeInclusive<i64> = 3_001..=6_000;

/// Chapters per volume; the first chapter of each volume is labelled
pub const VOLUME_SIZE: usize = 50;

/// Order of the "Favorites" category
pub const FAVORITES_CATEGORY: i64 = 6;

/// Orders of the language categories (Korean, Chinese, Japanese)
pub const LANGUAGE_CATEGORIES: [i64; 3] = [8, 9, 10];

/// Reference clocks the generator works with.
///
/// Every timestamp is derived by stepping back from "now" at most a book's
/// age plus a stale update window, or forward by one fetch delay, and must
/// stay a non-negative `i64`.
pub const NOW_MILLIS_RANGE: RangeInclusive<i64> =
    (*BOOK_AGE_DAYS.end() + *STALE_UPDATE_DAYS.end() + 1) * DAY_MS..=i64::MAX - DAY_MS;

const CATEGORY_NAMES: [&str; 10] = [
    "Reading",
    "Completed",
    "On Hold",
    "Plan to Read",
    "Dropped",
    "Favorites",
    "Re-reading",
    "Korean",
    "Chinese",
    "Japanese",
];

/// Number of sources books are drawn from; source ids are `1..=SOURCE_COUNT`
const SOURCE_COUNT: i64 = 10;
const BOOK_AGE_DAYS: RangeInclusive<i64> = 30..=365;
const STALE_UPDATE_DAYS: RangeInclusive<i64> = 30..=180;
const FETCH_DELAY_MS: RangeInclusive<i64> = 0..=3_600_000;
const READ_JITTER_LOW: f64 = 0.8;
const READ_JITTER_HIGH: f64 = 1.2;
const TRANSLATOR_CHANCE: f64 = 0.15;
const BOOKMARK_CHANCE: f64 = 0.03;
const FAVORITE_CHANCE: f64 = 0.10;
const LANGUAGE_CHANCE: f64 = 0.30;
const EXTRA_HISTORY_CHANCE: f64 = 0.5;
const PROGRESS_INTERVAL: usize = 1_000;

/// Configuration for the generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed of the generation-wide random source
    pub seed: u64,
    /// Reference "now" in epoch milliseconds
    pub now_millis: i64,
    /// Status given to every book instead of a random draw
    pub pinned_status: Option<ReadingStatus>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            // 2024-01-01T00:00:00Z
            now_millis: 1_704_067_200_000,
            pinned_status: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the reference clock. [`LibraryGenerator`] clamps it into
    /// [`NOW_MILLIS_RANGE`].
    pub fn now_millis(mut self, now: i64) -> Self {
        self.now_millis = now;
        self
    }

    /// Pins every book to one reading status
    pub fn pinned_status(mut self, status: Option<ReadingStatus>) -> Self {
        self.pinned_status = status;
        self
    }
}

/// A generated book together with the facts used to build it
#[derive(Debug, Clone)]
pub struct GeneratedBook {
    /// The book record
    pub book: Book,
    /// Reading status it was generated for
    pub status: ReadingStatus,
    /// Number of leading chapters marked read; the last of them is current
    pub chapters_read: usize,
}

/// A complete generated backup and its statistics
#[derive(Debug, Clone)]
pub struct GeneratedLibrary {
    /// Books in index order and the fixed categories
    pub backup: Backup,
    /// Totals over all books
    pub stats: LibraryStats,
}

/// Builds internally consistent books from one random source
#[derive(Debug)]
pub struct LibraryGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Default for LibraryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryGenerator {
    /// Creates a generator with default configuration
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Creates a generator with custom configuration
    pub fn with_config(mut config: GeneratorConfig) -> Self {
        let clamped = config
            .now_millis
            .clamp(*NOW_MILLIS_RANGE.start(), *NOW_MILLIS_RANGE.end());
        if clamped != config.now_millis {
            warn!("Reference time {} out of range, using {}", config.now_millis, clamped);
            config.now_millis = clamped;
        }
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Returns the configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The fixed category collection, orders `1..=10`
    pub fn default_categories() -> Vec<Category> {
        CATEGORY_NAMES
            .iter()
            .zip(1..)
            .map(|(name, order)| Category::new(*name, order))
            .collect()
    }

    /// Generates books `1..=count` in order, plus the categories
    pub fn generate(&mut self, count: usize) -> GeneratedLibrary {
        let started = Instant::now();
        let mut stats = LibraryStats::default();
        let mut library = Vec::with_capacity(count);

        for index in 1..=count {
            let generated = self.generate_book(index as i64);
            stats.record(&generated);
            library.push(generated.book);

            if index % PROGRESS_INTERVAL == 0 {
                let elapsed = started.elapsed().as_secs_f64().max(f64::EPSILON);
                let rate = index as f64 / elapsed;
                info!(
                    "Generated {} / {} books ({:.0} books/sec, ~{:.0}s remaining)",
                    index,
                    count,
                    rate,
                    (count - index) as f64 / rate
                );
            }
        }

        GeneratedLibrary {
            backup: Backup {
                library,
                categories: Self::default_categories(),
            },
            stats,
        }
    }

    /// Generates a single book
    pub fn generate_book(&mut self, book_id: i64) -> GeneratedBook {
        let now = self.config.now_millis;
        let source_id = self.rng.gen_range(1..=SOURCE_COUNT);
        let status = match self.config.pinned_status {
            Some(status) => status,
            None => ReadingStatus::sample(&mut self.rng),
        };

        let chapter_count = self.rng.gen_range(status.chapter_count_range());
        let read_fraction = status.read_fraction(&mut self.rng);
        let timeline = self.chapters(book_id, chapter_count, read_fraction);

        let genres = vocabulary::genres(&mut self.rng);
        let categories = self.categories(status);

        let publication = status.publication_status(&mut self.rng);
        let last_update = if publication == PublicationStatus::Ongoing {
            now - self.rng.gen_range(0..=7 * DAY_MS)
        } else {
            now - self.rng.gen_range(STALE_UPDATE_DAYS) * DAY_MS
        };

        let histories = self.histories(book_id, status, &timeline.chapters, timeline.chapters_read);

        debug!(
            "Book {}: {} with {}/{} chapters read",
            book_id,
            status,
            timeline.chapters_read,
            timeline.chapters.len()
        );

        let book = Book {
            source_id,
            key: format!("/novel/{}", book_id),
            title: vocabulary::title(&mut self.rng),
            author: Some(vocabulary::person(&mut self.rng)),
            description: Some(vocabulary::description(&mut self.rng)),
            genres,
            status: publication,
            cover: Some(format!("https://picsum.photos/seed/{}/300/400", book_id)),
            last_update,
            initialized: true,
            date_added: timeline.added_at,
            chapters: timeline.chapters,
            categories,
            histories,
        };

        GeneratedBook {
            book,
            status,
            chapters_read: timeline.chapters_read,
        }
    }

    fn chapters(&mut self, book_id: i64, count: usize, read_fraction: f64) -> Timeline {
        let age_days = self.rng.gen_range(BOOK_AGE_DAYS);
        let added_at = self.config.now_millis - age_days * DAY_MS;
        let interval = age_days * DAY_MS / count.max(1) as i64;

        let jitter = self.rng.gen_range(READ_JITTER_LOW..READ_JITTER_HIGH);
        let chapters_read = ((count as f64 * read_fraction * jitter).round() as usize).min(count);

        let mut chapters = Vec::with_capacity(count);
        for index in 1..=count {
            let date_upload = added_at + index as i64 * interval;
            let date_fetch = date_upload + self.rng.gen_range(FETCH_DELAY_MS);
            let read = index <= chapters_read;

            let title = vocabulary::chapter_title(&mut self.rng, index);
            let name = if count > VOLUME_SIZE && index % VOLUME_SIZE == 1 {
                format!(
                    "Volume {} - Chapter {}: {}",
                    (index - 1) / VOLUME_SIZE + 1,
                    index,
                    title
                )
            } else {
                format!("Chapter {}: {}", index, title)
            };

            let translator = self
                .rng
                .gen_bool(TRANSLATOR_CHANCE)
                .then(|| vocabulary::person(&mut self.rng));
            let bookmark = self.rng.gen_bool(BOOKMARK_CHANCE);

            let last_page_read = if index == chapters_read {
                self.rng.gen_range(CURRENT_PAGE_OFFSET)
            } else if read {
                self.rng.gen_range(READ_PAGE_OFFSET)
            } else {
                0
            };

            chapters.push(Chapter {
                key: format!("/novel/{}/chapter-{}", book_id, index),
                name,
                translator,
                read,
                bookmark,
                date_fetch,
                date_upload,
                number: index as f32,
                source_order: index as i64,
                chapter_type: 0,
                last_page_read,
            });
        }

        Timeline {
            chapters,
            chapters_read,
            added_at,
        }
    }

    fn histories(
        &mut self,
        book_id: i64,
        status: ReadingStatus,
        chapters: &[Chapter],
        chapters_read: usize,
    ) -> Vec<History> {
        let Some(age) = status.last_read_age(&mut self.rng) else {
            return Vec::new();
        };
        if chapters_read == 0 {
            return Vec::new();
        }

        let current = &chapters[chapters_read - 1];
        let read_at = (self.config.now_millis - age).max(current.date_upload);
        let mut histories = vec![History {
            book_id,
            chapter_id: current.source_order,
            read_at,
            progress: self.rng.gen_range(status.progress_range()),
        }];

        if status == ReadingStatus::Reading && self.rng.gen_bool(EXTRA_HISTORY_CHANCE) {
            let extra = self.rng.gen_range(1..=3);
            let mut index = chapters_read;
            let mut at = read_at;
            for _ in 0..extra {
                // Walk back: earlier chapter, earlier time, never before upload
                index = index.saturating_sub(self.rng.gen_range(1..=10)).max(1);
                let chapter = &chapters[index - 1];
                at = (at - self.rng.gen_range(1..=7) * DAY_MS).max(chapter.date_upload);
                histories.push(History {
                    book_id,
                    chapter_id: chapter.source_order,
                    read_at: at,
                    progress: self.rng.gen_range(50..=100),
                });
            }
        }

        histories
    }

    fn categories(&mut self, status: ReadingStatus) -> Vec<i64> {
        let mut ids = vec![status.primary_category()];
        if status.can_be_favorite() && self.rng.gen_bool(FAVORITE_CHANCE) {
            ids.push(FAVORITES_CATEGORY);
        }
        if self.rng.gen_bool(LANGUAGE_CHANCE) {
            ids.push(LANGUAGE_CATEGORIES[self.rng.gen_range(0..LANGUAGE_CATEGORIES.len())]);
        }
        ids
    }
}

struct Timeline {
    chapters: Vec<Chapter>,
    chapters_read: usize,
    added_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Encode;
    use pretty_assertions::assert_eq;

    fn generator(seed: u64) -> LibraryGenerator {
        LibraryGenerator::with_config(GeneratorConfig::new().seed(seed))
    }

    fn books(seed: u64, count: usize) -> Vec<GeneratedBook> {
        let mut generator = generator(seed);
        (1..=count as i64).map(|id| generator.generate_book(id)).collect()
    }

    #[test]
    fn test_default_categories() {
        let categories = LibraryGenerator::default_categories();
        assert_eq!(categories.len(), 10);
        let orders: Vec<i64> = categories.iter().map(|c| c.order).collect();
        assert_eq!(orders, (1..=10).collect::<Vec<_>>());
        assert_eq!(categories[5].name, "Favorites");
        assert_eq!(categories[9].name, "Japanese");
    }

    #[test]
    fn test_chapter_timeline_is_ordered() {
        for generated in books(1, 40) {
            let chapters = &generated.book.chapters;
            assert!(generated.status.chapter_count_range().contains(&chapters.len()));
            for (i, chapter) in chapters.iter().enumerate() {
                assert_eq!(chapter.source_order, i as i64 + 1);
                assert!(chapter.date_fetch >= chapter.date_upload);
                assert!(chapter.date_upload <= GeneratorConfig::default().now_millis);
            }
            for pair in chapters.windows(2) {
                assert!(pair[0].date_upload <= pair[1].date_upload);
            }
        }
    }

    #[test]
    fn test_current_chapter_offsets() {
        for generated in books(2, 60) {
            let read = generated.chapters_read;
            let chapters = &generated.book.chapters;
            assert!(read <= chapters.len());

            if read > 0 {
                let current = &chapters[read - 1];
                assert!(current.read);
                assert!(CURRENT_PAGE_OFFSET.contains(&current.last_page_read));
                for chapter in &chapters[..read - 1] {
                    assert!(chapter.read);
                    assert!(READ_PAGE_OFFSET.contains(&chapter.last_page_read));
                    assert!(chapter.last_page_read < current.last_page_read);
                }
            }
            for chapter in &chapters[read..] {
                assert!(!chapter.read);
                assert_eq!(chapter.last_page_read, 0);
            }
        }
    }

    #[test]
    fn test_plan_to_read_has_no_history() {
        let mut generator = LibraryGenerator::with_config(
            GeneratorConfig::new()
                .seed(3)
                .pinned_status(Some(ReadingStatus::PlanToRead)),
        );
        for id in 1..=30 {
            let generated = generator.generate_book(id);
            assert_eq!(generated.status, ReadingStatus::PlanToRead);
            assert_eq!(generated.chapters_read, 0);
            assert!(generated.book.histories.is_empty());
            assert!(generated.book.chapters.iter().all(|c| !c.read));
        }
    }

    #[test]
    fn test_history_iff_started() {
        for generated in books(4, 200) {
            let started = generated.status != ReadingStatus::PlanToRead;
            assert_eq!(!generated.book.histories.is_empty(), started);
        }
    }

    #[test]
    fn test_history_never_precedes_upload() {
        for generated in books(5, 200) {
            let book = &generated.book;
            for history in &book.histories {
                assert_eq!(history.book_id, book.key[7..].parse::<i64>().unwrap());
                let chapter = &book.chapters[history.chapter_id as usize - 1];
                assert!(history.read_at >= chapter.date_upload);
                assert!((0..=100).contains(&history.progress));
            }
            if let Some(first) = book.histories.first() {
                assert_eq!(first.chapter_id, generated.chapters_read as i64);
                assert!(generated.status.progress_range().contains(&first.progress));
            }
            for pair in book.histories.windows(2) {
                assert!(pair[1].chapter_id <= pair[0].chapter_id);
                assert!(pair[1].read_at <= pair[0].read_at);
            }
        }
    }

    #[test]
    fn test_extra_history_only_when_reading() {
        for generated in books(6, 200) {
            let extra = generated.book.histories.len().saturating_sub(1);
            if generated.status != ReadingStatus::Reading {
                assert_eq!(extra, 0);
            }
            assert!(extra <= 3);
        }
    }

    #[test]
    fn test_categories_follow_status() {
        let all: Vec<i64> = LibraryGenerator::default_categories()
            .iter()
            .map(|c| c.order)
            .collect();
        for generated in books(7, 200) {
            let ids = &generated.book.categories;
            assert_eq!(ids[0], generated.status.primary_category());
            assert!(ids.iter().all(|id| all.contains(id)));
            if ids.contains(&FAVORITES_CATEGORY) {
                assert!(generated.status.can_be_favorite());
            }
            assert!(ids.iter().filter(|id| LANGUAGE_CATEGORIES.contains(id)).count() <= 1);
        }
    }

    #[test]
    fn test_metadata_non_empty() {
        for generated in books(8, 50) {
            let book = &generated.book;
            assert!((1..=10).contains(&book.source_id));
            assert!(!book.title.is_empty());
            assert!(book.author.as_deref().is_some_and(|a| !a.is_empty()));
            assert!(book.description.as_deref().is_some_and(|d| !d.is_empty()));
            assert!((1..=5).contains(&book.genres.len()));
            assert!(book.initialized);
            assert!(book.last_update <= GeneratorConfig::default().now_millis);
        }
    }

    #[test]
    fn test_volume_labels() {
        let mut generator = LibraryGenerator::with_config(
            GeneratorConfig::new()
                .seed(9)
                .pinned_status(Some(ReadingStatus::Completed)),
        );
        let generated = generator.generate_book(1);
        let chapters = &generated.book.chapters;
        assert!(chapters.len() >= VOLUME_SIZE);
        if chapters.len() > VOLUME_SIZE {
            assert!(chapters[0].name.starts_with("Volume 1 - Chapter 1: The Beginning"));
            assert!(chapters[50].name.starts_with("Volume 2 - Chapter 51: "));
        } else {
            assert_eq!(chapters[0].name, "Chapter 1: The Beginning");
        }
        assert_eq!(chapters[1].name, "Chapter 2: A New Dawn");
    }

    #[test]
    fn test_clock_bounds_yield_encodable_books() {
        let bounds = [*NOW_MILLIS_RANGE.start(), *NOW_MILLIS_RANGE.end()];
        for now in bounds {
            let mut generator =
                LibraryGenerator::with_config(GeneratorConfig::new().seed(11).now_millis(now));
            for generated in (1..=40).map(|id| generator.generate_book(id)) {
                let book = &generated.book;
                assert!(book.date_added >= 0);
                assert!(book.last_update >= 0);
                assert!(book.chapters.iter().all(|c| c.date_fetch >= c.date_upload));
                book.encode_to_vec().unwrap();
            }
        }
    }

    #[test]
    fn test_clock_outside_range_is_clamped() {
        for (now, expected) in [
            (i64::MAX, *NOW_MILLIS_RANGE.end()),
            (1_000, *NOW_MILLIS_RANGE.start()),
            (-5, *NOW_MILLIS_RANGE.start()),
        ] {
            let config = GeneratorConfig::new().now_millis(now);
            let mut generator = LibraryGenerator::with_config(config);
            assert_eq!(generator.config().now_millis, expected);
            generator.generate(2).backup.encode_to_vec().unwrap();
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generator(42).generate(5);
        let b = generator(42).generate(5);
        assert_eq!(a.backup, b.backup);
        assert_eq!(a.stats, b.stats);

        let c = generator(43).generate(5);
        assert_ne!(a.backup, c.backup);
    }

    #[test]
    fn test_generate_counts_and_order() {
        let library = generator(10).generate(25);
        assert_eq!(library.backup.library.len(), 25);
        assert_eq!(library.stats.books, 25);
        assert_eq!(library.stats.chapters_total, library.backup.chapter_count());
        assert!(library.backup.categories_resolve());
        for (i, book) in library.backup.library.iter().enumerate() {
            assert_eq!(book.key, format!("/novel/{}", i + 1));
        }
    }
}
