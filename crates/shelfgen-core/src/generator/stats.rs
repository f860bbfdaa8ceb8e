//! Aggregate statistics over a generated library.

use std::fmt;

use super::{GeneratedBook, ReadingStatus};

/// Totals collected while books are generated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryStats {
    /// Books generated
    pub books: usize,
    /// Books per reading status, indexed by [`ReadingStatus::index`]
    pub by_status: [usize; 5],
    /// Chapters marked read
    pub chapters_read: usize,
    /// Chapters across all books
    pub chapters_total: usize,
    /// Books with at least one history entry
    pub books_with_history: usize,
}

impl LibraryStats {
    /// Adds one book to the totals
    pub fn record(&mut self, generated: &GeneratedBook) {
        self.books += 1;
        self.by_status[generated.status.index()] += 1;
        self.chapters_read += generated.chapters_read;
        self.chapters_total += generated.book.chapters.len();
        if !generated.book.histories.is_empty() {
            self.books_with_history += 1;
        }
    }

    /// Books generated with `status`
    pub fn count(&self, status: ReadingStatus) -> usize {
        self.by_status[status.index()]
    }

    /// Mean chapters per book, rounded down
    pub fn average_chapters(&self) -> usize {
        self.chapters_total / self.books.max(1)
    }
}

fn percent(part: usize, whole: usize) -> usize {
    part * 100 / whole.max(1)
}

impl fmt::Display for LibraryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Library Stats ---")?;
        writeln!(f, "Total Books: {}", self.books)?;
        writeln!(f, "Total Chapters: {}", self.chapters_total)?;
        writeln!(f, "Avg Chapters/Book: {}", self.average_chapters())?;
        writeln!(f)?;
        writeln!(f, "--- Reading Status ---")?;
        for status in ReadingStatus::ALL {
            let count = self.count(status);
            writeln!(
                f,
                "  {}: {} ({}%)",
                status.label(),
                count,
                percent(count, self.books)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "--- Progress ---")?;
        writeln!(
            f,
            "  Chapters Read: {} / {} ({}%)",
            self.chapters_read,
            self.chapters_total,
            percent(self.chapters_read, self.chapters_total)
        )?;
        write!(
            f,
            "  Books with History: {} ({}%)",
            self.books_with_history,
            percent(self.books_with_history, self.books)
        )
    }
}
