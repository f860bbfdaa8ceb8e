//! Records making up a reading-library backup.
//!
//! All records are plain owned values. A [`Backup`] owns its books and
//! categories outright; the only cross-reference is [`Book::categories`],
//! which holds [`Category::order`] values of categories in the same backup.

/// Publication status of a book, as reported by its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PublicationStatus {
    /// Status not reported
    #[default]
    Unknown = 0,
    /// Still releasing chapters
    Ongoing = 1,
    /// Finished
    Completed = 2,
    /// Licensed and removed from the source
    Licensed = 3,
    /// Publication finished, translation may lag
    PublishingFinished = 4,
    /// Cancelled by the author
    Cancelled = 5,
    /// Paused
    OnHiatus = 6,
}

impl PublicationStatus {
    /// Wire value of the status
    pub fn code(self) -> i64 {
        self as i64
    }
}

/// A single chapter of a book
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chapter {
    /// Unique path of the chapter on its source
    pub key: String,
    /// Display name
    pub name: String,
    /// Translator credit, if any
    pub translator: Option<String>,
    /// Whether the chapter has been read
    pub read: bool,
    /// Whether the chapter is bookmarked
    pub bookmark: bool,
    /// When the chapter was fetched (epoch ms), never before `date_upload`
    pub date_fetch: i64,
    /// When the chapter was published (epoch ms)
    pub date_upload: i64,
    /// Chapter number as shown to readers
    pub number: f32,
    /// 1-based position in the source's chapter list
    pub source_order: i64,
    /// Content type code
    pub chapter_type: i64,
    /// Scroll offset where reading stopped
    pub last_page_read: i64,
}

/// One entry of a book's reading history
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct History {
    /// Book the entry belongs to
    pub book_id: i64,
    /// `source_order` of the chapter that was read
    pub chapter_id: i64,
    /// When the chapter was read (epoch ms)
    pub read_at: i64,
    /// Reading progress within the chapter, 0-100
    pub progress: i64,
}

/// A book in the library, with its chapters and history
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Book {
    /// Id of the source the book comes from
    pub source_id: i64,
    /// Unique path of the book on its source
    pub key: String,
    /// Title
    pub title: String,
    /// Author, if known
    pub author: Option<String>,
    /// Synopsis, if known
    pub description: Option<String>,
    /// Genres, without duplicates, in display order
    pub genres: Vec<String>,
    /// Publication status
    pub status: PublicationStatus,
    /// Cover image URL
    pub cover: Option<String>,
    /// Last time new chapters appeared (epoch ms)
    pub last_update: i64,
    /// Whether the book details have been fetched
    pub initialized: bool,
    /// When the book was added to the library (epoch ms)
    pub date_added: i64,
    /// Chapters ordered by `source_order`
    pub chapters: Vec<Chapter>,
    /// `order` values of the categories the book is filed under
    pub categories: Vec<i64>,
    /// Reading history, most recent first
    pub histories: Vec<History>,
}

/// A user-defined shelf
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Category {
    /// Display name
    pub name: String,
    /// Sort key, also used as the category id
    pub order: i64,
    /// Library update interval for this category
    pub update_interval: i64,
    /// Display flags
    pub flags: i64,
}

impl Category {
    /// Creates a category with no update interval or flags
    pub fn new(name: impl Into<String>, order: i64) -> Self {
        Self {
            name: name.into(),
            order,
            ..Self::default()
        }
    }
}

/// Top-level unit of serialization
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Backup {
    /// All books in the library
    pub library: Vec<Book>,
    /// All categories
    pub categories: Vec<Category>,
}

impl Backup {
    /// Total number of chapters across all books
    pub fn chapter_count(&self) -> usize {
        self.library.iter().map(|b| b.chapters.len()).sum()
    }

    /// Returns true if every category id referenced by a book exists
    pub fn categories_resolve(&self) -> bool {
        self.library.iter().all(|book| {
            book.categories
                .iter()
                .all(|id| self.categories.iter().any(|c| c.order == *id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_status_codes() {
        assert_eq!(PublicationStatus::default().code(), 0);
        assert_eq!(PublicationStatus::Ongoing.code(), 1);
        assert_eq!(PublicationStatus::OnHiatus.code(), 6);
    }

    #[test]
    fn test_categories_resolve() {
        let mut backup = Backup {
            library: vec![Book {
                categories: vec![1, 2],
                ..Book::default()
            }],
            categories: vec![Category::new("Reading", 1), Category::new("Completed", 2)],
        };
        assert!(backup.categories_resolve());

        backup.library[0].categories.push(9);
        assert!(!backup.categories_resolve());
    }
}
