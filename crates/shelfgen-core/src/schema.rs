//! Mirror of the backup schema as `prost` messages.
//!
//! The encoder in [`crate::message`] writes bytes by hand; these types decode
//! them with a standard protobuf runtime so a generated backup can be checked
//! the same way the consuming application would read it.

use crate::error::Result;
use crate::model::Chapter;
use prost::Message;

/// Decoded `Chapter`
#[derive(Clone, PartialEq, Message)]
pub struct ChapterProto {
    /// key
    #[prost(string, tag = "1")]
    pub key: String,
    /// name
    #[prost(string, tag = "2")]
    pub name: String,
    /// translator
    #[prost(string, tag = "3")]
    pub translator: String,
    /// read
    #[prost(bool, tag = "4")]
    pub read: bool,
    /// bookmark
    #[prost(bool, tag = "5")]
    pub bookmark: bool,
    /// dateFetch
    #[prost(int64, tag = "6")]
    pub date_fetch: i64,
    /// dateUpload
    #[prost(int64, tag = "7")]
    pub date_upload: i64,
    /// number
    #[prost(float, tag = "8")]
    pub number: f32,
    /// sourceOrder
    #[prost(int64, tag = "9")]
    pub source_order: i64,
    /// content
    #[prost(string, tag = "10")]
    pub content: String,
    /// type
    #[prost(int64, tag = "11")]
    pub r#type: i64,
    /// lastPageRead
    #[prost(int64, tag = "12")]
    pub last_page_read: i64,
}

impl From<&Chapter> for ChapterProto {
    fn from(chapter: &Chapter) -> Self {
        Self {
            key: chapter.key.clone(),
            name: chapter.name.clone(),
            translator: chapter.translator.clone().unwrap_or_default(),
            read: chapter.read,
            bookmark: chapter.bookmark,
            date_fetch: chapter.date_fetch,
            date_upload: chapter.date_upload,
            number: chapter.number,
            source_order: chapter.source_order,
            content: String::new(),
            r#type: chapter.chapter_type,
            last_page_read: chapter.last_page_read,
        }
    }
}

/// Decoded `History`
#[derive(Clone, PartialEq, Message)]
pub struct HistoryProto {
    /// bookId
    #[prost(int64, tag = "1")]
    pub book_id: i64,
    /// chapterId
    #[prost(int64, tag = "2")]
    pub chapter_id: i64,
    /// readAt
    #[prost(int64, tag = "3")]
    pub read_at: i64,
    /// progress
    #[prost(int64, tag = "4")]
    pub progress: i64,
}

/// Decoded `Book`
#[derive(Clone, PartialEq, Message)]
pub struct BookProto {
    /// sourceId
    #[prost(int64, tag = "1")]
    pub source_id: i64,
    /// key
    #[prost(string, tag = "2")]
    pub key: String,
    /// title
    #[prost(string, tag = "3")]
    pub title: String,
    /// author
    #[prost(string, tag = "4")]
    pub author: String,
    /// description
    #[prost(string, tag = "5")]
    pub description: String,
    /// genres
    #[prost(string, repeated, tag = "6")]
    pub genres: Vec<String>,
    /// status
    #[prost(int64, tag = "7")]
    pub status: i64,
    /// cover
    #[prost(string, tag = "8")]
    pub cover: String,
    /// lastUpdate
    #[prost(int64, tag = "10")]
    pub last_update: i64,
    /// initialized
    #[prost(bool, tag = "11")]
    pub initialized: bool,
    /// dateAdded
    #[prost(int64, tag = "12")]
    pub date_added: i64,
    /// chapters
    #[prost(message, repeated, tag = "15")]
    pub chapters: Vec<ChapterProto>,
    /// categories
    #[prost(int64, repeated, packed = "false", tag = "16")]
    pub categories: Vec<i64>,
    /// histories
    #[prost(message, repeated, tag = "18")]
    pub histories: Vec<HistoryProto>,
}

/// Decoded `Category`
#[derive(Clone, PartialEq, Message)]
pub struct CategoryProto {
    /// name
    #[prost(string, tag = "1")]
    pub name: String,
    /// order
    #[prost(int64, tag = "2")]
    pub order: i64,
    /// updateInterval
    #[prost(int32, tag = "3")]
    pub update_interval: i32,
    /// flags
    #[prost(int64, tag = "4")]
    pub flags: i64,
}

/// Decoded top-level `Backup`
#[derive(Clone, PartialEq, Message)]
pub struct BackupProto {
    /// library
    #[prost(message, repeated, tag = "1")]
    pub library: Vec<BookProto>,
    /// categories
    #[prost(message, repeated, tag = "2")]
    pub categories: Vec<CategoryProto>,
}

/// Counts taken from a decoded backup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackupSummary {
    /// Number of books
    pub books: usize,
    /// Number of categories
    pub categories: usize,
    /// Chapters across all books
    pub chapters: usize,
    /// History entries across all books
    pub histories: usize,
    /// Category orders, ascending
    pub category_orders: Vec<i64>,
}

impl BackupSummary {
    /// Decodes `data` as a backup and summarizes it
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let backup = BackupProto::decode(data)?;
        Ok(Self::from_proto(&backup))
    }

    /// Summarizes an already decoded backup
    pub fn from_proto(backup: &BackupProto) -> Self {
        let mut category_orders: Vec<i64> = backup.categories.iter().map(|c| c.order).collect();
        category_orders.sort_unstable();

        Self {
            books: backup.library.len(),
            categories: backup.categories.len(),
            chapters: backup.library.iter().map(|b| b.chapters.len()).sum(),
            histories: backup.library.iter().map(|b| b.histories.len()).sum(),
            category_orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_empty_backup() {
        let summary = BackupSummary::from_bytes(&[]).unwrap();
        assert_eq!(summary, BackupSummary::default());
    }

    #[test]
    fn test_summary_rejects_garbage() {
        // Field 1 as LEN claiming 5 bytes with only 1 present
        assert!(BackupSummary::from_bytes(&[0x0A, 0x05, 0x00]).is_err());
    }

    #[test]
    fn test_summary_counts() {
        let backup = BackupProto {
            library: vec![BookProto {
                chapters: vec![ChapterProto::default(), ChapterProto::default()],
                histories: vec![HistoryProto::default()],
                ..BookProto::default()
            }],
            categories: vec![
                CategoryProto {
                    order: 2,
                    ..CategoryProto::default()
                },
                CategoryProto {
                    order: 1,
                    ..CategoryProto::default()
                },
            ],
        };
        let summary = BackupSummary::from_bytes(&backup.encode_to_vec()).unwrap();
        assert_eq!(summary.books, 1);
        assert_eq!(summary.chapters, 2);
        assert_eq!(summary.histories, 1);
        assert_eq!(summary.category_orders, vec![1, 2]);
    }
}
