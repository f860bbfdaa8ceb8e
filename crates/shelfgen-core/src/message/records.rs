//! Wire layout of the backup records.

use super::{Encode, MessageBuilder};
use crate::error::Result;
use crate::model::{Backup, Book, Category, Chapter, History};

/// Field numbers of `Chapter`. Field 10 (content) is never written.
pub mod chapter {
    /// key: string
    pub const KEY: u32 = 1;
    /// name: string
    pub const NAME: u32 = 2;
    /// translator: string
    pub const TRANSLATOR: u32 = 3;
    /// read: bool
    pub const READ: u32 = 4;
    /// bookmark: bool
    pub const BOOKMARK: u32 = 5;
    /// dateFetch: int64
    pub const DATE_FETCH: u32 = 6;
    /// dateUpload: int64
    pub const DATE_UPLOAD: u32 = 7;
    /// number: float
    pub const NUMBER: u32 = 8;
    /// sourceOrder: int64
    pub const SOURCE_ORDER: u32 = 9;
    /// type: int64
    pub const TYPE: u32 = 11;
    /// lastPageRead: int64
    pub const LAST_PAGE_READ: u32 = 12;
}

/// Field numbers of `History`
pub mod history {
    /// bookId: int64
    pub const BOOK_ID: u32 = 1;
    /// chapterId: int64
    pub const CHAPTER_ID: u32 = 2;
    /// readAt: int64
    pub const READ_AT: u32 = 3;
    /// progress: int64
    pub const PROGRESS: u32 = 4;
}

/// Field numbers of `Book`. Fields 9, 13, 14 and 17 are never written.
pub mod book {
    /// sourceId: int64
    pub const SOURCE_ID: u32 = 1;
    /// key: string
    pub const KEY: u32 = 2;
    /// title: string
    pub const TITLE: u32 = 3;
    /// author: string
    pub const AUTHOR: u32 = 4;
    /// description: string
    pub const DESCRIPTION: u32 = 5;
    /// genres: repeated string
    pub const GENRES: u32 = 6;
    /// status: int64
    pub const STATUS: u32 = 7;
    /// cover: string
    pub const COVER: u32 = 8;
    /// lastUpdate: int64
    pub const LAST_UPDATE: u32 = 10;
    /// initialized: bool
    pub const INITIALIZED: u32 = 11;
    /// dateAdded: int64
    pub const DATE_ADDED: u32 = 12;
    /// chapters: repeated Chapter
    pub const CHAPTERS: u32 = 15;
    /// categories: repeated int64
    pub const CATEGORIES: u32 = 16;
    /// histories: repeated History
    pub const HISTORIES: u32 = 18;
}

/// Field numbers of `Category`
pub mod category {
    /// name: string
    pub const NAME: u32 = 1;
    /// order: int64
    pub const ORDER: u32 = 2;
    /// updateInterval: int32
    pub const UPDATE_INTERVAL: u32 = 3;
    /// flags: int64
    pub const FLAGS: u32 = 4;
}

/// Field numbers of the top-level `Backup`
pub mod backup {
    /// library: repeated Book
    pub const LIBRARY: u32 = 1;
    /// categories: repeated Category
    pub const CATEGORIES: u32 = 2;
}

impl Encode for Chapter {
    const NAME: &'static str = "Chapter";

    fn encode_fields(&self, msg: &mut MessageBuilder) -> Result<()> {
        msg.string(chapter::KEY, &self.key);
        msg.string(chapter::NAME, &self.name);
        msg.optional_string(chapter::TRANSLATOR, self.translator.as_deref());
        msg.bool(chapter::READ, self.read);
        msg.bool(chapter::BOOKMARK, self.bookmark);
        msg.uint64(Self::NAME, chapter::DATE_FETCH, self.date_fetch)?;
        msg.uint64(Self::NAME, chapter::DATE_UPLOAD, self.date_upload)?;
        msg.float(chapter::NUMBER, self.number);
        msg.uint64(Self::NAME, chapter::SOURCE_ORDER, self.source_order)?;
        msg.uint64(Self::NAME, chapter::TYPE, self.chapter_type)?;
        msg.uint64(Self::NAME, chapter::LAST_PAGE_READ, self.last_page_read)
    }
}

impl Encode for History {
    const NAME: &'static str = "History";

    fn encode_fields(&self, msg: &mut MessageBuilder) -> Result<()> {
        msg.uint64(Self::NAME, history::BOOK_ID, self.book_id)?;
        msg.uint64(Self::NAME, history::CHAPTER_ID, self.chapter_id)?;
        msg.uint64(Self::NAME, history::READ_AT, self.read_at)?;
        msg.uint64(Self::NAME, history::PROGRESS, self.progress)
    }
}

impl Encode for Book {
    const NAME: &'static str = "Book";

    fn encode_fields(&self, msg: &mut MessageBuilder) -> Result<()> {
        msg.uint64(Self::NAME, book::SOURCE_ID, self.source_id)?;
        msg.string(book::KEY, &self.key);
        msg.string(book::TITLE, &self.title);
        msg.optional_string(book::AUTHOR, self.author.as_deref());
        msg.optional_string(book::DESCRIPTION, self.description.as_deref());
        msg.repeated_strings(book::GENRES, &self.genres);
        msg.uint64(Self::NAME, book::STATUS, self.status.code())?;
        msg.optional_string(book::COVER, self.cover.as_deref());
        msg.uint64(Self::NAME, book::LAST_UPDATE, self.last_update)?;
        msg.bool(book::INITIALIZED, self.initialized);
        msg.uint64(Self::NAME, book::DATE_ADDED, self.date_added)?;
        msg.repeated_messages(book::CHAPTERS, &self.chapters)?;
        msg.repeated_uint64(Self::NAME, book::CATEGORIES, &self.categories)?;
        msg.repeated_messages(book::HISTORIES, &self.histories)
    }
}

impl Encode for Category {
    const NAME: &'static str = "Category";

    fn encode_fields(&self, msg: &mut MessageBuilder) -> Result<()> {
        msg.string(category::NAME, &self.name);
        msg.uint64(Self::NAME, category::ORDER, self.order)?;
        msg.uint64(Self::NAME, category::UPDATE_INTERVAL, self.update_interval)?;
        msg.uint64(Self::NAME, category::FLAGS, self.flags)
    }
}

impl Encode for Backup {
    const NAME: &'static str = "Backup";

    fn encode_fields(&self, msg: &mut MessageBuilder) -> Result<()> {
        msg.repeated_messages(backup::LIBRARY, &self.library)?;
        msg.repeated_messages(backup::CATEGORIES, &self.categories)
    }
}
