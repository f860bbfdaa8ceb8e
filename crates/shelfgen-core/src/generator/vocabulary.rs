//! Word lists and text templates for book metadata.

use rand::seq::SliceRandom;
use rand::Rng;

const GENRES: &[&str] = &[
    "Fantasy", "Romance", "Action", "Adventure", "Comedy", "Drama", "Horror",
    "Mystery", "Sci-Fi", "Slice of Life", "Supernatural", "Thriller", "Historical",
    "Martial Arts", "School Life", "Sports", "Tragedy", "Psychological", "Seinen",
    "Shounen", "Shoujo", "Josei", "Isekai", "Harem", "Mecha", "Wuxia", "Xianxia",
];

const TITLE_PREFIXES: &[&str] = &[
    "The", "A", "My", "Our", "Your", "His", "Her", "Their", "This", "That",
    "One", "Last", "First", "Final", "Ultimate", "Supreme", "Divine", "Eternal",
    "Infinite", "Legendary", "Epic", "Grand", "Great", "True", "Real", "Ancient",
];

const TITLE_NOUNS: &[&str] = &[
    "Hero", "King", "Queen", "Prince", "Princess", "Knight", "Mage", "Wizard",
    "Dragon", "Phoenix", "Wolf", "Tiger", "Lion", "Eagle", "Sword", "Shield",
    "Crown", "Throne", "Kingdom", "Empire", "World", "Universe", "Realm", "Domain",
    "Path", "Way", "Road", "Journey", "Adventure", "Quest", "Legend", "Myth",
    "Story", "Tale", "Chronicle", "Saga", "Epic", "Novel", "Cultivator", "Immortal",
];

const TITLE_SUFFIXES: &[&str] = &[
    "of Destiny", "of Fate", "of Power", "of Glory", "of Honor", "of Love",
    "of War", "of Peace", "of Light", "of Darkness", "of Fire", "of Ice",
    "of Thunder", "of Wind", "of Earth", "of Water", "of Life", "of Death",
    "Reborn", "Awakened", "Ascended", "Transcended", "Evolved", "Transformed",
    "Returns", "Rises", "Falls", "Begins", "Ends", "Continues", "System",
];

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "David", "Emily", "James", "Emma",
    "Robert", "Olivia", "William", "Sophia", "Richard", "Isabella", "Joseph",
    "Mia", "Thomas", "Charlotte", "Charles", "Amelia", "Daniel", "Harper",
    "Yuki", "Sakura", "Takeshi", "Haruki", "Kenji", "Akira", "Ryu", "Hana",
    "Wei", "Ming", "Chen", "Li", "Zhang", "Wang", "Liu", "Yang",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller",
    "Davis", "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez",
    "Wilson", "Anderson", "Thomas", "Taylor", "Moore", "Jackson", "Martin",
    "Tanaka", "Yamamoto", "Suzuki", "Watanabe", "Sato", "Nakamura", "Kobayashi",
    "Xiao", "Feng", "Huang", "Zhou", "Wu", "Xu", "Sun", "Ma",
];

/// Templates with four `{}` slots, filled in order
const DESCRIPTION_TEMPLATES: &[&str] = &[
    "In a world where {} rules, one {} must rise to challenge the {} and restore {} to the land.",
    "Follow the journey of {} as they discover their hidden {} and embark on an epic {} beyond {}.",
    "When {} threatens the kingdom, only the chosen {} can wield the ancient {} to bring back {}.",
    "A tale of {}, {}, and the unbreakable bonds of {} that transcend even {}.",
    "After being betrayed by {}, our hero seeks {} and discovers a power beyond {} and {}.",
    "In the realm of {}, where {} is everything, one person dares to challenge {} with only {}.",
    "The story of a young {} who dreams of becoming the greatest {} in all of {}, whatever the {}.",
];

const DESCRIPTION_WORDS: &[&str] = &[
    "power", "destiny", "fate", "love", "hatred", "courage", "wisdom",
    "strength", "magic", "darkness", "light", "hope", "despair",
    "friendship", "betrayal", "cultivation", "immortality",
];

/// Fixed names for the opening chapters of every book
const CHAPTER_TITLES: &[&str] = &[
    "The Beginning", "A New Dawn", "Awakening", "First Steps", "The Journey Begins",
    "Unexpected Encounter", "Hidden Truth", "Rising Storm", "Dark Clouds", "Light in Darkness",
    "The Challenge", "Trial by Fire", "Breaking Through", "New Power", "Revelation",
    "Betrayal", "Alliance", "The Hunt", "Escape", "Confrontation",
    "Battle Begins", "Turning Point", "Victory", "Defeat", "Recovery",
    "Training Arc", "New Technique", "Master's Teaching", "Breakthrough", "Advancement",
    "Secret Realm", "Ancient Ruins", "Hidden Treasure", "Dangerous Path", "Final Test",
    "Tournament Begins", "First Round", "Semifinals", "Finals", "Champion",
    "Return Home", "Family Reunion", "Old Friends", "New Enemies", "Preparation",
    "War Declaration", "Army Gathering", "March to Battle", "Siege", "Last Stand",
    "Sacrifice", "Miracle", "Rebirth", "Transcendence", "Epilogue",
];

/// Most genres a book carries
pub(crate) const MAX_GENRES: usize = 5;

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &'static [&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

pub(crate) fn title<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut parts = Vec::with_capacity(3);
    if rng.gen::<f64>() > 0.3 {
        parts.push(pick(rng, TITLE_PREFIXES));
    }
    parts.push(pick(rng, TITLE_NOUNS));
    if rng.gen::<f64>() > 0.4 {
        parts.push(pick(rng, TITLE_SUFFIXES));
    }
    parts.join(" ")
}

pub(crate) fn person<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

pub(crate) fn description<R: Rng + ?Sized>(rng: &mut R) -> String {
    let template = pick(rng, DESCRIPTION_TEMPLATES);
    let mut pieces = template.split("{}");
    let mut out = String::with_capacity(template.len() + 48);
    if let Some(head) = pieces.next() {
        out.push_str(head);
    }
    for piece in pieces {
        out.push_str(pick(rng, DESCRIPTION_WORDS));
        out.push_str(piece);
    }
    out
}

/// 1 to [`MAX_GENRES`] distinct genres
pub(crate) fn genres<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let count = rng.gen_range(1..=MAX_GENRES);
    GENRES
        .choose_multiple(rng, count)
        .map(|g| g.to_string())
        .collect()
}

/// Name of chapter `index` (1-based) without numbering
pub(crate) fn chapter_title<R: Rng + ?Sized>(rng: &mut R, index: usize) -> String {
    match CHAPTER_TITLES.get(index.wrapping_sub(1)) {
        Some(title) => title.to_string(),
        None => format!("{} {}", pick(rng, TITLE_NOUNS), pick(rng, TITLE_SUFFIXES)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_genres_are_distinct_and_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let genres = genres(&mut rng);
            assert!((1..=MAX_GENRES).contains(&genres.len()));
            let unique: HashSet<_> = genres.iter().collect();
            assert_eq!(unique.len(), genres.len());
        }
    }

    #[test]
    fn test_description_fills_every_slot() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let text = description(&mut rng);
            assert!(!text.contains("{}"));
            assert!(text.ends_with('.'));
        }
    }

    #[test]
    fn test_chapter_titles() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(chapter_title(&mut rng, 1), "The Beginning");
        assert_eq!(chapter_title(&mut rng, CHAPTER_TITLES.len()), "Epilogue");
        let later = chapter_title(&mut rng, CHAPTER_TITLES.len() + 1);
        assert!(later.split(' ').count() >= 2);
    }

    #[test]
    fn test_title_and_person_non_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            assert!(!title(&mut rng).is_empty());
            assert!(person(&mut rng).contains(' '));
        }
    }
}
