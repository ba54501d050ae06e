//! Theme descriptors and the sticker catalog
//!
//! A theme is a plain value: an emoji, a display name and an ordered list of
//! color-role tokens. Rendering those tokens is left to the client; this
//! module only maps priorities and location tags to semantic roles.

use crate::tasks::{Location, Priority, Sticker};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in themes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Ocean,
    Forest,
    Sunset,
    Moonlight,
    Aurora,
}

impl ThemeId {
    pub const ALL: [ThemeId; 5] = [
        ThemeId::Ocean,
        ThemeId::Forest,
        ThemeId::Sunset,
        ThemeId::Moonlight,
        ThemeId::Aurora,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Ocean => "ocean",
            ThemeId::Forest => "forest",
            ThemeId::Sunset => "sunset",
            ThemeId::Moonlight => "moonlight",
            ThemeId::Aurora => "aurora",
        }
    }

    pub fn descriptor(&self) -> &'static ThemeDescriptor {
        let index = ThemeId::ALL.iter().position(|t| t == self).unwrap_or(0);
        &THEMES[index]
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ThemeId::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "Invalid theme '{}'. Valid options are: ocean, forest, sunset, moonlight, aurora",
                    s
                )
            })
    }
}

/// What the core knows about a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeDescriptor {
    pub id: ThemeId,
    pub name: &'static str,
    pub emoji: &'static str,
    /// Ordered color-role tokens: gradient start, gradient end, accent
    pub color_roles: &'static [&'static str],
}

impl ThemeDescriptor {
    /// Accent token, the last color role
    pub fn accent(&self) -> Option<&'static str> {
        self.color_roles.last().copied()
    }
}

pub const THEMES: [ThemeDescriptor; 5] = [
    ThemeDescriptor {
        id: ThemeId::Ocean,
        name: "Ocean",
        emoji: "🌊",
        color_roles: &["from-blue-100", "to-blue-200", "bg-blue-600"],
    },
    ThemeDescriptor {
        id: ThemeId::Forest,
        name: "Forest",
        emoji: "🌲",
        color_roles: &["from-green-100", "to-green-200", "bg-green-600"],
    },
    ThemeDescriptor {
        id: ThemeId::Sunset,
        name: "Sunset",
        emoji: "🌅",
        color_roles: &["from-orange-100", "to-pink-200", "bg-orange-600"],
    },
    ThemeDescriptor {
        id: ThemeId::Moonlight,
        name: "Moonlight",
        emoji: "🌙",
        color_roles: &["from-indigo-100", "to-purple-200", "bg-indigo-600"],
    },
    ThemeDescriptor {
        id: ThemeId::Aurora,
        name: "Aurora",
        emoji: "✨",
        color_roles: &["from-teal-100", "to-emerald-200", "bg-teal-600"],
    },
];

/// Semantic emphasis a client should give an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Neutral,
    Subtle,
    Standard,
    Strong,
}

impl ColorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorRole::Neutral => "neutral",
            ColorRole::Subtle => "subtle",
            ColorRole::Standard => "standard",
            ColorRole::Strong => "strong",
        }
    }
}

pub fn priority_role(priority: Priority) -> ColorRole {
    match priority {
        Priority::None => ColorRole::Neutral,
        Priority::Low => ColorRole::Subtle,
        Priority::Medium => ColorRole::Standard,
        Priority::High => ColorRole::Strong,
    }
}

/// Badge shown next to a task's location tag, `None` for `any`
pub fn location_badge(location: Location) -> Option<&'static str> {
    match location {
        Location::Any => None,
        Location::Indoor => Some("🏠"),
        Location::Outdoor => Some("☀️"),
    }
}

/// A named group of stickers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickerCategory {
    pub key: &'static str,
    pub name: &'static str,
    /// `(key, emoji, label)`
    pub stickers: &'static [(&'static str, &'static str, &'static str)],
}

pub const STICKER_CATALOG: [StickerCategory; 7] = [
    StickerCategory {
        key: "events",
        name: "Events",
        stickers: &[
            ("birthday", "🎂", "Birthday"),
            ("meeting", "📊", "Meeting"),
            ("deadline", "⏰", "Deadline"),
            ("party", "🎉", "Party"),
            ("travel", "✈️", "Travel"),
            ("call", "📞", "Call"),
            ("coffee", "☕", "Coffee"),
        ],
    },
    StickerCategory {
        key: "general",
        name: "General",
        stickers: &[
            ("important", "⭐", "Important"),
            ("urgent", "🔥", "Urgent"),
            ("idea", "💡", "Idea"),
            ("question", "❓", "Question"),
            ("note", "📝", "Note"),
            ("check", "✅", "Check"),
            ("warning", "⚠️", "Warning"),
        ],
    },
    StickerCategory {
        key: "ocean",
        name: "Ocean",
        stickers: &[
            ("fish", "🐠", "Fish"),
            ("dolphin", "🐬", "Dolphin"),
            ("whale", "🐋", "Whale"),
            ("octopus", "🐙", "Octopus"),
            ("shell", "🐚", "Shell"),
            ("wave", "🌊", "Wave"),
            ("shark", "🦈", "Shark"),
            ("turtle", "🐢", "Turtle"),
        ],
    },
    StickerCategory {
        key: "forest",
        name: "Forest",
        stickers: &[
            ("tree", "🌲", "Tree"),
            ("leaf", "🍃", "Leaf"),
            ("mushroom", "🍄", "Mushroom"),
            ("flower", "🌸", "Flower"),
            ("squirrel", "🐿️", "Squirrel"),
            ("deer", "🦌", "Deer"),
            ("fox", "🦊", "Fox"),
            ("bear", "🐻", "Bear"),
        ],
    },
    StickerCategory {
        key: "sunset",
        name: "Sunset",
        stickers: &[
            ("sunset", "🌅", "Sunset"),
            ("sun", "☀️", "Sun"),
            ("cloud", "☁️", "Cloud"),
            ("desert", "🏜️", "Desert"),
            ("cactus", "🌵", "Cactus"),
            ("camel", "🐪", "Camel"),
            ("palm", "🌴", "Palm Tree"),
        ],
    },
    StickerCategory {
        key: "moonlight",
        name: "Moonlight",
        stickers: &[
            ("moon", "🌙", "Moon"),
            ("star", "⭐", "Star"),
            ("comet", "☄️", "Comet"),
            ("night", "🌃", "Night"),
            ("owl", "🦉", "Owl"),
            ("bat", "🦇", "Bat"),
            ("wolf", "🐺", "Wolf"),
        ],
    },
    StickerCategory {
        key: "aurora",
        name: "Aurora",
        stickers: &[
            ("aurora", "✨", "Aurora"),
            ("snowflake", "❄️", "Snowflake"),
            ("polar-bear", "🐻‍❄️", "Polar Bear"),
            ("mountain", "🏔️", "Mountain"),
            ("glacier", "🧊", "Ice"),
            ("reindeer", "🦌", "Reindeer"),
            ("evergreen", "🌲", "Evergreen"),
        ],
    },
];

/// Look up a catalog sticker by key (case-insensitive)
pub fn find_sticker(key: &str) -> Option<Sticker> {
    let wanted = key.trim().to_lowercase();
    STICKER_CATALOG
        .iter()
        .flat_map(|c| c.stickers.iter())
        .find(|(k, ..)| *k == wanted)
        .map(|&(k, emoji, label)| Sticker::new(k, emoji, label))
}

pub fn sticker_category(key: &str) -> Option<&'static StickerCategory> {
    let wanted = key.trim().to_lowercase();
    STICKER_CATALOG.iter().find(|c| c.key == wanted)
}

/// Categories offered while a theme is active: events, general, then the theme's own
pub fn categories_for_theme(theme: ThemeId) -> Vec<&'static StickerCategory> {
    STICKER_CATALOG
        .iter()
        .filter(|c| c.key == "events" || c.key == "general" || c.key == theme.as_str())
        .collect()
}
