use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of attendance event a chat message can announce.
///
/// Declaration order is the tie-break order of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Overtime.
    Zangyo,
    /// Leaving on time.
    Teiji,
    /// Paid leave.
    Yukyu,
    /// After-work drinks.
    Nomikai,
}

/// Static description of a category: the markers that identify it and
/// the color a rendering layer should use for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySpec {
    pub category: Category,
    pub aliases: &'static [&'static str],
    pub display_color: &'static str,
}

/// Every category, in enumeration order.
pub const CATEGORIES: &[CategorySpec] = &[
    CategorySpec {
        category: Category::Zangyo,
        aliases: &[":zangyo:"],
        display_color: "#ff2424",
    },
    CategorySpec {
        category: Category::Teiji,
        aliases: &[":teiji:"],
        display_color: "#3aff3a",
    },
    CategorySpec {
        category: Category::Yukyu,
        aliases: &[":yukyu:"],
        display_color: "#3983ff",
    },
    CategorySpec {
        category: Category::Nomikai,
        aliases: &["🍺", "🍻"],
        display_color: "#ffc22a",
    },
];

impl Category {
    /// Static metadata for this category.
    pub fn spec(self) -> &'static CategorySpec {
        // CATEGORIES is declared in enum order
        &CATEGORIES[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Zangyo => "zangyo",
            Category::Teiji => "teiji",
            Category::Yukyu => "yukyu",
            Category::Nomikai => "nomikai",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
