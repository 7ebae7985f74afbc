//! Category model
//!
//! Categories label expenses for breakdowns and budgets. Each carries a
//! display color and icon identifier for the presentation layer. A fixed
//! set of seven defaults is seeded on a user's first load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};

/// An expense category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Owning user
    pub user_id: UserId,

    /// Display name (free text; no uniqueness constraint)
    pub name: String,

    /// Display color as a hex string, e.g. "#FC642D"
    pub color: String,

    /// Icon identifier for the presentation layer
    pub icon: String,

    /// When the row was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Materialize a category from a creation request
    pub fn from_new(user_id: UserId, new: NewCategory) -> Self {
        Self {
            id: CategoryId::new(),
            user_id,
            name: new.name,
            color: new.color,
            icon: new.icon,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Fields supplied when creating a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl NewCategory {
    /// Validate the request
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }
        Ok(())
    }
}

/// A partial update to a category
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl CategoryPatch {
    /// Check whether the patch changes anything
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.icon.is_none()
    }

    /// Apply the patch to a local category row
    pub fn apply(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(color) = &self.color {
            category.color = color.clone();
        }
        if let Some(icon) = &self.icon {
            category.icon = icon.clone();
        }
    }
}

/// The seven categories seeded for a user with none
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Health,
    Other,
}

impl DefaultCategory {
    /// All defaults, in seeding order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Transport,
            Self::Shopping,
            Self::Entertainment,
            Self::Bills,
            Self::Health,
            Self::Other,
        ]
    }

    /// Display name for this default
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Health => "Health",
            Self::Other => "Other",
        }
    }

    /// Display color for this default
    pub fn color(&self) -> &'static str {
        match self {
            Self::Food => "#FC642D",
            Self::Transport => "#008489",
            Self::Shopping => "#BD1E59",
            Self::Entertainment => "#9065B0",
            Self::Bills => "#E0B423",
            Self::Health => "#00A699",
            Self::Other => "#767676",
        }
    }

    /// Icon identifier for this default
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Food => "restaurant",
            Self::Transport => "car",
            Self::Shopping => "shopping-bag",
            Self::Entertainment => "film",
            Self::Bills => "receipt",
            Self::Health => "medical",
            Self::Other => "ellipsis-horizontal",
        }
    }

    /// Build a creation request for this default
    pub fn to_new(&self) -> NewCategory {
        NewCategory {
            name: self.name().to_string(),
            color: self.color().to_string(),
            icon: self.icon().to_string(),
        }
    }
}

/// Match an AI-reported category label against the user's categories.
///
/// Tries an exact case-insensitive name match first, then a substring match
/// (category name containing the label). Returns `None` when nothing
/// matches; the caller must treat that as "uncategorized" rather than
/// guessing.
pub fn match_category<'a>(categories: &'a [Category], label: &str) -> Option<&'a Category> {
    let needle = label.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    categories
        .iter()
        .find(|c| c.name.to_lowercase() == needle)
        .or_else(|| {
            categories
                .iter()
                .find(|c| c.name.to_lowercase().contains(&needle))
        })
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
