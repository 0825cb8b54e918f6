//! # Filterable Gallery
//!
//! Category filter buttons over a fixed catalogue, plus the modal viewer that opens when an
//! item is clicked. The modal remembers the item by id, so re-filtering underneath an open
//! modal never swaps the picture being viewed.

use crate::bindings::Key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Gallery category, matching the filter buttons' `data-filter` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Convoy,
    Home,
    Equipment,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Personal,
        Category::Convoy,
        Category::Home,
        Category::Equipment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Convoy => "convoy",
            Category::Home => "home",
            Category::Equipment => "equipment",
        }
    }
}

/// Unknown `data-filter` value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown gallery filter: {0}")]
pub struct UnknownFilter(pub String);

/// Active filter: everything, or one category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Only(Category),
}

impl Filter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Filter::All);
        }
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .map(|c| Filter::Only(*c))
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(category) => f.write_str(category.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: u32,
    pub category: Category,
    pub image: String,
    pub caption: String,
}

impl GalleryItem {
    fn new(id: u32, category: Category, image: &str, caption: &str) -> Self {
        Self {
            id,
            category,
            image: image.to_string(),
            caption: caption.to_string(),
        }
    }
}

/// The site's nine gallery pictures.
#[rustfmt::skip]
pub fn default_catalogue() -> Vec<GalleryItem> {
    use Category::*;
    vec![
        GalleryItem::new(1, Personal, "public/professional-bodyguard-in-suit-protecting-vip-clie.jpg", "Professional bodyguard providing VIP protection services"),
        GalleryItem::new(2, Convoy, "public/armored-security-convoy-vehicles-on-road.jpg", "Armored convoy protection for high-value transport"),
        GalleryItem::new(3, Home, "public/modern-home-security-system-with-cameras-and-senso.jpg", "Advanced home security system with smart monitoring"),
        GalleryItem::new(4, Equipment, "public/advanced-security-surveillance-equipment-and-monit.jpg", "State-of-the-art surveillance and monitoring equipment"),
        GalleryItem::new(5, Personal, "public/professional-security-guard-in-suit-protecting-vip.jpg", "Elite personal security detail in action"),
        GalleryItem::new(6, Convoy, "public/security-convoy-protecting-valuable-transport.jpg", "Security convoy ensuring safe valuable transport"),
        GalleryItem::new(7, Home, "public/corporate-office-building-with-security-personnel-.jpg", "Corporate security personnel monitoring premises"),
        GalleryItem::new(8, Equipment, "public/professional-security-team-meeting-in-modern-offic.jpg", "Security team coordination and planning session"),
        GalleryItem::new(9, Personal, "public/professional-bodyguard-in-suit-protecting-vip-clie.jpg", "Discrete personal protection for high-profile clients"),
    ]
}

/// Gallery grid state and modal viewer.
#[derive(Clone, Debug)]
pub struct Gallery {
    items: Vec<GalleryItem>,
    filter: Filter,
    modal: Option<u32>,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new(default_catalogue())
    }
}

impl Gallery {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        Self {
            items,
            filter: Filter::All,
            modal: None,
        }
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        debug!(%filter, "gallery filter changed");
        self.filter = filter;
    }

    /// Items shown under the current filter, in catalogue order.
    pub fn visible(&self) -> Vec<&GalleryItem> {
        self.items
            .iter()
            .filter(|item| self.filter.matches(item.category))
            .collect()
    }

    /// Open the modal on the item at `position` in the visible grid.
    ///
    /// Returns false (and leaves the modal as it was) when nothing is at that position.
    pub fn open(&mut self, position: usize) -> bool {
        let Some(id) = self.visible().get(position).map(|item| item.id) else {
            return false;
        };
        debug!(id, position, "gallery modal opened");
        self.modal = Some(id);
        true
    }

    pub fn close(&mut self) {
        if self.modal.take().is_some() {
            debug!("gallery modal closed");
        }
    }

    /// Escape closes the modal when it is open. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if key == Key::Escape && self.is_open() {
            self.close();
            return true;
        }
        false
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_some()
    }

    /// Item shown in the modal.
    pub fn modal_item(&self) -> Option<&GalleryItem> {
        let id = self.modal?;
        self.items.iter().find(|item| item.id == id)
    }

    /// Page scrolling is locked while the modal is open.
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }
}
