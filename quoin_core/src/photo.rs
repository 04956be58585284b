// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Photo identity, dimensions, and category taxonomy.
//!
//! Photos are externally supplied, read-only records: the engine never
//! dereferences `src` and never mutates a [`Photo`]. Category labels arrive
//! as raw strings from the data layer and are folded into the canonical
//! [`Category`] taxonomy exactly once, at [`Category::from_label`]; nothing
//! downstream string-matches labels again.

use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt;

// ---------------------------------------------------------------------------
// PhotoId
// ---------------------------------------------------------------------------

/// A stable, opaque photo identifier as supplied by the data layer.
///
/// The data layer uses the resource locator as the identifier, but nothing
/// here depends on that; any unique string works.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PhotoId(String);

impl PhotoId {
    /// Wraps a raw identifier string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhotoId({:?})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Canonical photo category.
///
/// The source data carries categories as free-form strings, with one known
/// legacy alias (`"top-picks"` for [`Category::TopPicks`]). All raw labels
/// pass through [`Category::from_label`]; labels outside the fixed taxonomy
/// are preserved verbatim in [`Category::Other`] so they still filter and
/// display, just without a translated name.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    /// Curated selection, pinned first in category menus.
    TopPicks,
    /// Nature and landscape photography.
    Nature,
    /// Portrait sessions.
    Portraits,
    /// Street photography.
    Street,
    /// Architecture.
    Architecture,
    /// Travel.
    Travel,
    /// Event coverage.
    Events,
    /// A label outside the fixed taxonomy, kept verbatim.
    Other(String),
}

impl Category {
    /// Folds a raw label into the canonical taxonomy.
    ///
    /// This is the only place label spellings are interpreted; the legacy
    /// alias `"top-picks"` maps to [`Category::TopPicks`] here and nowhere
    /// else.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "TopPicks" | "top-picks" => Self::TopPicks,
            "Nature" => Self::Nature,
            "Portraits" => Self::Portraits,
            "Street" => Self::Street,
            "Architecture" => Self::Architecture,
            "Travel" => Self::Travel,
            "Events" => Self::Events,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the canonical label (the English internal name).
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::TopPicks => "TopPicks",
            Self::Nature => "Nature",
            Self::Portraits => "Portraits",
            Self::Street => "Street",
            Self::Architecture => "Architecture",
            Self::Travel => "Travel",
            Self::Events => "Events",
            Self::Other(label) => label,
        }
    }

    /// Returns the display name shown in menus and captions.
    ///
    /// Fixed-taxonomy categories have translated display names; `Other`
    /// labels display verbatim.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::TopPicks => "Top Picks",
            Self::Nature => "Natură",
            Self::Portraits => "Portrete",
            Self::Street => "Stradă",
            Self::Architecture => "Arhitectură",
            Self::Travel => "Călătorii",
            Self::Events => "Evenimente",
            Self::Other(label) => label,
        }
    }

    /// Returns the menu sort rank. Lower sorts first; unknown labels last.
    #[must_use]
    pub fn menu_rank(&self) -> u8 {
        match self {
            Self::TopPicks => 0,
            Self::Nature => 1,
            Self::Portraits => 2,
            Self::Street => 3,
            Self::Architecture => 4,
            Self::Travel => 5,
            Self::Events => 6,
            Self::Other(_) => 7,
        }
    }
}

// ---------------------------------------------------------------------------
// Photo
// ---------------------------------------------------------------------------

/// An input photo record.
///
/// `width` and `height` are the image's intrinsic pixel dimensions. The
/// layout engine only ever reads the aspect ratio; a zero dimension makes
/// [`Photo::aspect_ratio`] return `None` and the photo is skipped by layout
/// rather than poisoning a row with a division by zero.
#[derive(Clone, PartialEq, Debug)]
pub struct Photo {
    /// Stable identifier.
    pub id: PhotoId,
    /// Resource locator (URL or path). Never dereferenced by the engine.
    pub src: String,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// Canonical category, if the data layer supplied one.
    pub category: Option<Category>,
    /// Alternative text for the rendered image.
    pub alt: String,
}

impl Photo {
    /// Returns `width / height`, or `None` when either dimension is zero.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(f64::from(self.width) / f64::from(self.height))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    fn photo(width: u32, height: u32) -> Photo {
        Photo {
            id: PhotoId::new("p"),
            src: String::from("photos/p.jpg"),
            width,
            height,
            category: None,
            alt: String::new(),
        }
    }

    #[test]
    fn photo_id_debug_shows_raw() {
        let id = PhotoId::new("photos/Nature/a.jpg");
        assert_eq!(format!("{id:?}"), "PhotoId(\"photos/Nature/a.jpg\")");
    }

    #[test]
    fn both_top_picks_spellings_fold_to_one_category() {
        assert_eq!(Category::from_label("TopPicks"), Category::TopPicks);
        assert_eq!(Category::from_label("top-picks"), Category::TopPicks);
    }

    #[test]
    fn unknown_label_is_preserved_verbatim() {
        let cat = Category::from_label("Astro");
        assert_eq!(cat, Category::Other(String::from("Astro")));
        assert_eq!(cat.label(), "Astro");
        assert_eq!(cat.display_name(), "Astro");
        assert_eq!(cat.menu_rank(), 7);
    }

    #[test]
    fn display_names_are_translated() {
        assert_eq!(Category::Nature.display_name(), "Natură");
        assert_eq!(Category::Events.display_name(), "Evenimente");
        assert_eq!(Category::TopPicks.display_name(), "Top Picks");
    }

    #[test]
    fn menu_rank_orders_fixed_taxonomy() {
        let mut cats = vec![
            Category::Events,
            Category::Other(String::from("Misc")),
            Category::Nature,
            Category::TopPicks,
        ];
        cats.sort_by_key(Category::menu_rank);
        assert_eq!(
            cats,
            vec![
                Category::TopPicks,
                Category::Nature,
                Category::Events,
                Category::Other(String::from("Misc")),
            ]
        );
    }

    #[test]
    fn aspect_ratio_of_landscape_photo() {
        let p = photo(1600, 900);
        let ar = p.aspect_ratio().unwrap();
        assert!((ar - 16.0 / 9.0).abs() < 1e-12, "got {ar}");
    }

    #[test]
    fn zero_dimension_has_no_aspect_ratio() {
        assert_eq!(photo(0, 900).aspect_ratio(), None);
        assert_eq!(photo(1600, 0).aspect_ratio(), None);
    }
}
