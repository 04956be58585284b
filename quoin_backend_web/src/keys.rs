// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser key-string translation.
//!
//! Maps `KeyboardEvent.key` values onto the lightbox's [`Key`] vocabulary.
//! Anything the lightbox does not bind translates to `None` and should be
//! left for the page.

use quoin_core::lightbox::Key;

/// Translates a `KeyboardEvent.key` string into a lightbox [`Key`].
#[must_use]
pub fn translate(key: &str) -> Option<Key> {
    match key {
        "Escape" => Some(Key::Escape),
        "ArrowLeft" => Some(Key::ArrowLeft),
        "ArrowRight" => Some(Key::ArrowRight),
        // Both cases: CapsLock or Shift must not disable the binding.
        "f" | "F" => Some(Key::Fullscreen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_keys_translate() {
        assert_eq!(translate("Escape"), Some(Key::Escape));
        assert_eq!(translate("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(translate("ArrowRight"), Some(Key::ArrowRight));
        assert_eq!(translate("f"), Some(Key::Fullscreen));
        assert_eq!(translate("F"), Some(Key::Fullscreen));
    }

    #[test]
    fn unbound_keys_fall_through() {
        assert_eq!(translate("Enter"), None);
        assert_eq!(translate("ArrowUp"), None);
        assert_eq!(translate("g"), None);
        assert_eq!(translate(""), None);
    }
}
