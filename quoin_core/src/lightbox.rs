// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lightbox state machine: open, close, circular navigation, fullscreen.
//!
//! The [`Lightbox`] is a pure state machine with no host types. Hosts feed
//! it tile clicks (as [`open`](Lightbox::open)) and key presses (as
//! [`handle_key`](Lightbox::handle_key)), execute any
//! [`FullscreenRequest`] it hands back, and report how the request ended
//! via [`resolve_fullscreen`](Lightbox::resolve_fullscreen).
//!
//! # Fullscreen is optimistic
//!
//! Toggling fullscreen flips the flag immediately so the UI reacts without
//! waiting on the host, and remembers the prior value. Hosts can refuse
//! the transition (browser policy, missing user gesture); a
//! [`FullscreenOutcome::Denied`] rewinds the flag to that prior value. The
//! denial is an expected outcome, not an error: callers log it and move
//! on, the user just stays in the window.
//!
//! # Lengths are passed at call time
//!
//! Navigation wraps modulo the list length given *to that call*, never a
//! length captured at open time. A concurrent filter change can shrink the
//! list while a photo is enlarged; stepping with the current length keeps
//! the index in range regardless.

use core::fmt;

/// Lightbox display state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightboxState {
    /// No photo is enlarged; the page owns the keyboard.
    Closed,
    /// One photo is enlarged over the grid.
    Open {
        /// Index into the currently displayed photo list.
        index: u32,
        /// Whether the host is (believed to be) in fullscreen.
        fullscreen: bool,
    },
}

/// Errors from [`Lightbox`] operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxError {
    /// [`Lightbox::open`] was called with an index at or past the end of
    /// the list (which includes any index when the list is empty).
    InvalidIndex,
}

impl fmt::Display for LightboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex => write!(f, "lightbox index out of range"),
        }
    }
}

impl core::error::Error for LightboxError {}

/// A fullscreen transition for the host to execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FullscreenRequest {
    /// Put the document into fullscreen.
    Enter,
    /// Leave fullscreen.
    Exit,
}

/// The host's report of how a [`FullscreenRequest`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FullscreenOutcome {
    /// The document entered fullscreen.
    Entered,
    /// The document left fullscreen.
    Exited,
    /// The host refused the transition.
    Denied,
}

/// What [`Lightbox::resolve_fullscreen`] did with an outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FullscreenResolution {
    /// The outcome matched the optimistic flag; nothing changed.
    Confirmed,
    /// The request was denied; the flag was rewound to its prior value.
    Reverted,
    /// No pending request matched the outcome (stale report, or the
    /// lightbox closed in the meantime).
    Ignored,
}

/// Keyboard inputs the lightbox understands.
///
/// Backends translate their host key events into these; see
/// `quoin_backend_web::keys` for the browser mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Close the lightbox.
    Escape,
    /// Step to the previous photo.
    ArrowLeft,
    /// Step to the next photo.
    ArrowRight,
    /// Toggle fullscreen.
    Fullscreen,
}

/// The result of feeding a key press to [`Lightbox::handle_key`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Whether the lightbox consumed the key.
    ///
    /// `false` whenever the lightbox is closed, so its bindings never
    /// shadow the page's own keyboard handling.
    pub handled: bool,
    /// A fullscreen transition for the host to execute, if any.
    pub fullscreen: Option<FullscreenRequest>,
}

/// Modal single-photo viewer state.
///
/// # Usage
///
/// ```rust,ignore
/// if lightbox.open(tile, store.filtered_len()).is_ok() {
///     // ... show the enlarged photo ...
/// }
/// let outcome = lightbox.handle_key(key, store.filtered_len());
/// if let Some(request) = outcome.fullscreen {
///     // ... hand the request to the host, call resolve_fullscreen later ...
/// }
/// ```
#[derive(Debug)]
pub struct Lightbox {
    state: LightboxState,
    /// Flag value to restore if the in-flight fullscreen request is denied.
    pending_revert: Option<bool>,
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lightbox {
    /// Creates a closed lightbox.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: LightboxState::Closed,
            pending_revert: None,
        }
    }

    /// Opens the lightbox on `index` into a list of `len` photos.
    ///
    /// Opening from closed starts windowed. Opening while already open
    /// jumps to the new photo and keeps the fullscreen flag, like
    /// navigation does.
    ///
    /// # Errors
    ///
    /// Returns [`LightboxError::InvalidIndex`] when `index >= len`, leaving
    /// the state untouched.
    pub fn open(&mut self, index: u32, len: usize) -> Result<(), LightboxError> {
        if (index as usize) >= len {
            return Err(LightboxError::InvalidIndex);
        }
        let fullscreen = match self.state {
            LightboxState::Open { fullscreen, .. } => fullscreen,
            LightboxState::Closed => false,
        };
        self.state = LightboxState::Open { index, fullscreen };
        Ok(())
    }

    /// Closes the lightbox from any state.
    ///
    /// Closing resets the fullscreen flag. When fullscreen was on, the
    /// returned [`FullscreenRequest::Exit`] tells the host to leave
    /// fullscreen too; the host's report for it (or for any request still
    /// in flight) arrives after the close and is ignored.
    pub fn close(&mut self) -> Option<FullscreenRequest> {
        let was_fullscreen = matches!(
            self.state,
            LightboxState::Open {
                fullscreen: true,
                ..
            }
        );
        self.state = LightboxState::Closed;
        self.pending_revert = None;
        was_fullscreen.then_some(FullscreenRequest::Exit)
    }

    /// Steps to the next photo, wrapping at the end of the list.
    ///
    /// No-op while closed or when `len == 0`.
    pub fn next(&mut self, len: usize) {
        self.advance(1, len);
    }

    /// Steps to the previous photo, wrapping at the start of the list.
    ///
    /// No-op while closed or when `len == 0`.
    pub fn previous(&mut self, len: usize) {
        self.advance(len.saturating_sub(1), len);
    }

    /// Steps to `(index + offset) % len`.
    ///
    /// `len` is the list length at call time, so the result stays in range
    /// even when the index predates a shrink.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the result is in `0..len` and photo list lengths fit `u32`"
    )]
    fn advance(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        if let LightboxState::Open { index, .. } = &mut self.state {
            *index = ((*index as usize + offset) % len) as u32;
        }
    }

    /// Flips the fullscreen flag and returns the transition for the host
    /// to execute. No-op (returns `None`) while closed.
    ///
    /// The flip is optimistic; [`resolve_fullscreen`](Self::resolve_fullscreen)
    /// settles it once the host reports back. Toggling again before that
    /// supersedes the earlier request.
    pub fn toggle_fullscreen(&mut self) -> Option<FullscreenRequest> {
        let LightboxState::Open { fullscreen, .. } = &mut self.state else {
            return None;
        };
        let prior = *fullscreen;
        *fullscreen = !prior;
        self.pending_revert = Some(prior);
        Some(if prior {
            FullscreenRequest::Exit
        } else {
            FullscreenRequest::Enter
        })
    }

    /// Settles the in-flight fullscreen request with the host's outcome.
    ///
    /// `Entered`/`Exited` confirm the optimistic flag; `Denied` rewinds it
    /// to its pre-toggle value. Outcomes that match no pending request are
    /// ignored: a success report for a superseded toggle, a duplicate
    /// report, or any report arriving after the lightbox closed.
    pub fn resolve_fullscreen(&mut self, outcome: FullscreenOutcome) -> FullscreenResolution {
        let LightboxState::Open { fullscreen, .. } = &mut self.state else {
            self.pending_revert = None;
            return FullscreenResolution::Ignored;
        };
        let Some(prior) = self.pending_revert else {
            return FullscreenResolution::Ignored;
        };
        match outcome {
            FullscreenOutcome::Entered if *fullscreen => {
                self.pending_revert = None;
                FullscreenResolution::Confirmed
            }
            FullscreenOutcome::Exited if !*fullscreen => {
                self.pending_revert = None;
                FullscreenResolution::Confirmed
            }
            // A success report for a superseded request; the live
            // request's outcome is still on its way.
            FullscreenOutcome::Entered | FullscreenOutcome::Exited => {
                FullscreenResolution::Ignored
            }
            FullscreenOutcome::Denied => {
                *fullscreen = prior;
                self.pending_revert = None;
                FullscreenResolution::Reverted
            }
        }
    }

    /// Feeds a key press to the lightbox.
    ///
    /// While closed every key comes back `handled: false`. While open:
    /// `Escape` closes, the arrows navigate (wrapping over `len`), and
    /// `Fullscreen` toggles. Any resulting fullscreen transition rides
    /// along in the outcome for the host to execute.
    pub fn handle_key(&mut self, key: Key, len: usize) -> KeyOutcome {
        if self.state == LightboxState::Closed {
            return KeyOutcome::default();
        }
        let mut outcome = KeyOutcome {
            handled: true,
            fullscreen: None,
        };
        match key {
            Key::Escape => outcome.fullscreen = self.close(),
            Key::ArrowLeft => self.previous(len),
            Key::ArrowRight => self.next(len),
            Key::Fullscreen => outcome.fullscreen = self.toggle_fullscreen(),
        }
        outcome
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> LightboxState {
        self.state
    }

    /// Returns the open photo's index, or `None` while closed.
    #[must_use]
    pub fn open_index(&self) -> Option<u32> {
        match self.state {
            LightboxState::Open { index, .. } => Some(index),
            LightboxState::Closed => None,
        }
    }

    /// Returns whether the lightbox believes fullscreen is active.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        matches!(
            self.state,
            LightboxState::Open {
                fullscreen: true,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_at(index: u32, len: usize) -> Lightbox {
        let mut lightbox = Lightbox::new();
        lightbox.open(index, len).unwrap();
        lightbox
    }

    #[test]
    fn open_validates_the_index() {
        let mut lightbox = Lightbox::new();
        assert_eq!(lightbox.open(5, 5), Err(LightboxError::InvalidIndex));
        assert_eq!(lightbox.state(), LightboxState::Closed, "state unchanged");

        assert_eq!(lightbox.open(0, 0), Err(LightboxError::InvalidIndex));
        assert_eq!(lightbox.state(), LightboxState::Closed);

        assert!(lightbox.open(4, 5).is_ok());
        assert_eq!(lightbox.open_index(), Some(4));
        assert!(!lightbox.is_fullscreen());
    }

    #[test]
    fn invalid_open_keeps_the_prior_photo() {
        let mut lightbox = open_at(2, 5);
        assert_eq!(lightbox.open(9, 5), Err(LightboxError::InvalidIndex));
        assert_eq!(lightbox.open_index(), Some(2));
    }

    #[test]
    fn next_wraps_at_the_end() {
        let mut lightbox = open_at(4, 5);
        lightbox.next(5);
        assert_eq!(lightbox.open_index(), Some(0));
    }

    #[test]
    fn previous_wraps_at_the_start() {
        let mut lightbox = open_at(0, 5);
        lightbox.previous(5);
        assert_eq!(lightbox.open_index(), Some(4));
    }

    #[test]
    fn navigation_uses_the_length_at_call_time() {
        // Opened against a 10-photo list which then shrinks to 4.
        let mut lightbox = open_at(9, 10);
        lightbox.next(4);
        assert_eq!(lightbox.open_index(), Some(2)); // (9 + 1) % 4

        let mut lightbox = open_at(9, 10);
        lightbox.previous(4);
        assert_eq!(lightbox.open_index(), Some(0)); // (9 + 3) % 4
    }

    #[test]
    fn navigation_is_inert_while_closed_or_empty() {
        let mut lightbox = Lightbox::new();
        lightbox.next(5);
        lightbox.previous(5);
        assert_eq!(lightbox.state(), LightboxState::Closed);

        let mut lightbox = open_at(1, 3);
        lightbox.next(0);
        assert_eq!(lightbox.open_index(), Some(1), "len 0 is a no-op");
    }

    #[test]
    fn close_resets_fullscreen_and_asks_the_host_to_exit() {
        let mut lightbox = open_at(1, 3);
        let request = lightbox.toggle_fullscreen();
        assert_eq!(request, Some(FullscreenRequest::Enter));
        let _ = lightbox.resolve_fullscreen(FullscreenOutcome::Entered);
        assert!(lightbox.is_fullscreen());

        assert_eq!(lightbox.close(), Some(FullscreenRequest::Exit));
        assert_eq!(lightbox.state(), LightboxState::Closed);
        assert!(!lightbox.is_fullscreen());

        // Closing while windowed has nothing to exit.
        let mut lightbox = open_at(1, 3);
        assert_eq!(lightbox.close(), None);
    }

    #[test]
    fn denied_fullscreen_reverts_the_flag() {
        let mut lightbox = open_at(0, 3);
        assert_eq!(lightbox.toggle_fullscreen(), Some(FullscreenRequest::Enter));
        assert!(lightbox.is_fullscreen(), "flip is optimistic");

        let resolution = lightbox.resolve_fullscreen(FullscreenOutcome::Denied);
        assert_eq!(resolution, FullscreenResolution::Reverted);
        assert!(!lightbox.is_fullscreen());
        assert_eq!(lightbox.open_index(), Some(0), "denial does not close");
    }

    #[test]
    fn confirmed_fullscreen_round_trip() {
        let mut lightbox = open_at(0, 3);
        assert_eq!(lightbox.toggle_fullscreen(), Some(FullscreenRequest::Enter));
        assert_eq!(
            lightbox.resolve_fullscreen(FullscreenOutcome::Entered),
            FullscreenResolution::Confirmed
        );
        assert!(lightbox.is_fullscreen());

        assert_eq!(lightbox.toggle_fullscreen(), Some(FullscreenRequest::Exit));
        assert_eq!(
            lightbox.resolve_fullscreen(FullscreenOutcome::Exited),
            FullscreenResolution::Confirmed
        );
        assert!(!lightbox.is_fullscreen());
    }

    #[test]
    fn outcome_without_a_pending_request_is_ignored() {
        let mut lightbox = open_at(0, 3);
        assert_eq!(
            lightbox.resolve_fullscreen(FullscreenOutcome::Entered),
            FullscreenResolution::Ignored
        );
        assert_eq!(
            lightbox.resolve_fullscreen(FullscreenOutcome::Denied),
            FullscreenResolution::Ignored
        );
        assert!(!lightbox.is_fullscreen());
    }

    #[test]
    fn outcome_after_close_is_ignored() {
        let mut lightbox = open_at(0, 3);
        let _ = lightbox.toggle_fullscreen();
        let _ = lightbox.close();
        assert_eq!(
            lightbox.resolve_fullscreen(FullscreenOutcome::Denied),
            FullscreenResolution::Ignored
        );
        assert_eq!(lightbox.state(), LightboxState::Closed);
    }

    #[test]
    fn second_toggle_supersedes_the_first() {
        let mut lightbox = open_at(0, 3);
        assert_eq!(lightbox.toggle_fullscreen(), Some(FullscreenRequest::Enter));
        assert_eq!(lightbox.toggle_fullscreen(), Some(FullscreenRequest::Exit));
        assert!(!lightbox.is_fullscreen());

        // The first request's success report no longer matches the flag.
        assert_eq!(
            lightbox.resolve_fullscreen(FullscreenOutcome::Entered),
            FullscreenResolution::Ignored
        );
        // The live request's report settles the exchange.
        assert_eq!(
            lightbox.resolve_fullscreen(FullscreenOutcome::Exited),
            FullscreenResolution::Confirmed
        );
        assert!(!lightbox.is_fullscreen());
    }

    #[test]
    fn navigation_keeps_fullscreen_on() {
        let mut lightbox = open_at(2, 5);
        let _ = lightbox.toggle_fullscreen();
        let _ = lightbox.resolve_fullscreen(FullscreenOutcome::Entered);

        lightbox.next(5);
        assert_eq!(lightbox.open_index(), Some(3));
        assert!(lightbox.is_fullscreen(), "stepping photos stays fullscreen");
    }

    #[test]
    fn reopening_jumps_without_dropping_fullscreen() {
        let mut lightbox = open_at(1, 5);
        let _ = lightbox.toggle_fullscreen();
        let _ = lightbox.resolve_fullscreen(FullscreenOutcome::Entered);

        assert!(lightbox.open(3, 5).is_ok());
        assert_eq!(lightbox.open_index(), Some(3));
        assert!(lightbox.is_fullscreen());
    }

    #[test]
    fn keys_are_inert_while_closed() {
        let mut lightbox = Lightbox::new();
        for key in [Key::Escape, Key::ArrowLeft, Key::ArrowRight, Key::Fullscreen] {
            let outcome = lightbox.handle_key(key, 5);
            assert!(!outcome.handled, "{key:?} must fall through to the page");
            assert_eq!(outcome.fullscreen, None);
        }
        assert_eq!(lightbox.state(), LightboxState::Closed);
    }

    #[test]
    fn keys_drive_the_open_lightbox() {
        let mut lightbox = open_at(0, 3);

        let outcome = lightbox.handle_key(Key::ArrowRight, 3);
        assert!(outcome.handled);
        assert_eq!(lightbox.open_index(), Some(1));

        let outcome = lightbox.handle_key(Key::ArrowLeft, 3);
        assert!(outcome.handled);
        assert_eq!(lightbox.open_index(), Some(0));

        let outcome = lightbox.handle_key(Key::Fullscreen, 3);
        assert_eq!(outcome.fullscreen, Some(FullscreenRequest::Enter));
        let _ = lightbox.resolve_fullscreen(FullscreenOutcome::Entered);

        let outcome = lightbox.handle_key(Key::Escape, 3);
        assert!(outcome.handled);
        assert_eq!(outcome.fullscreen, Some(FullscreenRequest::Exit));
        assert_eq!(lightbox.state(), LightboxState::Closed);
    }
}
