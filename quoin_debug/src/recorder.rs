// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use quoin_core::trace::{
    FullscreenDeniedEvent, LayoutPassEvent, LightboxStateKind, LightboxTransitionEvent,
    PassSummary, RevealEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_LAYOUT_PASS: u8 = 1;
const TAG_REVEALS: u8 = 2;
const TAG_REVEAL: u8 = 3;
const TAG_LIGHTBOX_TRANSITION: u8 = 4;
const TAG_FULLSCREEN_DENIED: u8 = 5;
const TAG_PASS_SUMMARY: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_kind(&mut self, kind: LightboxStateKind) {
        self.write_u8(match kind {
            LightboxStateKind::Closed => 0,
            LightboxStateKind::Open => 1,
            LightboxStateKind::OpenFullscreen => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
        self.write_u8(TAG_LAYOUT_PASS);
        self.write_u64(e.pass_index);
        self.write_u64(e.generation);
        self.write_f64(e.container_width);
        self.write_u32(e.tile_count);
        self.write_u32(e.row_count);
        self.write_f64(e.total_height);
    }

    fn on_reveals(&mut self, pass_index: u64, count: u32) {
        self.write_u8(TAG_REVEALS);
        self.write_u64(pass_index);
        self.write_u32(count);
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.write_u8(TAG_REVEAL);
        self.write_u64(e.pass_index);
        self.write_u32(e.tile);
        self.write_u64(e.generation);
    }

    fn on_lightbox_transition(&mut self, e: &LightboxTransitionEvent) {
        self.write_u8(TAG_LIGHTBOX_TRANSITION);
        self.write_u64(e.pass_index);
        self.write_kind(e.from);
        self.write_kind(e.to);
    }

    fn on_fullscreen_denied(&mut self, e: &FullscreenDeniedEvent) {
        self.write_u8(TAG_FULLSCREEN_DENIED);
        self.write_u64(e.pass_index);
        self.write_bool(e.reverted_to);
    }

    fn on_pass_summary(&mut self, s: &PassSummary) {
        self.write_u8(TAG_PASS_SUMMARY);
        self.write_u64(s.pass_index);
        self.write_u64(s.generation);
        self.write_bool(s.regenerated);
        self.write_bool(s.relaid_out);
        self.write_u32(s.reveal_count);
        self.write_kind(s.lightbox);
        self.write_f64(s.total_height);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`LayoutPassEvent`].
    LayoutPass(LayoutPassEvent),
    /// Per-pass reveal count.
    Reveals {
        /// Evaluate-pass counter.
        pass_index: u64,
        /// Number of tiles revealed.
        count: u32,
    },
    /// A [`RevealEvent`].
    Reveal(RevealEvent),
    /// A [`LightboxTransitionEvent`].
    LightboxTransition(LightboxTransitionEvent),
    /// A [`FullscreenDeniedEvent`].
    FullscreenDenied(FullscreenDeniedEvent),
    /// A [`PassSummary`].
    PassSummary(PassSummary),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_f64(&mut self) -> Option<f64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = f64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_kind(&mut self) -> Option<LightboxStateKind> {
        Some(match self.read_u8()? {
            0 => LightboxStateKind::Closed,
            1 => LightboxStateKind::Open,
            _ => LightboxStateKind::OpenFullscreen,
        })
    }

    fn decode_layout_pass(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayoutPass(LayoutPassEvent {
            pass_index: self.read_u64()?,
            generation: self.read_u64()?,
            container_width: self.read_f64()?,
            tile_count: self.read_u32()?,
            row_count: self.read_u32()?,
            total_height: self.read_f64()?,
        }))
    }

    fn decode_reveals(&mut self) -> Option<RecordedEvent> {
        let pass_index = self.read_u64()?;
        let count = self.read_u32()?;
        Some(RecordedEvent::Reveals { pass_index, count })
    }

    fn decode_reveal(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Reveal(RevealEvent {
            pass_index: self.read_u64()?,
            tile: self.read_u32()?,
            generation: self.read_u64()?,
        }))
    }

    fn decode_lightbox_transition(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LightboxTransition(LightboxTransitionEvent {
            pass_index: self.read_u64()?,
            from: self.read_kind()?,
            to: self.read_kind()?,
        }))
    }

    fn decode_fullscreen_denied(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FullscreenDenied(FullscreenDeniedEvent {
            pass_index: self.read_u64()?,
            reverted_to: self.read_bool()?,
        }))
    }

    fn decode_pass_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassSummary(PassSummary {
            pass_index: self.read_u64()?,
            generation: self.read_u64()?,
            regenerated: self.read_bool()?,
            relaid_out: self.read_bool()?,
            reveal_count: self.read_u32()?,
            lightbox: self.read_kind()?,
            total_height: self.read_f64()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_LAYOUT_PASS => self.decode_layout_pass(),
            TAG_REVEALS => self.decode_reveals(),
            TAG_REVEAL => self.decode_reveal(),
            TAG_LIGHTBOX_TRANSITION => self.decode_lightbox_transition(),
            TAG_FULLSCREEN_DENIED => self.decode_fullscreen_denied(),
            TAG_PASS_SUMMARY => self.decode_pass_summary(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
