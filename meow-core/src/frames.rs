/// Frame store with in-place cursor offset patching
use log::debug;

use crate::layout::{validate_blob, FrameLayout, LayoutError, COL_FIELD, FIELD_DIGITS, ROW_FIELD};

/// Owns the animation frames and rewrites their embedded cursor positions.
///
/// The blob is copied once at construction and then only ever patched in
/// place: recentering rewrites the 3-digit row/column fields inside every
/// row prefix, so a frame is always ready to emit with a single bulk write
/// and nothing is re-rendered or reallocated at playback time.
pub struct FrameStore {
    layout: FrameLayout,
    frame_len: usize,
    data: Vec<u8>,
    col_offset: u16,
    row_offset: u16,
}

impl FrameStore {
    /// Validate `blob` against `layout` and take a private mutable copy.
    pub fn new(layout: FrameLayout, blob: &[u8]) -> Result<Self, LayoutError> {
        validate_blob(layout, blob)?;
        Ok(Self {
            layout,
            frame_len: layout.frame_len(),
            data: blob.to_vec(),
            col_offset: 0,
            row_offset: 0,
        })
    }

    #[inline]
    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.layout.count
    }

    /// Current centering offsets as (column, row)
    #[inline]
    pub fn offsets(&self) -> (u16, u16) {
        (self.col_offset, self.row_offset)
    }

    /// Re-center every frame for a terminal of the given size.
    ///
    /// One O(count x height) pass over the row prefixes. Cursor addressing
    /// is 1-based, so row `j` lands at `row_offset + j + 1` and every row
    /// starts at column `col_offset + 1`.
    pub fn recenter(&mut self, term_w: u16, term_h: u16) {
        self.col_offset = centering_offset(term_w, self.layout.width);
        self.row_offset = centering_offset(term_h, self.layout.height);
        debug!(
            "recentered for {}x{} terminal, offsets ({}, {})",
            term_w, term_h, self.col_offset, self.row_offset
        );

        for i in 0..self.layout.count {
            let frame_start = i * self.frame_len;
            for j in 0..self.layout.height {
                let row = frame_start + self.layout.row_start(j);
                write_field(
                    &mut self.data[row + ROW_FIELD..row + ROW_FIELD + FIELD_DIGITS],
                    u32::from(self.row_offset) + j as u32 + 1,
                );
                write_field(
                    &mut self.data[row + COL_FIELD..row + COL_FIELD + FIELD_DIGITS],
                    u32::from(self.col_offset) + 1,
                );
            }
        }
    }

    /// Raw bytes of frame `i`, reflecting the latest recentering
    #[inline]
    pub fn frame(&self, i: usize) -> &[u8] {
        &self.data[i * self.frame_len..(i + 1) * self.frame_len]
    }

    /// Iterate over all frame slices in playback order
    pub fn frames(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.frame_len)
    }
}

/// Offset that centers `frame` cells within `term` cells.
///
/// Truncating division, wrapped to the three digits a cursor field can
/// hold, clamped to 0 when the terminal is smaller than the frame.
fn centering_offset(term: u16, frame: usize) -> u16 {
    let d = (i32::from(term) - frame as i32) / 2 % 1000;
    if d < 0 {
        0
    } else {
        d as u16
    }
}

/// Write `n` into a 3-digit zero-padded decimal field.
///
/// Digits are extracted least-significant-first, so values over 999 wrap
/// modulo 1000 rather than overflowing the field.
fn write_field(field: &mut [u8], mut n: u32) {
    for b in field.iter_mut().rev() {
        *b = b'0' + (n % 10) as u8;
        n /= 10;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::layout::COLOR_PREFIX_LEN;

    fn bake(layout: FrameLayout) -> Vec<u8> {
        let mut blob = Vec::with_capacity(layout.total_len());
        for i in 0..layout.count {
            blob.extend_from_slice(format!("\x1b[38;5;{:03}m", 100 + i).as_bytes());
            for j in 0..layout.height {
                blob.extend_from_slice(format!("\x1b[{:03};001H", j + 1).as_bytes());
                blob.extend(std::iter::repeat(b'a' + i as u8).take(layout.width));
            }
        }
        blob
    }

    #[test]
    fn test_recenter_on_resize() {
        let layout = FrameLayout::new(10, 2, 1);
        let mut store = FrameStore::new(layout, &bake(layout)).unwrap();

        store.recenter(40, 10);
        assert_eq!(store.offsets(), (15, 4));
        let frame = store.frame(0);
        assert_eq!(&frame[11..21], b"\x1b[005;016H");
        assert_eq!(&frame[31..41], b"\x1b[006;016H");

        store.recenter(80, 20);
        assert_eq!(store.offsets(), (35, 9));
        let frame = store.frame(0);
        assert_eq!(&frame[11..21], b"\x1b[010;036H");
        assert_eq!(&frame[31..41], b"\x1b[011;036H");
    }

    #[test]
    fn test_undersized_terminal_clamps_to_origin() {
        let layout = FrameLayout::new(10, 4, 2);
        let mut store = FrameStore::new(layout, &bake(layout)).unwrap();

        store.recenter(6, 2);
        assert_eq!(store.offsets(), (0, 0));
        for frame in store.frames() {
            assert_eq!(&frame[11..21], b"\x1b[001;001H");
        }
    }

    #[test]
    fn test_recenter_is_idempotent() {
        let layout = FrameLayout::new(7, 3, 2);
        let mut store = FrameStore::new(layout, &bake(layout)).unwrap();

        store.recenter(33, 17);
        let first: Vec<Vec<u8>> = store.frames().map(|f| f.to_vec()).collect();
        store.recenter(33, 17);
        let second: Vec<Vec<u8>> = store.frames().map(|f| f.to_vec()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_color_prefix_and_content_untouched() {
        let layout = FrameLayout::new(10, 2, 3);
        let blob = bake(layout);
        let mut store = FrameStore::new(layout, &blob).unwrap();

        store.recenter(120, 40);
        for (i, frame) in store.frames().enumerate() {
            assert_eq!(frame.len(), layout.frame_len());
            let original = &blob[i * layout.frame_len()..(i + 1) * layout.frame_len()];
            assert_eq!(&frame[..COLOR_PREFIX_LEN], &original[..COLOR_PREFIX_LEN]);
            // Row content between the prefixes survives as well
            assert_eq!(&frame[21..31], &original[21..31]);
        }
    }

    #[test]
    fn test_field_wraps_modulo_1000() {
        let layout = FrameLayout::new(10, 2, 1);
        let mut store = FrameStore::new(layout, &bake(layout)).unwrap();

        // (2000 - 2) / 2 = 999, so the second row lands on 999 + 1 + 1 = 1001
        store.recenter(10, 2000);
        assert_eq!(store.offsets(), (0, 999));
        let frame = store.frame(0);
        assert_eq!(&frame[11..21], b"\x1b[000;001H");
        assert_eq!(&frame[31..41], b"\x1b[001;001H");
    }

    fn field_value(frame: &[u8], at: usize) -> u32 {
        std::str::from_utf8(&frame[at..at + FIELD_DIGITS])
            .unwrap()
            .parse()
            .unwrap()
    }

    proptest! {
        #[test]
        fn prop_offsets_match_written_fields(tw in 0u16..2000, th in 0u16..2000) {
            let layout = FrameLayout::new(4, 3, 2);
            let mut store = FrameStore::new(layout, &bake(layout)).unwrap();
            store.recenter(tw, th);

            let (dw, dh) = store.offsets();
            prop_assert_eq!(dw, if tw as usize >= layout.width { ((tw as usize - layout.width) / 2 % 1000) as u16 } else { 0 });
            prop_assert_eq!(dh, if th as usize >= layout.height { ((th as usize - layout.height) / 2 % 1000) as u16 } else { 0 });

            for frame in store.frames() {
                for j in 0..layout.height {
                    let row = layout.row_start(j);
                    prop_assert_eq!(
                        field_value(frame, row + ROW_FIELD),
                        (u32::from(dh) + j as u32 + 1) % 1000
                    );
                    prop_assert_eq!(field_value(frame, row + COL_FIELD), (u32::from(dw) + 1) % 1000);
                }
            }
        }
    }
}
