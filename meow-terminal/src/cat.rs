/// Baked cat animation asset
///
/// Generated by tools/gen_frames.py; the constants here mirror the
/// generator and form the blob's layout contract.
use meow_core::FrameLayout;

pub const FRAME_WIDTH: usize = 38;
pub const FRAME_HEIGHT: usize = 11;
pub const FRAME_COUNT: usize = 6;

/// Concatenated frames: a color prefix plus cursor-prefixed rows each
pub static FRAMES: &[u8] = include_bytes!("../assets/cat.bin");

/// Layout contract for [`FRAMES`]
pub fn layout() -> FrameLayout {
    FrameLayout::new(FRAME_WIDTH, FRAME_HEIGHT, FRAME_COUNT)
}
