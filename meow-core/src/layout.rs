/// Frame blob layout and validation
use nom::{
    bytes::complete::{tag, take, take_while_m_n},
    character::is_digit,
    IResult,
};
use thiserror::Error;

/// Per-frame color prefix length: `ESC[38;5;NNNm`
pub const COLOR_PREFIX_LEN: usize = 11;
/// Per-row cursor prefix length: `ESC[RRR;CCCH`
pub const ROW_PREFIX_LEN: usize = 10;
/// Byte offset of the cursor row field within a row prefix
pub const ROW_FIELD: usize = 2;
/// Byte offset of the cursor column field within a row prefix
pub const COL_FIELD: usize = 6;
/// Width of the decimal fields in both prefixes
pub const FIELD_DIGITS: usize = 3;

/// Dimensions of a baked animation blob.
///
/// The blob itself is supplied externally; the layout is its contract. All
/// byte positions inside a frame derive from `width` and `height`, so
/// `frame_len` always equals the color prefix plus `height` prefixed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Glyph cells per row
    pub width: usize,
    /// Rows per frame
    pub height: usize,
    /// Frames in the blob
    pub count: usize,
}

impl FrameLayout {
    pub fn new(width: usize, height: usize, count: usize) -> Self {
        Self {
            width,
            height,
            count,
        }
    }

    /// Bytes per frame
    pub fn frame_len(&self) -> usize {
        COLOR_PREFIX_LEN + self.height * (self.width + ROW_PREFIX_LEN)
    }

    /// Byte offset of row `j`'s cursor prefix within a frame
    pub fn row_start(&self, j: usize) -> usize {
        COLOR_PREFIX_LEN + j * (self.width + ROW_PREFIX_LEN)
    }

    /// Total blob length across all frames
    pub fn total_len(&self) -> usize {
        self.count * self.frame_len()
    }
}

/// Errors reported when a blob does not match its declared layout
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout has a zero dimension ({width}x{height}, {count} frames)")]
    Empty {
        width: usize,
        height: usize,
        count: usize,
    },
    #[error("blob is {actual} bytes, layout requires {expected}")]
    Length { expected: usize, actual: usize },
    #[error("malformed escape prefix in frame {frame}")]
    Malformed { frame: usize },
}

/// Check a blob against its declared layout.
///
/// Verifies the overall length and the escape-sequence scaffolding of every
/// frame: the color prefix and each row's cursor prefix, including that the
/// position fields hold ASCII digits. Row content bytes are not inspected.
/// Runs once at load; the playback path trusts the layout afterwards.
pub fn validate_blob(layout: FrameLayout, blob: &[u8]) -> Result<(), LayoutError> {
    if layout.width == 0 || layout.height == 0 || layout.count == 0 {
        return Err(LayoutError::Empty {
            width: layout.width,
            height: layout.height,
            count: layout.count,
        });
    }
    if blob.len() != layout.total_len() {
        return Err(LayoutError::Length {
            expected: layout.total_len(),
            actual: blob.len(),
        });
    }

    let mut rest = blob;
    for frame in 0..layout.count {
        let (next, _) = parse_frame(layout, rest).map_err(|_| LayoutError::Malformed { frame })?;
        rest = next;
    }
    Ok(())
}

fn parse_frame(layout: FrameLayout, input: &[u8]) -> IResult<&[u8], ()> {
    let (mut input, _) = color_prefix(input)?;
    for _ in 0..layout.height {
        let (next, _) = row_prefix(input)?;
        let (next, _) = take(layout.width)(next)?;
        input = next;
    }
    Ok((input, ()))
}

fn color_prefix(input: &[u8]) -> IResult<&[u8], &[u8]> {
    let (input, _) = tag(&b"\x1b[38;5;"[..])(input)?;
    let (input, id) = decimal_field(input)?;
    let (input, _) = tag(&b"m"[..])(input)?;
    Ok((input, id))
}

fn row_prefix(input: &[u8]) -> IResult<&[u8], (&[u8], &[u8])> {
    let (input, _) = tag(&b"\x1b["[..])(input)?;
    let (input, row) = decimal_field(input)?;
    let (input, _) = tag(&b";"[..])(input)?;
    let (input, col) = decimal_field(input)?;
    let (input, _) = tag(&b"H"[..])(input)?;
    Ok((input, (row, col)))
}

fn decimal_field(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while_m_n(FIELD_DIGITS, FIELD_DIGITS, is_digit)(input)
}
