//! Terminal window geometry

use nix::pty::Winsize;

/// Terminal window size in character cells and (optionally) pixels
///
/// Rows and columns describe the character grid. The pixel fields may be
/// left at zero when the embedder has no pixel geometry to report;
/// terminal-aware programs treat zero as "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    /// Number of rows (character cells)
    pub rows: u16,
    /// Number of columns (character cells)
    pub cols: u16,
    /// Width in pixels, or 0
    pub pixel_width: u16,
    /// Height in pixels, or 0
    pub pixel_height: u16,
}

impl WindowSize {
    /// Create a window size with the given grid and no pixel dimensions
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        }
    }

    /// Create a window size with pixel dimensions
    pub fn with_pixels(cols: u16, rows: u16, pixel_width: u16, pixel_height: u16) -> Self {
        Self {
            rows,
            cols,
            pixel_width,
            pixel_height,
        }
    }
}

impl Default for WindowSize {
    /// The classic 80x24 terminal
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl From<WindowSize> for Winsize {
    fn from(size: WindowSize) -> Self {
        Winsize {
            ws_row: size.rows,
            ws_col: size.cols,
            ws_xpixel: size.pixel_width,
            ws_ypixel: size.pixel_height,
        }
    }
}

impl From<Winsize> for WindowSize {
    fn from(ws: Winsize) -> Self {
        Self {
            rows: ws.ws_row,
            cols: ws.ws_col,
            pixel_width: ws.ws_xpixel,
            pixel_height: ws.ws_ypixel,
        }
    }
}
