/// Largest zoom factor; its reciprocal is the smallest.
pub const MAX_ZOOM: f64 = 16.0;

/// Zoom step used by zoom in/out (reciprocal steps below 1:1).
pub const ZOOM_STEP: f64 = 0.5;

/// Initial value of every repaint-size cap, and its lower clamp.
pub const DEFAULT_MAX_REPAINT_SIZE: u64 = 10_000;

/// Upper clamp of every repaint-size cap.
pub const LIMIT_MAX_REPAINT_SIZE: u64 = 10_000_000;

/// Paints smaller than this (in pixels) are not timed by the governor.
pub const MIN_MEASURED_PAINT_AREA: u64 = 10_000;

/// A size-capped paint always covers at least this many rows.
pub const MIN_PAINT_ROWS: i32 = 5;

/// Target duration of one scheduling tick, expressed as a divisor of a second.
pub const TICKS_PER_SECOND: u64 = 10;

/// Side length of one checkerboard square drawn under translucent pixels.
pub const CHECKER_SIZE: i32 = 16;

/// Checkerboard grey for light squares.
pub const CHECKER_LIGHT: u8 = 192;

/// Checkerboard grey for dark squares.
pub const CHECKER_DARK: u8 = 128;

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Gamma is stored as a percentage; 100 is identity.
pub const GAMMA_RANGE: (i32, i32) = (10, 500);
pub const GAMMA_STEP: i32 = 10;

/// Brightness offset as a percentage of full scale; 0 is identity.
pub const BRIGHTNESS_RANGE: (i32, i32) = (-100, 100);
pub const BRIGHTNESS_STEP: i32 = 5;

/// Contrast is stored as a percentage; 100 is identity.
pub const CONTRAST_RANGE: (i32, i32) = (0, 500);
pub const CONTRAST_STEP: i32 = 10;

/// Default scrollbar thickness in pixels, used by the fit-to-width/height predictions.
pub const DEFAULT_SCROLLBAR_THICKNESS: i32 = 16;

/// Number of RGBA channels in a raster.
pub const RGBA_CHANNELS: usize = 4;
