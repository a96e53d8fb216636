//! Trailing time-window selection.

use core::fmt;

/// Length of the trailing time window, in minutes.
///
/// Always within [`WindowMinutes::MIN`]..=[`WindowMinutes::MAX`], so it is
/// never zero and can be used as a divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct WindowMinutes(u32);

impl WindowMinutes {
    /// Shortest selectable window.
    pub const MIN: u32 = 5;
    /// Longest selectable window.
    pub const MAX: u32 = 240;
    /// Window used when nothing is configured.
    pub const DEFAULT: WindowMinutes = WindowMinutes(60);

    /// Create a window, rejecting lengths outside the selectable range.
    pub const fn new(minutes: u32) -> Result<Self, WindowOutOfRange> {
        if minutes < Self::MIN || minutes > Self::MAX {
            Err(WindowOutOfRange(minutes))
        } else {
            Ok(Self(minutes))
        }
    }

    /// Create a window, clamping into the selectable range.
    pub fn clamped(minutes: u32) -> Self {
        Self(minutes.clamp(Self::MIN, Self::MAX))
    }

    /// The window length in minutes.
    pub const fn minutes(&self) -> u32 {
        self.0
    }

    /// The window length in seconds.
    pub const fn as_secs(&self) -> u64 {
        self.0 as u64 * 60
    }

    /// Grow the window by `step` minutes, saturating at the maximum.
    pub fn widen(self, step: u32) -> Self {
        Self::clamped(self.0.saturating_add(step))
    }

    /// Shrink the window by `step` minutes, saturating at the minimum.
    pub fn narrow(self, step: u32) -> Self {
        Self::clamped(self.0.saturating_sub(step))
    }
}

impl Default for WindowMinutes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for WindowMinutes {
    type Error = WindowOutOfRange;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl From<WindowMinutes> for u32 {
    fn from(window: WindowMinutes) -> Self {
        window.0
    }
}

impl fmt::Display for WindowMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

/// A window length outside the selectable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOutOfRange(pub u32);

impl fmt::Display for WindowOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "time window of {} minutes is outside {}..={}",
            self.0,
            WindowMinutes::MIN,
            WindowMinutes::MAX
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WindowOutOfRange {}
