//! Length and font-size units used in DrawingML.

pub const EMUS_PER_INCH: i64 = 914_400;

/// DrawingML font sizes (`sz`) are stored in hundredths of a point.
pub const CENTIPOINTS_PER_PT: u32 = 100;

/// A font size in whole points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pt(pub u32);

impl Pt {
    /// Value of the `sz` attribute for this size.
    #[inline]
    pub fn to_centipoints(self) -> u32 {
        self.0.saturating_mul(CENTIPOINTS_PER_PT)
    }

    /// Parse a `sz` attribute value, rounding down to whole points.
    #[inline]
    pub fn from_centipoints(sz: u32) -> Self {
        Pt(sz / CENTIPOINTS_PER_PT)
    }
}

#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}
