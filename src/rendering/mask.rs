//! Bit-packed per-pixel clipping mask

/// One visibility bit per pixel, MSB-first, indexed by `y * width + x`.
///
/// Bits only ever go from 1 to 0 through [`ClippingMask::intersect_with`];
/// visibility comes back solely by discarding a clipped render state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClippingMask {
    width: u32,
    height: u32,
    bits: Vec<u8>,
    // false until the first intersection; lets the compositor skip bit tests
    clipped: bool,
}

impl ClippingMask {
    /// A mask with every pixel visible.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![0xFF; Self::byte_len(width, height)],
            clipped: false,
        }
    }

    /// A mask with every pixel hidden; the scratch mask `clip()` draws into.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![0x00; Self::byte_len(width, height)],
            clipped: true,
        }
    }

    fn byte_len(width: u32, height: u32) -> usize {
        (width as usize * height as usize).div_ceil(8)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// True while no clip has been applied.
    pub fn is_unclipped(&self) -> bool {
        !self.clipped
    }

    #[inline]
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        Some((index >> 3, 0x80 >> (index & 7)))
    }

    /// Whether the pixel is visible. Out-of-range pixels are never visible.
    #[inline]
    pub fn test_pixel(&self, x: i32, y: i32) -> bool {
        let Some((byte, bit)) = self.locate(x, y) else {
            return false;
        };
        match self.bits[byte] {
            0xFF => true,
            0x00 => false,
            value => value & bit != 0,
        }
    }

    #[inline]
    pub fn set_bit(&mut self, x: i32, y: i32) {
        if let Some((byte, bit)) = self.locate(x, y) {
            self.bits[byte] |= bit;
        }
    }

    /// Marks the half-open span `[x0, x1)` on row `y` visible, writing whole
    /// bytes where the span covers them.
    pub fn set_span(&mut self, y: i32, x0: i32, x1: i32) {
        if y < 0 || y as u32 >= self.height {
            return;
        }
        let x0 = x0.max(0) as usize;
        let x1 = (x1.max(0) as usize).min(self.width as usize);
        if x0 >= x1 {
            return;
        }
        let row = y as usize * self.width as usize;
        let (mut i, end) = (row + x0, row + x1);
        while i < end {
            if i & 7 == 0 && i + 8 <= end {
                self.bits[i >> 3] = 0xFF;
                i += 8;
            } else {
                self.bits[i >> 3] |= 0x80 >> (i & 7);
                i += 1;
            }
        }
    }

    /// `self = self AND other`. Masks of different sizes are not combined.
    pub fn intersect_with(&mut self, other: &ClippingMask) {
        if self.width != other.width || self.height != other.height {
            log::warn!(
                "ignoring clip intersection with mismatched mask {}x{} (expected {}x{})",
                other.width,
                other.height,
                self.width,
                self.height
            );
            return;
        }
        for (dst, src) in self.bits.iter_mut().zip(&other.bits) {
            *dst &= *src;
        }
        self.clipped = true;
    }

    /// Number of visible pixels.
    pub fn visible_count(&self) -> usize {
        let total = self.width as usize * self.height as usize;
        let full_bytes = total / 8;
        let mut count: usize = self.bits[..full_bytes]
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum();
        for index in full_bytes * 8..total {
            if self.bits[index >> 3] & (0x80 >> (index & 7)) != 0 {
                count += 1;
            }
        }
        count
    }
}
