//! Pixel buffers and the sink interface the render loop writes into.

/// Destination for rendered pixel values.
///
/// Channel values arrive as floats in [0, 1]; the sink decides how to
/// quantize and store them. Channels 0..2 are red, green and blue.
pub trait PixelSink {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// Number of channels per pixel.
    fn depth(&self) -> usize;

    /// Store `value` for the given pixel and channel. Out-of-range
    /// values clamp; out-of-range coordinates are a caller bug and may
    /// panic.
    fn put(&mut self, col: u32, row: u32, channel: usize, value: f64);
}

/// Integer sample type a [`PixelBuffer`] can quantize into.
pub trait Channel: Copy + Default {
    /// Largest representable sample, the quantization of 1.0.
    const MAX: Self;

    /// Quantize a [0, 1] float: values at or below 0 map to zero, at or
    /// above 1 to `MAX`, and everything between rounds to nearest.
    fn quantize(value: f64) -> Self;
}

impl Channel for u8 {
    const MAX: Self = u8::MAX;

    fn quantize(value: f64) -> Self {
        if value <= 0.0 {
            0
        } else if value >= 1.0 {
            Self::MAX
        } else {
            (value * f64::from(Self::MAX)).round() as Self
        }
    }
}

impl Channel for u16 {
    const MAX: Self = u16::MAX;

    fn quantize(value: f64) -> Self {
        if value <= 0.0 {
            0
        } else if value >= 1.0 {
            Self::MAX
        } else {
            (value * f64::from(Self::MAX)).round() as Self
        }
    }
}

/// Row-major in-memory image, three channels per pixel, top row first.
#[derive(Debug, Clone)]
pub struct PixelBuffer<T: Channel> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Channel> PixelBuffer<T> {
    const DEPTH: usize = 3;

    /// Black image of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * Self::DEPTH;
        Self {
            width,
            height,
            data: vec![T::default(); len],
        }
    }

    fn index(&self, col: u32, row: u32, channel: usize) -> usize {
        debug_assert!(col < self.width && row < self.height && channel < Self::DEPTH);
        (row as usize * self.width as usize + col as usize) * Self::DEPTH + channel
    }

    /// Stored sample for a pixel channel.
    pub fn get(&self, col: u32, row: u32, channel: usize) -> T {
        self.data[self.index(col, row, channel)]
    }

    /// The raw samples, row-major, `[r, g, b]` interleaved.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Channel> PixelSink for PixelBuffer<T> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn depth(&self) -> usize {
        Self::DEPTH
    }

    fn put(&mut self, col: u32, row: u32, channel: usize, value: f64) {
        let i = self.index(col, row, channel);
        self.data[i] = T::quantize(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_clamps_and_rounds() {
        assert_eq!(u8::quantize(-0.5), 0);
        assert_eq!(u8::quantize(0.0), 0);
        assert_eq!(u8::quantize(1.0), 255);
        assert_eq!(u8::quantize(2.0), 255);
        // 0.1 * 255 = 25.5, rounds to 26.
        assert_eq!(u8::quantize(0.1), 26);
        assert_eq!(u8::quantize(0.5), 128);
        assert_eq!(u16::quantize(0.5), 32768);
        assert_eq!(u16::quantize(1.0), 65535);
    }

    #[test]
    fn test_buffer_starts_black() {
        let buf: PixelBuffer<u8> = PixelBuffer::new(4, 3);
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.depth(), 3);
        assert!(buf.as_slice().iter().all(|&s| s == 0));
        assert_eq!(buf.as_slice().len(), 4 * 3 * 3);
    }

    #[test]
    fn test_put_is_row_major() {
        let mut buf: PixelBuffer<u8> = PixelBuffer::new(2, 2);
        buf.put(1, 0, 2, 1.0);
        buf.put(0, 1, 0, 0.5);
        assert_eq!(buf.get(1, 0, 2), 255);
        assert_eq!(buf.as_slice()[1 * 3 + 2], 255);
        assert_eq!(buf.get(0, 1, 0), 128);
        assert_eq!(buf.as_slice()[2 * 3], 128);
    }
}
