/// Packed binary image, one bit per pixel. `true` marks a dark pixel.
#[derive(Debug, Clone)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create an all-light matrix with the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a matrix by marking every pixel darker than `threshold`
    pub fn from_threshold(gray: &[u8], width: usize, height: usize, threshold: u8) -> Self {
        let mut matrix = Self::new(width, height);
        for (idx, &value) in gray.iter().take(width * height).enumerate() {
            if value < threshold {
                matrix.data[idx / 8] |= 1 << (idx % 8);
            }
        }
        matrix
    }

    /// Matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-range reads are light
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y); out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        if value {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Number of dark pixels
    pub fn count_dark(&self) -> usize {
        let full = self.width * self.height;
        (0..full)
            .filter(|&idx| (self.data[idx / 8] >> (idx % 8)) & 1 == 1)
            .count()
    }
}
