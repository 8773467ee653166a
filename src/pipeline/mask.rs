//! One-bit-per-pixel masks.
//!
//! Bits are stored row-major in `u64` words, so index `y * width + x` is the
//! pixel at `(x, y)`. Bits past `width * height` are always zero.

/// A packed boolean mask sized to an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    words: Vec<u64>,
}

impl Mask {
    /// Create an all-clear mask.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            words: vec![0; len.div_ceil(64)],
        }
    }

    /// Build a mask from pre-packed words (64 pixels per word).
    pub(crate) fn from_words(width: u32, height: u32, words: Vec<u64>) -> Self {
        let mut mask = Self {
            width,
            height,
            words,
        };
        debug_assert_eq!(mask.words.len(), mask.len().div_ceil(64));
        mask.clear_tail();
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels covered.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear index of `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        self.words[idx / 64] >> (idx % 64) & 1 == 1
    }

    #[inline]
    pub fn set(&mut self, idx: usize) {
        self.words[idx / 64] |= 1 << (idx % 64);
    }

    /// Number of set pixels.
    pub fn count(&self) -> u64 {
        self.words.iter().map(|w| w.count_ones() as u64).sum()
    }

    /// Iterate over the indices of set pixels in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(i * 64 + bit)
            })
        })
    }

    /// Pixel-wise AND.
    pub fn and(&self, other: &Mask) -> Mask {
        self.zip_with(other, |a, b| a & b)
    }

    /// Pixel-wise OR.
    pub fn or(&self, other: &Mask) -> Mask {
        self.zip_with(other, |a, b| a | b)
    }

    /// Pixels set here but not in `other`.
    pub fn and_not(&self, other: &Mask) -> Mask {
        self.zip_with(other, |a, b| a & !b)
    }

    /// Shift towards higher indices: `out[i] = self[i - k]`.
    pub fn shifted_forward(&self, k: usize) -> Mask {
        let n = self.words.len();
        let (word_shift, bit_shift) = (k / 64, (k % 64) as u32);
        let mut words = vec![0u64; n];

        for (j, out) in words.iter_mut().enumerate().skip(word_shift) {
            let src = j - word_shift;
            let mut value = self.words[src] << bit_shift;
            if bit_shift > 0 && src > 0 {
                value |= self.words[src - 1] >> (64 - bit_shift);
            }
            *out = value;
        }

        Mask::from_words(self.width, self.height, words)
    }

    /// Shift towards lower indices: `out[i] = self[i + k]`.
    pub fn shifted_back(&self, k: usize) -> Mask {
        let n = self.words.len();
        let (word_shift, bit_shift) = (k / 64, (k % 64) as u32);
        let mut words = vec![0u64; n];

        for (j, out) in words.iter_mut().enumerate() {
            let src = j + word_shift;
            if src >= n {
                break;
            }
            let mut value = self.words[src] >> bit_shift;
            if bit_shift > 0 && src + 1 < n {
                value |= self.words[src + 1] << (64 - bit_shift);
            }
            *out = value;
        }

        Mask::from_words(self.width, self.height, words)
    }

    /// Mask with every pixel in column `x` set.
    pub fn column(width: u32, height: u32, x: u32) -> Mask {
        let mut mask = Mask::new(width, height);
        if x < width {
            for y in 0..height {
                let idx = mask.index(x, y);
                mask.set(idx);
            }
        }
        mask
    }

    fn zip_with(&self, other: &Mask, op: impl Fn(u64, u64) -> u64) -> Mask {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        let words = self
            .words
            .iter()
            .zip(&other.words)
            .map(|(&a, &b)| op(a, b))
            .collect();
        Mask::from_words(self.width, self.height, words)
    }

    fn clear_tail(&mut self) {
        let used = self.len() % 64;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }
}
