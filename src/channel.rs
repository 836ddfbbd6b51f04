use crate::error::{Result, SegmentationError};

/// A row-major 2-D buffer holding one value per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

/// Per-pixel class labels: `0..N` for chromatic classes, negative codes for
/// the achromatic overrides.
pub type ClassLabelMap = Channel<i32>;

impl<T> Channel<T> {
    pub fn new(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        if data.len() != width as usize * height as usize {
            return Err(SegmentationError::BufferLength {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: u32, height: u32, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get((y * self.width + x) as usize)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Fails with `ShapeMismatch` unless `other` has the same dimensions.
    pub fn ensure_same_shape<U>(&self, other: &Channel<U>) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(SegmentationError::ShapeMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }
}
