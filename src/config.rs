//! Tuning parameters for the dense kernels.

/// Thresholds used to pick between equivalent kernel variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Column count at or above which `Aᵗ·A` uses the direct column-dot
    /// kernel instead of the reordered one.
    pub mult_inner_switch: usize,
    /// Element count at or above which transpose switches to the blocked kernel.
    pub transpose_switch: usize,
    /// Tile width of the blocked transpose.
    pub block_width: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            mult_inner_switch: 100,
            transpose_switch: 375 * 375,
            block_width: 60,
        }
    }
}

impl KernelConfig {
    pub fn with_mult_inner_switch(mut self, cols: usize) -> Self {
        self.mult_inner_switch = cols;
        self
    }

    pub fn with_transpose_switch(mut self, elements: usize) -> Self {
        self.transpose_switch = elements;
        self
    }

    pub fn with_block_width(mut self, width: usize) -> Self {
        self.block_width = width.max(1);
        self
    }
}
