//! Flat four-index tensor storage
//!
//! Integral blocks and doubles amplitudes are rank-4 tensors. They are kept
//! as a flat `Vec<f64>` in row-major order behind a thin value type, indexed
//! with `(i, j, k, l)` tuples.

use std::ops::{Index, IndexMut};

/// A dense rank-4 tensor in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor4 {
    dims: [usize; 4],
    data: Vec<f64>,
}

impl Tensor4 {
    /// Create a zero-filled tensor with the given dimensions.
    pub fn zeros(dims: [usize; 4]) -> Self {
        let len = dims.iter().product();
        Tensor4 {
            dims,
            data: vec![0.0; len],
        }
    }

    /// Wrap an existing row-major buffer. Panics if the length does not
    /// match the dimensions.
    pub fn from_vec(dims: [usize; 4], data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            dims.iter().product::<usize>(),
            "tensor data length does not match dimensions"
        );
        Tensor4 { dims, data }
    }

    pub fn dims(&self) -> [usize; 4] {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn offset(&self, i: usize, j: usize, k: usize, l: usize) -> usize {
        debug_assert!(i < self.dims[0] && j < self.dims[1] && k < self.dims[2] && l < self.dims[3]);
        ((i * self.dims[1] + j) * self.dims[2] + k) * self.dims[3] + l
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// True when every entry is a finite number.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

impl Index<(usize, usize, usize, usize)> for Tensor4 {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j, k, l): (usize, usize, usize, usize)) -> &f64 {
        &self.data[self.offset(i, j, k, l)]
    }
}

impl IndexMut<(usize, usize, usize, usize)> for Tensor4 {
    #[inline]
    fn index_mut(&mut self, (i, j, k, l): (usize, usize, usize, usize)) -> &mut f64 {
        let off = self.offset(i, j, k, l);
        &mut self.data[off]
    }
}
