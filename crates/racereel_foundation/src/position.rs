//! Competitor positions.
//!
//! A position is domain dependent: a track coordinate for cars and karts, a
//! 3D coordinate for drones, or a single scalar (distance covered, or a rank)
//! for profiles that only record progress.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported position dimensionality.
pub const MAX_DIMENSIONS: usize = 3;

/// A 1 to 3 dimensional position.
#[derive(Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    coords: [f64; MAX_DIMENSIONS],
    dims: u8,
}

impl Position {
    /// Creates a scalar position (distance or rank).
    #[must_use]
    pub const fn scalar(value: f64) -> Self {
        Self {
            coords: [value, 0.0, 0.0],
            dims: 1,
        }
    }

    /// Creates a planar position.
    #[must_use]
    pub const fn planar(x: f64, y: f64) -> Self {
        Self {
            coords: [x, y, 0.0],
            dims: 2,
        }
    }

    /// Creates a spatial position.
    #[must_use]
    pub const fn spatial(x: f64, y: f64, z: f64) -> Self {
        Self {
            coords: [x, y, z],
            dims: 3,
        }
    }

    /// Creates a position from a slice of 1 to 3 finite components.
    #[must_use]
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        if values.is_empty() || values.len() > MAX_DIMENSIONS {
            return None;
        }
        if values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let mut coords = [0.0; MAX_DIMENSIONS];
        coords[..values.len()].copy_from_slice(values);
        #[allow(clippy::cast_possible_truncation)]
        Some(Self {
            coords,
            dims: values.len() as u8,
        })
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub const fn dims(&self) -> usize {
        self.dims as usize
    }

    /// Returns the components as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.coords[..self.dims()]
    }

    /// Returns the first component.
    ///
    /// For scalar profiles this is the distance or rank; for coordinate
    /// profiles it is X.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.coords[0]
    }

    /// Returns the second component, if present.
    #[must_use]
    pub const fn y(&self) -> Option<f64> {
        if self.dims >= 2 { Some(self.coords[1]) } else { None }
    }

    /// Returns the third component, if present.
    #[must_use]
    pub const fn z(&self) -> Option<f64> {
        if self.dims >= 3 { Some(self.coords[2]) } else { None }
    }

    /// Linearly interpolates towards `other`.
    ///
    /// `fraction` 0 yields `self`, 1 yields `other`. When the
    /// dimensionalities differ the result has the smaller of the two.
    #[must_use]
    pub fn lerp(&self, other: &Self, fraction: f64) -> Self {
        let dims = self.dims.min(other.dims);
        let mut coords = [0.0; MAX_DIMENSIONS];
        for (i, c) in coords.iter_mut().enumerate().take(dims as usize) {
            *c = self.coords[i] + (other.coords[i] - self.coords[i]) * fraction;
        }
        Self { coords, dims }
    }

    /// Euclidean distance to `other` over the shared dimensions.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dims = self.dims.min(other.dims) as usize;
        self.coords[..dims]
            .iter()
            .zip(&other.coords[..dims])
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position{:?}", self.as_slice())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c:.3}")?;
        }
        write!(f, ")")
    }
}
