//! Geographic primitives.
//!
//! [`GeoPoint`] and [`GeoRect`] are plain value types with explicit
//! validation rather than constructor-enforced invariants: records
//! arrive from serde and from external stores, so validation happens at
//! the boundaries that care (spatial index insert, rectangle queries).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A WGS84 point: latitude in degrees north, longitude in degrees east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite and in range
    /// (lat ∈ [-90, 90], lon ∈ [-180, 180]).
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(Error::invalid_coordinates(format!(
                "non-finite point ({}, {})",
                self.latitude, self.longitude
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::invalid_coordinates(format!(
                "latitude {} out of range [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::invalid_coordinates(format!(
                "longitude {} out of range [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// An axis-aligned bounding rectangle (a map viewport).
///
/// Containment is `west <= lon <= east` and `south <= lat <= north`.
/// Rectangles that cross the antimeridian (west > east) are not handled
/// specially: they contain nothing. Callers wanting antimeridian
/// viewports must split them into two rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRect {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoRect {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Check that every edge is finite and in range.
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [("north", self.north), ("south", self.south)] {
            if !v.is_finite() || !(-90.0..=90.0).contains(&v) {
                return Err(Error::invalid_bounds(format!(
                    "{name} {v} out of range [-90, 90]"
                )));
            }
        }
        for (name, v) in [("east", self.east), ("west", self.west)] {
            if !v.is_finite() || !(-180.0..=180.0).contains(&v) {
                return Err(Error::invalid_bounds(format!(
                    "{name} {v} out of range [-180, 180]"
                )));
            }
        }
        Ok(())
    }

    /// Check if this rectangle contains a point.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude >= self.south
            && point.latitude <= self.north
            && point.longitude >= self.west
            && point.longitude <= self.east
    }
}
