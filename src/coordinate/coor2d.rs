use std::ops::{Index, IndexMut};

/// Generic 2D Coordinate tuple, with no fixed interpretation of the elements:
/// (longitude, latitude) in radians on the geographical side of a projection,
/// (easting, northing) on the projected side.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Coor2D(pub [f64; 2]);

impl Index<usize> for Coor2D {
    type Output = f64;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl IndexMut<usize> for Coor2D {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

// ----- C O N S T R U C T O R S ---------------------------------------------

/// Constructors
impl Coor2D {
    /// A `Coor2D` from latitude/longitude, with the angular input in degrees
    #[must_use]
    pub fn geo(latitude: f64, longitude: f64) -> Coor2D {
        Coor2D([longitude.to_radians(), latitude.to_radians()])
    }

    /// A `Coor2D` from longitude/latitude, with the angular input in degrees
    #[must_use]
    pub fn gis(longitude: f64, latitude: f64) -> Coor2D {
        Coor2D([longitude.to_radians(), latitude.to_radians()])
    }

    /// A `Coor2D` from its elements, taken as-is
    #[must_use]
    pub fn raw(first: f64, second: f64) -> Coor2D {
        Coor2D([first, second])
    }

    /// A `Coor2D` consisting of 2 `NaN`s. Used to mark failed transformations
    #[must_use]
    pub fn nan() -> Coor2D {
        Coor2D([f64::NAN, f64::NAN])
    }

    /// A `Coor2D` consisting of 2 `0`s
    #[must_use]
    pub fn origin() -> Coor2D {
        Coor2D([0., 0.])
    }
}

// ----- A C C E S S O R S ---------------------------------------------------

impl Coor2D {
    #[must_use]
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.0[1]
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.0[0].is_nan() || self.0[1].is_nan()
    }

    /// Transform both elements from degrees to radians
    #[must_use]
    pub fn to_radians(self) -> Coor2D {
        Coor2D([self.0[0].to_radians(), self.0[1].to_radians()])
    }

    /// Transform both elements from radians to degrees
    #[must_use]
    pub fn to_degrees(self) -> Coor2D {
        Coor2D([self.0[0].to_degrees(), self.0[1].to_degrees()])
    }

    /// Transform the internal lon/lat-in-radians to lat/lon-in-degrees
    #[must_use]
    pub fn to_geo(self) -> Coor2D {
        Coor2D([self.0[1].to_degrees(), self.0[0].to_degrees()])
    }

    /// Euclidean distance between two points in the plane
    #[must_use]
    pub fn hypot2(&self, other: &Coor2D) -> f64 {
        (self.0[0] - other.0[0]).hypot(self.0[1] - other.0[1])
    }
}

// ----- T E S T S ---------------------------------------------------
