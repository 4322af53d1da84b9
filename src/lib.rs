//! *Kort*: Cartographic map projections.
//!
//! Forward and inverse transformations between geographical coordinates
//! (longitude, latitude) and planar map coordinates (easting, northing),
//! for a family of equal area, conformal and compromise projections.
//!
//! Each projection is instantiated from a definition string, e.g.
//! `"aea lat_1=29.5 lat_2=45.5 ellps=clrk66"`, through a [Context]
//! or directly through [Op::new]. Instantiation precomputes all the
//! projection constants, so the resulting [Op] can be applied to any
//! number of coordinates, from any number of threads.
//!
//! ```
//! use kort::prelude::*;
//! let mut ctx = Minimal::new();
//! let op = ctx.op("stere lat_0=90 lat_ts=70")?;
//! let mut data = [Coor2D::geo(75., 12.)];
//! ctx.apply(op, Fwd, &mut data)?;
//! ctx.apply(op, Inv, &mut data)?;
//! assert!((data[0].to_degrees()[1] - 75.).abs() < 1e-9);
//! # Ok::<(), kort::Error>(())
//! ```

mod bibliography;
mod context;
mod coordinate;
mod ellipsoid;
mod inner_op;
pub mod math;
mod op;
mod token;

pub use bibliography::Bibliography;

/// The bread-and-butter, shrink-wrapped and ready to use
pub mod prelude {
    pub use crate::context::Context;
    pub use crate::context::Minimal;
    #[cfg(feature = "with_plain")]
    pub use crate::context::Plain;
    pub use crate::coordinate::Coor2D;
    pub use crate::ellipsoid::Ellipsoid;
    pub use crate::op::Op;
    pub use crate::op::OpHandle;
    pub use crate::Direction;
    pub use crate::Direction::Fwd;
    pub use crate::Direction::Inv;
    pub use crate::Error;
}

/// Preamble for crate-external projection authoring
pub mod authoring {
    pub use crate::prelude::*;

    pub use crate::inner_op::builtin_names;
    pub use crate::inner_op::OpConstructor;
    pub use crate::inner_op::Projection;
    pub use crate::math::*;
    pub use crate::op::GlobalParameters;
    pub use crate::op::OpDescriptor;
    pub use crate::op::OpParameter;
    pub use crate::op::ParsedParameters;
    pub use crate::op::RawParameters;
    pub use crate::token::parse_proj;
    pub use crate::token::Tokenize;

    pub use log::debug;
    pub use log::error;
    pub use log::trace;
    pub use log::warn;
    pub use std::collections::BTreeMap;
}

/// Preamble for crate-internal modules
pub(crate) mod internal {
    pub use crate::authoring::*;
    pub(crate) use crate::inner_op::builtin;
    pub use std::collections::BTreeSet;
    pub use std::f64::consts::FRAC_PI_2;
}

/// The *Kort* error messages.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("i/o error")]
    Io(#[from] std::io::Error),

    #[error("error: {0}")]
    General(&'static str),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("{0} not found{1}")]
    NotFound(String, String),

    #[error("unknown projection: {0}")]
    UnknownProjection(String),

    #[error("recursion too deep for {0}, at {1}")]
    Recursion(String, String),

    #[error("missing required parameter {0}")]
    MissingParam(String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),

    #[error("operator {0} is not invertible")]
    NonInvertible(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("no convergence in {0}")]
    Convergence(&'static str),

    #[error("coordinate outside the domain of {0}")]
    Domain(&'static str),

    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// `Fwd`: Indicate that a two-way operator, function, or method,
/// should run in the *forward* direction.
/// `Inv`: Indicate that a two-way operator, function, or method,
/// should run in the *inverse* direction.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Direction {
    Fwd,
    Inv,
}
