mod coor2d;
pub use coor2d::Coor2D;
