
/// Some literature, that has been useful in designing and implementing this library.
pub enum Bibliography {
    /// Gerald I. Evenden (1990): *Cartographic Projection Procedures for the UNIX
    /// Environment: A User's Manual*. U.S. Geological Survey Open-File Report 90-284.
    /// [DOI](https://doi.org/10.3133/ofr90284)
    Eve90,

    /// Charles F.F. Karney (2011): *Transverse Mercator with an accuracy of a few nanometers*.
    /// J. Geodesy. 85(8): 475–485. The source of the numerically stable form of
    /// the `ts` function (cf. [crate::math::ts]).
    /// [DOI](https://doi.org/10.1007/s00190-011-0445-3).
    Kar11,

    /// Charles F.F. Karney (2023): *On auxiliary latitudes*.
    /// Survey Review, 56(395), pp. 165-180.
    /// [DOI](https://doi.org/10.1080/00396265.2023.2217604)
    Kar23,

    /// PROJ contributors (2023): *PROJ coordinate transformation software library*.
    /// Open Source Geospatial Foundation.
    /// [DOI](https://doi.org/10.5281/zenodo.5884394)
    Proj,

    /// John P. Snyder (1987): *Map Projections: A Working Manual*.
    /// U.S. Geological Survey Professional Paper 1395.
    /// [DOI](https://doi.org/10.3133/pp1395)
    Sny87,

    /// John P. Snyder and Philip M. Voxland (1989): *An Album of Map Projections*.
    /// U.S. Geological Survey Professional Paper 1453.
    /// [DOI](https://doi.org/10.3133/pp1453)
    Sny89,
}
