#![warn(missing_docs)]

//! Analytic ray/primitive intersection for ray tracers.
//!
//! This crate re-exports the rtgeo workspace under one name: the math
//! aliases and rays, the polynomial solvers, bounding volumes, the 2D and
//! 3D primitive families, and their tagged binary codec.
//!
//! # Example
//!
//! ```
//! use rtgeo::{Point3, Ray3, Shape3, Sphere3, Vec3};
//!
//! let sphere = Sphere3::new(1.0, Point3::origin());
//! let ray = Ray3::new(Point3::new(0.0, 0.0, -5.0), Vec3::z()).unwrap();
//!
//! let hit = sphere.intersection(&ray, 0.0, f64::INFINITY).unwrap();
//! assert!((hit.t - 4.0).abs() < 1e-12);
//! assert!((hit.normal() + Vec3::z()).norm() < 1e-12);
//! ```

pub use rtgeo_bounds;
pub use rtgeo_codec;
pub use rtgeo_math;
pub use rtgeo_shapes;
pub use rtgeo_solve;

pub use rtgeo_bounds::{
    Aabb2, Aabb3, BoundingSphere3, BoundingVolume, BoundingVolume3, InfiniteBounds3,
};
pub use rtgeo_codec::{
    encode_primitive2, encode_primitive3, CodecError, Decode, DecodeFn, DecoderTable, Encode,
    Record,
};
pub use rtgeo_math::{
    Angle, Dir2, Dir3, OrthonormalBasis, Point2, Point3, Point4, Ray2, Ray3, RayError, Tolerance,
    Transform, Vec2, Vec3,
};
pub use rtgeo_shapes::{
    Circle2, Cone3, Curve3, Cylinder3, Disk3, GeometryError, Hyperboloid3, Identified,
    LineSegment2, Paraboloid3, Plane3, Polygon2, Polygon3, Primitive2, Primitive3,
    RectangularCuboid3, Rectangle2, Shape2, Shape3, Sphere3, SurfaceIntersection3, Torus3,
    Triangle2, Triangle3, Vertex3,
};
pub use rtgeo_solve::{solve_cubic, solve_quadratic, solve_quartic};
