//! Per-type record encoding.

use crate::field::{read_list, write_list};
use crate::{CodecError, Decode, Encode};
use rtgeo_math::{Angle, Point2, Point3};
use rtgeo_shapes::{
    Circle2, Cone3, Curve3, Cylinder3, Disk3, Hyperboloid3, Identified, LineSegment2, Paraboloid3,
    Plane3, Polygon2, Polygon3, RectangularCuboid3, Rectangle2, Sphere3, Torus3, Triangle2,
    Triangle3, Vertex3,
};
use std::io::{Read, Write};

/// A primitive with a tagged binary form.
///
/// The record is the type id followed by the fields written by
/// [`Record::write_fields`].
pub trait Record: Identified + Sized {
    /// Write the defining fields, without the id.
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError>;

    /// Read the defining fields, without the id, and rebuild the primitive.
    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError>;

    /// Whether this decoder accepts records tagged `id`.
    fn is_supported(id: i32) -> bool {
        id == Self::ID
    }

    /// Write the id, then the fields.
    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        Self::ID.encode(writer)?;
        self.write_fields(writer)
    }

    /// Read the id and, only if it is this type's, the fields.
    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let id = i32::decode(reader)?;
        if !Self::is_supported(id) {
            return Err(CodecError::InvalidId {
                expected: Self::ID,
                actual: id,
            });
        }
        Self::read_fields(reader)
    }
}

impl Record for Sphere3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.radius.encode(writer)?;
        self.center.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let radius = f64::decode(reader)?;
        let center = Point3::decode(reader)?;
        Ok(Sphere3::new(radius, center))
    }
}

impl Record for Torus3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.radius_inner.encode(writer)?;
        self.radius_outer.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let radius_inner = f64::decode(reader)?;
        let radius_outer = f64::decode(reader)?;
        Ok(Torus3::new(radius_inner, radius_outer))
    }
}

impl Record for Cylinder3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.phi_max.encode(writer)?;
        self.radius.encode(writer)?;
        self.z_min.encode(writer)?;
        self.z_max.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let phi_max = Angle::decode(reader)?;
        let radius = f64::decode(reader)?;
        let z_min = f64::decode(reader)?;
        let z_max = f64::decode(reader)?;
        Ok(Cylinder3::new(phi_max, radius, z_min, z_max))
    }
}

impl Record for Cone3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.phi_max.encode(writer)?;
        self.radius.encode(writer)?;
        self.z_max.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let phi_max = Angle::decode(reader)?;
        let radius = f64::decode(reader)?;
        let z_max = f64::decode(reader)?;
        Ok(Cone3::new(phi_max, radius, z_max))
    }
}

impl Record for Paraboloid3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.phi_max.encode(writer)?;
        self.radius.encode(writer)?;
        self.z_min.encode(writer)?;
        self.z_max.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let phi_max = Angle::decode(reader)?;
        let radius = f64::decode(reader)?;
        let z_min = f64::decode(reader)?;
        let z_max = f64::decode(reader)?;
        Ok(Paraboloid3::new(phi_max, radius, z_min, z_max))
    }
}

impl Record for Hyperboloid3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.phi_max().encode(writer)?;
        self.a().encode(writer)?;
        self.b().encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let phi_max = Angle::decode(reader)?;
        let a = Point3::decode(reader)?;
        let b = Point3::decode(reader)?;
        Ok(Hyperboloid3::new(phi_max, a, b))
    }
}

impl Record for Disk3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.phi_max.encode(writer)?;
        self.radius_inner.encode(writer)?;
        self.radius_outer.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let phi_max = Angle::decode(reader)?;
        let radius_inner = f64::decode(reader)?;
        let radius_outer = f64::decode(reader)?;
        Ok(Disk3::new(phi_max, radius_inner, radius_outer))
    }
}

impl Record for Plane3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        for point in self.points() {
            point.encode(writer)?;
        }
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let a = Point3::decode(reader)?;
        let b = Point3::decode(reader)?;
        let c = Point3::decode(reader)?;
        Ok(Plane3::new(a, b, c))
    }
}

impl Record for RectangularCuboid3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.minimum.encode(writer)?;
        self.maximum.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let minimum = Point3::decode(reader)?;
        let maximum = Point3::decode(reader)?;
        Ok(RectangularCuboid3::new(minimum, maximum))
    }
}

impl Record for Triangle3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.a.encode(writer)?;
        self.b.encode(writer)?;
        self.c.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let a = Vertex3::decode(reader)?;
        let b = Vertex3::decode(reader)?;
        let c = Vertex3::decode(reader)?;
        Ok(Triangle3::new(a, b, c))
    }
}

impl Record for Polygon3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        write_list(self.points(), writer)
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let points = read_list::<Point3, _>(reader)?;
        Ok(Polygon3::new(points)?)
    }
}

impl Record for Curve3 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        write_list(self.points(), writer)?;
        self.width_start().encode(writer)?;
        self.width_end().encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let points = read_list::<Point3, _>(reader)?;
        let width_start = f64::decode(reader)?;
        let width_end = f64::decode(reader)?;
        Ok(Curve3::new(points, width_start, width_end)?)
    }
}

impl Record for Circle2 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.center.encode(writer)?;
        self.radius.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let center = Point2::decode(reader)?;
        let radius = f64::decode(reader)?;
        Ok(Circle2::new(center, radius))
    }
}

impl Record for Rectangle2 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.minimum.encode(writer)?;
        self.maximum.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let minimum = Point2::decode(reader)?;
        let maximum = Point2::decode(reader)?;
        Ok(Rectangle2::new(minimum, maximum))
    }
}

impl Record for Triangle2 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.a.encode(writer)?;
        self.b.encode(writer)?;
        self.c.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let a = Point2::decode(reader)?;
        let b = Point2::decode(reader)?;
        let c = Point2::decode(reader)?;
        Ok(Triangle2::new(a, b, c))
    }
}

impl Record for Polygon2 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        write_list(self.points(), writer)
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let points = read_list::<Point2, _>(reader)?;
        Ok(Polygon2::new(points)?)
    }
}

impl Record for LineSegment2 {
    fn write_fields<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.a.encode(writer)?;
        self.b.encode(writer)?;
        Ok(())
    }

    fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let a = Point2::decode(reader)?;
        let b = Point2::decode(reader)?;
        Ok(LineSegment2::new(a, b))
    }
}
