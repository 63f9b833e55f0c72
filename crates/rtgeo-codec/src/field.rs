//! Big-endian encoding of the field types primitives are built from.

use crate::CodecError;
use rtgeo_math::{Angle, Point2, Point3, Point4, Vec3};
use rtgeo_shapes::Vertex3;
use std::io::{self, Read, Write};

/// A value that can be read from a byte stream.
pub trait Decode: Sized {
    /// Read one value.
    fn decode<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self>;
}

/// A value that can be written to a byte stream.
pub trait Encode {
    /// Write this value.
    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()>;
}

macro_rules! impl_scalar {
    ($($t:ty),*) => {
        $(
            impl Decode for $t {
                fn decode<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
                    let mut bytes = [0u8; std::mem::size_of::<$t>()];
                    reader.read_exact(&mut bytes)?;
                    Ok(<$t>::from_be_bytes(bytes))
                }
            }

            impl Encode for $t {
                fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
                    writer.write_all(&self.to_be_bytes())
                }
            }
        )*
    };
}

impl_scalar!(i32, f64);

macro_rules! impl_components {
    ($($t:ty => $n:literal, $zero:expr);*) => {
        $(
            impl Decode for $t {
                fn decode<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
                    let mut value: $t = $zero;
                    for i in 0..$n {
                        value[i] = f64::decode(reader)?;
                    }
                    Ok(value)
                }
            }

            impl Encode for $t {
                fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
                    for i in 0..$n {
                        self[i].encode(writer)?;
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_components!(
    Point2 => 2, Point2::origin();
    Point3 => 3, Point3::origin();
    Point4 => 4, Point4::origin();
    Vec3 => 3, Vec3::zeros()
);

impl Decode for Angle {
    fn decode<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        Ok(Angle::from_radians(f64::decode(reader)?))
    }
}

impl Encode for Angle {
    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        self.radians().encode(writer)
    }
}

impl Decode for Vertex3 {
    fn decode<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let texture_coordinates = Point2::decode(reader)?;
        let position = Point4::decode(reader)?;
        let normal = Vec3::decode(reader)?;
        Ok(Vertex3::new(texture_coordinates, position, normal))
    }
}

impl Encode for Vertex3 {
    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        self.texture_coordinates.encode(writer)?;
        self.position.encode(writer)?;
        self.normal.encode(writer)
    }
}

/// Write a count-prefixed list.
pub(crate) fn write_list<T: Encode, W: Write + ?Sized>(items: &[T], writer: &mut W) -> Result<(), CodecError> {
    let count = i32::try_from(items.len()).map_err(|_| CodecError::InvalidCount(items.len() as i64))?;
    count.encode(writer)?;
    for item in items {
        item.encode(writer)?;
    }
    Ok(())
}

/// Read a count-prefixed list, rejecting negative counts before any element.
pub(crate) fn read_list<T: Decode, R: Read + ?Sized>(reader: &mut R) -> Result<Vec<T>, CodecError> {
    let count = i32::decode(reader)?;
    let count = usize::try_from(count).map_err(|_| CodecError::InvalidCount(count.into()))?;
    // The count is untrusted; let the vector grow rather than reserving it all.
    let mut items = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        items.push(T::decode(reader)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_scalars_are_big_endian() {
        let mut buf = Vec::new();
        1i32.encode(&mut buf).unwrap();
        1.0f64.encode(&mut buf).unwrap();
        assert_eq!(&buf[..4], &[0, 0, 0, 1]);
        assert_eq!(&buf[4..], &[0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_point_is_consecutive_components() {
        let mut buf = Vec::new();
        Point3::new(1.0, -2.0, 0.5).encode(&mut buf).unwrap();
        assert_eq!(buf.len(), 24);
        assert_eq!(&buf[8..16], &(-2.0f64).to_be_bytes());
        let back = Point3::decode(&mut Cursor::new(buf)).unwrap();
        assert_eq!(back, Point3::new(1.0, -2.0, 0.5));
    }

    #[test]
    fn test_negative_count_rejected_before_elements() {
        let mut buf = Vec::new();
        (-3i32).encode(&mut buf).unwrap();
        let err = read_list::<Point2, _>(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, CodecError::InvalidCount(-3)));
    }

    #[test]
    fn test_truncated_list_is_io_error() {
        let mut buf = Vec::new();
        write_list(&[Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)], &mut buf).unwrap();
        buf.truncate(buf.len() - 1);
        let err = read_list::<Point2, _>(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }
}
