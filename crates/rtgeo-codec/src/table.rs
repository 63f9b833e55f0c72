//! Id-dispatched decoding into the closed primitive families.

use crate::{CodecError, Decode, Record};
use log::{debug, trace};
use rtgeo_shapes::{
    Circle2, Cone3, Curve3, Cylinder3, Disk3, Hyperboloid3, LineSegment2, Paraboloid3,
    Plane3, Polygon2, Polygon3, Primitive2, Primitive3, RectangularCuboid3, Rectangle2, Sphere3,
    Torus3, Triangle2, Triangle3,
};
use std::collections::HashMap;
use std::io::{Read, Write};

/// Reads the fields of one record, the id having been consumed already.
pub type DecodeFn<P> = fn(&mut dyn Read) -> Result<P, CodecError>;

/// Maps type ids to field decoders producing `P`.
#[derive(Debug, Clone)]
pub struct DecoderTable<P> {
    decoders: HashMap<i32, DecodeFn<P>>,
}

impl<P> DecoderTable<P> {
    /// Build a table from `(id, decoder)` entries.
    ///
    /// Fails on the first id that appears twice.
    pub fn new(entries: impl IntoIterator<Item = (i32, DecodeFn<P>)>) -> Result<Self, CodecError> {
        let mut decoders = HashMap::new();
        for (id, decode) in entries {
            if decoders.insert(id, decode).is_some() {
                return Err(CodecError::DuplicateId(id));
            }
        }
        debug!("decoder table built with {} entries", decoders.len());
        Ok(Self { decoders })
    }

    /// Read an id and decode the record it introduces.
    pub fn decode(&self, reader: &mut dyn Read) -> Result<P, CodecError> {
        let id = i32::decode(reader)?;
        let decode = self.decoders.get(&id).ok_or(CodecError::UnsupportedId(id))?;
        trace!("decoding record with id {id}");
        decode(reader)
    }

    /// Whether records tagged `id` can be decoded.
    pub fn is_supported(&self, id: i32) -> bool {
        self.decoders.contains_key(&id)
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// Whether no ids are registered.
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

fn read_as<T, P>(reader: &mut dyn Read) -> Result<P, CodecError>
where
    T: Record + Into<P>,
{
    T::read_fields(reader).map(Into::into)
}

fn entry<T, P>() -> (i32, DecodeFn<P>)
where
    T: Record + Into<P>,
{
    (T::ID, read_as::<T, P>)
}

impl DecoderTable<Primitive3> {
    /// Every 3D primitive.
    pub fn standard() -> Self {
        Self::from_unique([
            entry::<Sphere3, _>(),
            entry::<Torus3, _>(),
            entry::<Cylinder3, _>(),
            entry::<Cone3, _>(),
            entry::<Paraboloid3, _>(),
            entry::<Hyperboloid3, _>(),
            entry::<Disk3, _>(),
            entry::<Plane3, _>(),
            entry::<RectangularCuboid3, _>(),
            entry::<Triangle3, _>(),
            entry::<Polygon3, _>(),
            entry::<Curve3, _>(),
        ])
    }
}

impl DecoderTable<Primitive2> {
    /// Every 2D primitive.
    pub fn standard() -> Self {
        Self::from_unique([
            entry::<Circle2, _>(),
            entry::<Rectangle2, _>(),
            entry::<Triangle2, _>(),
            entry::<Polygon2, _>(),
            entry::<LineSegment2, _>(),
        ])
    }
}

impl<P> DecoderTable<P> {
    /// Table over the built-in families, whose ids are distinct constants.
    fn from_unique<const N: usize>(entries: [(i32, DecodeFn<P>); N]) -> Self {
        let decoders: HashMap<_, _> = entries.into_iter().collect();
        debug_assert_eq!(decoders.len(), N, "duplicate id in a built-in decoder table");
        debug!("decoder table built with {} entries", decoders.len());
        Self { decoders }
    }
}

/// Write any 3D primitive as a tagged record.
pub fn encode_primitive3<W: Write + ?Sized>(primitive: &Primitive3, writer: &mut W) -> Result<(), CodecError> {
    match primitive {
        Primitive3::Sphere(s) => s.encode(writer),
        Primitive3::Torus(s) => s.encode(writer),
        Primitive3::Cylinder(s) => s.encode(writer),
        Primitive3::Cone(s) => s.encode(writer),
        Primitive3::Paraboloid(s) => s.encode(writer),
        Primitive3::Hyperboloid(s) => s.encode(writer),
        Primitive3::Disk(s) => s.encode(writer),
        Primitive3::Plane(s) => s.encode(writer),
        Primitive3::RectangularCuboid(s) => s.encode(writer),
        Primitive3::Triangle(s) => s.encode(writer),
        Primitive3::Polygon(s) => s.encode(writer),
        Primitive3::Curve(s) => s.encode(writer),
    }
}

/// Write any 2D primitive as a tagged record.
pub fn encode_primitive2<W: Write + ?Sized>(primitive: &Primitive2, writer: &mut W) -> Result<(), CodecError> {
    match primitive {
        Primitive2::Circle(s) => s.encode(writer),
        Primitive2::Rectangle(s) => s.encode(writer),
        Primitive2::Triangle(s) => s.encode(writer),
        Primitive2::Polygon(s) => s.encode(writer),
        Primitive2::LineSegment(s) => s.encode(writer),
    }
}
