//! Attribute and index buffer model
//!
//! A [`Geometry`] holds at most one [`VertexAttribBuffer`] per attribute kind,
//! the vertex count all of them share, and an optional [`IndexBuffer`] with a
//! flat triangle list. The bookkeeping operations here never perform
//! geometric work; they only enforce the buffer invariants:
//!
//! - every attached buffer holds exactly `num_vertices` elements
//! - every index is `< num_vertices` and the index count is a multiple of 3

use bytemuck::cast_slice;
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::types::{AttribFlags, AttribKind, AttribSize, IndexSize};

/// Allocate an empty vector able to hold `len` elements without growing
pub(crate) fn try_vec<T>(what: &'static str, len: usize) -> Result<Vec<T>> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len).map_err(|_| Error::Allocation {
        what,
        bytes: len.saturating_mul(size_of::<T>()),
    })?;
    Ok(vec)
}

/// One contiguous stream of a single vertex attribute
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribBuffer {
    kind: AttribKind,
    size: AttribSize,
    data: Vec<f32>,
}

impl VertexAttribBuffer {
    /// Wrap `data` as a stream of `size`-float elements
    ///
    /// The element size is not checked against `kind` here; that happens when
    /// the buffer is attached to a [`Geometry`].
    pub fn new(kind: AttribKind, size: AttribSize, data: Vec<f32>) -> Result<Self> {
        if data.len() % size.components() != 0 {
            return Err(Error::invalid(
                "data",
                format!(
                    "{} floats do not form whole {}-float elements",
                    data.len(),
                    size.components()
                ),
            ));
        }
        Ok(Self { kind, size, data })
    }

    pub fn kind(&self) -> AttribKind {
        self.kind
    }

    pub fn size(&self) -> AttribSize {
        self.size
    }

    /// Byte distance between consecutive elements (buffers are tightly packed)
    pub fn stride(&self) -> u32 {
        self.size.bytes()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len() / self.size.components()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        cast_slice(&self.data)
    }

    pub fn as_float2(&self) -> Option<&[[f32; 2]]> {
        (self.size == AttribSize::Float2).then(|| cast_slice(&self.data))
    }

    pub fn as_float3(&self) -> Option<&[[f32; 3]]> {
        (self.size == AttribSize::Float3).then(|| cast_slice(&self.data))
    }

    pub fn as_float4(&self) -> Option<&[[f32; 4]]> {
        (self.size == AttribSize::Float4).then(|| cast_slice(&self.data))
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }
}

/// Packed index storage at one of the supported widths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

/// Flat triangle-list index stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBuffer {
    data: IndexData,
}

impl IndexBuffer {
    pub fn new(data: IndexData) -> Self {
        Self { data }
    }

    /// Pack `values` at `size`, failing if any value does not fit
    pub fn from_u32(values: &[u32], size: IndexSize) -> Result<Self> {
        let mut buffer = Self::with_capacity(size, values.len())?;
        for &value in values {
            buffer.push(value).map_err(|_| {
                Error::invalid(
                    "indices",
                    format!("index {value} does not fit in {} bytes", size.bytes()),
                )
            })?;
        }
        Ok(buffer)
    }

    pub(crate) fn with_capacity(size: IndexSize, capacity: usize) -> Result<Self> {
        let data = match size {
            IndexSize::U8 => IndexData::U8(try_vec("index buffer", capacity)?),
            IndexSize::U16 => IndexData::U16(try_vec("index buffer", capacity)?),
            IndexSize::U32 => IndexData::U32(try_vec("index buffer", capacity)?),
        };
        Ok(Self { data })
    }

    /// Append one index, narrowing it to the buffer width
    pub(crate) fn push(&mut self, value: u32) -> Result<()> {
        let overflow = || Error::internal(format!("index {value} overflows the index width"));
        match &mut self.data {
            IndexData::U8(v) => v.push(u8::try_from(value).map_err(|_| overflow())?),
            IndexData::U16(v) => v.push(u16::try_from(value).map_err(|_| overflow())?),
            IndexData::U32(v) => v.push(value),
        }
        Ok(())
    }

    pub fn size(&self) -> IndexSize {
        match self.data {
            IndexData::U8(_) => IndexSize::U8,
            IndexData::U16(_) => IndexSize::U16,
            IndexData::U32(_) => IndexSize::U32,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            IndexData::U8(v) => v.len(),
            IndexData::U16(v) => v.len(),
            IndexData::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize) -> Option<u32> {
        match &self.data {
            IndexData::U8(v) => v.get(i).map(|&x| u32::from(x)),
            IndexData::U16(v) => v.get(i).map(|&x| u32::from(x)),
            IndexData::U32(v) => v.get(i).copied(),
        }
    }

    /// Index values widened to `u32`
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Consecutive index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        (0..self.len() / 3).filter_map(move |t| {
            Some([self.get(t * 3)?, self.get(t * 3 + 1)?, self.get(t * 3 + 2)?])
        })
    }

    pub fn data(&self) -> &IndexData {
        &self.data
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            IndexData::U8(v) => v,
            IndexData::U16(v) => cast_slice(v),
            IndexData::U32(v) => cast_slice(v),
        }
    }
}

/// Vertex attribute streams plus an optional index stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    attributes: IndexMap<AttribKind, VertexAttribBuffer>,
    num_vertices: u32,
    indices: Option<IndexBuffer>,
}

impl Geometry {
    /// Empty geometry whose streams must hold `num_vertices` elements
    pub fn new(num_vertices: u32) -> Self {
        Self {
            attributes: IndexMap::new(),
            num_vertices,
            indices: None,
        }
    }

    pub fn num_vertices(&self) -> u32 {
        self.num_vertices
    }

    /// Number of indices (0 without an index buffer)
    pub fn num_indices(&self) -> u32 {
        // set_index_buffer rejects streams longer than u32::MAX
        self.indices.as_ref().map_or(0, |b| b.len() as u32)
    }

    pub fn triangle_count(&self) -> u32 {
        self.num_indices() / 3
    }

    /// True when no stream of any kind is attached
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.indices.is_none()
    }

    /// Attach `buffer`, replacing (and returning) any buffer of the same kind
    ///
    /// # Errors
    /// `InvalidArgument` when the element size is not the one the attribute
    /// kind requires, or the element count differs from `num_vertices`.
    pub fn attach(&mut self, buffer: VertexAttribBuffer) -> Result<Option<VertexAttribBuffer>> {
        let expected = buffer.kind.size();
        if buffer.size != expected {
            return Err(Error::invalid(
                "attrib_size",
                format!(
                    "{} buffers hold {} floats per element, got {}",
                    buffer.kind,
                    expected.components(),
                    buffer.size.components()
                ),
            ));
        }
        if buffer.len() != self.num_vertices as usize {
            return Err(Error::invalid(
                "attrib_buffer",
                format!(
                    "{} buffer holds {} elements, geometry has {} vertices",
                    buffer.kind,
                    buffer.len(),
                    self.num_vertices
                ),
            ));
        }
        Ok(self.attributes.insert(buffer.kind, buffer))
    }

    /// Remove the buffer of `kind`; absent buffers are not an error
    pub fn detach(&mut self, kind: AttribKind) -> Option<VertexAttribBuffer> {
        self.attributes.shift_remove(&kind)
    }

    /// Install `buffer` as the index stream, returning the previous one
    ///
    /// # Errors
    /// `InvalidArgument` when the stream is not a whole number of triangles
    /// or references a vertex `>= num_vertices`.
    pub fn set_index_buffer(&mut self, buffer: IndexBuffer) -> Result<Option<IndexBuffer>> {
        if buffer.len() % 3 != 0 {
            return Err(Error::invalid(
                "indices",
                format!("{} indices do not form whole triangles", buffer.len()),
            ));
        }
        if u32::try_from(buffer.len()).is_err() {
            return Err(Error::invalid("indices", "more than u32::MAX indices"));
        }
        if let Some(bad) = buffer.iter().find(|&i| i >= self.num_vertices) {
            return Err(Error::invalid(
                "indices",
                format!("index {bad} out of range for {} vertices", self.num_vertices),
            ));
        }
        Ok(self.indices.replace(buffer))
    }

    pub fn attribute(&self, kind: AttribKind) -> Option<&VertexAttribBuffer> {
        self.attributes.get(&kind)
    }

    /// Attached buffers in insertion order
    pub fn attributes(&self) -> impl Iterator<Item = &VertexAttribBuffer> {
        self.attributes.values()
    }

    pub fn attribute_flags(&self) -> AttribFlags {
        self.attributes
            .keys()
            .fold(AttribFlags::empty(), |flags, kind| flags | kind.flag())
    }

    pub fn index_buffer(&self) -> Option<&IndexBuffer> {
        self.indices.as_ref()
    }

    pub fn positions(&self) -> Option<&[[f32; 3]]> {
        self.attribute(AttribKind::Position)?.as_float3()
    }

    pub fn normals(&self) -> Option<&[[f32; 3]]> {
        self.attribute(AttribKind::Normal)?.as_float3()
    }

    pub fn texcoords(&self) -> Option<&[[f32; 2]]> {
        self.attribute(AttribKind::Texcoord)?.as_float2()
    }

    pub fn tangents(&self) -> Option<&[[f32; 4]]> {
        self.attribute(AttribKind::Tangent)?.as_float4()
    }

    pub fn bitangents(&self) -> Option<&[[f32; 3]]> {
        self.attribute(AttribKind::Bitangent)?.as_float3()
    }

    /// Index triples of the triangle list (empty without an index buffer)
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.iter().flat_map(IndexBuffer::triangles)
    }

    /// Total bytes held by all streams
    pub fn byte_size(&self) -> usize {
        let vertex_bytes: usize = self.attributes.values().map(|b| b.as_bytes().len()).sum();
        vertex_bytes + self.indices.as_ref().map_or(0, |b| b.as_bytes().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(count: usize) -> VertexAttribBuffer {
        VertexAttribBuffer::new(AttribKind::Position, AttribSize::Float3, vec![0.0; count * 3])
            .unwrap()
    }

    #[test]
    fn test_attach_inserts_then_replaces() {
        let mut geometry = Geometry::new(4);
        assert!(geometry.attach(positions(4)).unwrap().is_none());

        let replaced = geometry.attach(positions(4)).unwrap();
        assert!(replaced.is_some());
        assert_eq!(geometry.attributes().count(), 1);
        assert_eq!(geometry.attribute_flags(), AttribFlags::POSITION);
    }

    #[test]
    fn test_attach_rejects_wrong_arity() {
        let mut geometry = Geometry::new(4);
        let buffer =
            VertexAttribBuffer::new(AttribKind::Position, AttribSize::Float, vec![0.0; 4]).unwrap();

        let err = geometry.attach(buffer).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { field: "attrib_size", .. }));
        assert!(geometry.is_empty());
    }

    #[test]
    fn test_attach_rejects_wrong_length() {
        let mut geometry = Geometry::new(4);
        let err = geometry.attach(positions(3)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { field: "attrib_buffer", .. }));
    }

    #[test]
    fn test_buffer_rejects_partial_elements() {
        let err = VertexAttribBuffer::new(AttribKind::Texcoord, AttribSize::Float2, vec![0.0; 5])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { field: "data", .. }));
    }

    #[test]
    fn test_detach_missing_is_noop() {
        let mut geometry = Geometry::new(2);
        assert!(geometry.detach(AttribKind::Normal).is_none());

        geometry.attach(positions(2)).unwrap();
        assert!(geometry.detach(AttribKind::Position).is_some());
        assert!(geometry.is_empty());
    }

    #[test]
    fn test_detach_keeps_insertion_order() {
        let mut geometry = Geometry::new(1);
        let uv = VertexAttribBuffer::new(AttribKind::Texcoord, AttribSize::Float2, vec![0.0; 2]);
        let normals =
            VertexAttribBuffer::new(AttribKind::Normal, AttribSize::Float3, vec![0.0; 3]).unwrap();
        geometry.attach(uv.unwrap()).unwrap();
        geometry.attach(positions(1)).unwrap();
        geometry.attach(normals).unwrap();

        geometry.detach(AttribKind::Position);
        let kinds: Vec<_> = geometry.attributes().map(VertexAttribBuffer::kind).collect();
        assert_eq!(kinds, vec![AttribKind::Texcoord, AttribKind::Normal]);
    }

    #[test]
    fn test_set_index_buffer_validates() {
        let mut geometry = Geometry::new(3);

        let partial = IndexBuffer::from_u32(&[0, 1], IndexSize::U16).unwrap();
        assert!(geometry.set_index_buffer(partial).is_err());

        let out_of_range = IndexBuffer::from_u32(&[0, 1, 3], IndexSize::U16).unwrap();
        assert!(geometry.set_index_buffer(out_of_range).is_err());
        assert!(geometry.index_buffer().is_none());

        let valid = IndexBuffer::from_u32(&[0, 1, 2], IndexSize::U8).unwrap();
        assert!(geometry.set_index_buffer(valid).unwrap().is_none());

        let again = IndexBuffer::from_u32(&[2, 1, 0], IndexSize::U32).unwrap();
        let previous = geometry.set_index_buffer(again).unwrap().unwrap();
        assert_eq!(previous.size(), IndexSize::U8);
        assert_eq!(geometry.num_indices(), 3);
        assert_eq!(geometry.triangles().collect::<Vec<_>>(), vec![[2, 1, 0]]);
    }

    #[test]
    fn test_index_narrowing() {
        assert!(IndexBuffer::from_u32(&[255], IndexSize::U8).is_ok());
        let err = IndexBuffer::from_u32(&[256], IndexSize::U8).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { field: "indices", .. }));

        let buffer = IndexBuffer::from_u32(&[1, 2, 70_000], IndexSize::U32).unwrap();
        assert_eq!(buffer.as_bytes().len(), 12);
        assert_eq!(buffer.iter().collect::<Vec<_>>(), vec![1, 2, 70_000]);
    }

    #[test]
    fn test_typed_views_follow_element_size() {
        let data = vec![0.0, 1.0, 0.5, 0.5];
        let buffer =
            VertexAttribBuffer::new(AttribKind::Texcoord, AttribSize::Float2, data).unwrap();
        assert_eq!(buffer.as_float2().unwrap(), &[[0.0, 1.0], [0.5, 0.5]]);
        assert!(buffer.as_float3().is_none());
        assert_eq!(buffer.stride(), 8);
        assert_eq!(buffer.as_bytes().len(), 16);
    }

    #[test]
    fn test_byte_size_counts_all_streams() {
        let mut geometry = Geometry::new(3);
        geometry.attach(positions(3)).unwrap();
        geometry
            .set_index_buffer(IndexBuffer::from_u32(&[0, 1, 2], IndexSize::U16).unwrap())
            .unwrap();
        assert_eq!(geometry.byte_size(), 3 * 12 + 3 * 2);
    }
}
