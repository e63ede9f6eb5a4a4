//! Little-endian primitive I/O shared by every codec in the scene format.
//!
//! All integers and floats are written little-endian with no padding, so a
//! component's payload is exactly the sum of its field widths.

use std::io::{self, Read, Write};

use duniya_math::{Quat, Vec3, Vec4};

use crate::error::{EcsError, Limit};

/// Upper bounds applied while decoding untrusted streams.
///
/// Counts are read before the data they describe; without a bound a corrupt
/// count would make the decoder allocate before it notices truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum entities in one scene.
    pub max_entities: u32,
    /// Maximum components attached to one entity.
    pub max_components_per_entity: u32,
    /// Maximum entries in a registry section.
    pub max_registry_entries: u32,
    /// Maximum byte length of a registry name.
    pub max_name_len: u32,
}

impl DecodeLimits {
    /// Fail with [`EcsError::LimitExceeded`] if `found` is above the bound
    /// for `limit`.
    pub fn check(&self, limit: Limit, found: u32) -> Result<(), EcsError> {
        let max = match limit {
            Limit::Entities => self.max_entities,
            Limit::ComponentsPerEntity => self.max_components_per_entity,
            Limit::RegistryEntries => self.max_registry_entries,
            Limit::NameLength => self.max_name_len,
        };
        if found > max {
            return Err(EcsError::LimitExceeded {
                limit,
                found: u64::from(found),
                max: u64::from(max),
            });
        }
        Ok(())
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_entities: 1_000_000,
            max_components_per_entity: 64,
            max_registry_entries: 256,
            max_name_len: 64,
        }
    }
}

pub fn write_u32<W: Write + ?Sized>(sink: &mut W, value: u32) -> io::Result<()> {
    sink.write_all(&value.to_le_bytes())
}

pub fn read_u32<R: Read + ?Sized>(source: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    source.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

pub fn write_f32<W: Write + ?Sized>(sink: &mut W, value: f32) -> io::Result<()> {
    sink.write_all(&value.to_le_bytes())
}

pub fn read_f32<R: Read + ?Sized>(source: &mut R) -> io::Result<f32> {
    let mut buf = [0u8; 4];
    source.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

pub fn write_vec3<W: Write + ?Sized>(sink: &mut W, value: Vec3) -> io::Result<()> {
    for lane in value.to_array() {
        write_f32(sink, lane)?;
    }
    Ok(())
}

pub fn read_vec3<R: Read + ?Sized>(source: &mut R) -> io::Result<Vec3> {
    Ok(Vec3::new(read_f32(source)?, read_f32(source)?, read_f32(source)?))
}

pub fn write_vec4<W: Write + ?Sized>(sink: &mut W, value: Vec4) -> io::Result<()> {
    for lane in value.to_array() {
        write_f32(sink, lane)?;
    }
    Ok(())
}

pub fn read_vec4<R: Read + ?Sized>(source: &mut R) -> io::Result<Vec4> {
    Ok(Vec4::new(
        read_f32(source)?,
        read_f32(source)?,
        read_f32(source)?,
        read_f32(source)?,
    ))
}

/// Quaternions are written x, y, z, w.
pub fn write_quat<W: Write + ?Sized>(sink: &mut W, value: Quat) -> io::Result<()> {
    for lane in value.to_array() {
        write_f32(sink, lane)?;
    }
    Ok(())
}

pub fn read_quat<R: Read + ?Sized>(source: &mut R) -> io::Result<Quat> {
    Ok(Quat::from_xyzw(
        read_f32(source)?,
        read_f32(source)?,
        read_f32(source)?,
        read_f32(source)?,
    ))
}

/// Write a `u32` length followed by the UTF-8 bytes of `name`.
pub fn write_name<W: Write + ?Sized>(sink: &mut W, name: &str) -> io::Result<()> {
    let len = u32::try_from(name.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "name longer than u32::MAX"))?;
    write_u32(sink, len)?;
    sink.write_all(name.as_bytes())
}

/// Read a length-prefixed name, rejecting lengths above the configured bound
/// and bytes that are not UTF-8.
pub fn read_name<R: Read + ?Sized>(source: &mut R, limits: &DecodeLimits) -> Result<String, EcsError> {
    let len = read_u32(source)?;
    limits.check(Limit::NameLength, len)?;
    let mut buf = vec![0u8; len as usize];
    source.read_exact(&mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| EcsError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_is_little_endian() {
        let mut buf = Vec::new();
        write_u32(&mut buf, 0x0403_0201).unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(read_u32(&mut buf.as_slice()).unwrap(), 0x0403_0201);
    }

    #[test]
    fn test_quat_lane_order() {
        let mut buf = Vec::new();
        write_quat(&mut buf, Quat::from_xyzw(0.0, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(buf.len(), 16);
        assert_eq!(&buf[12..], &1.0f32.to_le_bytes());
    }

    #[test]
    fn test_short_read_is_eof() {
        let err = read_u32(&mut [1u8, 2].as_slice()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_name_length_limit() {
        let limits = DecodeLimits {
            max_name_len: 4,
            ..DecodeLimits::default()
        };
        let mut buf = Vec::new();
        write_name(&mut buf, "Transform").unwrap();
        let err = read_name(&mut buf.as_slice(), &limits).unwrap_err();
        assert!(matches!(
            err,
            EcsError::LimitExceeded {
                limit: Limit::NameLength,
                found: 9,
                max: 4
            }
        ));
    }

    #[test]
    fn test_name_rejects_invalid_utf8() {
        let mut buf = Vec::new();
        write_u32(&mut buf, 2).unwrap();
        buf.extend_from_slice(&[0xff, 0xfe]);
        let err = read_name(&mut buf.as_slice(), &DecodeLimits::default()).unwrap_err();
        assert!(matches!(err, EcsError::Io(e) if e.kind() == io::ErrorKind::InvalidData));
    }
}
