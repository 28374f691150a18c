use std::io::{Read, Write};

use bytes::Bytes;
use thiserror::Error;

use crate::codec::{
    Codec, var_int::VarInt, var_long::VarLong, var_uint::VarUInt, var_ulong::VarULong,
};

pub mod packet;

/// Hard cap on a single length-prefixed string. Geometry JSON is the
/// largest string the protocol carries in practice.
pub const MAX_STRING_LENGTH: usize = 1 << 21;
/// Hard cap on a single length-prefixed byte blob (skin/cape pixels).
pub const MAX_BYTE_ARRAY_LENGTH: usize = 1 << 22;
/// Hard cap on any wire-declared element count before we allocate.
pub const MAX_LIST_LENGTH: usize = 1 << 24;

#[derive(Debug, Error)]
pub enum ReadingError {
    #[error("EOF, tried to read {0} but no bytes left to consume")]
    Incomplete(String),
    #[error("{0} is too large")]
    TooLarge(String),
    #[error("{0}")]
    Message(String),
}

#[derive(Debug, Error)]
pub enum WritingError {
    #[error("failed to write to the underlying stream: {0}")]
    IoError(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

/// Byte-level read operations shared by every packet codec. All multi-byte
/// integers are little-endian on the Bedrock wire.
pub trait NetworkRead {
    fn get_u8(&mut self) -> Result<u8, ReadingError>;
    fn get_i8(&mut self) -> Result<i8, ReadingError>;
    fn get_bool(&mut self) -> Result<bool, ReadingError>;
    fn get_u16_le(&mut self) -> Result<u16, ReadingError>;
    fn get_i32_le(&mut self) -> Result<i32, ReadingError>;
    fn get_u32_le(&mut self) -> Result<u32, ReadingError>;
    fn get_u64_le(&mut self) -> Result<u64, ReadingError>;
    fn get_f32_le(&mut self) -> Result<f32, ReadingError>;

    fn get_var_uint(&mut self) -> Result<VarUInt, ReadingError>;
    fn get_var_int(&mut self) -> Result<VarInt, ReadingError>;
    fn get_var_ulong(&mut self) -> Result<VarULong, ReadingError>;
    fn get_var_long(&mut self) -> Result<VarLong, ReadingError>;

    fn read_boxed_slice(&mut self, count: usize) -> Result<Box<[u8]>, ReadingError>;

    fn get_string_bounded(&mut self, bound: usize) -> Result<String, ReadingError>;
    fn get_string(&mut self) -> Result<String, ReadingError>;
    /// An unsigned-varint length prefix followed by raw bytes. Same wire
    /// shape as a string, minus the UTF-8 requirement.
    fn get_byte_array(&mut self) -> Result<Bytes, ReadingError>;
    fn get_uuid(&mut self) -> Result<uuid::Uuid, ReadingError>;

    fn get_option<G>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<G, ReadingError>,
    ) -> Result<Option<G>, ReadingError>;

    fn get_list<G>(
        &mut self,
        parse: impl Fn(&mut Self) -> Result<G, ReadingError>,
    ) -> Result<Vec<G>, ReadingError>;
}

impl<R: Read> NetworkRead for R {
    fn get_u8(&mut self) -> Result<u8, ReadingError> {
        let mut buf = [0u8];
        self.read_exact(&mut buf)
            .map_err(|err| ReadingError::Incomplete(err.to_string()))?;

        Ok(buf[0])
    }

    fn get_i8(&mut self) -> Result<i8, ReadingError> {
        Ok(self.get_u8()? as i8)
    }

    fn get_bool(&mut self) -> Result<bool, ReadingError> {
        let byte = self.get_u8()?;
        Ok(byte != 0)
    }

    fn get_u16_le(&mut self) -> Result<u16, ReadingError> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)
            .map_err(|err| ReadingError::Incomplete(err.to_string()))?;

        Ok(u16::from_le_bytes(buf))
    }

    fn get_i32_le(&mut self) -> Result<i32, ReadingError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)
            .map_err(|err| ReadingError::Incomplete(err.to_string()))?;

        Ok(i32::from_le_bytes(buf))
    }

    fn get_u32_le(&mut self) -> Result<u32, ReadingError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)
            .map_err(|err| ReadingError::Incomplete(err.to_string()))?;

        Ok(u32::from_le_bytes(buf))
    }

    fn get_u64_le(&mut self) -> Result<u64, ReadingError> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)
            .map_err(|err| ReadingError::Incomplete(err.to_string()))?;

        Ok(u64::from_le_bytes(buf))
    }

    fn get_f32_le(&mut self) -> Result<f32, ReadingError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)
            .map_err(|err| ReadingError::Incomplete(err.to_string()))?;

        Ok(f32::from_le_bytes(buf))
    }

    fn get_var_uint(&mut self) -> Result<VarUInt, ReadingError> {
        VarUInt::decode(self)
    }

    fn get_var_int(&mut self) -> Result<VarInt, ReadingError> {
        VarInt::decode(self)
    }

    fn get_var_ulong(&mut self) -> Result<VarULong, ReadingError> {
        VarULong::decode(self)
    }

    fn get_var_long(&mut self) -> Result<VarLong, ReadingError> {
        VarLong::decode(self)
    }

    fn read_boxed_slice(&mut self, count: usize) -> Result<Box<[u8]>, ReadingError> {
        let mut buf = vec![0u8; count];
        self.read_exact(&mut buf)
            .map_err(|err| ReadingError::Incomplete(err.to_string()))?;

        Ok(buf.into())
    }

    fn get_string_bounded(&mut self, bound: usize) -> Result<String, ReadingError> {
        let size = self.get_var_uint()?.0 as usize;
        if size > bound {
            return Err(ReadingError::TooLarge("string".to_string()));
        }

        let data = self.read_boxed_slice(size)?;
        String::from_utf8(data.into()).map_err(|e| ReadingError::Message(e.to_string()))
    }

    fn get_string(&mut self) -> Result<String, ReadingError> {
        self.get_string_bounded(MAX_STRING_LENGTH)
    }

    fn get_byte_array(&mut self) -> Result<Bytes, ReadingError> {
        let size = self.get_var_uint()?.0 as usize;
        if size > MAX_BYTE_ARRAY_LENGTH {
            return Err(ReadingError::TooLarge("byte array".to_string()));
        }

        let data = self.read_boxed_slice(size)?;
        Ok(Bytes::from(Vec::from(data)))
    }

    fn get_uuid(&mut self) -> Result<uuid::Uuid, ReadingError> {
        let most = self.get_u64_le()?;
        let least = self.get_u64_le()?;
        Ok(uuid::Uuid::from_u64_pair(most, least))
    }

    fn get_option<G>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<G, ReadingError>,
    ) -> Result<Option<G>, ReadingError> {
        if self.get_bool()? {
            Ok(Some(parse(self)?))
        } else {
            Ok(None)
        }
    }

    fn get_list<G>(
        &mut self,
        parse: impl Fn(&mut Self) -> Result<G, ReadingError>,
    ) -> Result<Vec<G>, ReadingError> {
        let len = self.get_var_uint()?.0 as usize;
        if len > MAX_LIST_LENGTH {
            return Err(ReadingError::TooLarge("list".to_string()));
        }

        let mut list = Vec::with_capacity(len.min(4096));
        for _ in 0..len {
            list.push(parse(self)?);
        }
        Ok(list)
    }
}

/// Write-side mirror of [`NetworkRead`]. Emits the exact grammar the read
/// side consumes.
pub trait NetworkWrite {
    fn write_u8(&mut self, v: u8) -> Result<(), WritingError>;
    fn write_i8(&mut self, v: i8) -> Result<(), WritingError>;
    fn write_bool(&mut self, v: bool) -> Result<(), WritingError>;
    fn write_u16_le(&mut self, v: u16) -> Result<(), WritingError>;
    fn write_i32_le(&mut self, v: i32) -> Result<(), WritingError>;
    fn write_u32_le(&mut self, v: u32) -> Result<(), WritingError>;
    fn write_u64_le(&mut self, v: u64) -> Result<(), WritingError>;
    fn write_f32_le(&mut self, v: f32) -> Result<(), WritingError>;

    fn write_var_uint(&mut self, v: &VarUInt) -> Result<(), WritingError>;
    fn write_var_int(&mut self, v: &VarInt) -> Result<(), WritingError>;
    fn write_var_ulong(&mut self, v: &VarULong) -> Result<(), WritingError>;
    fn write_var_long(&mut self, v: &VarLong) -> Result<(), WritingError>;

    fn write_slice(&mut self, v: &[u8]) -> Result<(), WritingError>;
    fn write_string(&mut self, v: &str) -> Result<(), WritingError>;
    fn write_byte_array(&mut self, v: &[u8]) -> Result<(), WritingError>;
    fn write_uuid(&mut self, v: &uuid::Uuid) -> Result<(), WritingError>;

    fn write_option<G>(
        &mut self,
        val: &Option<G>,
        write: impl FnOnce(&mut Self, &G) -> Result<(), WritingError>,
    ) -> Result<(), WritingError>;

    fn write_list<G>(
        &mut self,
        list: &[G],
        write: impl Fn(&mut Self, &G) -> Result<(), WritingError>,
    ) -> Result<(), WritingError>;
}

impl<W: Write> NetworkWrite for W {
    fn write_u8(&mut self, v: u8) -> Result<(), WritingError> {
        Ok(self.write_all(&[v])?)
    }

    fn write_i8(&mut self, v: i8) -> Result<(), WritingError> {
        self.write_u8(v as u8)
    }

    fn write_bool(&mut self, v: bool) -> Result<(), WritingError> {
        self.write_u8(u8::from(v))
    }

    fn write_u16_le(&mut self, v: u16) -> Result<(), WritingError> {
        Ok(self.write_all(&v.to_le_bytes())?)
    }

    fn write_i32_le(&mut self, v: i32) -> Result<(), WritingError> {
        Ok(self.write_all(&v.to_le_bytes())?)
    }

    fn write_u32_le(&mut self, v: u32) -> Result<(), WritingError> {
        Ok(self.write_all(&v.to_le_bytes())?)
    }

    fn write_u64_le(&mut self, v: u64) -> Result<(), WritingError> {
        Ok(self.write_all(&v.to_le_bytes())?)
    }

    fn write_f32_le(&mut self, v: f32) -> Result<(), WritingError> {
        Ok(self.write_all(&v.to_le_bytes())?)
    }

    fn write_var_uint(&mut self, v: &VarUInt) -> Result<(), WritingError> {
        v.encode(self)
    }

    fn write_var_int(&mut self, v: &VarInt) -> Result<(), WritingError> {
        v.encode(self)
    }

    fn write_var_ulong(&mut self, v: &VarULong) -> Result<(), WritingError> {
        v.encode(self)
    }

    fn write_var_long(&mut self, v: &VarLong) -> Result<(), WritingError> {
        v.encode(self)
    }

    fn write_slice(&mut self, v: &[u8]) -> Result<(), WritingError> {
        Ok(self.write_all(v)?)
    }

    fn write_string(&mut self, v: &str) -> Result<(), WritingError> {
        if v.len() > MAX_STRING_LENGTH {
            return Err(WritingError::Message(format!(
                "string of {} bytes exceeds the wire limit",
                v.len()
            )));
        }
        self.write_var_uint(&VarUInt(v.len() as u32))?;
        self.write_slice(v.as_bytes())
    }

    fn write_byte_array(&mut self, v: &[u8]) -> Result<(), WritingError> {
        if v.len() > MAX_BYTE_ARRAY_LENGTH {
            return Err(WritingError::Message(format!(
                "byte array of {} bytes exceeds the wire limit",
                v.len()
            )));
        }
        self.write_var_uint(&VarUInt(v.len() as u32))?;
        self.write_slice(v)
    }

    fn write_uuid(&mut self, v: &uuid::Uuid) -> Result<(), WritingError> {
        let (most, least) = v.as_u64_pair();
        self.write_u64_le(most)?;
        self.write_u64_le(least)
    }

    fn write_option<G>(
        &mut self,
        val: &Option<G>,
        write: impl FnOnce(&mut Self, &G) -> Result<(), WritingError>,
    ) -> Result<(), WritingError> {
        self.write_bool(val.is_some())?;
        if let Some(v) = val {
            write(self, v)?;
        }
        Ok(())
    }

    fn write_list<G>(
        &mut self,
        list: &[G],
        write: impl Fn(&mut Self, &G) -> Result<(), WritingError>,
    ) -> Result<(), WritingError> {
        self.write_var_uint(&VarUInt(list.len() as u32))?;
        for v in list {
            write(self, v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_string_reserialize() {
        let mut buf = Vec::new();
        buf.write_string("hello worlds").unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(cursor.get_string().unwrap(), "hello worlds");
    }

    #[test]
    fn test_string_length_prefix_is_var_uint() {
        let mut buf = Vec::new();
        buf.write_string("ab").unwrap();
        assert_eq!(buf, [0x02, b'a', b'b']);
    }

    #[test]
    fn test_invalid_utf8_is_a_message_error() {
        let mut buf = Vec::new();
        buf.write_byte_array(&[0xff, 0xfe]).unwrap();

        let mut cursor = Cursor::new(buf);
        assert!(matches!(
            cursor.get_string(),
            Err(ReadingError::Message(_))
        ));
    }

    /// Two little-endian u64 halves, most-significant half first.
    #[test]
    fn test_uuid_wire_order() {
        let uuid = uuid::Uuid::parse_str("00112233-4455-6677-8899-aabbccddeeff").unwrap();
        let mut buf = Vec::new();
        buf.write_uuid(&uuid).unwrap();

        assert_eq!(
            buf,
            [
                0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11, 0x00, // msb half
                0xff, 0xee, 0xdd, 0xcc, 0xbb, 0xaa, 0x99, 0x88, // lsb half
            ]
        );

        let mut cursor = Cursor::new(buf);
        assert_eq!(cursor.get_uuid().unwrap(), uuid);
    }

    #[test]
    fn test_truncated_read_is_incomplete() {
        let mut cursor = Cursor::new([0x01, 0x02].as_slice());
        assert!(matches!(
            cursor.get_i32_le(),
            Err(ReadingError::Incomplete(_))
        ));
    }

    #[test]
    fn test_declared_length_past_window_is_incomplete() {
        // Length prefix says 16 bytes, only 2 follow.
        let mut cursor = Cursor::new([0x10, b'a', b'b'].as_slice());
        assert!(matches!(
            cursor.get_string(),
            Err(ReadingError::Incomplete(_))
        ));
    }

    #[test]
    fn test_list_roundtrip() {
        let values = vec!["a".to_string(), "bc".to_string(), String::new()];
        let mut buf = Vec::new();
        buf.write_list(&values, |w, v| w.write_string(v)).unwrap();

        let mut cursor = Cursor::new(buf);
        let back = cursor.get_list(|r| r.get_string()).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_option_roundtrip() {
        let mut buf = Vec::new();
        buf.write_option(&Some(7u8), |w, v| w.write_u8(*v)).unwrap();
        buf.write_option(&None::<u8>, |w, v| w.write_u8(*v)).unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(cursor.get_option(|r| r.get_u8()).unwrap(), Some(7));
        assert_eq!(cursor.get_option(|r| r.get_u8()).unwrap(), None);
    }
}
