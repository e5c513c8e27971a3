use std::{
    io::{Error, ErrorKind, Read, Result, Write},
    slice,
};

/// Written in place of characters that don't fit in a single byte
const REPLACEMENT_BYTE: u8 = b'?';

pub fn read_u8<R>(mut reader: R) -> Result<u8>
where
    R: Read,
{
    let mut byte = 0;
    reader.read_exact(slice::from_mut(&mut byte))?;
    Ok(byte)
}

pub fn read_i16<R>(mut reader: R) -> Result<i16>
where
    R: Read,
{
    let mut bytes = [0; 2];
    reader.read_exact(&mut bytes)?;
    Ok(i16::from_le_bytes(bytes))
}

pub fn read_i32<R>(mut reader: R) -> Result<i32>
where
    R: Read,
{
    let mut bytes = [0; 4];
    reader.read_exact(&mut bytes)?;
    Ok(i32::from_le_bytes(bytes))
}

pub fn read_bool<R>(reader: R) -> Result<bool>
where
    R: Read,
{
    Ok(read_u8(reader)? != 0)
}

/// Read a string prefixed by its 32-bit length, one byte per character
pub fn read_ascii<R>(mut reader: R) -> Result<String>
where
    R: Read,
{
    let len = read_i32(&mut reader)?;
    let len = usize::try_from(len).map_err(|_| {
        Error::new(
            ErrorKind::InvalidData,
            format!("String length {len} is negative"),
        )
    })?;

    let mut bytes = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(ErrorKind::UnexpectedEof.into());
    }

    Ok(bytes.into_iter().map(char::from).collect())
}

pub fn write_u8<W>(value: u8, mut writer: W) -> Result<()>
where
    W: Write,
{
    writer.write_all(slice::from_ref(&value))
}

pub fn write_i16<W>(value: i16, mut writer: W) -> Result<()>
where
    W: Write,
{
    writer.write_all(&value.to_le_bytes())
}

pub fn write_i32<W>(value: i32, mut writer: W) -> Result<()>
where
    W: Write,
{
    writer.write_all(&value.to_le_bytes())
}

pub fn write_bool<W>(value: bool, writer: W) -> Result<()>
where
    W: Write,
{
    write_u8(value as u8, writer)
}

pub fn write_ascii<W>(value: &str, mut writer: W) -> Result<()>
where
    W: Write,
{
    let bytes: Vec<u8> = value
        .chars()
        .map(|c| u8::try_from(c).unwrap_or(REPLACEMENT_BYTE))
        .collect();

    let len = i32::try_from(bytes.len())
        .map_err(|_| Error::new(ErrorKind::InvalidInput, "String too long to serialize"))?;

    write_i32(len, &mut writer)?;
    writer.write_all(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn little_endian() {
        let mut dest = Vec::new();
        write_i16(0x0102, &mut dest).unwrap();
        write_i32(-2, &mut dest).unwrap();
        assert_eq!(dest, [0x02, 0x01, 0xFE, 0xFF, 0xFF, 0xFF]);

        let mut reader = Cursor::new(dest);
        assert_eq!(read_i16(&mut reader).unwrap(), 0x0102);
        assert_eq!(read_i32(&mut reader).unwrap(), -2);
    }

    #[test]
    fn ascii() {
        let mut dest = Vec::new();
        write_ascii("Layer 1", &mut dest).unwrap();
        assert_eq!(&dest[..4], &[7, 0, 0, 0]);
        assert_eq!(&dest[4..], b"Layer 1");

        assert_eq!(read_ascii(Cursor::new(dest)).unwrap(), "Layer 1");
    }

    #[test]
    fn ascii_replacement() {
        let mut dest = Vec::new();
        write_ascii("a\u{263A}", &mut dest).unwrap();
        assert_eq!(&dest[4..], b"a?");
    }

    #[test]
    fn ascii_truncated() {
        let error = read_ascii(Cursor::new([5, 0, 0, 0, b'a', b'b'])).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn ascii_negative_length() {
        let error = read_ascii(Cursor::new([0xFF, 0xFF, 0xFF, 0xFF])).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn bools() {
        let mut dest = Vec::new();
        write_bool(true, &mut dest).unwrap();
        write_bool(false, &mut dest).unwrap();
        assert_eq!(dest, [1, 0]);

        let mut reader = Cursor::new([0, 1, 7]);
        assert!(!read_bool(&mut reader).unwrap());
        assert!(read_bool(&mut reader).unwrap());
        assert!(read_bool(&mut reader).unwrap());
        assert_eq!(
            read_bool(&mut reader).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }
}
