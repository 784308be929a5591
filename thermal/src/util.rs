//! Bounds-checked reads over untrusted buffers.

use crate::error::Error;
use bytes::Buf;

/// Returns [Error::EndOfBuffer] if fewer than `len` bytes remain in `buf`.
#[inline]
pub(crate) fn at_least(buf: &impl Buf, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}

macro_rules! impl_read {
    ($name:ident, $type:ty, $get_method:ident) => {
        #[inline]
        pub(crate) fn $name(buf: &mut impl Buf) -> Result<$type, Error> {
            at_least(buf, std::mem::size_of::<$type>())?;
            Ok(buf.$get_method())
        }
    };
}

impl_read!(read_u32, u32, get_u32);
impl_read!(read_u64, u64, get_u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_buffer() {
        assert!(matches!(read_u32(&mut &[0u8; 3][..]), Err(Error::EndOfBuffer)));
        assert!(matches!(read_u64(&mut &[0u8; 7][..]), Err(Error::EndOfBuffer)));
    }

    #[test]
    fn test_big_endian() {
        let mut buf = &[0x01u8, 0x02, 0x03, 0x04][..];
        assert_eq!(read_u32(&mut buf).unwrap(), 0x01020304);
        assert_eq!(buf.remaining(), 0);
    }
}
