//! Cursor over the binary blob of an OpenSSH public key.

use crate::errors::*;

use byteorder::{BigEndian, ByteOrder};

pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Reader<'a> {
        Reader { data, offset: 0 }
    }

    fn remaining(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }

    pub fn read_int(&mut self) -> Result<u32> {
        let cur = self.remaining();
        if cur.len() < 4 {
            return Err(FixtureError::InvalidFormat);
        }
        self.offset += 4;
        Ok(BigEndian::read_u32(&cur[..4]))
    }

    // every field is a big-endian u32 length followed by that many bytes.
    // see the string type in https://tools.ietf.org/html/rfc4251#section-5
    pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.offset;
        let len = self.read_int()? as usize;
        let cur = self.remaining();
        if cur.len() < len {
            self.offset = start;
            return Err(FixtureError::InvalidFormat);
        }
        self.offset += len;
        Ok(&cur[..len])
    }

    pub fn read_string(&mut self) -> Result<&'a str> {
        Ok(std::str::from_utf8(self.read_bytes()?)?)
    }

    /// an mpint with any sign-padding zero byte removed.
    pub fn read_mpint(&mut self) -> Result<&'a [u8]> {
        let bytes = self.read_bytes()?;
        match bytes.split_first() {
            Some((&0, rest)) => Ok(rest),
            _ => Ok(bytes),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.offset == self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_reads() {
        let mut r = Reader::new(&[0, 0, 0]);
        assert!(r.read_int().is_err());

        let mut r = Reader::new(&[0, 0, 0, 5, b'a', b'b']);
        assert!(r.read_bytes().is_err());
        // a failed read does not advance the cursor.
        assert_eq!(r.read_int().unwrap(), 5);
    }

    #[test]
    fn strings_and_mpints() {
        let data = [0, 0, 0, 2, b'h', b'i', 0, 0, 0, 2, 0, 0x80];
        let mut r = Reader::new(&data);
        assert_eq!(r.read_string().unwrap(), "hi");
        assert_eq!(r.read_mpint().unwrap(), &[0x80]);
        assert!(r.is_empty());
    }

    #[test]
    fn invalid_utf8() {
        let mut r = Reader::new(&[0, 0, 0, 1, 0xff]);
        assert!(matches!(r.read_string(), Err(FixtureError::Utf8Error(_))));
    }
}
