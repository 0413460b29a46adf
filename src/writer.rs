//! Builds the binary blob of an OpenSSH public key.

use byteorder::{BigEndian, WriteBytesExt};

#[derive(Default)]
pub struct Writer {
    data: Vec<u8>,
}

impl Writer {
    pub fn new() -> Writer {
        Writer::default()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn write_int(&mut self, val: u32) {
        if self.data.write_u32::<BigEndian>(val).is_err() {
            unreachable!()
        }
    }

    pub fn write_bytes(&mut self, buf: &[u8]) {
        self.write_int(buf.len() as u32);
        self.data.extend_from_slice(buf);
    }

    pub fn write_string(&mut self, val: &str) {
        self.write_bytes(val.as_bytes())
    }

    // mpints are two's complement, so a positive number whose top bit is set
    // needs a leading zero byte. see https://tools.ietf.org/html/rfc4251#section-5
    pub fn write_mpint(&mut self, num: &[u8]) {
        if num.first().is_some_and(|b| b & 0x80 != 0) {
            self.write_int(num.len() as u32 + 1);
            self.data.push(0);
            self.data.extend_from_slice(num);
        } else {
            self.write_bytes(num)
        }
    }
}
