//! Low-level component dedicated to bit manipulation for RTCM buffers.
//! The provided reader abstraction is tuned for RTCM v3 payloads, where
//! fields are packed MSB-first and seldom align with byte boundaries.
use crate::error::BitReaderError;

/// Generic reader that extracts bit segments from a `&[u8]`
/// without extra allocation or copies.
///
/// Bit index 0 is the most significant bit of byte 0, matching the RTCM
/// transport ordering.
pub struct BitReader<'a> {
    /// Shared source buffer (one framed-and-verified RTCM payload).
    buffer: &'a [u8],
    /// Current index expressed as number of bits read from the beginning.
    bit_cursor: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the start of the provided buffer.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            bit_cursor: 0,
        }
    }

    /// Expose the cursor position in bits.
    pub fn bit_cursor(&self) -> usize {
        self.bit_cursor
    }

    /// Read `num_bits` bits starting at the current cursor and return a `u64`.
    /// `num_bits` must stay in the [1, 64] range.
    pub fn read_u64(&mut self, num_bits: u8) -> Result<u64, BitReaderError> {
        // Validate admissible bit length.
        if !(1..=64).contains(&num_bits) {
            return Err(BitReaderError::TooLongForType {
                max: 64,
                asked: num_bits,
            });
        }

        let buffer_len_bits = self.buffer.len() * 8;
        let read_end_bit = self.bit_cursor + num_bits as usize;

        // Prevent reading beyond the buffer.
        if read_end_bit > buffer_len_bits {
            return Err(BitReaderError::OutOfBounds {
                asked: num_bits as usize,
                available: buffer_len_bits - self.bit_cursor,
            });
        }

        // Assemble the requested bits, most significant first.
        let mut result: u64 = 0;
        for bit_index in self.bit_cursor..read_end_bit {
            let byte = self.buffer[bit_index / 8];
            let bit = (byte >> (7 - (bit_index % 8))) & 1;
            result = (result << 1) | u64::from(bit);
        }

        self.bit_cursor = read_end_bit;
        Ok(result)
    }

    /// Read up to 8 bits and return a `u8`.
    pub fn read_u8(&mut self, num_bits: u8) -> Result<u8, BitReaderError> {
        if num_bits > 8 {
            return Err(BitReaderError::TooLongForType {
                max: 8,
                asked: num_bits,
            });
        }

        self.read_u64(num_bits).map(|val| val as u8)
    }

    /// Read up to 16 bits and return a `u16`.
    pub fn read_u16(&mut self, num_bits: u8) -> Result<u16, BitReaderError> {
        if num_bits > 16 {
            return Err(BitReaderError::TooLongForType {
                max: 16,
                asked: num_bits,
            });
        }

        self.read_u64(num_bits).map(|val| val as u16)
    }

    /// Read up to 32 bits and return a `u32`.
    pub fn read_u32(&mut self, num_bits: u8) -> Result<u32, BitReaderError> {
        if num_bits > 32 {
            return Err(BitReaderError::TooLongForType {
                max: 32,
                asked: num_bits,
            });
        }

        self.read_u64(num_bits).map(|val| val as u32)
    }

    /// Read a single bit as a flag.
    pub fn read_bool(&mut self) -> Result<bool, BitReaderError> {
        self.read_u64(1).map(|val| val != 0)
    }

    /// Read `num_bits` bits as a two's-complement signed value,
    /// sign-extended from the high bit of the extracted field.
    pub fn read_i64(&mut self, num_bits: u8) -> Result<i64, BitReaderError> {
        let raw = self.read_u64(num_bits)?;
        // Arithmetic shift performs the extension at every width.
        let shift = 64 - u32::from(num_bits);
        Ok(((raw << shift) as i64) >> shift)
    }

    /// Read up to 8 bits as a signed value.
    pub fn read_i8(&mut self, num_bits: u8) -> Result<i8, BitReaderError> {
        if num_bits > 8 {
            return Err(BitReaderError::TooLongForType {
                max: 8,
                asked: num_bits,
            });
        }

        self.read_i64(num_bits).map(|val| val as i8)
    }

    /// Read up to 16 bits as a signed value.
    pub fn read_i16(&mut self, num_bits: u8) -> Result<i16, BitReaderError> {
        if num_bits > 16 {
            return Err(BitReaderError::TooLongForType {
                max: 16,
                asked: num_bits,
            });
        }

        self.read_i64(num_bits).map(|val| val as i16)
    }

    /// Read up to 32 bits as a signed value.
    pub fn read_i32(&mut self, num_bits: u8) -> Result<i32, BitReaderError> {
        if num_bits > 32 {
            return Err(BitReaderError::TooLongForType {
                max: 32,
                asked: num_bits,
            });
        }

        self.read_i64(num_bits).map(|val| val as i32)
    }

    /// Advance the cursor by `length` bits without reading data.
    pub fn advance(&mut self, length: u8) -> Result<(), BitReaderError> {
        // Validate admissible length.
        if !(1..=64).contains(&length) {
            return Err(BitReaderError::TooLongForType {
                max: 64,
                asked: length,
            });
        }

        let buffer_len_bits = self.buffer.len() * 8;
        let new_cursor_pos = self.bit_cursor + length as usize;

        if new_cursor_pos > buffer_len_bits {
            return Err(BitReaderError::OutOfBounds {
                asked: length as usize,
                available: buffer_len_bits - self.bit_cursor,
            });
        }
        self.bit_cursor = new_cursor_pos;

        Ok(())
    }

    /// Copy `out.len()` bytes (each read as 8 bits) from the current
    /// position into `out`. The cursor does not need to be byte aligned.
    pub fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), BitReaderError> {
        let buffer_len_bits = self.buffer.len() * 8;
        let needed_bits = out.len() * 8;

        if self.bit_cursor + needed_bits > buffer_len_bits {
            return Err(BitReaderError::OutOfBounds {
                asked: out.len(),
                available: (buffer_len_bits - self.bit_cursor) / 8,
            });
        }
        for slot in out.iter_mut() {
            *slot = self.read_u64(8)? as u8;
        }
        Ok(())
    }
}

//==================================================================================TEST_BITREADER
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
