//! Fixed-point voltage decoding
//!
//! Voltage registers span two bytes. The first register on the wire (the
//! low byte of the SMBus word) holds hundredths, the next one holds the
//! integer part: wire bytes `[0x0A, 0x05]` mean 5.10 V.

/// Decode an SMBus word as `high + low / 100`
pub fn decode_fixed(word: u16) -> f32 {
    let [hundredths, integer] = word.to_le_bytes();
    f32::from(integer) + f32::from(hundredths) / 100.0
}

/// Decode two register bytes in wire order
pub fn decode_fixed_bytes(bytes: [u8; 2]) -> f32 {
    decode_fixed(u16::from_le_bytes(bytes))
}
