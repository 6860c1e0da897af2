//! The `crc` module computes the CRC32 variant rres uses for chunk
//! integrity checking (§4.A): polynomial 0xEDB88320, init 0xFFFFFFFF,
//! final XOR 0xFFFFFFFF — the IEEE/zip/PNG variant.

/// CRC32 (IEEE 802.3 / zip / PNG variant) of `data`.
pub fn compute_crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

#[cfg(test)]
mod tests {
    use super::compute_crc32;

    #[test]
    fn known_vector() {
        // Standard CRC32 check value for the ASCII string "123456789".
        assert_eq!(compute_crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(compute_crc32(&[]), 0);
    }

    #[test]
    fn single_bit_flip_changes_crc() {
        let data = b"rres chunk payload bytes".to_vec();
        let mut tampered = data.clone();
        tampered[3] ^= 0x01;
        assert_ne!(compute_crc32(&data), compute_crc32(&tampered));
    }
}
