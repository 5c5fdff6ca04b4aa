use std::sync::OnceLock;

const CRC32_SEED: u32 = 0xFFFF_FFFF;
const CRC32_POLY: u32 = 0xEDB8_8320;

static CRC32_TABLE: OnceLock<[u32; 256]> = OnceLock::new();

fn crc32_table() -> &'static [u32; 256] {
    CRC32_TABLE.get_or_init(|| {
        let mut table = [0u32; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let mut crc = i as u32;
            for _ in 0..8 {
                crc = match crc & 1 {
                    0 => crc >> 1,
                    _ => (crc >> 1) ^ CRC32_POLY,
                };
            }
            *entry = crc;
        }
        table
    })
}

/// CRC-32 of a packed field: reflected polynomial, all-ones seed, no final
/// xor. The value never leaves the process, it only keys the seen-table.
pub fn crc32(cells: &[u8]) -> u32 {
    let table = crc32_table();
    cells
        .iter()
        .fold(CRC32_SEED, |crc, &byte| (crc >> 8) ^ table[((crc ^ byte as u32) & 0xFF) as usize])
}

#[cfg(test)]
mod tests {
    use super::crc32;

    #[test]
    fn check_string() {
        // the usual 0xCBF43926 check value, before the final xor
        assert_eq!(crc32(b"123456789"), 0x340B_C6D9);
    }

    #[test]
    fn sensitive_to_position() {
        assert_ne!(crc32(&[1, 0, 2]), crc32(&[2, 0, 1]));
        assert_ne!(crc32(&[]), crc32(&[0]));
    }
}
