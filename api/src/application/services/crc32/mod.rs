/// CRC32 (IEEE) of the UTF-8 bytes of `input`, as 8 lowercase hex digits.
pub fn checksum(input: &str) -> String {
    format!("{:08x}", crc32fast::hash(input.as_bytes()))
}
