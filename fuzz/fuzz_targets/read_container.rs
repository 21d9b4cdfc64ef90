use honggfuzz::fuzz;
use phicodec::{decode_structure, read_container_with_limit};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(encoded) = read_container_with_limit(data, 1 << 20) {
                let out = decode_structure(&encoded);
                assert_eq!(out.len(), encoded.header.original_length);
            }
        });
    }
}
