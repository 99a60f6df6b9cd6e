//! TP-Link smart home protocol: an XOR autokey cipher, each frame prefixed
//! with its big-endian payload length.

pub const INITIAL_KEY: u8 = 171;

/// Upper bound for a reply frame, sysinfo answers are well below 2 KiB
pub const MAX_FRAME_LEN: usize = 64 * 1024;

pub fn encrypt(plain: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    plain
        .iter()
        .map(|p| {
            key ^= p;
            key
        })
        .collect()
}

pub fn decrypt(cipher: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    cipher
        .iter()
        .map(|c| {
            let p = key ^ c;
            key = *c;
            p
        })
        .collect()
}

/// Encrypts `plain` and prepends the length header
pub fn frame(plain: &[u8]) -> Vec<u8> {
    let len = plain.len() as u32;
    let mut framed = Vec::with_capacity(4 + plain.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend(encrypt(plain));
    framed
}

#[cfg(test)]
mod test {
    use super::*;

    const GET_SYSINFO: &[u8] = br#"{"system":{"get_sysinfo":{}}}"#;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_encrypt() {
        assert_eq!(
            "d0f281f88bff9af7d5ef94b6d1b4c09fec95e68fe187e8caf08bf68bf6",
            hex(&encrypt(GET_SYSINFO))
        );
        assert_eq!(
            "d0f281f88bff9af7d5ef94b6d1b4c09fec95e68fe187e8caf08ba9dbbed2b3ca95e692f387e2c0facbb6cbb6",
            hex(&encrypt(br#"{"system":{"get_sysinfo":{"relay_state":1}}}"#))
        );
        assert!(encrypt(b"").is_empty());
    }

    #[test]
    fn test_decrypt() {
        let cipher = encrypt(GET_SYSINFO);
        assert_eq!(GET_SYSINFO, decrypt(&cipher).as_slice());
        // the key follows the ciphertext, a flipped byte garbles itself and its successor
        let mut flipped = cipher.clone();
        flipped[3] ^= 0xff;
        let garbled = decrypt(&flipped);
        assert_eq!(GET_SYSINFO[..3], garbled[..3]);
        assert_ne!(GET_SYSINFO[4], garbled[4]);
        assert_eq!(GET_SYSINFO[5..], garbled[5..]);
    }

    #[test]
    fn test_frame() {
        let framed = frame(GET_SYSINFO);
        assert_eq!([0, 0, 0, 29], framed[..4]);
        assert_eq!(encrypt(GET_SYSINFO), framed[4..]);
    }
}
