use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const HEX: &[u8] = b"0123456789abcdef";

pub const INVITE_LINK_BASE: &str = "https://clazino.app/invite?token=";

fn random_from(alphabet: &[u8], len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Lower-case alphanumeric suffix, e.g. `prefixed("led", 6)` gives `led_k3x9a2`.
pub fn prefixed(prefix: &str, len: usize) -> String {
    format!("{prefix}_{}", random_from(BASE36, len))
}

pub fn tx_hash() -> String {
    format!("0x{}", random_from(HEX, 16))
}

pub fn invite_link() -> String {
    format!("{INVITE_LINK_BASE}{}", random_from(BASE36, 11))
}

pub fn invitation_code() -> String {
    format!("INV-{}", random_from(BASE36, 8).to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes() {
        let id = prefixed("led", 6);
        assert!(id.starts_with("led_"));
        assert_eq!(id.len(), 10);

        let hash = tx_hash();
        assert_eq!(hash.len(), 18);
        assert!(hash[2..].chars().all(|c| c.is_ascii_hexdigit()));

        let code = invitation_code();
        assert!(code.starts_with("INV-"));
        assert!(code[4..].chars().all(|c| !c.is_ascii_lowercase()));
    }
}
