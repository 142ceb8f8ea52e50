//! Member identifier generation.
//!
//! Every sign-up gets a random UUID v4 token (the primary key of the remote
//! row) and a shorter public id derived from it, which is what the member
//! shows at the counter as a QR code.

use shared::MemberRecord;
use uuid::Uuid;

/// Number of token characters kept in the public member id
const MEMBER_ID_PREFIX_LEN: usize = 8;

/// Generate a random token in canonical UUID v4 text form
/// (8-4-4-4-12 lowercase hex groups)
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}

/// Derive the public member id: first 8 token characters, a hyphen and the
/// uppercased surname, e.g. "abcdef12-KOVÁCS".
///
/// The surname is embedded as entered (trimmed); it must be non-empty,
/// which the form validation guarantees.
pub fn derive_member_id(token: &str, last_name: &str) -> String {
    let prefix: String = token.chars().take(MEMBER_ID_PREFIX_LEN).collect();
    format!("{}-{}", prefix, last_name.trim().to_uppercase())
}

/// QR error correction levels understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

/// What the summary view encodes into the QR code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    pub data: String,
    pub error_correction: QrErrorCorrection,
}

/// The member card QR code carries the public member id at level H
pub fn qr_payload(member: &MemberRecord) -> QrPayload {
    QrPayload {
        data: member.member_id.clone(),
        error_correction: QrErrorCorrection::High,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_token_layout() {
        let token = generate_token();
        assert_eq!(token.len(), 36);

        let groups: Vec<&str> = token.split('-').collect();
        let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(lengths, vec![8, 4, 4, 4, 12]);

        assert!(token
            .chars()
            .all(|c| c == '-' || c.is_ascii_digit() || ('a'..='f').contains(&c)));

        // Version nibble and variant nibble
        assert_eq!(&token[14..15], "4");
        assert!(matches!(&token[19..20], "8" | "9" | "a" | "b"));
    }

    #[test]
    fn test_generate_token_is_unique() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_derive_member_id() {
        let token = "abcdef12-3456-4789-a012-3456789abcde";
        assert_eq!(derive_member_id(token, "Kovács"), "abcdef12-KOVÁCS");
        assert_eq!(derive_member_id(token, "Felhasználó"), "abcdef12-FELHASZNÁLÓ");
        assert_eq!(derive_member_id(token, "  Nagy "), "abcdef12-NAGY");
    }

    #[test]
    fn test_derive_member_id_keeps_separators() {
        let token = "0123abcd-3456-4789-a012-3456789abcde";
        assert_eq!(derive_member_id(token, "Kiss-Tóth"), "0123abcd-KISS-TÓTH");
        assert_eq!(derive_member_id(token, "Groß"), "0123abcd-GROSS");
    }

    #[test]
    fn test_qr_payload_uses_member_id() {
        let member = MemberRecord::new(
            "abcdef12-3456-4789-a012-3456789abcde".to_string(),
            "abcdef12-KOVÁCS".to_string(),
        );
        let payload = qr_payload(&member);
        assert_eq!(payload.data, "abcdef12-KOVÁCS");
        assert_eq!(payload.error_correction, QrErrorCorrection::High);
    }
}
