//! Identity masking for log output

/// Mask an identity for logging (e.g. `jo***@example.com`)
///
/// Email addresses keep the first two characters of the local part and the
/// full domain. Anything else keeps only its last four characters.
pub fn mask_identity(identity: &str) -> String {
    if let Some((local, domain)) = identity.split_once('@') {
        let visible: String = local.chars().take(2).collect();
        return format!("{}***@{}", visible, domain);
    }

    let chars: Vec<char> = identity.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("***{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_identity("john@example.com"), "jo***@example.com");
        assert_eq!(mask_identity("a@x.com"), "a***@x.com");
        assert_eq!(mask_identity("@x.com"), "***@x.com");
    }

    #[test]
    fn test_mask_other_identities() {
        assert_eq!(mask_identity("+1234567890"), "***7890");
        assert_eq!(mask_identity("1234"), "****");
        assert_eq!(mask_identity(""), "****");
    }
}
