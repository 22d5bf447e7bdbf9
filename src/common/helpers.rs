// Helper functions for safe logging

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```ignore
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.contains('@') => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***@***.***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_local_part() {
        assert_eq!(safe_email_log("user@example.com"), "u***@example.com");
    }

    #[test]
    fn test_unparseable_email_is_fully_masked() {
        assert_eq!(safe_email_log("nope"), "***@***.***");
        assert_eq!(safe_email_log("@example.com"), "***@***.***");
        assert_eq!(safe_email_log("a@b@c"), "***@***.***");
    }

    #[test]
    fn test_multibyte_local_part_does_not_panic() {
        assert_eq!(safe_email_log("émile@example.fr"), "é***@example.fr");
    }
}
