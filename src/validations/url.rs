use url::Url;
use validator::ValidationError;

/// Validates that a URL string is properly formatted and uses http/https
pub fn validate_url(url_str: &str) -> Result<(), ValidationError> {
    match Url::parse(url_str) {
        Ok(url) => {
            // Ensure URL has a scheme and host
            if url.scheme().is_empty() || url.host().is_none() {
                return Err(ValidationError::new("URL must have a scheme and host"));
            }

            // Only accept HTTP and HTTPS URLs
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(ValidationError::new("URL scheme must be http or https"));
            }

            Ok(())
        }
        Err(_) => Err(ValidationError::new("Invalid URL format")),
    }
}

/// Validates that a caller-supplied alias (if provided) meets requirements:
/// - Between 1-64 characters
/// - Only contains URL-safe characters
pub fn validate_alias(alias: &str) -> Result<(), ValidationError> {
    // Check length
    if alias.is_empty() || alias.len() > 64 {
        let mut err = ValidationError::new("alias_length");
        err.message = Some("Alias must be between 1 and 64 characters".into());
        return Err(err);
    }

    // Ensure it only contains URL-safe characters
    if !alias
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::new(
            "Alias can only contain alphanumeric characters, hyphens, and underscores",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        // Valid URLs
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?query=value").is_ok());

        // Invalid URLs
        assert!(validate_url("not-a-url").is_err());
        assert!(validate_url("ftp://example.com").is_err()); // Not http/https
    }

    #[test]
    fn test_validate_alias() {
        // Valid aliases
        assert!(validate_alias("valid-alias").is_ok());
        assert!(validate_alias("valid_alias123").is_ok());

        // Invalid aliases
        assert!(validate_alias("").is_err());
        let too_long = "a".repeat(65);
        assert!(validate_alias(&too_long).is_err());
        assert!(validate_alias("invalid/alias").is_err());
    }
}
