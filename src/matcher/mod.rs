mod domain;
pub mod oi;

pub use domain::{parse_domain, DomainMatch, DomainMatcher};
pub use oi::{evaluate_match_all, evaluate_match_any, observed_ois};

/// Split a domain into lowercase labels, top-level label first.
///
/// A trailing root dot is dropped, and anything up to an `@` is discarded so
/// NAI style `user@realm` input yields the realm labels.
/// `"www.Example.com"` becomes `["com", "example", "www"]`.
pub fn split_domain(domain: &str) -> Vec<String> {
    let domain = domain.trim();
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let domain = match domain.rfind('@') {
        Some(at) => &domain[at + 1..],
        None => domain,
    };
    if domain.is_empty() {
        return Vec::new();
    }
    domain.split('.').rev().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_domain_reverses_labels() {
        assert_eq!(split_domain("example.com"), vec!["com", "example"]);
        assert_eq!(
            split_domain("a.b.example.com"),
            vec!["com", "example", "b", "a"]
        );
    }

    #[test]
    fn test_split_domain_lowercases() {
        assert_eq!(split_domain("WWW.Example.COM"), vec!["com", "example", "www"]);
    }

    #[test]
    fn test_split_domain_trailing_dot_and_whitespace() {
        assert_eq!(split_domain(" example.com. "), vec!["com", "example"]);
    }

    #[test]
    fn test_split_domain_strips_nai_user() {
        assert_eq!(split_domain("alice@example.com"), vec!["com", "example"]);
    }

    #[test]
    fn test_split_domain_empty() {
        assert!(split_domain("").is_empty());
        assert!(split_domain(".").is_empty());
    }
}
