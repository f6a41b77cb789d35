/// Provider domain matcher.
///
/// Keys every configured domain by its label sequence in a single HashMap,
/// so checking an observed domain costs one lookup per domain level.
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::split_domain;
use crate::error::{MatchError, Result};

/// Valid (lowercased) DNS label
static LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9_]([a-z0-9_\-]{0,61}[a-z0-9_])?$")
        .expect("LABEL_PATTERN: hardcoded regex is invalid")
});

/// Which configured domain an observed domain fell under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainMatch {
    /// Not under any configured domain
    None,
    /// Under the provider's own FQDN
    Primary,
    /// Under one of the other home partner domains
    Secondary,
}

/// Split and validate a configured domain.
pub fn parse_domain(domain: &str) -> Result<Vec<String>> {
    let labels = split_domain(domain);
    if labels.is_empty() {
        return Err(MatchError::InvalidDomain(format!(
            "empty domain: '{}'",
            domain
        )));
    }
    if let Some(bad) = labels.iter().find(|l| !LABEL_PATTERN.is_match(l)) {
        return Err(MatchError::InvalidDomain(format!(
            "invalid label '{}' in '{}'",
            bad, domain
        )));
    }
    Ok(labels)
}

/// Matches observed domains against a primary domain and partner domains
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainMatcher {
    /// Label sequence (top-level first) -> category
    domains: HashMap<Vec<String>, DomainMatch>,
}

impl DomainMatcher {
    /// Create a matcher from pre-split label sequences.
    ///
    /// A partner identical to the primary domain reports as `Primary`.
    /// Empty label sequences are ignored.
    pub fn new(primary: &[String], partners: &[Vec<String>]) -> Self {
        let mut domains = HashMap::with_capacity(partners.len() + 1);

        for partner in partners {
            if !partner.is_empty() {
                domains.insert(partner.clone(), DomainMatch::Secondary);
            }
        }
        if !primary.is_empty() {
            domains.insert(primary.to_vec(), DomainMatch::Primary);
        }

        Self { domains }
    }

    /// Check whether `labels` (top-level first, lowercased) equals or is a
    /// subdomain of a configured domain. A primary hit wins over a partner hit.
    pub fn is_sub_domain(&self, labels: &[String]) -> DomainMatch {
        let mut result = DomainMatch::None;

        // Walk down from the top-level label, one lookup per level
        for depth in 1..=labels.len() {
            match self.domains.get(&labels[..depth]) {
                Some(DomainMatch::Primary) => return DomainMatch::Primary,
                Some(DomainMatch::Secondary) => result = DomainMatch::Secondary,
                _ => {}
            }
        }

        result
    }

    /// Check whether the dotted `domain` matches.
    pub fn matches(&self, domain: &str) -> DomainMatch {
        self.is_sub_domain(&split_domain(domain))
    }

    /// Check if no domain is configured
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
