//! Selection across several configured providers.

use std::collections::HashSet;
use std::sync::Arc;

use crate::anqp::AnqpElements;
use crate::credential::{RealmMatcher, SimAccessor};
use crate::error::Result;
use crate::home_sp::HomeSp;
use crate::types::{NetworkDetail, PasspointMatch};

/// Result of matching one provider
#[derive(Debug, Clone)]
pub struct ProviderMatch {
    pub home_sp: HomeSp,
    pub result: PasspointMatch,
}

/// Ordered set of providers evaluated against discovered networks.
///
/// Providers are deduplicated by FQDN, first one wins.
pub struct ProviderSelector {
    providers: Vec<HomeSp>,
    realm_matcher: Arc<dyn RealmMatcher>,
}

impl ProviderSelector {
    /// Create a new selector
    pub fn new(
        providers: impl IntoIterator<Item = HomeSp>,
        realm_matcher: Arc<dyn RealmMatcher>,
    ) -> Self {
        let mut seen = HashSet::new();
        let providers = providers
            .into_iter()
            .filter(|sp| seen.insert(sp.clone()))
            .collect();
        Self {
            providers,
            realm_matcher,
        }
    }

    /// Match every provider against `network`, in configuration order.
    pub fn evaluate(
        &self,
        network: &NetworkDetail,
        anqp: Option<&AnqpElements>,
        sim: Option<&dyn SimAccessor>,
    ) -> Result<Vec<ProviderMatch>> {
        self.providers
            .iter()
            .map(|sp| -> Result<ProviderMatch> {
                Ok(ProviderMatch {
                    home_sp: sp.clone(),
                    result: sp.matches(network, anqp, sim, self.realm_matcher.as_ref())?,
                })
            })
            .collect()
    }

    /// Pick the first home provider, else the first roaming provider.
    pub fn best_match(
        &self,
        network: &NetworkDetail,
        anqp: Option<&AnqpElements>,
        sim: Option<&dyn SimAccessor>,
    ) -> Result<Option<ProviderMatch>> {
        let matches = self.evaluate(network, anqp, sim)?;

        let home = matches
            .iter()
            .find(|m| m.result == PasspointMatch::HomeProvider);
        let roaming = matches
            .iter()
            .find(|m| m.result == PasspointMatch::RoamingProvider);

        Ok(home.or(roaming).cloned())
    }

    /// Check whether an ANQP query could change the outcome for `network`,
    /// i.e. some provider is `Incomplete` on beacon data alone.
    pub fn needs_anqp(&self, network: &NetworkDetail) -> bool {
        self.providers.iter().any(|sp| {
            matches!(
                sp.match_sp(network, None, None),
                Ok(PasspointMatch::Incomplete)
            )
        })
    }

    /// Get the number of providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub fn providers(&self) -> &[HomeSp] {
        &self.providers
    }
}
