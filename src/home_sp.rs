//! Home service provider profile and the provider match engine.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::debug;

use crate::anqp::AnqpElements;
use crate::credential::{Credential, RealmMatcher, SimAccessor};
use crate::error::Result;
use crate::matcher::{
    evaluate_match_all, evaluate_match_any, observed_ois, parse_domain, split_domain,
    DomainMatch, DomainMatcher,
};
use crate::types::{format_ois, NetworkDetail, PasspointMatch};

/// Construction parameters for a [`HomeSp`]
#[derive(Debug, Clone)]
pub struct HomeSpParams {
    /// SSID -> required HESSID (`None` matches on SSID alone)
    pub ssids: HashMap<String, Option<u64>>,
    pub fqdn: String,
    pub roaming_consortiums: HashSet<u64>,
    pub other_home_partners: HashSet<String>,
    pub match_any_ois: HashSet<u64>,
    pub match_all_ois: Vec<u64>,
    pub friendly_name: String,
    pub icon_url: Option<String>,
    pub credential: Credential,
}

impl HomeSpParams {
    pub fn new(fqdn: impl Into<String>, credential: Credential) -> Self {
        Self {
            ssids: HashMap::new(),
            fqdn: fqdn.into(),
            roaming_consortiums: HashSet::new(),
            other_home_partners: HashSet::new(),
            match_any_ois: HashSet::new(),
            match_all_ois: Vec::new(),
            friendly_name: String::new(),
            icon_url: None,
            credential,
        }
    }

    pub fn with_ssid(mut self, ssid: impl Into<String>, hessid: Option<u64>) -> Self {
        self.ssids.insert(ssid.into(), hessid);
        self
    }

    pub fn with_roaming_consortium(mut self, oi: u64) -> Self {
        self.roaming_consortiums.insert(oi);
        self
    }

    pub fn with_other_home_partner(mut self, domain: impl Into<String>) -> Self {
        self.other_home_partners.insert(domain.into());
        self
    }

    pub fn with_match_any_oi(mut self, oi: u64) -> Self {
        self.match_any_ois.insert(oi);
        self
    }

    pub fn with_match_all_oi(mut self, oi: u64) -> Self {
        self.match_all_ois.push(oi);
        self
    }

    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = name.into();
        self
    }

    pub fn with_icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }
}

/// Everything but the credential; shared between a template and its
/// credential-substituted copies.
#[derive(Debug, PartialEq, Eq)]
struct Profile {
    ssids: HashMap<String, Option<u64>>,
    fqdn: String,
    domain_matcher: DomainMatcher,
    other_home_partners: HashSet<String>,
    roaming_consortiums: HashSet<u64>,
    match_any_ois: HashSet<u64>,
    match_all_ois: Vec<u64>,
    friendly_name: String,
    icon_url: Option<String>,
}

/// A configured home service provider.
///
/// Immutable once built. Identity (`==`, `Hash`) is the normalized FQDN alone;
/// use [`HomeSp::deep_equals`] to compare every field.
#[derive(Debug, Clone)]
pub struct HomeSp {
    profile: Arc<Profile>,
    credential: Arc<Credential>,
}

impl HomeSp {
    /// Build a provider, splitting the FQDN and partner domains into labels.
    pub fn new(params: HomeSpParams) -> Result<Self> {
        let fqdn_labels = parse_domain(&params.fqdn)?;
        let partner_labels = params
            .other_home_partners
            .iter()
            .map(|p| parse_domain(p))
            .collect::<Result<Vec<_>>>()?;

        let fqdn = fqdn_labels
            .iter()
            .rev()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".");

        let profile = Profile {
            ssids: params.ssids,
            fqdn,
            domain_matcher: DomainMatcher::new(&fqdn_labels, &partner_labels),
            other_home_partners: params.other_home_partners,
            roaming_consortiums: params.roaming_consortiums,
            match_any_ois: params.match_any_ois,
            match_all_ois: params.match_all_ois,
            friendly_name: params.friendly_name,
            icon_url: params.icon_url,
        };

        Ok(Self {
            profile: Arc::new(profile),
            credential: Arc::new(params.credential),
        })
    }

    /// Derive a provider carrying `password`.
    ///
    /// Only a credential holding a password placeholder is substituted; the
    /// profile itself is shared, and `self` is never modified.
    pub fn with_password(&self, password: &str) -> HomeSp {
        if !self.credential.has_disregard_password() {
            return self.clone();
        }
        HomeSp {
            profile: Arc::clone(&self.profile),
            credential: Arc::new(self.credential.with_password(password)),
        }
    }

    /// Match against a network and confirm the credential can authenticate.
    ///
    /// A `HomeProvider` or `RoamingProvider` result from [`HomeSp::match_sp`]
    /// is downgraded to `None` when `realm` finds no usable method; all other
    /// results pass through unchanged.
    pub fn matches(
        &self,
        network: &NetworkDetail,
        anqp: Option<&AnqpElements>,
        sim: Option<&dyn SimAccessor>,
        realm: &dyn RealmMatcher,
    ) -> Result<PasspointMatch> {
        let sp_match = self.match_sp(network, anqp, sim)?;
        if !sp_match.is_match() {
            return Ok(sp_match);
        }

        let (nai_realm, threegpp) = match anqp {
            Some(anqp) => {
                let threegpp = if self.credential.is_sim_based() {
                    anqp.threegpp_network()?
                } else {
                    None
                };
                (anqp.nai_realm()?, threegpp)
            }
            None => (None, None),
        };

        let auth = realm.match_credential(&self.credential, nai_realm, threegpp);
        debug!(
            network = %network.key_string(),
            fqdn = %self.profile.fqdn,
            sp_match = %sp_match,
            auth = %auth,
            "passpoint match"
        );

        Ok(if auth.is_usable() {
            sp_match
        } else {
            PasspointMatch::None
        })
    }

    /// Decide the provider relationship from SSID, OIs and domain names.
    ///
    /// `sim` is accepted for SIM based domain matching, which is not performed.
    pub fn match_sp(
        &self,
        network: &NetworkDetail,
        anqp: Option<&AnqpElements>,
        _sim: Option<&dyn SimAccessor>,
    ) -> Result<PasspointMatch> {
        let profile = &*self.profile;

        if let Some(hessid) = profile.ssids.get(&network.ssid) {
            if hessid.is_none() || *hessid == network.hessid {
                debug!(network = %network.key_string(), fqdn = %profile.fqdn, "match SSID");
                return Ok(PasspointMatch::HomeProvider);
            }
        }

        let observed = observed_ois(network, anqp)?;

        // Match-all runs before any ANQP-only check: a failure on beacon data
        // alone declines the provider without a query.
        let mut roaming_match = false;
        match evaluate_match_all(&profile.match_all_ois, &observed) {
            Some(true) => roaming_match = true,
            Some(false) => {
                if anqp.is_some() || network.anqp_oi_count == 0 {
                    debug!(network = %network.key_string(), fqdn = %profile.fqdn, "match-all OIs not present, declined");
                    return Ok(PasspointMatch::Declined);
                }
                debug!(network = %network.key_string(), fqdn = %profile.fqdn, "match-all OIs not in beacon, ANQP needed");
                return Ok(PasspointMatch::Incomplete);
            }
            None => {}
        }

        if !roaming_match
            && evaluate_match_any(
                &profile.match_any_ois,
                &profile.roaming_consortiums,
                &observed,
            )
        {
            roaming_match = true;
        }

        let Some(anqp) = anqp else {
            return Ok(PasspointMatch::Incomplete);
        };

        if let Some(domain_names) = anqp.domain_name()? {
            for domain in &domain_names.domains {
                if profile.domain_matcher.is_sub_domain(&split_domain(domain)) != DomainMatch::None
                {
                    return Ok(PasspointMatch::HomeProvider);
                }
            }
        }

        Ok(if roaming_match {
            PasspointMatch::RoamingProvider
        } else {
            PasspointMatch::None
        })
    }

    /// Compare every field, including the credential.
    pub fn deep_equals(&self, other: &HomeSp) -> bool {
        self.profile == other.profile && self.credential == other.credential
    }

    /// Normalized (lowercase, no trailing dot) FQDN
    pub fn fqdn(&self) -> &str {
        &self.profile.fqdn
    }

    pub fn ssids(&self) -> &HashMap<String, Option<u64>> {
        &self.profile.ssids
    }

    pub fn other_home_partners(&self) -> &HashSet<String> {
        &self.profile.other_home_partners
    }

    pub fn roaming_consortiums(&self) -> &HashSet<u64> {
        &self.profile.roaming_consortiums
    }

    pub fn match_any_ois(&self) -> &HashSet<u64> {
        &self.profile.match_any_ois
    }

    pub fn match_all_ois(&self) -> &[u64] {
        &self.profile.match_all_ois
    }

    pub fn friendly_name(&self) -> &str {
        &self.profile.friendly_name
    }

    pub fn icon_url(&self) -> Option<&str> {
        self.profile.icon_url.as_deref()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Check whether `domain` falls under the FQDN or a partner domain
    pub fn match_domain(&self, domain: &str) -> DomainMatch {
        self.profile.domain_matcher.matches(domain)
    }
}

impl PartialEq for HomeSp {
    fn eq(&self, other: &Self) -> bool {
        self.profile.fqdn == other.profile.fqdn
    }
}

impl Eq for HomeSp {}

impl Hash for HomeSp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.profile.fqdn.hash(state);
    }
}

impl fmt::Display for HomeSp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &*self.profile;
        write!(
            f,
            "HomeSP{{ssids={:?}, fqdn='{}', other_home_partners={:?}, roaming_consortiums={{{}}}, \
             match_any_ois={{{}}}, match_all_ois={{{}}}, credential={:?}, friendly_name='{}', icon_url={:?}}}",
            p.ssids,
            p.fqdn,
            p.other_home_partners,
            format_ois(&p.roaming_consortiums),
            format_ois(&p.match_any_ois),
            format_ois(&p.match_all_ois),
            self.credential,
            p.friendly_name,
            p.icon_url,
        )
    }
}
