use std::fmt;

use serde::Deserialize;

use crate::anqp::{NaiRealmElement, ThreeGppNetworkElement};
use crate::types::AuthMatch;

/// EAP methods a credential can authenticate with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EapMethod {
    Tls,
    Ttls,
    Sim,
    Aka,
    AkaPrime,
}

impl EapMethod {
    /// SIM, AKA and AKA' draw their identity from the SIM card
    pub fn is_sim_based(&self) -> bool {
        matches!(self, EapMethod::Sim | EapMethod::Aka | EapMethod::AkaPrime)
    }
}

/// Provider credential
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential {
    realm: String,
    eap_method: EapMethod,
    username: Option<String>,
    password: String,
    disregard_password: bool,
    imsi: Option<String>,
}

impl Credential {
    pub fn new(realm: impl Into<String>, eap_method: EapMethod) -> Self {
        Self {
            realm: realm.into().to_lowercase(),
            eap_method,
            username: None,
            password: String::new(),
            disregard_password: false,
            imsi: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_imsi(mut self, imsi: impl Into<String>) -> Self {
        self.imsi = Some(imsi.into());
        self
    }

    /// Mark the stored password as a placeholder the user must supply
    pub fn with_disregard_password(mut self, disregard: bool) -> Self {
        self.disregard_password = disregard;
        self
    }

    /// Derive a copy carrying `password`; the placeholder flag is cleared
    pub fn with_password(&self, password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            disregard_password: false,
            ..self.clone()
        }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn eap_method(&self) -> EapMethod {
        self.eap_method
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn has_disregard_password(&self) -> bool {
        self.disregard_password
    }

    pub fn imsi(&self) -> Option<&str> {
        self.imsi.as_deref()
    }

    pub fn is_sim_based(&self) -> bool {
        self.eap_method.is_sim_based()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("realm", &self.realm)
            .field("eap_method", &self.eap_method)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("disregard_password", &self.disregard_password)
            .field("imsi", &self.imsi)
            .finish()
    }
}

/// Trait for realm/credential compatibility checks.
///
/// Decides whether a credential has a usable authentication method against
/// the network's NAI Realm advertisement and, for SIM based credentials, its
/// 3GPP cellular network advertisement. Either element may be missing.
pub trait RealmMatcher: Send + Sync {
    fn match_credential(
        &self,
        credential: &Credential,
        nai_realm: Option<&NaiRealmElement>,
        threegpp: Option<&ThreeGppNetworkElement>,
    ) -> AuthMatch;
}

impl<F> RealmMatcher for F
where
    F: Fn(&Credential, Option<&NaiRealmElement>, Option<&ThreeGppNetworkElement>) -> AuthMatch
        + Send
        + Sync,
{
    fn match_credential(
        &self,
        credential: &Credential,
        nai_realm: Option<&NaiRealmElement>,
        threegpp: Option<&ThreeGppNetworkElement>,
    ) -> AuthMatch {
        self(credential, nai_realm, threegpp)
    }
}

/// Trait for SIM identity lookups.
///
/// Maps an MCC+MNC pair to the IMSI of an installed SIM. Provider matching
/// accepts an accessor but does not consult it: escalating an advertised
/// 3GPP domain to a home match through the SIM is unresolved in the standard.
pub trait SimAccessor: Send + Sync {
    fn matching_imsi(&self, mcc_mnc: &str) -> Option<String>;
}
