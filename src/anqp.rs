//! ANQP element map.
//!
//! The engine never parses ANQP frames; it consumes already decoded elements
//! keyed by element type. A missing map means no query has been made yet,
//! while a present map without a key means the AP did not advertise that element.

use std::collections::HashMap;
use std::fmt;

use crate::error::{MatchError, Result};

/// ANQP element types consumed by provider matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnqpElementType {
    DomainName,
    RoamingConsortium,
    NaiRealm,
    ThreeGppNetwork,
}

impl fmt::Display for AnqpElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Domain Name element: domains operated by the network's provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainNameElement {
    pub domains: Vec<String>,
}

/// Roaming Consortium element: OIs beyond those carried in the beacon
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoamingConsortiumElement {
    pub ois: Vec<u64>,
}

/// One NAI realm tuple and the EAP methods it accepts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NaiRealmData {
    pub realms: Vec<String>,
    pub eap_methods: Vec<crate::credential::EapMethod>,
}

/// NAI Realm element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NaiRealmElement {
    pub realms: Vec<NaiRealmData>,
}

/// 3GPP Cellular Network element: PLMNs as MCC+MNC strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreeGppNetworkElement {
    pub plmns: Vec<String>,
}

/// A decoded ANQP element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnqpElement {
    DomainName(DomainNameElement),
    RoamingConsortium(RoamingConsortiumElement),
    NaiRealm(NaiRealmElement),
    ThreeGppNetwork(ThreeGppNetworkElement),
}

impl AnqpElement {
    /// The element type of this value
    pub fn element_type(&self) -> AnqpElementType {
        match self {
            AnqpElement::DomainName(_) => AnqpElementType::DomainName,
            AnqpElement::RoamingConsortium(_) => AnqpElementType::RoamingConsortium,
            AnqpElement::NaiRealm(_) => AnqpElementType::NaiRealm,
            AnqpElement::ThreeGppNetwork(_) => AnqpElementType::ThreeGppNetwork,
        }
    }
}

impl From<DomainNameElement> for AnqpElement {
    fn from(e: DomainNameElement) -> Self {
        AnqpElement::DomainName(e)
    }
}

impl From<RoamingConsortiumElement> for AnqpElement {
    fn from(e: RoamingConsortiumElement) -> Self {
        AnqpElement::RoamingConsortium(e)
    }
}

impl From<NaiRealmElement> for AnqpElement {
    fn from(e: NaiRealmElement) -> Self {
        AnqpElement::NaiRealm(e)
    }
}

impl From<ThreeGppNetworkElement> for AnqpElement {
    fn from(e: ThreeGppNetworkElement) -> Self {
        AnqpElement::ThreeGppNetwork(e)
    }
}

/// Decoded ANQP elements for one network, keyed by element type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnqpElements {
    elements: HashMap<AnqpElementType, AnqpElement>,
}

impl AnqpElements {
    /// Create an empty map (query performed, nothing advertised)
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element under its own type
    pub fn with(mut self, element: impl Into<AnqpElement>) -> Self {
        let element = element.into();
        self.elements.insert(element.element_type(), element);
        self
    }

    /// Insert an element under an explicit key.
    ///
    /// The key is not checked against the element; mismatches surface as
    /// `ElementTypeMismatch` from the typed getters.
    pub fn insert(&mut self, key: AnqpElementType, element: AnqpElement) {
        self.elements.insert(key, element);
    }

    pub fn get(&self, key: AnqpElementType) -> Option<&AnqpElement> {
        self.elements.get(&key)
    }

    pub fn contains(&self, key: AnqpElementType) -> bool {
        self.elements.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn domain_name(&self) -> Result<Option<&DomainNameElement>> {
        match self.get(AnqpElementType::DomainName) {
            None => Ok(None),
            Some(AnqpElement::DomainName(e)) => Ok(Some(e)),
            Some(other) => Err(mismatch(AnqpElementType::DomainName, other)),
        }
    }

    pub fn roaming_consortium(&self) -> Result<Option<&RoamingConsortiumElement>> {
        match self.get(AnqpElementType::RoamingConsortium) {
            None => Ok(None),
            Some(AnqpElement::RoamingConsortium(e)) => Ok(Some(e)),
            Some(other) => Err(mismatch(AnqpElementType::RoamingConsortium, other)),
        }
    }

    pub fn nai_realm(&self) -> Result<Option<&NaiRealmElement>> {
        match self.get(AnqpElementType::NaiRealm) {
            None => Ok(None),
            Some(AnqpElement::NaiRealm(e)) => Ok(Some(e)),
            Some(other) => Err(mismatch(AnqpElementType::NaiRealm, other)),
        }
    }

    pub fn threegpp_network(&self) -> Result<Option<&ThreeGppNetworkElement>> {
        match self.get(AnqpElementType::ThreeGppNetwork) {
            None => Ok(None),
            Some(AnqpElement::ThreeGppNetwork(e)) => Ok(Some(e)),
            Some(other) => Err(mismatch(AnqpElementType::ThreeGppNetwork, other)),
        }
    }
}

fn mismatch(expected: AnqpElementType, found: &AnqpElement) -> MatchError {
    MatchError::ElementTypeMismatch {
        expected,
        found: found.element_type(),
    }
}
