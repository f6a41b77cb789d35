use std::fmt;

/// Outcome of matching a provider profile against a discovered network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasspointMatch {
    /// The network is operated by the home provider
    HomeProvider,
    /// The network belongs to a roaming partner of the home provider
    RoamingProvider,
    /// The provider's match-all rule authoritatively excludes this network
    Declined,
    /// More ANQP data is needed before a decision can be made
    Incomplete,
    /// No relationship between the provider and the network
    None,
}

impl PasspointMatch {
    /// True for `HomeProvider` and `RoamingProvider`
    pub fn is_match(&self) -> bool {
        matches!(
            self,
            PasspointMatch::HomeProvider | PasspointMatch::RoamingProvider
        )
    }
}

impl fmt::Display for PasspointMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PasspointMatch::HomeProvider => "HomeProvider",
            PasspointMatch::RoamingProvider => "RoamingProvider",
            PasspointMatch::Declined => "Declined",
            PasspointMatch::Incomplete => "Incomplete",
            PasspointMatch::None => "None",
        };
        f.write_str(name)
    }
}

/// Verdict of a realm/credential compatibility check.
///
/// Variants other than `None` carry increasing confidence that the credential
/// can authenticate; the credential gate only distinguishes `None` from the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMatch {
    /// No usable authentication method
    None,
    /// The network advertised nothing to check against
    Indeterminate,
    /// Realm matched, method not verified
    Realm,
    /// EAP method matched
    Method,
    /// Authentication parameters matched
    Param,
    /// Method and parameters matched
    MethodParam,
    /// Realm, method and parameters matched
    Exact,
}

impl AuthMatch {
    /// Collapse the verdict to "has a usable method"
    pub fn is_usable(&self) -> bool {
        !matches!(self, AuthMatch::None)
    }
}

impl fmt::Display for AuthMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Discovered network information as seen in beacons and probe responses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkDetail {
    /// Observed SSID
    pub ssid: String,
    /// BSSID (48-bit MAC address)
    pub bssid: u64,
    /// Homogeneous ESS identifier, if advertised
    pub hessid: Option<u64>,
    /// Roaming consortium OIs carried in the beacon
    pub roaming_consortiums: Vec<u64>,
    /// Number of OIs the AP holds beyond those in the beacon
    pub anqp_oi_count: u32,
}

impl NetworkDetail {
    /// Create a network with just an SSID
    pub fn new(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            ..Self::default()
        }
    }

    /// Set the BSSID
    pub fn with_bssid(mut self, bssid: u64) -> Self {
        self.bssid = bssid;
        self
    }

    /// Set the HESSID
    pub fn with_hessid(mut self, hessid: u64) -> Self {
        self.hessid = Some(hessid);
        self
    }

    /// Set the beacon roaming consortium OIs
    pub fn with_roaming_consortiums(mut self, ois: impl IntoIterator<Item = u64>) -> Self {
        self.roaming_consortiums = ois.into_iter().collect();
        self
    }

    /// Set the count of OIs available through ANQP
    pub fn with_anqp_oi_count(mut self, count: u32) -> Self {
        self.anqp_oi_count = count;
        self
    }

    /// Short identifying string for diagnostics
    pub fn key_string(&self) -> String {
        format!(
            "'{}':{:012x} ({:012x})",
            self.ssid,
            self.bssid,
            self.hessid.unwrap_or(0)
        )
    }
}

/// Render OIs as comma separated lowercase hex
pub fn format_ois<'a>(ois: impl IntoIterator<Item = &'a u64>) -> String {
    ois.into_iter()
        .map(|oi| format!("{:x}", oi))
        .collect::<Vec<_>>()
        .join(", ")
}
