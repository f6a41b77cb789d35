//! Provider profile configuration.
//!
//! Profiles are provisioned as a JSON array of [`HomeSpConfig`] objects:
//!
//! ```json
//! [
//!   {
//!     "fqdn": "example.com",
//!     "friendly_name": "Example Wireless",
//!     "ssids": { "ExampleWiFi": null, "ExampleCorp": "0x0011aabbccdd" },
//!     "match_any_ois": ["0x001bc504bd"],
//!     "credential": { "realm": "example.com", "eap_method": "ttls", "username": "alice" }
//!   }
//! ]
//! ```
//!
//! OIs and HESSIDs accept JSON numbers or hex strings.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::credential::{Credential, EapMethod};
use crate::error::{MatchError, Result};
use crate::home_sp::{HomeSp, HomeSpParams};

/// A 64-bit identifier given as a number or a hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexU64(pub u64);

impl<'de> Deserialize<'de> for HexU64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(HexU64(n)),
            Raw::Text(s) => parse_hex(&s).map(HexU64).map_err(de::Error::custom),
        }
    }
}

fn parse_hex(s: &str) -> std::result::Result<u64, String> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u64::from_str_radix(digits, 16).map_err(|e| format!("invalid hex value '{}': {}", s, e))
}

/// Credential section of a provider profile
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialConfig {
    pub realm: String,
    pub eap_method: EapMethod,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Password is a placeholder the user supplies later
    #[serde(default)]
    pub disregard_password: bool,
    #[serde(default)]
    pub imsi: Option<String>,
}

impl CredentialConfig {
    pub fn into_credential(self) -> Credential {
        let mut credential = Credential::new(self.realm, self.eap_method);
        if let Some(username) = self.username {
            credential = credential.with_username(username);
        }
        if let Some(imsi) = self.imsi {
            credential = credential.with_imsi(imsi);
        }
        if let Some(password) = self.password {
            credential = credential.with_password(password);
        }
        credential.with_disregard_password(self.disregard_password)
    }
}

/// One provisioned provider profile
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HomeSpConfig {
    pub fqdn: String,
    #[serde(default)]
    pub friendly_name: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    /// SSID -> HESSID, `null` to match on SSID alone
    #[serde(default)]
    pub ssids: HashMap<String, Option<HexU64>>,
    #[serde(default)]
    pub roaming_consortiums: Vec<HexU64>,
    #[serde(default)]
    pub other_home_partners: Vec<String>,
    #[serde(default)]
    pub match_any_ois: Vec<HexU64>,
    #[serde(default)]
    pub match_all_ois: Vec<HexU64>,
    pub credential: CredentialConfig,
}

impl HomeSpConfig {
    /// Build the provider described by this config
    pub fn into_home_sp(self) -> Result<HomeSp> {
        let params = HomeSpParams {
            ssids: self
                .ssids
                .into_iter()
                .map(|(ssid, hessid)| (ssid, hessid.map(|h| h.0)))
                .collect(),
            fqdn: self.fqdn,
            roaming_consortiums: self.roaming_consortiums.into_iter().map(|o| o.0).collect(),
            other_home_partners: self.other_home_partners.into_iter().collect(),
            match_any_ois: self.match_any_ois.into_iter().map(|o| o.0).collect(),
            match_all_ois: self.match_all_ois.into_iter().map(|o| o.0).collect(),
            friendly_name: self.friendly_name,
            icon_url: self.icon_url,
            credential: self.credential.into_credential(),
        };
        HomeSp::new(params)
    }
}

/// Parse provider profiles from a JSON array.
///
/// Two profiles with the same FQDN are the same provider and are rejected.
pub fn parse_profiles(json: &str) -> Result<Vec<HomeSp>> {
    let configs: Vec<HomeSpConfig> = serde_json::from_str(json)?;

    let mut seen = HashSet::with_capacity(configs.len());
    let mut profiles = Vec::with_capacity(configs.len());

    for (index, config) in configs.into_iter().enumerate() {
        let home_sp = config.into_home_sp().map_err(|e| {
            MatchError::ConfigError(format!("profile {}: {}", index, e))
        })?;
        if !seen.insert(home_sp.fqdn().to_string()) {
            return Err(MatchError::ConfigError(format!(
                "profile {}: duplicate provider '{}'",
                index,
                home_sp.fqdn()
            )));
        }
        profiles.push(home_sp);
    }

    Ok(profiles)
}

/// Parse provider profiles from a JSON file.
pub fn load_profiles_from_file(path: impl AsRef<Path>) -> Result<Vec<HomeSp>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        MatchError::ParseError(format!(
            "Failed to read profiles file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_profiles(&text)
}
