//! Passpoint Match - Hotspot 2.0 home service provider selection for Rust
//!
//! Decides, for a discovered hotspot, whether a configured provider profile
//! (HomeSP) is the network's home provider, a roaming partner, or unrelated:
//! - Direct SSID / HESSID matching
//! - Roaming consortium OI rules ("match all", "match any")
//! - Home and partner domain suffix matching against ANQP Domain Names
//! - Deferral when ANQP data has not been fetched yet
//! - Credential compatibility gating through a pluggable realm matcher
//!
//! # Example
//!
//! ```rust
//! use passpoint_match::{
//!     AnqpElements, AuthMatch, Credential, DomainNameElement, EapMethod, HomeSp, HomeSpParams,
//!     NaiRealmElement, NetworkDetail, PasspointMatch, ThreeGppNetworkElement,
//! };
//!
//! let home_sp = HomeSp::new(
//!     HomeSpParams::new("example.com", Credential::new("example.com", EapMethod::Ttls))
//!         .with_match_any_oi(0x99),
//! )
//! .unwrap();
//!
//! let network = NetworkDetail::new("Hotspot").with_roaming_consortiums([0x99]);
//! let realm = |_: &Credential, _: Option<&NaiRealmElement>, _: Option<&ThreeGppNetworkElement>| {
//!     AuthMatch::Realm
//! };
//!
//! // Nothing queried yet: a home match is still possible
//! let result = home_sp.matches(&network, None, None, &realm).unwrap();
//! assert_eq!(result, PasspointMatch::Incomplete);
//!
//! // After the ANQP query
//! let anqp = AnqpElements::new().with(DomainNameElement {
//!     domains: vec!["hotspot.example.com".to_string()],
//! });
//! let result = home_sp.matches(&network, Some(&anqp), None, &realm).unwrap();
//! assert_eq!(result, PasspointMatch::HomeProvider);
//! ```
//!
//! # Decision order
//!
//! | Step | Check | Outcome |
//! |------|-------|---------|
//! | 1 | SSID configured, HESSID absent or equal | `HomeProvider` |
//! | 2 | Match-all OIs missing, ANQP done or nothing more to fetch | `Declined` |
//! | 2 | Match-all OIs missing, more OIs behind ANQP | `Incomplete` |
//! | 3 | Match-all satisfied, or any match-any / roaming OI seen | roaming candidate |
//! | 4 | No ANQP data | `Incomplete` |
//! | 5 | Domain Name under FQDN or partner domain | `HomeProvider` |
//! | 6 | Otherwise | `RoamingProvider` or `None` |

pub mod anqp;
pub mod config;
pub mod credential;
pub mod error;
pub mod home_sp;
pub mod matcher;
pub mod selector;
pub mod types;

// Re-export commonly used items
pub use anqp::{
    AnqpElement, AnqpElementType, AnqpElements, DomainNameElement, NaiRealmData, NaiRealmElement,
    RoamingConsortiumElement, ThreeGppNetworkElement,
};
pub use config::{load_profiles_from_file, parse_profiles, CredentialConfig, HexU64, HomeSpConfig};
pub use credential::{Credential, EapMethod, RealmMatcher, SimAccessor};
pub use error::{MatchError, Result};
pub use home_sp::{HomeSp, HomeSpParams};
pub use matcher::{split_domain, DomainMatch, DomainMatcher};
pub use selector::{ProviderMatch, ProviderSelector};
pub use types::{AuthMatch, NetworkDetail, PasspointMatch};
