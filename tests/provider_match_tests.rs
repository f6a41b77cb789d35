//! Scenario tests for provider matching and the credential gate

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use passpoint_match::{
    AnqpElements, AuthMatch, Credential, DomainNameElement, EapMethod, HomeSp, HomeSpParams,
    NaiRealmData, NaiRealmElement, NetworkDetail, PasspointMatch, ProviderSelector, RealmMatcher,
    RoamingConsortiumElement, SimAccessor, ThreeGppNetworkElement,
};

fn ttls() -> Credential {
    Credential::new("example.com", EapMethod::Ttls).with_username("alice")
}

fn build(params: HomeSpParams) -> HomeSp {
    HomeSp::new(params).unwrap()
}

fn domain_element(domains: &[&str]) -> DomainNameElement {
    DomainNameElement {
        domains: domains.iter().map(|d| d.to_string()).collect(),
    }
}

/// Realm matcher that records what it was handed
#[derive(Default)]
struct RecordingRealm {
    verdict: Option<AuthMatch>,
    calls: AtomicUsize,
    saw_threegpp: AtomicUsize,
}

impl RecordingRealm {
    fn returning(verdict: AuthMatch) -> Self {
        Self {
            verdict: Some(verdict),
            ..Self::default()
        }
    }
}

impl RealmMatcher for RecordingRealm {
    fn match_credential(
        &self,
        _credential: &Credential,
        _nai_realm: Option<&NaiRealmElement>,
        threegpp: Option<&ThreeGppNetworkElement>,
    ) -> AuthMatch {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if threegpp.is_some() {
            self.saw_threegpp.fetch_add(1, Ordering::SeqCst);
        }
        self.verdict.unwrap_or(AuthMatch::None)
    }
}

/// SIM accessor that counts lookups
#[derive(Default)]
struct CountingSim {
    lookups: AtomicUsize,
}

impl SimAccessor for CountingSim {
    fn matching_imsi(&self, _mcc_mnc: &str) -> Option<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Some("310260000000001".to_string())
    }
}

#[test]
fn test_scenario_a_ssid_only_home() {
    let sp = build(HomeSpParams::new("example.com", ttls()).with_ssid("FreeWiFi", None));
    let network = NetworkDetail::new("FreeWiFi");

    assert_eq!(
        sp.match_sp(&network, None, None).unwrap(),
        PasspointMatch::HomeProvider
    );
}

#[test]
fn test_scenario_b_match_all_incomplete() {
    let sp = build(
        HomeSpParams::new("example.com", ttls())
            .with_match_all_oi(0x1a)
            .with_match_all_oi(0x2b),
    );
    let network = NetworkDetail::new("Hotspot")
        .with_roaming_consortiums([0x1a])
        .with_anqp_oi_count(1);

    assert_eq!(
        sp.match_sp(&network, None, None).unwrap(),
        PasspointMatch::Incomplete
    );
}

#[test]
fn test_scenario_c_match_all_declined_after_query() {
    let sp = build(
        HomeSpParams::new("example.com", ttls())
            .with_match_all_oi(0x1a)
            .with_match_all_oi(0x2b),
    );
    let network = NetworkDetail::new("Hotspot")
        .with_roaming_consortiums([0x1a])
        .with_anqp_oi_count(1);

    // Query performed, no roaming consortium element returned
    let anqp = AnqpElements::new();
    assert_eq!(
        sp.match_sp(&network, Some(&anqp), None).unwrap(),
        PasspointMatch::Declined
    );

    // Query performed, element present but still missing an OI
    let anqp = AnqpElements::new().with(RoamingConsortiumElement { ois: vec![0x3c] });
    assert_eq!(
        sp.match_sp(&network, Some(&anqp), None).unwrap(),
        PasspointMatch::Declined
    );
}

#[test]
fn test_scenario_d_roaming_provider() {
    let sp = build(HomeSpParams::new("example.com", ttls()).with_match_any_oi(0x99));
    let network = NetworkDetail::new("Hotspot").with_roaming_consortiums([0x99]);
    let anqp = AnqpElements::new().with(domain_element(&["other-operator.net"]));

    assert_eq!(
        sp.match_sp(&network, Some(&anqp), None).unwrap(),
        PasspointMatch::RoamingProvider
    );
}

#[test]
fn test_scenario_e_domain_overrides_roaming() {
    let sp = build(HomeSpParams::new("example.com", ttls()).with_match_any_oi(0x99));
    let network = NetworkDetail::new("Hotspot").with_roaming_consortiums([0x99]);
    let anqp = AnqpElements::new().with(domain_element(&["other-operator.net", "example.com"]));

    assert_eq!(
        sp.match_sp(&network, Some(&anqp), None).unwrap(),
        PasspointMatch::HomeProvider
    );
}

#[test]
fn test_no_anqp_never_home_via_domain() {
    let sp = build(
        HomeSpParams::new("example.com", ttls())
            .with_match_any_oi(0x99)
            .with_other_home_partner("example.net"),
    );

    for network in [
        NetworkDetail::new("Hotspot"),
        NetworkDetail::new("Hotspot").with_roaming_consortiums([0x99]),
        NetworkDetail::new("example.com").with_anqp_oi_count(3),
    ] {
        let result = sp.match_sp(&network, None, None).unwrap();
        assert_ne!(result, PasspointMatch::HomeProvider, "{:?}", network);
    }
}

#[test]
fn test_match_all_satisfied_is_never_declined() {
    let sp = build(
        HomeSpParams::new("example.com", ttls())
            .with_match_all_oi(0x1a)
            .with_match_all_oi(0x2b),
    );
    let network = NetworkDetail::new("Hotspot").with_roaming_consortiums([0x1a, 0x2b]);

    assert_eq!(
        sp.match_sp(&network, None, None).unwrap(),
        PasspointMatch::Incomplete
    );
    assert_eq!(
        sp.match_sp(&network, Some(&AnqpElements::new()), None)
            .unwrap(),
        PasspointMatch::RoamingProvider
    );
}

#[test]
fn test_match_all_declined_from_beacon_alone() {
    let sp = build(HomeSpParams::new("example.com", ttls()).with_match_all_oi(0x1a));
    let network = NetworkDetail::new("Hotspot")
        .with_roaming_consortiums([0x2b])
        .with_anqp_oi_count(0);

    assert_eq!(
        sp.match_sp(&network, None, None).unwrap(),
        PasspointMatch::Declined
    );
}

#[test]
fn test_match_all_failure_ignores_match_any_and_domain() {
    let sp = build(
        HomeSpParams::new("example.com", ttls())
            .with_match_all_oi(0x1a)
            .with_match_any_oi(0x99),
    );
    let network = NetworkDetail::new("Hotspot").with_roaming_consortiums([0x99]);
    let anqp = AnqpElements::new().with(domain_element(&["example.com"]));

    assert_eq!(
        sp.match_sp(&network, Some(&anqp), None).unwrap(),
        PasspointMatch::Declined
    );
}

#[test]
fn test_ssid_match_wins_over_declining_rule() {
    let sp = build(
        HomeSpParams::new("example.com", ttls())
            .with_ssid("Corp", None)
            .with_match_all_oi(0x1a),
    );

    assert_eq!(
        sp.match_sp(&NetworkDetail::new("Corp"), None, None).unwrap(),
        PasspointMatch::HomeProvider
    );
}

#[test]
fn test_sim_accessor_is_not_consulted() {
    let sp = build(HomeSpParams::new("example.com", ttls()).with_match_any_oi(0x99));
    let network = NetworkDetail::new("Hotspot").with_roaming_consortiums([0x99]);
    let anqp = AnqpElements::new().with(domain_element(&["wlan.mnc260.mcc310.3gppnetwork.org"]));
    let sim = CountingSim::default();

    assert_eq!(
        sp.match_sp(&network, Some(&anqp), Some(&sim)).unwrap(),
        PasspointMatch::RoamingProvider
    );
    assert_eq!(sim.lookups.load(Ordering::SeqCst), 0);
}

#[test]
fn test_gate_downgrades_without_usable_method() {
    let sp = build(HomeSpParams::new("example.com", ttls()).with_match_any_oi(0x99));
    let network = NetworkDetail::new("Hotspot").with_roaming_consortiums([0x99]);
    let anqp = AnqpElements::new().with(domain_element(&["example.com"]));

    let reject = RecordingRealm::returning(AuthMatch::None);
    assert_eq!(
        sp.matches(&network, Some(&anqp), None, &reject).unwrap(),
        PasspointMatch::None
    );

    let accept = RecordingRealm::returning(AuthMatch::Method);
    assert_eq!(
        sp.matches(&network, Some(&anqp), None, &accept).unwrap(),
        PasspointMatch::HomeProvider
    );
}

#[test]
fn test_gate_passes_through_non_matches() {
    let sp = build(HomeSpParams::new("example.com", ttls()).with_match_all_oi(0x1a));
    let realm = RecordingRealm::returning(AuthMatch::Exact);

    let network = NetworkDetail::new("Hotspot").with_anqp_oi_count(2);
    assert_eq!(
        sp.matches(&network, None, None, &realm).unwrap(),
        PasspointMatch::Incomplete
    );
    assert_eq!(
        sp.matches(&network, Some(&AnqpElements::new()), None, &realm)
            .unwrap(),
        PasspointMatch::Declined
    );
    assert_eq!(realm.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_gate_hands_threegpp_only_to_sim_credentials() {
    let anqp = AnqpElements::new()
        .with(domain_element(&["example.com"]))
        .with(NaiRealmElement {
            realms: vec![NaiRealmData {
                realms: vec!["example.com".to_string()],
                eap_methods: vec![EapMethod::Ttls, EapMethod::Sim],
            }],
        })
        .with(ThreeGppNetworkElement {
            plmns: vec!["310260".to_string()],
        });
    let network = NetworkDetail::new("Hotspot");

    let realm = RecordingRealm::returning(AuthMatch::Realm);
    let ttls_sp = build(HomeSpParams::new("example.com", ttls()));
    ttls_sp.matches(&network, Some(&anqp), None, &realm).unwrap();
    assert_eq!(realm.saw_threegpp.load(Ordering::SeqCst), 0);

    let sim_sp = build(HomeSpParams::new(
        "example.com",
        Credential::new("example.com", EapMethod::Sim).with_imsi("310260*"),
    ));
    sim_sp.matches(&network, Some(&anqp), None, &realm).unwrap();
    assert_eq!(realm.saw_threegpp.load(Ordering::SeqCst), 1);
    assert_eq!(realm.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_malformed_element_map_fails_fast() {
    use passpoint_match::{AnqpElement, AnqpElementType, MatchError};

    let sp = build(HomeSpParams::new("example.com", ttls()));
    let mut anqp = AnqpElements::new();
    anqp.insert(
        AnqpElementType::RoamingConsortium,
        AnqpElement::DomainName(domain_element(&["example.com"])),
    );

    let result = sp.match_sp(&NetworkDetail::new("Hotspot"), Some(&anqp), None);
    assert!(matches!(
        result,
        Err(MatchError::ElementTypeMismatch {
            expected: AnqpElementType::RoamingConsortium,
            ..
        })
    ));
}

#[test]
fn test_with_password_preserves_profile() {
    let template = build(
        HomeSpParams::new(
            "example.com",
            ttls().with_password("").with_disregard_password(true),
        )
        .with_ssid("Corp", Some(0xaabb))
        .with_match_any_oi(0x99)
        .with_other_home_partner("example.net")
        .with_friendly_name("Example")
        .with_icon_url("https://example.com/icon.png"),
    );

    let filled = template.with_password("s3cret");

    assert_eq!(filled.credential().password(), "s3cret");
    assert!(!filled.credential().has_disregard_password());
    assert_eq!(filled.fqdn(), template.fqdn());
    assert_eq!(filled.ssids(), template.ssids());
    assert_eq!(filled.match_any_ois(), template.match_any_ois());
    assert_eq!(filled.other_home_partners(), template.other_home_partners());
    assert_eq!(filled.friendly_name(), "Example");
    assert_eq!(filled.icon_url(), Some("https://example.com/icon.png"));

    // Template untouched; identity equal, deep equality not
    assert!(template.credential().has_disregard_password());
    assert_eq!(template.credential().password(), "");
    assert_eq!(filled, template);
    assert!(!filled.deep_equals(&template));
}

#[test]
fn test_with_password_without_placeholder_returns_same_profile() {
    let sp = build(HomeSpParams::new("example.com", ttls().with_password("kept")));
    let copy = sp.with_password("ignored");

    assert_eq!(copy.credential().password(), "kept");
    assert!(copy.deep_equals(&sp));
}

#[test]
fn test_parallel_evaluation() {
    let providers: Vec<HomeSp> = (0..8u64)
        .map(|i| {
            build(
                HomeSpParams::new(format!("op{}.example.com", i), ttls())
                    .with_match_any_oi(0x100 + i),
            )
        })
        .collect();
    let selector = Arc::new(ProviderSelector::new(
        providers,
        Arc::new(RecordingRealm::returning(AuthMatch::Realm)),
    ));

    std::thread::scope(|s| {
        for i in 0..8u64 {
            let selector = Arc::clone(&selector);
            s.spawn(move || {
                let network = NetworkDetail::new("Hotspot").with_roaming_consortiums([0x100 + i]);
                let anqp = AnqpElements::new();
                let best = selector
                    .best_match(&network, Some(&anqp), None)
                    .unwrap()
                    .unwrap();
                assert_eq!(best.result, PasspointMatch::RoamingProvider);
                assert_eq!(best.home_sp.fqdn(), format!("op{}.example.com", i));
            });
        }
    });
}
