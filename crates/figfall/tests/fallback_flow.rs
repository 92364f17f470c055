//! End-to-end fallback flow over injected collaborators: recover a truncated
//! API payload, seed the mapping store from it, then resolve an unknown code
//! by probe search.

use figfall::{
    CodeReference, FigfallError, ItemCode, MappingStore, MemoryStore, ProbeOutcome, ProbeSearch,
    Prober, Quarter, Result, SearchConfig, SearchOutcome, recover,
};

use std::sync::Mutex;
use std::time::Duration;

/// Prober that knows one quarter per code and records traffic.
struct FixtureProber {
    listings: Vec<(u32, &'static str)>,
    probes: Mutex<u32>,
}

impl FixtureProber {
    fn new(listings: Vec<(u32, &'static str)>) -> Self {
        Self { listings, probes: Mutex::new(0) }
    }

    fn probe_count(&self) -> u32 {
        *self.probes.lock().unwrap()
    }
}

impl Prober for FixtureProber {
    fn probe(&self, code: ItemCode, quarter: Quarter) -> Result<ProbeOutcome> {
        *self.probes.lock().unwrap() += 1;
        let hit = self
            .listings
            .iter()
            .any(|&(c, q)| c == code.get() && q == quarter.to_string());
        Ok(if hit { ProbeOutcome::Found(vec![0xff, 0xd8]) } else { ProbeOutcome::Miss })
    }
}

fn no_backoff() -> SearchConfig {
    SearchConfig { backoff: Duration::ZERO, ..SearchConfig::default() }
}

// The API body is cut off mid-property; recovery must still expose the
// fields that did arrive, including the partition the image lives in.
const TRUNCATED_PAYLOAD: &str = concat!(
    r#"{"RSuccess":true,"item":{"gcode":"FIGURE-100000","#,
    r#""image_category":"/171/","sname_simple":"Example Fig","price":1234,"sales"#,
);

fn quarter_from_payload(payload: &serde_json::Value) -> Quarter {
    let category = payload["item"]["image_category"].as_str().unwrap();
    category.replace('/', "").parse().unwrap()
}

#[test]
fn recovered_payload_seeds_the_store_for_probe_search() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let payload = recover(TRUNCATED_PAYLOAD).expect("truncated payload must recover");
    assert_eq!(payload["item"]["sname_simple"], "Example Fig");

    let store = MemoryStore::new();
    store
        .insert(&CodeReference::new(ItemCode(100_000), false, quarter_from_payload(&payload)))
        .unwrap();
    store
        .insert(&CodeReference::new(ItemCode(100_100), false, "172".parse().unwrap()))
        .unwrap();

    let prober = FixtureProber::new(vec![(100_050, "171")]);
    let search = ProbeSearch::with_config(store, prober, no_backoff());

    // Initial guess "172", miss; "173", miss; "171" confirms.
    match search.search("100050").unwrap() {
        SearchOutcome::Confirmed { reference, attempts, .. } => {
            assert_eq!(reference.quarter.to_string(), "171");
            assert_eq!(attempts, 3);
        }
        other => panic!("expected Confirmed, got {other:?}"),
    }

    // Confirmed mapping is cached: the repeat lookup issues no probe.
    assert!(matches!(search.search("100050").unwrap(), SearchOutcome::Hit(_)));
    assert_eq!(search.prober().probe_count(), 3);
}

#[test]
fn unrecoverable_payload_reports_both_texts() {
    let err = recover("xx").unwrap_err();
    match err {
        FigfallError::RecoveryFailed { original, repaired, .. } => {
            assert_eq!(original, "xx");
            assert_eq!(repaired, "xx");
        }
        other => panic!("expected RecoveryFailed, got {other:?}"),
    }
}
