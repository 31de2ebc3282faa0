use std::io::Write;
use std::path::PathBuf;

use eta_core::{EtaEstimator, FixtureRouteLookup, RawRouteResult, ReferenceTable};
use tempfile::TempDir;

/// Reference rows used across the integration tests. Row order matters for
/// tie-breaking: the Koramangala junction row precedes the block row.
pub const REFERENCE_CSV: &str = "\
day,Area Name,Road/Intersection Name,Travel Time Index
Mon,Koramangala,Sony World Junction,1.2
Mon,Koramangala 5th Block,80 Feet Road,1.5
Mon,Indiranagar,100 Feet Road,1.4
Tue,Koramangala,Sony World Junction,1.3
Sat,Whitefield,ITPL Main Road,1.6
Sun,MG Road,Trinity Circle,1.25
";

pub const ROUTES_JSON: &str = r#"[
    {
        "pickup": "Koramangala",
        "drop": "Indiranagar",
        "eta_text": "10 min",
        "distance_text": "5.1 km",
        "route_description_text": "via Intermediate Ring Rd"
    },
    {
        "pickup": "Hebbal",
        "drop": "Yelahanka",
        "eta_text": "20 min (11 km) via Bellary Rd Details",
        "distance_text": "11 km"
    },
    {
        "pickup": "Whitefield",
        "drop": "MG Road",
        "eta_text": "about an hour",
        "distance_text": "18 km",
        "route_description_text": "via Old Airport Rd"
    }
]"#;

pub fn reference_table() -> ReferenceTable {
    ReferenceTable::from_reader(REFERENCE_CSV.as_bytes()).expect("reference table")
}

pub fn route_lookup() -> FixtureRouteLookup {
    let fixtures = serde_json::from_str(ROUTES_JSON).expect("route fixtures");
    FixtureRouteLookup::from_fixtures(fixtures)
}

pub fn estimator() -> EtaEstimator {
    EtaEstimator::with_table(reference_table(), Some(Box::new(route_lookup())))
}

pub fn raw_route(eta: &str) -> RawRouteResult {
    RawRouteResult {
        raw_eta_text: eta.to_string(),
        distance_text: "3 km".to_string(),
        route_description_text: "via Hosur Rd".to_string(),
    }
}

/// Temporary directory holding `reference.csv`, `routes.json` and a config
/// file pointing at both.
pub struct DataDir {
    pub dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(&dir.path().join("reference.csv"), REFERENCE_CSV);
        write_file(&dir.path().join("routes.json"), ROUTES_JSON);
        let config = serde_json::json!({
            "reference_path": dir.path().join("reference.csv"),
            "route_provider": {
                "kind": "fixture",
                "path": dir.path().join("routes.json"),
            },
        });
        write_file(&dir.path().join("config.json"), &config.to_string());
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        write_file(&path, contents);
        path
    }
}

fn write_file(path: &std::path::Path, contents: &str) {
    let mut file = std::fs::File::create(path).expect("create file");
    file.write_all(contents.as_bytes()).expect("write file");
}
