use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sp_report::{MonitorKind, ReportError, ReportExporter, SimulationContext, SimulationSnapshot};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}_{}", prefix, std::process::id(), nanos));
    dir
}

#[test]
fn yaml_snapshot_resolves_session_dir_next_to_file() {
    let dir = unique_temp_dir("sp_snapshot_yaml");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("case.yaml");
    fs::write(
        &path,
        "name: duct_case\n\
         session_dir: session\n\
         reports:\n  - name: Drag\n    value: 12.5\n    unit: N\n\
         monitors:\n  - name: Continuity\n    kind: residual\n    values: [1.0, 0.01]\n",
    )
    .expect("failed to write snapshot");

    let snapshot = SimulationSnapshot::load(&path).expect("yaml load failed");
    assert_eq!(snapshot.presentation_name(), "duct_case");
    assert_eq!(snapshot.session_dir(), dir.join("session").as_path());
    assert_eq!(
        snapshot.resolve_path("results.csv"),
        dir.join("session").join("results.csv")
    );
    assert_eq!(snapshot.reports().len(), 1);
    assert_eq!(snapshot.monitors()[0].kind, MonitorKind::Residual);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn json_snapshot_keeps_absolute_session_dir() {
    let dir = unique_temp_dir("sp_snapshot_json");
    let session = unique_temp_dir("sp_snapshot_json_session");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    fs::create_dir_all(&session).expect("failed to create session dir");
    let path = dir.join("case.json");
    let json = format!(
        r#"{{"name": "json_case", "session_dir": {:?}, "reports": [{{"name": "Lift", "value": 3.2, "unit": "N"}}], "monitors": []}}"#,
        session.display().to_string()
    );
    fs::write(&path, json).expect("failed to write snapshot");

    let snapshot = SimulationSnapshot::load(&path).expect("json load failed");
    assert_eq!(snapshot.session_dir(), session.as_path());
    assert_eq!(snapshot.reports()[0].name, "Lift");

    let summary = ReportExporter::new("lift.csv")
        .try_export(&snapshot)
        .expect("export failed");
    assert_eq!(summary.path, session.join("lift.csv"));
    let content = fs::read_to_string(&summary.path).expect("export missing");
    assert_eq!(content, "Report Name, Value, Unit, \nLift, 3.2, N\n");

    let _ = fs::remove_dir_all(&dir);
    let _ = fs::remove_dir_all(&session);
}

#[test]
fn missing_session_dir_defaults_to_snapshot_dir() {
    let dir = unique_temp_dir("sp_snapshot_default_dir");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("case.yml");
    fs::write(&path, "name: bare\n").expect("failed to write snapshot");

    let snapshot = SimulationSnapshot::load(&path).expect("yml load failed");
    assert_eq!(
        snapshot.resolve_path("results.csv"),
        dir.join("results.csv")
    );
    assert!(snapshot.reports().is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn other_extensions_are_rejected() {
    let dir = unique_temp_dir("sp_snapshot_txt");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("case.txt");
    fs::write(&path, "name: text\n").expect("failed to write snapshot");

    match SimulationSnapshot::load(&path) {
        Err(ReportError::UnsupportedSnapshot { path: reported }) => {
            assert!(reported.ends_with("case.txt"));
        }
        other => panic!("expected unsupported snapshot, got {other:?}"),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_yaml_is_an_error() {
    let dir = unique_temp_dir("sp_snapshot_bad_yaml");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("case.yaml");
    fs::write(&path, "reports: [unterminated\n").expect("failed to write snapshot");

    assert!(matches!(
        SimulationSnapshot::load(&path),
        Err(ReportError::Yaml(_))
    ));

    let _ = fs::remove_dir_all(&dir);
}
