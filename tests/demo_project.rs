use prism_tokens::emit::strip_timestamp;
use prism_tokens::pipeline::OutputKind;
use prism_tokens::{Pipeline, PipelineConfig};
use std::fs;
use std::path::{Path, PathBuf};

fn demo_config(out_dir: &Path) -> PipelineConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/basic/prism.json");
    let mut config = PipelineConfig::load(&path).expect("demo config loads");
    config.out_dir = out_dir.to_path_buf();
    config
}

#[test]
fn demo_builds_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let output = Pipeline::new(demo_config(dir.path()))
        .run("2024-01-01T00:00:00Z")
        .unwrap();

    let report = &output.report;
    assert!(report.is_success(), "{}", report);
    assert_eq!(report.files_loaded, 3);
    assert_eq!(
        report.families_generated,
        vec!["brand", "accent", "danger", "info", "neutral"]
    );
    assert_eq!(report.written.len(), 5);

    let link = output.resolved.get("color.text.link").unwrap();
    let anchor = output.resolved.get("color.brand.700").unwrap();
    assert_eq!(link.value, anchor.value);
    assert_eq!(link.alias.as_deref(), Some("{color.brand.700}"));
    assert_eq!(link.ty.as_deref(), Some("color"));

    let info: Vec<_> = output
        .resolved
        .iter()
        .filter(|t| t.path.starts_with("color.status.info."))
        .map(|t| t.path.as_str())
        .collect();
    assert_eq!(
        info,
        vec![
            "color.status.info.300",
            "color.status.info.500",
            "color.status.info.700"
        ]
    );
    assert_eq!(
        output.resolved.get("color.status.info.500").unwrap().value,
        "oklch(55% 0.20 262)"
    );

    let css = fs::read_to_string(dir.path().join("tokens.css")).unwrap();
    assert!(css.starts_with("/**\n"));
    assert!(css.contains("  --button-primary-bg-hover: "));
    assert!(css.contains("  --font-weight-bold: 700;"));
}

#[test]
fn css_and_typescript_name_the_same_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let output = Pipeline::new(demo_config(dir.path()))
        .build("2024-01-01T00:00:00Z")
        .unwrap();

    let css = &output.files.iter().find(|f| f.kind == OutputKind::Css).unwrap().contents;
    let ts = &output
        .files
        .iter()
        .find(|f| f.kind == OutputKind::TypeScript)
        .unwrap()
        .contents;

    let css_names: Vec<&str> = css
        .lines()
        .filter_map(|l| l.trim().strip_prefix("--"))
        .filter_map(|l| l.split(':').next())
        .collect();
    assert!(!css_names.is_empty());
    for name in &css_names {
        assert!(ts.contains(&format!("\"--{}\"", name)), "{} missing from TS", name);
    }
    assert_eq!(css_names.len(), output.resolved.resolved_count());
}

#[test]
fn demo_rebuild_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(demo_config(dir.path()));
    let first = pipeline.run("2024-01-01T00:00:00Z").unwrap();
    let second = pipeline.build("2030-12-31T23:59:59Z").unwrap();

    for (a, b) in first.files.iter().zip(&second.files) {
        assert_eq!(strip_timestamp(&a.contents), strip_timestamp(&b.contents), "{}", a.path.display());
    }
    assert!(pipeline.check("2030-12-31T23:59:59Z").unwrap().is_success());
}

#[test]
fn build_from_config_reports_problems() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("tokens")).unwrap();
    fs::write(
        dir.path().join("tokens/a.json"),
        serde_json::to_string(&serde_json::json!({
            "a": { "b": { "$value": "{x.y}" } },
            "x": { "y": { "$value": "{a.b}" } },
            "ok": { "$value": "1px" }
        }))
        .unwrap(),
    )
    .unwrap();
    fs::write(dir.path().join("prism.json"), "{}").unwrap();

    let report = prism_tokens::build_from_config(&dir.path().join("prism.json")).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.resolved, 1);
    assert_eq!(report.unresolved.len(), 2);
    assert!(dir.path().join("dist/tokens.css").is_file());
}
