use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

const ROWS: &str = include_str!("../../normalize/tests/fixtures/rows.json");

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("apidoc_cli_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, contents).expect("failed to write test file");
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn apidoc_gen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_apidoc-gen"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run apidoc-gen")
}

fn path_arg(path: &PathBuf) -> &str {
    path.to_str().expect("temp path must be UTF-8")
}

/// Bare-array snapshot with a single `A { x: <tag> }` type.
fn single_field_model(dir: &TempDir, name: &str, tag: &str) -> PathBuf {
    let json = serde_json::json!([{
        "name": "A",
        "extends": "",
        "desc": "",
        "isEnum": false,
        "enumValues": [],
        "props": [{
            "name": "x", "type": tag, "desc": "", "default": "",
            "enumValues": [], "isEnum": false, "optional": false
        }]
    }]);
    dir.write(name, &serde_json::to_string_pretty(&json).unwrap())
}

fn normalize_fixture(dir: &TempDir) -> PathBuf {
    let rows = dir.write("rows.json", ROWS);
    let output = dir.join("model.json");
    let out = apidoc_gen(&["normalize", "--input", path_arg(&rows), "--output", path_arg(&output)]);
    assert!(
        out.status.success(),
        "normalize failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    output
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

#[test]
fn normalize_writes_sealed_snapshot_and_report() {
    let dir = TempDir::new("normalize");
    let rows = dir.write("rows.json", ROWS);
    let output = dir.join("out/model.json");
    let report = dir.join("report.md");

    let out = apidoc_gen(&[
        "normalize",
        "--input",
        path_arg(&rows),
        "--output",
        path_arg(&output),
        "--report",
        path_arg(&report),
        "--format",
        "markdown",
    ]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Normalized 10 row(s) into 14 type(s)"));

    let snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(snapshot["version"], "1.0.0");
    assert_eq!(snapshot["types"].as_array().unwrap().len(), 14);
    assert_eq!(snapshot["bundle_hash"].as_str().unwrap().len(), 64);

    let report = fs::read_to_string(&report).unwrap();
    assert!(report.starts_with("# Normalization Report"));
    assert!(report.contains("- **Overrides applied:** 11"));
}

#[test]
fn normalize_fails_on_unknown_override_type() {
    let dir = TempDir::new("normalize_override");
    let rows = dir.write("rows.json", ROWS);
    let config = dir.write("apidoc.yml", "overrides:\n  may_be_null:\n    Ghost: [x]\n");
    let output = dir.join("model.json");

    let out = apidoc_gen(&[
        "--config",
        path_arg(&config),
        "normalize",
        "--input",
        path_arg(&rows),
        "--output",
        path_arg(&output),
    ]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error: may_be_null override names unknown type Ghost"));
    assert!(!output.exists());
}

#[test]
fn normalize_yaml_snapshot_uses_config_metadata() {
    let dir = TempDir::new("normalize_yaml");
    let rows = dir.write("rows.json", ROWS);
    let config = dir.write(
        "apidoc.yml",
        "snapshot:\n  version: \"3.1.0\"\n  name: rest-api\n",
    );
    let output = dir.join("model.yaml");

    let out = apidoc_gen(&[
        "normalize",
        "--config",
        path_arg(&config),
        "--input",
        path_arg(&rows),
        "--output",
        path_arg(&output),
    ]);
    assert!(out.status.success());

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("3.1.0"));
    assert!(text.contains("name: rest-api"));
    assert!(text.contains("bundle_hash:"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_normalized_snapshot() {
    let dir = TempDir::new("validate_ok");
    let model = normalize_fixture(&dir);

    let out = apidoc_gen(&["validate", path_arg(&model)]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Validated 1 snapshot(s) with 14 type(s)."));
}

#[test]
fn validate_rejects_duplicate_type_names() {
    let dir = TempDir::new("validate_dup");
    let model = dir.write(
        "dup.json",
        r#"[{"name": "Foo", "props": []}, {"name": "Foo", "props": []}]"#,
    );

    let out = apidoc_gen(&["validate", path_arg(&model)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("duplicate type in model: Foo"));
}

#[test]
fn validate_reports_missing_file() {
    let dir = TempDir::new("validate_missing");
    let out = apidoc_gen(&["validate", path_arg(&dir.join("missing.json"))]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("error: Failed to load"));
}

// ---------------------------------------------------------------------------
// generators
// ---------------------------------------------------------------------------

#[test]
fn gen_ts_prints_to_stdout() {
    let dir = TempDir::new("gen_ts");
    let model = single_field_model(&dir, "model.json", "Number");

    let out = apidoc_gen(&["gen-ts", "--input", path_arg(&model)]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("interface A {\n\tx: number;\n}"));
    assert!(stdout.contains("type NodeType = keyof NodeTypes;"));
}

#[test]
fn gen_ts_export_flag() {
    let dir = TempDir::new("gen_ts_export");
    let model = single_field_model(&dir, "model.json", "Number");
    let output = dir.join("types.ts");

    let out = apidoc_gen(&[
        "gen-ts",
        "--input",
        path_arg(&model),
        "--output",
        path_arg(&output),
        "--export",
    ]);
    assert!(out.status.success());
    let ts = fs::read_to_string(&output).unwrap();
    assert!(ts.contains("export interface A {"));
    assert!(ts.contains("export function isNodeType"));
}

#[test]
fn gen_schema_writes_definitions() {
    let dir = TempDir::new("gen_schema");
    let model = single_field_model(&dir, "model.json", "Number");
    let output = dir.join("schema.json");

    let out = apidoc_gen(&[
        "gen-schema",
        "--input",
        path_arg(&model),
        "--output",
        path_arg(&output),
    ]);
    assert!(out.status.success());

    let schema: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(schema["$schema"], "http://json-schema.org/draft-04/schema#");
    assert_eq!(
        schema["definitions"]["A"],
        serde_json::json!({"type": "object", "properties": {"x": {"type": "number"}}, "required": ["x"]})
    );
}

#[test]
fn generate_writes_both_artifacts_with_config() {
    let dir = TempDir::new("generate");
    let model = normalize_fixture(&dir);
    let config = dir.write(
        "apidoc.yml",
        "schema:\n  root_properties:\n    document: DOCUMENT\ntypescript:\n  export: true\n",
    );
    let ts_path = dir.join("gen/types.ts");
    let schema_path = dir.join("gen/schema.json");

    let out = apidoc_gen(&[
        "--config",
        path_arg(&config),
        "generate",
        "--input",
        path_arg(&model),
        "--ts-output",
        path_arg(&ts_path),
        "--schema-output",
        path_arg(&schema_path),
    ]);
    assert!(
        out.status.success(),
        "generate failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let ts = fs::read_to_string(&ts_path).unwrap();
    assert!(ts.contains("export interface NodeBase {"));
    assert!(ts.contains("fontPostScriptName: string|null;"));

    let schema: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&schema_path).unwrap()).unwrap();
    assert_eq!(
        schema["properties"]["document"],
        serde_json::json!({"$ref": "#/definitions/DOCUMENT"})
    );
    assert_eq!(schema["definitions"]["Node"]["oneOf"].as_array().unwrap().len(), 15);
}

// ---------------------------------------------------------------------------
// diff
// ---------------------------------------------------------------------------

#[test]
fn diff_reports_changed_field_type() {
    let dir = TempDir::new("diff_md");
    let old = single_field_model(&dir, "old.json", "Number");
    let new = single_field_model(&dir, "new.json", "String");

    let out = apidoc_gen(&["diff", "--old", path_arg(&old), "--new", path_arg(&new)]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "# Added\n\n# Changed\n* `A.props.x.type` = `String`\n# Deleted\n\n"
    );
}

#[test]
fn diff_identical_snapshots_is_empty_json() {
    let dir = TempDir::new("diff_json");
    let model = normalize_fixture(&dir);
    let output = dir.join("diff.json");

    let out = apidoc_gen(&[
        "diff",
        "--old",
        path_arg(&model),
        "--new",
        path_arg(&model),
        "--format",
        "json",
        "--output",
        path_arg(&output),
    ]);
    assert!(out.status.success());

    let diff: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        diff,
        serde_json::json!({"added": [], "deleted": [], "changed": []})
    );
}
