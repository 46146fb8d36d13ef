use std::fs;
use std::path::{Path, PathBuf};

use super::generate::{GenerateOptions, Outcome, run};

const SCHEMA: &str = r#"
type User { id: ID! name: String }
type Query { me: User! }
"#;

fn project(queries: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("schema.graphql"), SCHEMA).unwrap();
    fs::create_dir(dir.path().join("queries")).unwrap();
    fs::write(dir.path().join("queries").join("me.graphql"), queries).unwrap();
    fs::write(
        dir.path().join("sdkgen.toml"),
        r#"
schema_path = "schema.graphql"
queries_path = "queries"
target_package_name = "api"
target_package_path = "generated"
"#,
    )
    .unwrap();
    dir
}

fn options(dir: &Path) -> GenerateOptions {
    GenerateOptions {
        config_path: dir.join("sdkgen.toml"),
        out_dir: None,
        check: false,
    }
}

#[test]
fn writes_package_next_to_config() {
    let dir = project("query me { me { id name } }");
    let outcome = run(options(dir.path())).unwrap();

    let root = dir.path().join("generated").join("api");
    assert_eq!(outcome, Outcome::Written(root.clone()));
    assert!(root.join("mod.rs").is_file());
    assert!(root.join("client.rs").is_file());
    let me = fs::read_to_string(root.join("me.rs")).unwrap();
    assert!(me.contains("pub struct Me {"));
}

#[test]
fn out_flag_overrides_target_path() {
    let dir = project("query me { me { id } }");
    let out = dir.path().join("elsewhere");
    let outcome = run(GenerateOptions {
        out_dir: Some(out.clone()),
        ..options(dir.path())
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Written(out.join("api")));
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn check_writes_nothing() {
    let dir = project("query me { me { id } }");
    let outcome = run(GenerateOptions {
        check: true,
        ..options(dir.path())
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Checked);
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn failed_generation_writes_nothing() {
    let dir = project("query me { me { id ...Missing } }");
    let err = run(options(dir.path())).unwrap_err();

    assert!(format!("{err:#}").contains("unknown fragment `Missing`"));
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn missing_config_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(options(dir.path())).unwrap_err();
    let path: PathBuf = dir.path().join("sdkgen.toml");
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
fn unreadable_schema_is_reported_with_context() {
    let dir = project("query me { me { id } }");
    fs::remove_file(dir.path().join("schema.graphql")).unwrap();
    let err = run(options(dir.path())).unwrap_err();
    assert!(err.to_string().starts_with("reading schema `"));
    assert!(!dir.path().join("generated").exists());
}
