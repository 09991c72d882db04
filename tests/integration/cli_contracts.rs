use std::fs;

use resgen::tooling::cli::{CliContext, Commands};
use tempfile::TempDir;

use crate::support::{count, sample_project};

fn generate(format: &str) -> Commands {
    Commands::Generate {
        dry_run: false,
        format: format.to_string(),
    }
}

fn changed(imported: &[&str]) -> Commands {
    Commands::Changed {
        imported: imported.iter().map(|s| s.to_string()).collect(),
        deleted: Vec::new(),
        moved: Vec::new(),
        moved_from: Vec::new(),
        format: "json".to_string(),
    }
}

#[test]
fn generate_json_contract_has_required_fields() {
    let temp = TempDir::new().unwrap();
    sample_project(temp.path());

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli.execute(&generate("json")).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("containers").and_then(|v| v.as_u64()), Some(5));
    assert_eq!(parsed.get("accessors").and_then(|v| v.as_u64()), Some(5));
    assert_eq!(parsed.get("written").and_then(|v| v.as_bool()), Some(true));
    assert!(parsed.get("output").and_then(|v| v.as_str()).is_some());
    let stats = parsed.get("stats").expect("stats object should exist");
    assert_eq!(stats.get("collisions").and_then(|v| v.as_u64()), Some(0));
}

#[test]
fn dry_run_prints_source_without_writing() {
    let temp = TempDir::new().unwrap();
    sample_project(temp.path());

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli
        .execute(&Commands::Generate {
            dry_run: true,
            format: "text".to_string(),
        })
        .unwrap();

    assert!(output.starts_with("\npublic class Resourcesdata\n"));
    assert_eq!(count(&output, "public static "), 5);
    assert!(!temp
        .path()
        .join("Assets/_App/Scripts/Data/ResourcesData.cs")
        .exists());
}

#[test]
fn unknown_format_is_rejected_before_any_work() {
    let temp = TempDir::new().unwrap();
    sample_project(temp.path());
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();

    for dry_run in [true, false] {
        let result = cli.execute(&Commands::Generate {
            dry_run,
            format: "yaml".to_string(),
        });
        assert!(result.is_err(), "dry_run={} accepted an unknown format", dry_run);
    }
    let mut outside = changed(&["Assets/Scripts/Player.cs"]);
    if let Commands::Changed { format, .. } = &mut outside {
        *format = "yaml".to_string();
    }
    assert!(cli.execute(&outside).is_err());
    assert!(!temp
        .path()
        .join("Assets/_App/Scripts/Data/ResourcesData.cs")
        .exists());
}

#[test]
fn generate_creates_missing_root() {
    let temp = TempDir::new().unwrap();

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    cli.execute(&generate("text")).unwrap();

    assert!(temp.path().join("Assets/Resources").is_dir());
    let written =
        fs::read_to_string(temp.path().join("Assets/_App/Scripts/Data/ResourcesData.cs")).unwrap();
    assert_eq!(written, "\npublic class Resourcesdata\n{\n}\n");
}

#[test]
fn changed_outside_root_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    sample_project(temp.path());

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli.execute(&changed(&["Assets/Scripts/Player.cs"])).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("regenerated").and_then(|v| v.as_bool()), Some(false));
    assert!(!temp.path().join("Assets/_App").exists());
}

#[test]
fn changed_inside_root_regenerates() {
    let temp = TempDir::new().unwrap();
    sample_project(temp.path());

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli
        .execute(&changed(&["Assets/Resources/Sprites/hero.png"]))
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("accessors").and_then(|v| v.as_u64()), Some(5));
}

#[test]
fn workspace_config_file_is_honoured() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("resgen.toml"),
        r#"
[generator]
root = "Content"
destination = "Generated"
root_name = "GameAssets"
indent = "    "

[types]
png = "UnityEngine.Sprite"
"#,
    )
    .unwrap();
    fs::create_dir_all(temp.path().join("Content")).unwrap();
    fs::write(temp.path().join("Content/logo.png"), "").unwrap();

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    cli.execute(&generate("text")).unwrap();

    let written = fs::read_to_string(temp.path().join("Generated/GameAssets.cs")).unwrap();
    assert_eq!(
        written,
        "\npublic class Gameassets\n{\n    public static UnityEngine.Sprite Logo => UnityEngine.Resources.Load<UnityEngine.Sprite>(\"logo\");\n}\n"
    );
}

#[test]
fn sanitize_json_contract() {
    let temp = TempDir::new().unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli
        .execute(&Commands::Sanitize {
            names: vec!["My-File_02".to_string(), "9lives".to_string()],
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let entries = parsed.as_array().expect("array output");
    assert_eq!(entries[0]["identifier"], "MyFile02");
    assert_eq!(entries[1]["identifier"], "_9Lives");
}

#[test]
fn config_command_prints_effective_toml() {
    let temp = TempDir::new().unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli.execute(&Commands::Config).unwrap();

    let parsed: toml::Value = toml::from_str(&output).unwrap();
    assert_eq!(
        parsed["generator"]["root_name"].as_str(),
        Some("ResourcesData")
    );
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = CliContext::new(
        temp.path().to_path_buf(),
        Some(temp.path().join("absent.toml")),
    );
    assert!(result.is_err());
}
