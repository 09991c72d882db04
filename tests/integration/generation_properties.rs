use std::fs;

use resgen::resolver::ExtensionTypeResolver;
use resgen::{generate, GenerateOptions, Generator};
use tempfile::TempDir;

use crate::support::{count, sample_project, touch};

fn generate_text(root: &std::path::Path) -> String {
    let resolver = ExtensionTypeResolver::with_builtin_types();
    generate(root, &resolver, &GenerateOptions::default())
        .unwrap()
        .text
}

#[test]
fn container_and_accessor_counts_match_tree() {
    let temp = TempDir::new().unwrap();
    sample_project(temp.path());
    let root = temp.path().join("Assets/Resources");

    let text = generate_text(&root);
    // Audio, Empty, Sprites, Sprites/UI plus the root
    assert_eq!(count(&text, "public class "), 5);
    assert_eq!(count(&text, "public static "), 5);
    assert!(!text.contains("Meta"));
}

#[test]
fn generation_is_byte_identical_across_runs() {
    let temp = TempDir::new().unwrap();
    sample_project(temp.path());
    let root = temp.path().join("Assets/Resources");

    assert_eq!(generate_text(&root), generate_text(&root));
}

#[test]
fn sample_project_renders_expected_source() {
    let temp = TempDir::new().unwrap();
    sample_project(temp.path());
    let root = temp.path().join("Assets/Resources");

    let expected = "
public class Resourcesdata
{

\tpublic class Audio
\t{
\t\tpublic static UnityEngine.AudioClip BossTheme => UnityEngine.Resources.Load<UnityEngine.AudioClip>(\"Audio/boss theme\");
\t}

\tpublic class Empty
\t{
\t}

\tpublic class Sprites
\t{

\t\tpublic class Ui
\t\t{
\t\t\tpublic static UnityEngine.Texture2D OkButton => UnityEngine.Resources.Load<UnityEngine.Texture2D>(\"Sprites/UI/ok-button\");
\t\t\tpublic static UnityEngine.Texture2D _9sliceFrame => UnityEngine.Resources.Load<UnityEngine.Texture2D>(\"Sprites/UI/9slice_frame\");
\t\t}
\t\tpublic static UnityEngine.Texture2D Hero => UnityEngine.Resources.Load<UnityEngine.Texture2D>(\"Sprites/hero\");
\t}
\tpublic static UnityEngine.TextAsset Levels => UnityEngine.Resources.Load<UnityEngine.TextAsset>(\"levels\");
}
";
    assert_eq!(generate_text(&root), expected);
}

#[test]
fn metadata_never_surfaces_at_any_depth() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "a/b/c/d/deep.png.meta");
    touch(root, "a/b/c/d/only.meta");
    touch(root, "top.meta");

    let text = generate_text(root);
    assert_eq!(count(&text, "public static "), 0);
    assert_eq!(count(&text, "public class "), 5);
}

#[test]
fn sibling_collision_keeps_one_accessor() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "Hero-Idle.png");
    touch(root, "hero_idle.png");

    let text = generate_text(root);
    assert_eq!(count(&text, "public static "), 1);
    assert!(text.contains("HeroIdle => UnityEngine.Resources.Load<UnityEngine.Texture2D>(\"hero_idle\")"));
}

#[test]
fn single_empty_subdirectory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("Empty")).unwrap();

    let text = generate_text(temp.path());
    assert_eq!(
        text,
        "\npublic class Resourcesdata\n{\n\n\tpublic class Empty\n\t{\n\t}\n}\n"
    );
}

#[test]
fn generator_writes_file_named_after_root_container() {
    let temp = TempDir::new().unwrap();
    sample_project(temp.path());
    let generator = Generator::from_config(temp.path(), &Default::default());

    let report = generator.run().unwrap();
    assert!(report
        .output
        .ends_with("Assets/_App/Scripts/Data/ResourcesData.cs"));
    let written = fs::read_to_string(&report.output).unwrap();
    assert_eq!(written, generator.preview().unwrap().text);
    assert_eq!(report.accessors, 5);
    assert_eq!(report.stats.skipped_metadata, 6);
}
