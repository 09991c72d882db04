use clap::{CommandFactory, Parser};
use resgen::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["resgen", "generate"],
        vec!["resgen", "generate", "--dry-run"],
        vec!["resgen", "--workspace", "/tmp/project", "generate", "--format", "json"],
        vec![
            "resgen",
            "changed",
            "--imported",
            "Assets/Resources/a.png",
            "Assets/Resources/b.png",
            "--deleted",
            "Assets/Resources/c.png",
        ],
        vec!["resgen", "changed"],
        vec![
            "resgen",
            "watch",
            "--debounce-ms",
            "120",
            "--batch-window-ms",
            "80",
        ],
        vec!["resgen", "sanitize", "My-File_02"],
        vec!["resgen", "--log-level", "debug", "--log-output", "stdout", "config"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn changed_collects_multiple_paths_per_flag() {
    let cli = Cli::try_parse_from([
        "resgen",
        "changed",
        "--moved",
        "Assets/Resources/new.png",
        "--moved-from",
        "Assets/Resources/old.png",
        "--imported",
        "a",
        "b",
    ])
    .unwrap();

    match cli.command {
        Commands::Changed {
            imported,
            moved,
            moved_from,
            deleted,
            ..
        } => {
            assert_eq!(imported, vec!["a", "b"]);
            assert_eq!(moved, vec!["Assets/Resources/new.png"]);
            assert_eq!(moved_from, vec!["Assets/Resources/old.png"]);
            assert!(deleted.is_empty());
        }
        _ => panic!("expected changed command"),
    }
}

#[test]
fn parse_rejects_invalid_invocations() {
    assert!(Cli::try_parse_from(["resgen"]).is_err());
    assert!(Cli::try_parse_from(["resgen", "sanitize"]).is_err());
    assert!(Cli::try_parse_from(["resgen", "watch", "--debounce-ms", "soon"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
