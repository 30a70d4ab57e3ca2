use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["buyloom-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_import_command() {
    let cli = Cli::try_parse_from(["buyloom-cli", "import", "products.csv"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Import {
            ref path,
            dry_run: false,
            json: false,
        }) if path == &PathBuf::from("products.csv")
    ));
}

#[test]
fn parses_import_flags() {
    let cli =
        Cli::try_parse_from(["buyloom-cli", "import", "p.csv", "--dry-run", "--json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Import {
            dry_run: true,
            json: true,
            ..
        })
    ));
}

#[test]
fn import_requires_path() {
    assert!(Cli::try_parse_from(["buyloom-cli", "import"]).is_err());
}

#[test]
fn parses_sample_with_default_output() {
    let cli = Cli::try_parse_from(["buyloom-cli", "sample"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Sample { output: None })
    ));
}

#[test]
fn parses_sample_with_output() {
    let cli = Cli::try_parse_from(["buyloom-cli", "sample", "-o", "out/template.csv"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Sample { output: Some(ref p) }) if p == &PathBuf::from("out/template.csv")
    ));
}

#[test]
fn parses_catalog_list() {
    let cli = Cli::try_parse_from(["buyloom-cli", "catalog", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog {
            command: CatalogCommands::List {
                search: None,
                category: None,
                tag: None,
            }
        })
    ));
}

#[test]
fn parses_catalog_list_filters() {
    let cli = Cli::try_parse_from([
        "buyloom-cli",
        "catalog",
        "list",
        "--search",
        "earbuds",
        "-c",
        "Electronics",
        "--tag",
        "New",
    ])
    .unwrap();
    let Some(Commands::Catalog {
        command: CatalogCommands::List {
            search,
            category,
            tag,
        },
    }) = cli.command
    else {
        panic!("expected catalog list");
    };
    assert_eq!(search.as_deref(), Some("earbuds"));
    assert_eq!(category.as_deref(), Some("Electronics"));
    assert_eq!(tag.as_deref(), Some("New"));
}

#[test]
fn parses_catalog_show_and_remove() {
    let id = Uuid::new_v4();
    let id_arg = id.to_string();

    let cli = Cli::try_parse_from(["buyloom-cli", "catalog", "show", &id_arg]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog {
            command: CatalogCommands::Show { id: parsed }
        }) if parsed == id
    ));

    let cli = Cli::try_parse_from(["buyloom-cli", "catalog", "remove", &id_arg]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog {
            command: CatalogCommands::Remove { id: parsed }
        }) if parsed == id
    ));
}

#[test]
fn catalog_id_must_be_a_uuid() {
    assert!(Cli::try_parse_from(["buyloom-cli", "catalog", "show", "42"]).is_err());
    assert!(Cli::try_parse_from(["buyloom-cli", "catalog", "remove"]).is_err());
}

#[test]
fn parses_catalog_update_edits() {
    let id = Uuid::new_v4().to_string();
    let cli = Cli::try_parse_from([
        "buyloom-cli",
        "catalog",
        "update",
        &id,
        "--rating",
        "4.5",
        "--tags",
        "New,Sale",
        "--affiliate-url",
        "https://amazon.com/x",
    ])
    .unwrap();
    let Some(Commands::Catalog {
        command: CatalogCommands::Update { edits, .. },
    }) = cli.command
    else {
        panic!("expected catalog update");
    };
    assert!(edits.rating.is_some_and(|r| (r - 4.5).abs() < f64::EPSILON));
    assert_eq!(edits.tags, Some(vec!["New".to_string(), "Sale".to_string()]));
    assert_eq!(edits.affiliate_url.as_deref(), Some("https://amazon.com/x"));
    assert!(edits.name.is_none());
}

#[test]
fn parses_catalog_resolve() {
    let cli = Cli::try_parse_from(["buyloom-cli", "catalog", "resolve", "/go/gfjcy7?pid=1"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog {
            command: CatalogCommands::Resolve { ref path }
        }) if path == "/go/gfjcy7?pid=1"
    ));
}

#[test]
fn rejects_unknown_command() {
    assert!(Cli::try_parse_from(["buyloom-cli", "export"]).is_err());
}
