use appconfig::cli::{Cli, Commands};
use clap::Parser;

#[test]
fn test_parse_show() {
    let cli = Cli::try_parse_from(["appconfig", "show"]).unwrap();
    assert!(!cli.json);
    match cli.command {
        Commands::Show(args) => assert!(!args.flags),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_show_flags_with_global_json() {
    let cli = Cli::try_parse_from(["appconfig", "show", "--flags", "--json"]).unwrap();
    assert!(cli.json);
    match cli.command {
        Commands::Show(args) => assert!(args.flags),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_check_strict() {
    let cli = Cli::try_parse_from(["appconfig", "-j", "check", "--strict"]).unwrap();
    assert!(cli.json);
    match cli.command {
        Commands::Check(args) => assert!(args.strict),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_docs() {
    let cli = Cli::try_parse_from(["appconfig", "docs"]).unwrap();
    assert!(matches!(cli.command, Commands::Docs));
}

#[test]
fn test_parse_flag_requires_name() {
    let cli = Cli::try_parse_from(["appconfig", "flag", "ENABLE_BETA"]).unwrap();
    match cli.command {
        Commands::Flag(args) => assert_eq!(args.name, "ENABLE_BETA"),
        _ => panic!("Wrong top-level command"),
    }

    assert!(Cli::try_parse_from(["appconfig", "flag"]).is_err());
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["appconfig", "reload"]).is_err());
}
