use super::{Cli, Commands};
use clap::{CommandFactory, Parser};
use std::path::Path;

#[test]
fn cli_help_includes_required_top_level_commands() {
    let mut command = Cli::command();
    let help = command.render_long_help().to_string();
    assert!(help.contains("build"));
    assert!(help.contains("deploy"));
}

#[test]
fn cli_parses_build_with_defaults() {
    let cli = Cli::try_parse_from(["apppkg", "build", "--yaml-file", "algorithm_config.yml"])
        .expect("build must parse");
    match cli.command {
        Commands::Build(command) => {
            assert_eq!(command.yaml_file, Path::new("algorithm_config.yml"));
            assert_eq!(command.workflow_output_dir, Path::new("cwl_workflows"));
            assert_eq!(
                command.cwl_template_file,
                Path::new("templates/process.v1_2.cwl")
            );
        }
        _ => panic!("expected build"),
    }
}

#[test]
fn cli_build_requires_yaml_file() {
    assert!(Cli::try_parse_from(["apppkg", "build"]).is_err());
}

#[test]
fn cli_parses_deploy_without_endpoint() {
    let cli = Cli::try_parse_from([
        "apppkg",
        "deploy",
        "--process-cwl-url",
        "https://example.org/process.cwl",
    ])
    .expect("deploy must parse without endpoint");
    match cli.command {
        Commands::Deploy(command) => {
            assert_eq!(command.process_cwl_url, "https://example.org/process.cwl");
            assert!(command.app_pack_register_endpoint.is_none());
            assert_eq!(
                command.app_pack_template_file,
                Path::new("templates/ogcapppkg.yml")
            );
        }
        _ => panic!("expected deploy"),
    }
}

#[test]
fn cli_parses_deploy_endpoint() {
    let cli = Cli::try_parse_from([
        "apppkg",
        "deploy",
        "--process-cwl-url",
        "p.cwl",
        "--app-pack-register-endpoint",
        "https://registry.example/processes",
        "--app-pack-template-file",
        "custom.yml",
    ])
    .expect("deploy must parse");
    match cli.command {
        Commands::Deploy(command) => {
            assert_eq!(
                command.app_pack_register_endpoint.as_deref(),
                Some("https://registry.example/processes")
            );
            assert_eq!(command.app_pack_template_file, Path::new("custom.yml"));
        }
        _ => panic!("expected deploy"),
    }
}

#[test]
fn cli_deploy_requires_process_cwl_url() {
    assert!(Cli::try_parse_from(["apppkg", "deploy"]).is_err());
}
