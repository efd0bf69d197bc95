use super::*;

#[test]
fn parses_migrate_orders_minimal() {
    let cli = Cli::try_parse_from(["farmbox-cli", "migrate-orders", "--input", "export.json"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::MigrateOrders {
            ref input,
            output: None,
            customers: None,
            concurrency: None,
        }) if input.as_os_str() == "export.json"
    ));
}

#[test]
fn parses_migrate_orders_all_flags() {
    let cli = Cli::try_parse_from([
        "farmbox-cli",
        "migrate-orders",
        "--input",
        "export.json",
        "--output",
        "orders.json",
        "--customers",
        "customers.json",
        "--concurrency",
        "8",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Some(Commands::MigrateOrders {
            output: Some(ref output),
            customers: Some(ref customers),
            concurrency: Some(8),
            ..
        }) if output.as_os_str() == "orders.json" && customers.as_os_str() == "customers.json"
    ));
}

#[test]
fn migrate_orders_requires_input() {
    assert!(Cli::try_parse_from(["farmbox-cli", "migrate-orders"]).is_err());
}

#[test]
fn migrate_orders_rejects_non_numeric_concurrency() {
    let result = Cli::try_parse_from([
        "farmbox-cli",
        "migrate-orders",
        "--input",
        "export.json",
        "--concurrency",
        "many",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_parse_address() {
    let cli = Cli::try_parse_from(["farmbox-cli", "parse-address", "Kossuth tér 5 2. em. 3"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::ParseAddress { ref text, line: false }) if text == "Kossuth tér 5 2. em. 3"
    ));
}

#[test]
fn parses_parse_address_line_flag() {
    let cli = Cli::try_parse_from(["farmbox-cli", "parse-address", "--line", "Jókai u. 42"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::ParseAddress { line: true, .. })
    ));
}

#[test]
fn render_address_as_line_or_json() {
    assert_eq!(
        render_address("  Fő   utca 10  4/2 ", true).unwrap(),
        "Fő utca 10 4 2"
    );

    let json: serde_json::Value =
        serde_json::from_str(&render_address("Fő utca 10 4/2", false).unwrap()).unwrap();
    assert_eq!(json["street"], "Fő utca");
    assert_eq!(json["doorbell"], "2");
}

fn bad_env_config() -> Result<AppConfig, ConfigError> {
    Err(ConfigError::InvalidEnvVar {
        var: "FARMBOX_ENV".to_string(),
        reason: "unknown environment \"staging\"".to_string(),
    })
}

#[tokio::test]
async fn parse_address_runs_without_valid_config() {
    let cli = Cli::try_parse_from(["farmbox-cli", "parse-address", "Jókai u. 42"]).unwrap();
    run(cli, bad_env_config()).await.unwrap();
}

#[tokio::test]
async fn migrate_orders_reports_config_error() {
    let cli = Cli::try_parse_from(["farmbox-cli", "migrate-orders", "--input", "export.json"])
        .unwrap();
    let err = run(cli, bad_env_config()).await.unwrap_err();
    assert!(err.to_string().contains("FARMBOX_ENV"));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["farmbox-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}
