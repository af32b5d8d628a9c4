use clap::Parser;
use koreader_inspector::app::commands;
use koreader_inspector::utils::logger;
use koreader_inspector::{CliConfig, InspectorClient, InspectorError};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // The config file may turn on JSON output, so settings come before logging.
    let settings = cli.settings();
    if cli.json_output(settings.as_ref().ok()) {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    let client = match InspectorClient::from_config(&settings) {
        Ok(client) => client,
        Err(e) => fail(&e),
    };
    tracing::info!("Talking to {}", client.base_url());

    match commands::execute(&client, &cli.command).await {
        Ok(result) => println!("{}", commands::render(&cli.command, result, settings.json)),
        Err(e) => fail(&e),
    }
}

fn fail(e: &InspectorError) -> ! {
    tracing::debug!("Command failed: {:?}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}
