use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;

use dns::NameQuery;
use dns_client::Client;
use tracing_subscriber::EnvFilter;

use crate::cli_args::CliArgs;

mod cli_args;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args: CliArgs = argh::from_env();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: CliArgs) -> Result<(), Box<dyn Error>> {
    let config = configuration::get_config(&args.config)?;
    tracing::debug!("configuration: {:?}", config);

    let server_addr = args.server.unwrap_or(config.dns.server_address);
    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.dns.timeout());

    let name_query = NameQuery::new(&args.domain, args.query_type);
    println!(
        "Querying {} for {} {}",
        server_addr, name_query.name, name_query.q_type
    );

    let client = Client::new(server_addr, timeout);
    let response = client.resolve(args.id, &name_query).await?;

    if args.raw {
        println!("{:#?}", response);
    } else {
        println!("{}", output::render(&response));
    }

    Ok(())
}
