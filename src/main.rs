mod cli;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ProviderArgs, ResourceAction};
use terraform_provider_fakecloud::providers::{self, ProviderError, fakecloud};
use terraform_provider_fakecloud::{ProviderServer, Response, State};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // stdout carries state JSON only
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let provider =
        providers::get_provider(fakecloud::PROVIDER_TYPE_NAME, env!("CARGO_PKG_VERSION"))?;
    let mut server = ProviderServer::new(provider);

    match cli.command {
        Command::Schema => cli::print_json(&server.schema())?,
        Command::Resource { type_name, action } => {
            let input = if action.reads_stdin() {
                cli::read_stdin()?
            } else {
                serde_json::Value::Null
            };

            match action {
                ResourceAction::Create => {
                    configure(&mut server, &cli.provider).await?;
                    let response = server
                        .create_resource(&type_name, &State::from_value(input))
                        .await?;
                    print_state(response)?;
                }
                ResourceAction::Read => {
                    configure(&mut server, &cli.provider).await?;
                    let response = server
                        .read_resource(&type_name, &State::from_value(input))
                        .await?;
                    print_state(response)?;
                }
                ResourceAction::Update => {
                    let (prior_state, plan) = cli::split_update_input(input)?;
                    configure(&mut server, &cli.provider).await?;
                    let response = server
                        .update_resource(&type_name, &prior_state, &plan)
                        .await?;
                    print_state(response)?;
                }
                ResourceAction::Delete => {
                    configure(&mut server, &cli.provider).await?;
                    let response = server
                        .delete_resource(&type_name, &State::from_value(input))
                        .await?;
                    cli::report(&response.diagnostics);
                    response.into_result()?;
                    tracing::info!(resource = %type_name, "resource deleted");
                }
                ResourceAction::Import { id } => {
                    let response = server.import_resource(&type_name, &id)?;
                    print_state(response)?;
                }
            }
        }
        Command::DataSource { type_name } => {
            let input = cli::read_stdin()?;
            configure(&mut server, &cli.provider).await?;
            let response = server
                .read_data_source(&type_name, &State::from_value(input))
                .await?;
            print_state(response)?;
        }
    }

    Ok(())
}

async fn configure(server: &mut ProviderServer, args: &ProviderArgs) -> Result<()> {
    let diags = server.configure(&State::from_value(args.to_config())).await;
    cli::report(&diags);
    if diags.has_error() {
        return Err(ProviderError::Diagnostics(diags).into());
    }
    Ok(())
}

fn print_state(response: Response<State>) -> Result<()> {
    cli::report(&response.diagnostics);
    let state = response.into_result()?;
    cli::print_json(state.as_value())?;
    Ok(())
}
