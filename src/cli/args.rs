use clap::{Parser, Subcommand};

/// Drive the fakecloud provider's handlers without Terraform core.
///
/// Provider settings left unset here fall back to FAKECLOUD_HOST,
/// FAKECLOUD_USERNAME and FAKECLOUD_PASSWORD, exactly as in a provider block.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub provider: ProviderArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug, Default)]
pub struct ProviderArgs {
    /// Fakecloud API endpoint, e.g. http://localhost:8080
    #[arg(long, global = true)]
    pub host: Option<String>,

    #[arg(long, global = true)]
    pub username: Option<String>,

    #[arg(long, global = true)]
    pub password: Option<String>,
}

impl ProviderArgs {
    /// Provider configuration object; flags not given stay null.
    pub fn to_config(&self) -> serde_json::Value {
        serde_json::json!({
            "host": self.host,
            "username": self.username,
            "password": self.password,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every provider, resource and data source schema as JSON
    Schema,
    /// Run a resource handler; state JSON is read from stdin
    Resource {
        /// Terraform type name, e.g. fakecloud_virtual_machine
        type_name: String,
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Read a data source; configuration JSON is read from stdin
    DataSource {
        /// Terraform type name, e.g. fakecloud_virtual_machines
        type_name: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ResourceAction {
    /// stdin: planned state
    Create,
    /// stdin: prior state
    Read,
    /// stdin: {"prior_state": {...}, "plan": {...}}
    Update,
    /// stdin: prior state
    Delete,
    Import { id: String },
}

impl ResourceAction {
    pub fn reads_stdin(&self) -> bool {
        !matches!(self, ResourceAction::Import { .. })
    }
}
