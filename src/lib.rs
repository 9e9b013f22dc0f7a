//! terraform-provider-fakecloud
//!
//! A Terraform provider managing virtual machines on the fakecloud mock API.

pub mod providers;
pub mod server;
pub mod terraform;

mod error;

pub use error::PluginError;
pub use providers::fakecloud::{
    FakecloudApi, FakecloudClient, FakecloudError, FakecloudProvider, VirtualMachine,
};
pub use providers::{DataSource, Provider, ProviderError, Resource};
pub use server::{ProviderServer, Response};
pub use terraform::{Diagnostics, State, Value};
