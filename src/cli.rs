mod args;

pub use args::{Cli, Command, ProviderArgs, ResourceAction};

use std::io::Read;

use terraform_provider_fakecloud::{Diagnostics, PluginError, State};

pub fn read_stdin() -> Result<serde_json::Value, PluginError> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    parse_input(&buf)
}

/// Empty input stands for a null object.
pub fn parse_input(input: &str) -> Result<serde_json::Value, PluginError> {
    if input.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_str(input)?)
}

/// Splits update input into `(prior_state, plan)`.
pub fn split_update_input(input: serde_json::Value) -> Result<(State, State), PluginError> {
    let usage = || {
        PluginError::Config(
            "update expects {\"prior_state\": {...}, \"plan\": {...}} on stdin".to_string(),
        )
    };

    let serde_json::Value::Object(mut object) = input else {
        return Err(usage());
    };
    let prior_state = object.remove("prior_state").ok_or_else(usage)?;
    let plan = object.remove("plan").ok_or_else(usage)?;

    Ok((State::from_value(prior_state), State::from_value(plan)))
}

pub fn report(diags: &Diagnostics) {
    for diag in diags {
        eprintln!("{}\n", diag);
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), PluginError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
