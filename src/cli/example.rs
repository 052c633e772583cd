use clap::Parser;
use fennec_maintenance::{prelude::*, request::Request};

#[derive(Parser)]
pub struct ExampleArgs {
    /// Print the example as TOML instead of JSON.
    #[clap(long)]
    toml: bool,
}

impl ExampleArgs {
    pub fn run(&self) -> Result {
        let request = Request::example();
        let text = if self.toml {
            toml::to_string_pretty(&request)?
        } else {
            serde_json::to_string_pretty(&request)?
        };
        println!("{text}");
        Ok(())
    }
}
