mod example;
mod plan;

use clap::{Parser, Subcommand};

pub use self::{example::ExampleArgs, plan::PlanArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: read the request, find the cheapest schedule, and report it.
    #[clap(name = "plan")]
    Plan(Box<PlanArgs>),

    /// Print an example request.
    #[clap(name = "example")]
    Example(ExampleArgs),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_plan_ok() {
        let args =
            Args::try_parse_from(["fennec-maintenance", "plan", "--request", "request.toml"]).unwrap();
        let Command::Plan(args) = args.command else {
            panic!("expected the plan command");
        };
        assert_eq!(args.slot_duration(), std::time::Duration::from_secs(3600));
    }
}
