use std::{fs, path::PathBuf, time::Duration};

use clap::Parser;
use fennec_maintenance::{
    core::{instance::DEFAULT_MAX_EVENTS, solver::Solver},
    error::Error as SolverError,
    prelude::*,
    report::Report,
    request::Request,
    tables::{build_events_table, build_timeline_table},
};

#[derive(Parser)]
pub struct PlanArgs {
    /// Request file: TOML if the extension is `.toml`, JSON otherwise.
    #[clap(long = "request", env = "REQUEST_PATH")]
    request_path: PathBuf,

    /// Duration of a single time slot.
    #[clap(long = "slot-duration", env = "SLOT_DURATION", default_value = "1h")]
    slot_duration: humantime::Duration,

    /// Maximum number of events to accept. Memory usage doubles with each event.
    #[clap(long = "max-events", env = "MAX_EVENTS", default_value_t = DEFAULT_MAX_EVENTS)]
    max_events: usize,

    /// Write the JSON report to the file.
    #[clap(long = "report", env = "REPORT_PATH")]
    report_path: Option<PathBuf>,

    /// Print the JSON report instead of the tables.
    #[clap(long)]
    json: bool,

    /// Also print the per-slot timeline.
    #[clap(long)]
    timeline: bool,
}

impl PlanArgs {
    pub fn slot_duration(&self) -> Duration {
        self.slot_duration.into()
    }

    #[instrument(skip_all, fields(request_path = ?self.request_path))]
    pub fn run(&self) -> Result {
        let text = fs::read_to_string(&self.request_path)
            .with_context(|| format!("failed to read `{}`", self.request_path.display()))?;
        let request = Request::from_str_with_path(&text, &self.request_path)?;
        info!(
            n_slots = request.electricity_prices.len(),
            n_events = request.maintenance_durations.len(),
            "loaded the request",
        );

        let instance = request.to_instance(self.max_events);
        let outcome = match &instance {
            Ok(instance) => Solver::builder().instance(instance).solve(),
            Err(error) => Err(SolverError::from(error.clone())),
        };

        if let (Ok(instance), Ok(schedule)) = (&instance, &outcome)
            && !self.json
        {
            println!("{}", build_events_table(schedule));
            if self.timeline {
                println!("{}", build_timeline_table(instance, schedule));
            }
        }

        let report = Report::try_from_outcome(outcome, self.slot_duration())
            .context("internal solver defect")?;
        match &report {
            Report::Success { results } => info!(%results.total_cost, "planned"),
            Report::Invalid { error } => warn!(%error, "invalid request"),
            Report::Infeasible { error } => warn!(%error, "no schedule exists"),
        }

        let json = serde_json::to_string_pretty(&report)?;
        if self.json {
            println!("{json}");
        }
        if let Some(report_path) = &self.report_path {
            fs::write(report_path, &json)
                .with_context(|| format!("failed to write `{}`", report_path.display()))?;
            info!(?report_path, "saved the report");
        }

        ensure!(report.is_success(), "no schedule has been planned");
        Ok(())
    }
}
