pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod datetime;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use roster_shared::CalendarRenderer;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting roster CLI"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.rosterrc.as_deref()
  )?;
  cfg.apply_overrides(
    pre.rc_overrides.into_iter().chain(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
  );

  let schedule =
    config::resolve_schedule(
      &cfg,
      cli.schedule.as_deref()
    )
    .context(
      "failed to load schedule"
    )?;

  let data_file = cli
    .data
    .or_else(|| cfg.get_path("data.file"));
  let mut calendar = match data_file {
    | Some(path) => {
      let entries =
        datastore::RosterFile::new(&path)
          .load()
          .with_context(|| {
            format!(
              "failed to load roster \
               data from {}",
              path.display()
            )
          })?;
      CalendarRenderer::with_entries(
        schedule, entries
      )
    }
    | None => {
      CalendarRenderer::new(schedule)
    }
  };

  let mut renderer =
    render::Renderer::new(&cfg)?;

  commands::dispatch(
    &mut calendar,
    &cfg,
    &mut renderer,
    cli.command.unwrap_or_default()
  )?;

  info!("done");
  Ok(())
}
