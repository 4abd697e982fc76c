//! Command dispatch
//!
//! Query results go to the writer handed to [`execute_command_to`]; warnings and
//! errors go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::StoreService;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{OutputFormat, Settings};
use crate::domain::{Record, RecordId};

/// Run the parsed command against stdout.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command_to(cli, &mut out)
}

/// Run the parsed command, writing results to `out`.
///
/// A closed pipe on `out` (`treestore all big.json | head`) ends the command
/// successfully; any other write failure is [`CliError::Output`].
pub fn execute_command_to<W: Write>(cli: &Cli, out: &mut W) -> CliResult<()> {
    match dispatch(cli, out).and_then(|()| out.flush().map_err(CliError::from)) {
        Err(CliError::Output(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("output closed early: {}", e);
            Ok(())
        }
        result => result,
    }
}

fn dispatch<W: Write>(cli: &Cli, out: &mut W) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".into()));
    };

    if let Commands::Completion { shell } = command {
        return print_completions(*shell, out);
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        settings.format = format;
    }
    debug!("settings: {:?}", settings);

    match command {
        Commands::All { file } => cmd_all(&open_store(file, &settings)?, &settings, out),
        Commands::Item { id, file } => {
            cmd_item(&open_store(file, &settings)?, *id, &settings, out)
        }
        Commands::Children { id, file } => {
            cmd_children(&open_store(file, &settings)?, *id, &settings, out)
        }
        Commands::Parents { id, file } => {
            cmd_parents(&open_store(file, &settings)?, *id, &settings, out)
        }
        Commands::Roots { file } => cmd_roots(&open_store(file, &settings)?, &settings, out),
        Commands::Tree { file } => cmd_tree(&open_store(file, &settings)?, out),
        Commands::Completion { .. } => Ok(()),
    }
}

fn print_completions<W: Write>(shell: Shell, out: &mut W) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    // generate() panics on write errors, so buffer first
    let mut script = Vec::new();
    generate(shell, &mut cmd, name, &mut script);
    out.write_all(&script)?;
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn open_store(file: &Option<PathBuf>, settings: &Settings) -> CliResult<StoreService> {
    let path = file
        .clone()
        .or_else(|| settings.default_input.clone())
        .ok_or_else(|| {
            CliError::InvalidArgs("no FILE given and no default_input configured".into())
        })?;
    Ok(StoreService::open(&path, settings.schema())?)
}

fn cmd_all<W: Write>(store: &StoreService, settings: &Settings, out: &mut W) -> CliResult<()> {
    print_records(store, store.all().iter(), settings, out)
}

fn cmd_item<W: Write>(
    store: &StoreService,
    id: RecordId,
    settings: &Settings,
    out: &mut W,
) -> CliResult<()> {
    let record = store
        .item(id)
        .ok_or_else(|| CliError::NotFound(format!("no record with id {}", id)))?;
    match settings.format {
        OutputFormat::Text => writeln!(out, "{}", record)?,
        OutputFormat::Json => print_json(&record.to_json(store.schema()), settings.pretty, out)?,
    }
    Ok(())
}

fn cmd_children<W: Write>(
    store: &StoreService,
    id: RecordId,
    settings: &Settings,
    out: &mut W,
) -> CliResult<()> {
    warn_if_unknown(store, id);
    print_records(store, store.children(id), settings, out)
}

fn cmd_parents<W: Write>(
    store: &StoreService,
    id: RecordId,
    settings: &Settings,
    out: &mut W,
) -> CliResult<()> {
    warn_if_unknown(store, id);
    let parents = store.parents(id);
    match settings.format {
        OutputFormat::Text => {
            if store.item(id).is_some() {
                let chain = std::iter::once(id)
                    .chain(parents.iter().map(|record| record.id))
                    .join(" <- ");
                writeln!(out, "{}", chain)?;
            }
        }
        OutputFormat::Json => print_json(&store.to_json(parents), settings.pretty, out)?,
    }
    Ok(())
}

fn cmd_roots<W: Write>(store: &StoreService, settings: &Settings, out: &mut W) -> CliResult<()> {
    print_records(store, store.roots(), settings, out)
}

fn cmd_tree<W: Write>(store: &StoreService, out: &mut W) -> CliResult<()> {
    writeln!(out, "{}", store.tree())?;
    Ok(())
}

fn warn_if_unknown(store: &StoreService, id: RecordId) {
    if !store.index().contains(&id) {
        output::warning(&format!("no record with id {}", id));
    }
}

fn print_records<'a, W: Write>(
    store: &StoreService,
    records: impl IntoIterator<Item = &'a Record>,
    settings: &Settings,
    out: &mut W,
) -> CliResult<()> {
    match settings.format {
        OutputFormat::Text => {
            for record in records {
                writeln!(out, "{}", record)?;
            }
        }
        OutputFormat::Json => print_json(&store.to_json(records), settings.pretty, out)?,
    }
    Ok(())
}

fn print_json<W: Write>(value: &Value, pretty: bool, out: &mut W) -> io::Result<()> {
    if pretty {
        writeln!(out, "{:#}", value)
    } else {
        writeln!(out, "{}", value)
    }
}
