mod cli;
mod settings;
mod workflow;

use std::time::Duration;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use frontpage::{app_dirs, logging};
use workflow::ReaderWorkflow;

const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let cli = parse_cli();

    if cli.list_themes {
        for name in frontpage::ui::theme::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    match app_dirs::log_file() {
        Ok(path) => logging::initialize(&path, &resolved.log_level)?,
        Err(err) => eprintln!("logging disabled: {err:#}"),
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("frontpage-worker")
        .build()?;

    let workflow = ReaderWorkflow::from_config(resolved)?;
    let result = if cli.once {
        print_first_page(&workflow, &runtime, cli.output)
    } else {
        workflow.run(&runtime)
    };

    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

/// Print one page of stories in the chosen format.
fn print_first_page(
    workflow: &ReaderWorkflow,
    runtime: &tokio::runtime::Runtime,
    format: OutputFormat,
) -> Result<()> {
    let stories = workflow.first_page(runtime)?;
    match format {
        OutputFormat::Plain => print_plain(workflow.section(), &stories),
        OutputFormat::Json => print_json(workflow.section(), &stories)?,
    }
    Ok(())
}
