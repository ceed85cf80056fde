use anyhow::Result;
use is_terminal::IsTerminal;
use listkit::commands::{run, Status};
use listkit::style::StyleSheet;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> Result<ExitCode> {
    let args = listkit::args::parsed();

    let _ = SubscriberBuilder::default()
        .with_max_level(args.log_level())
        .with_writer(io::stderr)
        .try_init();
    tracing::debug!(command = ?args.command, "parsed command line");

    let sheet = StyleSheet::for_choice(args.color);
    let mut err = io::stderr().lock();
    let status = if io::stdout().is_terminal() {
        run(&args.command, &sheet, &mut io::stdout().lock(), &mut err)?
    } else {
        run(&args.command, &sheet, &mut io::BufWriter::new(io::stdout().lock()), &mut err)?
    };

    Ok(match status {
        Status::Success => ExitCode::SUCCESS,
        Status::InputError => ExitCode::FAILURE,
    })
}
