use std::process::ExitCode;

fn main() -> ExitCode {
    // `RUST_LOG=gwcatalog=debug` shows sampler and quadrature diagnostics.
    let _ = pretty_env_logger::try_init();

    match gwcatalog::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
