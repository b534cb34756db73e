mod platform;

use std::process::ExitCode;

fn main() -> ExitCode {
    match platform::run_app() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vacancy_app: {err}");
            ExitCode::FAILURE
        }
    }
}
