use std::process::ExitCode;

fn main() -> ExitCode {
    match zosmf_files::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
