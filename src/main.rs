use std::process::ExitCode;

use hsh::shell::Shell;

fn main() -> ExitCode {
    hsh::logging::init();

    match Shell::from_env() {
        Ok(mut shell) => shell.run().into(),
        Err(e) => {
            eprintln!("hsh: {}", e);
            ExitCode::FAILURE
        }
    }
}
