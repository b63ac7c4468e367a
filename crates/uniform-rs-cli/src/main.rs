use std::process::ExitCode;

use uniform_rs_core::ErrorKind;

fn main() -> ExitCode {
    let mut stdout = std::io::stdout().lock();
    match uniform_rs_cli::run(std::env::args_os(), &mut stdout) {
        Err(e) => {
            let _ = e.print();
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2))
        }
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) if e.kind() == ErrorKind::ValidationFailure => ExitCode::from(1),
        Ok(Err(e)) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
