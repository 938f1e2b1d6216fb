use std::process::ExitCode;

fn main() -> ExitCode {
    typed_hash::start(std::env::args())
}
