use std::io;

fn main() {
    meltdown_cli::logging::init_logging();
    let mut out = io::stdout();
    let mut err = io::stderr();
    let code = meltdown_cli::run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
