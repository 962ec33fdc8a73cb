//! habitlogger main entrypoint.

use habitlogger::run;

fn main() {
    println!();
    if run().is_err() {
        std::process::exit(1);
    }
}
