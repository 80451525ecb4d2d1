use dumbc_drv::{exit_code, exit_code_for, run};

fn main() {
    let args = std::env::args().skip(1);
    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(exit_code_for(&e));
    }
    std::process::exit(exit_code::SUCCESS);
}
