fn main() {
    env_logger::init();

    if let Err(err) = dumpsplit::app::run() {
        eprintln!("Fatal error: {err:#}");
        std::process::exit(1);
    }
}
