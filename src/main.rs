fn main() {
    if let Err(err) = glucoweek_lib::run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
