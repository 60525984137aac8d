fn main() {
    if let Err(err) = jotboard::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
