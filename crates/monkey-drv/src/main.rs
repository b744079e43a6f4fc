fn main() {
    if let Err(e) = monkey_drv::main() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
