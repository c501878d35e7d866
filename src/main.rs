fn main() {
    if let Err(e) = field_viewer::app::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
