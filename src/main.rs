fn main() {
    if let Err(err) = pixel_picker_lib::run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
