mod shell;

fn main() {
    if let Err(err) = shell::run_app() {
        eprintln!("vidpull: {err}");
        std::process::exit(1);
    }
}
