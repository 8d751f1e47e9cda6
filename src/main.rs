fn main() {
    if let Err(e) = voice_remote_lib::run() {
        eprintln!("voice-remote: {e}");
        std::process::exit(1);
    }
}
