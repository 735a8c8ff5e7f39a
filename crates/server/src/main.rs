use shoestore_core::start;

#[tokio::main]
async fn main() {
    if let Err(e) = start().await {
        eprintln!("shoestore failed to start: {}", e);
        std::process::exit(1);
    }
}
