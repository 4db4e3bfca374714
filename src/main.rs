use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = envelope::cli::Cli::parse();
    if let Err(e) = envelope::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
