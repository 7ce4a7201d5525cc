//! assigns parcels their census block and nearest transportation network node.
//! set RUST_LOG=info to see progress messages.
use clap::Parser;
use parcelnet::app::ParcelnetApp;

fn main() {
    env_logger::init();
    let args = ParcelnetApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
