use super::ParcelnetOperation;
use clap::Parser;

/// command line tool that assigns parcels their census block and nearest network node
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct ParcelnetApp {
    #[command(subcommand)]
    pub op: ParcelnetOperation,
}
