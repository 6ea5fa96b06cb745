use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shopping-cart")]
#[command(about = "A single-screen shopping cart with a running total")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive cart session
    Session {
        /// Print the final cart as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Format raw price keystrokes as a currency display string
    Format {
        /// Raw input, its digits are read as cents
        input: String,
    },
    /// Parse a currency display string into an amount
    Parse {
        /// Display text such as "R$ 1.234,56"
        input: String,
    },
}
