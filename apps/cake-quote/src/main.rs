//! # Cake Quote Entry Point
//!
//! The actual setup is in lib.rs so integration tests can drive it.

fn main() -> anyhow::Result<()> {
    cake_quote::run()
}
