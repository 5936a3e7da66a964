//! `patchdoc-resolve`: look up a pointer in a document.
//!
//! Usage:
//!   patchdoc-resolve '<pointer>'
//!
//! The document is read from stdin. The pointer is the first argument;
//! `/` prints the whole document.

use patchdoc::cli::lookup_pointer;
use std::io::{self, Read, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let pointer = match args.get(1) {
        Some(p) => p.clone(),
        None => {
            eprintln!("First argument must be a pointer.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match lookup_pointer(buf.trim(), &pointer) {
        Ok(result) => {
            io::stdout().write_all(result.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
