//! `rawtext-import` — parse raw component text (stdin) into a document
//! snapshot (stdout).
//!
//! Usage:
//!   rawtext-import < component.txt

use std::io::{self, Read};

use rawtext::{import_document, IdMinter};

fn main() {
    env_logger::init();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let mut minter = IdMinter::new();
    match import_document(&buf, &mut minter) {
        Ok(import) => match serde_json::to_string_pretty(&import.document) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
