//! `rawtext-export` — package a document snapshot (stdin) into a command
//! string (stdout).
//!
//! Usage:
//!   rawtext-export [--kind nbt|tellraw|title|sign|book] < document.json
//!
//! Annotation events live in the editor session, not in the snapshot, so
//! spans export without their click/hover actions here.

use std::io::{self, Read};

use rawtext::{
    compose_command, CommandKind, CommandTemplates, Document, EventCache, Selection,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let mut kind_arg = "tellraw".to_string();
    let mut i = 1;
    while i < args.len() {
        if args[i].as_str() == "--kind" {
            i += 1;
            if let Some(k) = args.get(i) {
                kind_arg = k.clone();
            }
        }
        i += 1;
    }

    let Some(kind) = CommandKind::from_str(&kind_arg) else {
        eprintln!("Unknown kind: {kind_arg}");
        std::process::exit(1);
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let document: Document = match serde_json::from_str(&buf) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let selection = Selection::over(&document);
    match compose_command(
        &selection,
        kind,
        &EventCache::new(),
        &CommandTemplates::default(),
    ) {
        Ok(command) => println!("{command}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
