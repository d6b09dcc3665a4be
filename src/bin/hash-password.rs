//! Print a bcrypt hash for the admin password, ready for `.env`.

use bcrypt::{hash, DEFAULT_COST};
use std::env;

fn main() {
    let password = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --bin hash-password <ADMIN_PASSWORD>");
        std::process::exit(1);
    });

    if password.trim().is_empty() {
        eprintln!("The admin password must not be blank");
        std::process::exit(1);
    }

    match hash(&password, DEFAULT_COST) {
        Ok(hashed) => {
            println!("\nCost     : {}", DEFAULT_COST);
            println!("Hash     : {}\n", hashed);
            println!("# Paste this into your .env (single quotes keep the '$' intact):");
            println!("ADMIN_PASSWORD_HASH='{}'", hashed);
        }
        Err(e) => {
            eprintln!("Error hashing password: {}", e);
            std::process::exit(1);
        }
    }
}
