// src/bin/test_all_key_variations.rs
//! Forensic recovery: try every known passphrase→key variant on one ciphertext

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use field_rekey::aliases::KeySecret;
use field_rekey::diagnose::{brute_force_variants, probe_variants, VariantOutcome};
use rpassword::prompt_password;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

#[derive(Parser, Debug)]
#[command(name = "test-all-key-variations", version)]
#[command(about = "Try every historical key-derivation variant of a passphrase against one field")]
struct Args {
    /// Stored field value, `hex(iv):hex(ciphertext)`
    #[arg(long)]
    ciphertext: String,

    /// Candidate passphrase; prompted for when omitted
    #[arg(long, env = "CANDIDATE_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Report every variant instead of stopping at the first match
    #[arg(long)]
    all: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let ciphertext = args.ciphertext.trim();

    let secret: KeySecret = Zeroizing::new(match args.secret {
        Some(secret) => secret,
        None => prompt_password("Candidate passphrase: ").context("Failed to read passphrase")?,
    });

    if args.all {
        let probes =
            probe_variants(ciphertext, &secret).context("Field is not iv:ciphertext hex")?;
        for probe in &probes {
            println!("{probe}");
        }
        let matched = probes
            .iter()
            .filter(|p| matches!(p.outcome, VariantOutcome::Matched { .. }))
            .count();
        println!("\n{matched} variant(s) matched");
        return Ok(if matched > 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    match brute_force_variants(ciphertext, &secret).context("Field is not iv:ciphertext hex")? {
        Some(found) => {
            println!("MATCH: {}", found.variant);
            println!("key (hex): {}", found.key.to_hex());
            println!("plaintext length: {} bytes", found.plaintext.len());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("No variant of this passphrase decrypts the field");
            Ok(ExitCode::FAILURE)
        }
    }
}
