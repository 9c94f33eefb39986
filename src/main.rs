mod args;

use args::{Cli, Commands};
use blockmode::{Key, Mode, ModeDriver};
use clap::Parser;

use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("--iv is not valid with --mode ecb")]
    IvInvalidMode,

    #[error("invalid --iv hex: {0}")]
    IvInvalidHex(#[from] hex::FromHexError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Cipher(#[from] blockmode::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match blockmode_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn blockmode_cli() -> Result<(), CliError> {
    let args = Cli::parse();

    match args.command {
        Commands::Encrypt(enc) => {
            let common = enc.common; // move ownership
            let mode: Mode = common.mode.into();

            // read plaintext from input path
            let plaintext = fs::read(&common.input)?;

            // read or generate key
            let key = if enc.gen_key {
                let key = Key::random(enc.key_size.into())?;
                fs::write(&common.key, key.as_bytes())?;
                info!(path = %common.key.display(), "wrote generated key");
                key
            } else {
                Key::try_from_slice(&fs::read(&common.key)?)?
            };

            let iv = match enc.iv {
                Some(_) if !mode.requires_iv() => return Err(CliError::IvInvalidMode),
                Some(iv_hex) => Some(parse_hex(&iv_hex)?),
                None => None,
            };

            let driver = ModeDriver::from_key(&key);
            let start = Instant::now();

            let ciphertext = match iv {
                Some(iv) => {
                    let mut out = iv.clone();
                    out.append(&mut driver.encrypt(mode, Some(iv.as_slice()), &plaintext)?);
                    out
                }
                None => driver.seal(mode, &plaintext)?,
            };

            let duration = start.elapsed();
            debug!(%mode, bytes = ciphertext.len(), "writing ciphertext");

            fs::write(&common.output, &ciphertext)?;
            println!(
                "Encrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
        Commands::Decrypt(dec) => {
            let common = dec.common;
            let mode: Mode = common.mode.into();

            // read inputs
            let sealed = fs::read(&common.input)?;
            let key = Key::try_from_slice(&fs::read(&common.key)?)?;

            let driver = ModeDriver::from_key(&key);
            let start = Instant::now();

            let plaintext = driver.open(mode, &sealed)?;

            let duration = start.elapsed();
            debug!(%mode, bytes = plaintext.len(), "writing plaintext");

            fs::write(&common.output, &plaintext)?;
            println!(
                "Decrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
    }
}

fn parse_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(s.trim_start_matches("0x"))
}
