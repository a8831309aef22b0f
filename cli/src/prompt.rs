//! Credential prompt

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

use postfach_core::Credentials;

pub fn credentials() -> Result<Credentials> {
    let stdin = io::stdin();
    let username = read_username(&mut stdin.lock(), &mut io::stdout())?;

    let password =
        rpassword::prompt_password("DKB Password: ").context("Failed to read password")?;

    Ok(Credentials::new(username, password))
}

fn read_username(input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    write!(output, "DKB User: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read user name")? == 0 {
        bail!("No user name given");
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
