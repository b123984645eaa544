//! Netscape `cookies.txt` loader.
//!
//! Each cookie line has seven tab-separated fields:
//! `domain  include_subdomains  path  secure  expires  name  value`.
//! Lines starting with `#` are comments, except `#HttpOnly_` which
//! marks an HttpOnly cookie. Expired and session cookies are kept.

use std::path::Path;

use anyhow::{Context, bail};
use buzzer_client::Credential;

const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// Name and value of one cookie; the other fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

/// Reads a cookie file into the credential sent with every request.
pub fn load_credential(path: &Path) -> anyhow::Result<Credential> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading cookie file {}", path.display()))?;
    let cookies = parse(&content).with_context(|| format!("parsing {}", path.display()))?;
    let count = cookies.len();
    let credential = Credential::from_pairs(cookies.into_iter().map(|c| (c.name, c.value)));
    if credential.is_empty() {
        bail!("cookie file {} holds no cookies", path.display());
    }

    tracing::debug!(path = %path.display(), cookies = count, "cookies loaded");
    Ok(credential)
}

/// Parses the cookie lines of a Netscape cookie file, in file order.
pub fn parse(content: &str) -> anyhow::Result<Vec<Cookie>> {
    let mut cookies = Vec::new();

    for (number, raw) in content.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        let line = match line.strip_prefix(HTTP_ONLY_PREFIX) {
            Some(rest) => rest,
            None if line.trim_start().starts_with('#') => continue,
            None => line,
        };
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 7 {
            bail!(
                "line {}: expected 7 tab-separated fields, found {}",
                number + 1,
                fields.len()
            );
        }

        cookies.push(Cookie {
            name: fields[5].to_string(),
            value: fields[6].to_string(),
        });
    }

    Ok(cookies)
}
