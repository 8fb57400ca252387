//! Marker-based extraction from the delivered UI documents.
//!
//! The literals below are the contract with the monitored UI build: the main
//! page links the bundled script as `src="/static/js/main.<hash>"></script>`
//! and the bundle assigns both bridge addresses as `this.<NAME>="<value>"`.

use std::fmt;

/// Opening marker of the script link on the main page.
pub const SCRIPT_LINK_START: &str = "src=\"/static/js/main.";

/// Closing marker of the script link on the main page.
pub const SCRIPT_LINK_END: &str = "\"></script>";

/// Path prefix appended to the base URL to fetch the bundle.
pub const SCRIPT_PATH_PREFIX: &str = "/static/js/main.";

/// Which bridge address a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeAddress {
    /// `HOME_BRIDGE_ADDRESS`
    Home,
    /// `FOREIGN_BRIDGE_ADDRESS`
    Foreign,
}

impl BridgeAddress {
    /// Name of the assignment inside the bundle.
    pub fn assignment_name(&self) -> &'static str {
        match self {
            BridgeAddress::Home => "HOME_BRIDGE_ADDRESS",
            BridgeAddress::Foreign => "FOREIGN_BRIDGE_ADDRESS",
        }
    }
}

impl fmt::Display for BridgeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.assignment_name())
    }
}

/// Text after the first `marker`, up to the next `marker` if there is one.
fn segment_after<'a>(haystack: &'a str, marker: &str) -> Option<&'a str> {
    let start = haystack.find(marker)? + marker.len();
    let rest = &haystack[start..];
    Some(rest.find(marker).map_or(rest, |end| &rest[..end]))
}

/// Extract the script-version hash from the main page.
///
/// Returns `None` when either marker is missing.
pub fn extract_script_hash(page: &str) -> Option<&str> {
    let segment = segment_after(page, SCRIPT_LINK_START)?;
    segment.find(SCRIPT_LINK_END).map(|end| &segment[..end])
}

/// Build the bundle URL. The base URL is used verbatim.
pub fn script_url(base_url: &str, hash: &str) -> String {
    format!("{base_url}{SCRIPT_PATH_PREFIX}{hash}")
}

/// Extract the value assigned to `this.<NAME>="..."` in the bundle.
///
/// The value ends at the next `"`; without a closing quote the rest of the
/// segment is returned. `None` only when the assignment prefix is absent.
pub fn extract_assignment(script: &str, address: BridgeAddress) -> Option<&str> {
    let prefix = format!("this.{}=\"", address.assignment_name());
    let segment = segment_after(script, &prefix)?;
    Some(segment.find('"').map_or(segment, |end| &segment[..end]))
}

/// Case-insensitive address comparison.
pub fn addresses_match(expected: &str, actual: &str) -> bool {
    expected.to_lowercase() == actual.to_lowercase()
}
