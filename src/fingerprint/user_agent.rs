//! User-agent string parsing.
//!
//! Covers the engines that make up nearly all real traffic. Anything not
//! recognised falls back to the first non-`Mozilla` product token, so an
//! unusual UA still yields a name/version pair instead of nothing.

use super::result::{UserAgentSummary, UNKNOWN};

/// Browser, OS, device and CPU details extracted from a user-agent string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAgentInfo {
    pub browser_name: Option<String>,
    pub browser_version: Option<String>,
    pub os_name: Option<String>,
    pub os_version: Option<String>,
    pub device_type: Option<String>,
    pub cpu_architecture: Option<String>,
}

/// (marker, reported name). Order matters: Chromium derivatives also carry
/// a `Chrome/` token, so they must be matched first.
const BROWSER_MARKERS: &[(&str, &str)] = &[
    ("Edg/", "Edge"),
    ("Edge/", "Edge"),
    ("OPR/", "Opera"),
    ("SamsungBrowser/", "Samsung Internet"),
    ("FxiOS/", "Firefox"),
    ("Firefox/", "Firefox"),
    ("CriOS/", "Chrome"),
    ("Chrome/", "Chrome"),
];

impl UserAgentInfo {
    pub fn parse(ua: &str) -> Self {
        let (browser_name, browser_version) = match parse_browser(ua) {
            Some((name, version)) => (Some(name), version),
            None => (None, None),
        };
        let (os_name, os_version) = match parse_os(ua) {
            Some((name, version)) => (Some(name), version),
            None => (None, None),
        };

        Self {
            browser_name,
            browser_version,
            os_name,
            os_version,
            device_type: parse_device(ua).map(str::to_string),
            cpu_architecture: parse_architecture(ua).map(str::to_string),
        }
    }

    /// The record exposed in the result, with sentinels for unknown fields.
    pub fn summary(&self) -> UserAgentSummary {
        UserAgentSummary {
            browser: self.browser_name.clone().unwrap_or_else(|| UNKNOWN.into()),
            version: self
                .browser_version
                .clone()
                .unwrap_or_else(|| UNKNOWN.into()),
            os: self.os_name.clone().unwrap_or_else(|| UNKNOWN.into()),
            device: self
                .device_type
                .clone()
                .unwrap_or_else(|| "desktop".into()),
        }
    }

    pub fn architecture(&self) -> String {
        self.cpu_architecture
            .clone()
            .unwrap_or_else(|| "unknown".into())
    }

    /// Browser name and version concatenated; empty when neither is known.
    pub fn browser_key(&self) -> String {
        join_parts(&self.browser_name, &self.browser_version)
    }

    /// OS name and version concatenated; empty when neither is known.
    pub fn os_key(&self) -> String {
        join_parts(&self.os_name, &self.os_version)
    }
}

fn join_parts(a: &Option<String>, b: &Option<String>) -> String {
    let mut out = String::new();
    out.push_str(a.as_deref().unwrap_or_default());
    out.push_str(b.as_deref().unwrap_or_default());
    out
}

/// Text following `marker` up to the next separator, if non-empty.
fn token_after<'a>(ua: &'a str, marker: &str) -> Option<&'a str> {
    let start = ua.find(marker)? + marker.len();
    let rest = &ua[start..];
    let end = rest
        .find(|c: char| c.is_whitespace() || c == ';' || c == ')')
        .unwrap_or(rest.len());
    let token = &rest[..end];
    (!token.is_empty()).then_some(token)
}

fn parse_browser(ua: &str) -> Option<(String, Option<String>)> {
    for (marker, name) in BROWSER_MARKERS {
        if ua.contains(marker) {
            return Some((name.to_string(), token_after(ua, marker).map(str::to_string)));
        }
    }

    if ua.contains("Safari/") {
        let version = token_after(ua, "Version/").map(str::to_string);
        let name = if ua.contains("Mobile/") {
            "Mobile Safari"
        } else {
            "Safari"
        };
        return Some((name.to_string(), version));
    }

    // First product token that is not the legacy `Mozilla/5.0` prefix.
    ua.split_whitespace().find_map(|token| {
        let (name, version) = token.split_once('/')?;
        let starts_alpha = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_alpha || name == "Mozilla" {
            return None;
        }
        let version = version.trim_end_matches([';', ')', ',']);
        Some((
            name.to_string(),
            (!version.is_empty()).then(|| version.to_string()),
        ))
    })
}

fn parse_os(ua: &str) -> Option<(String, Option<String>)> {
    if let Some(nt) = token_after(ua, "Windows NT ") {
        return Some(("Windows".into(), Some(windows_release(nt).to_string())));
    }
    if ua.contains("Windows") {
        return Some(("Windows".into(), None));
    }

    // iOS before Mac OS: iPad and iPhone UAs say "like Mac OS X".
    for marker in ["iPhone OS ", "CPU OS "] {
        if let Some(v) = token_after(ua, marker) {
            return Some(("iOS".into(), Some(v.replace('_', "."))));
        }
    }
    if ua.contains("iPhone") || ua.contains("iPad") {
        return Some(("iOS".into(), None));
    }

    if ua.contains("Android") {
        return Some((
            "Android".into(),
            token_after(ua, "Android ").map(str::to_string),
        ));
    }
    if ua.contains("CrOS") {
        return Some(("Chrome OS".into(), None));
    }
    if ua.contains("Mac OS X") {
        return Some((
            "Mac OS".into(),
            token_after(ua, "Mac OS X ").map(|v| v.replace('_', ".")),
        ));
    }
    if ua.contains("Linux") {
        return Some(("Linux".into(), None));
    }
    None
}

fn windows_release(nt: &str) -> &str {
    match nt {
        "10.0" => "10",
        "6.3" => "8.1",
        "6.2" => "8",
        "6.1" => "7",
        "6.0" => "Vista",
        "5.1" | "5.2" => "XP",
        other => other,
    }
}

fn parse_device(ua: &str) -> Option<&'static str> {
    if ua.contains("iPad") || ua.contains("Tablet") {
        return Some("tablet");
    }
    if ua.contains("Mobi") || ua.contains("iPhone") {
        return Some("mobile");
    }
    if ua.contains("Android") {
        // Android without "Mobile" is the tablet convention.
        return Some("tablet");
    }
    None
}

fn parse_architecture(ua: &str) -> Option<&'static str> {
    const TABLE: &[(&[&str], &str)] = &[
        (&["x86_64", "x64", "Win64", "WOW64", "amd64"], "amd64"),
        (&["aarch64", "arm64"], "arm64"),
        (&["armv7", "armv8l", "armv6"], "arm"),
        (&["i686", "i386", "x86"], "ia32"),
    ];
    TABLE
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| ua.contains(n)))
        .map(|(_, arch)| *arch)
}
