//! Rendering of `known_hosts` and SSH client config

use std::path::Path;

use crate::config::{GITHUB_HOST, GITHUB_RSA_HOST_KEY};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Lines per `Host` stanza, including the blank separator
pub const STANZA_LINES: usize = 5;

/// The pinned GitHub host key line, terminated
#[must_use]
pub fn known_hosts_record() -> String {
    format!("{GITHUB_HOST} ssh-rsa {GITHUB_RSA_HOST_KEY}{LINE_ENDING}")
}

/// `Host` stanza routing `alias` to GitHub with `key_file` as the only identity
#[must_use]
pub fn stanza(alias: &str, key_file: &Path) -> [String; STANZA_LINES] {
    [
        format!("Host {alias}"),
        format!("  HostName {GITHUB_HOST}"),
        format!("  IdentityFile {}", key_file.display()),
        "  IdentitiesOnly yes".to_string(),
        String::new(),
    ]
}

/// Join stanza lines into the config file body
#[must_use]
pub fn render(lines: &[String]) -> String {
    lines.join(LINE_ENDING)
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn test_known_hosts_record() {
        let record = known_hosts_record();
        assert!(record.starts_with("github.com ssh-rsa AAAAB3NzaC1yc2E"));
        assert!(record.ends_with("=\n"));
        assert_eq!(record.lines().count(), 1);
    }

    #[test]
    fn test_single_stanza() {
        let lines = stanza("fake0.github.com", Path::new("/home/u/.ssh/fake0.github.com"));
        assert_eq!(
            render(&lines),
            "Host fake0.github.com\n  HostName github.com\n  IdentityFile /home/u/.ssh/fake0.github.com\n  IdentitiesOnly yes\n"
        );
    }

    #[test]
    fn test_stanzas_separated_by_blank_line() {
        let mut lines = Vec::new();
        lines.extend(stanza("fake0.github.com", Path::new("/s/fake0.github.com")));
        lines.extend(stanza("fake1.github.com", Path::new("/s/fake1.github.com")));

        let body = render(&lines);
        assert!(body.contains("IdentitiesOnly yes\n\nHost fake1.github.com\n"));
        assert_eq!(body.matches("Host ").count(), 2);
        assert!(body.ends_with("IdentitiesOnly yes\n"));
    }
}
