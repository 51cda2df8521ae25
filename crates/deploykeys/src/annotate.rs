//! GitHub Actions workflow commands

pub const GITHUB_ACTIONS_ENV: &str = "GITHUB_ACTIONS";

/// Whether we run inside a GitHub Actions job
pub fn in_github_actions() -> bool {
    std::env::var(GITHUB_ACTIONS_ENV).is_ok_and(|v| v == "true")
}

/// `::error::` workflow command for `message`
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Escape command data the way the Actions runner expects
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_command() {
        assert_eq!(
            error_command("The parameter \"keys\" is empty"),
            "::error::The parameter \"keys\" is empty"
        );
    }

    #[test]
    fn test_escapes_multiline_content() {
        assert_eq!(
            error_command("/s/fake0.github.com: illegal comment: ssh-rsa AAAA\r\n"),
            "::error::/s/fake0.github.com: illegal comment: ssh-rsa AAAA%0D%0A"
        );
    }

    #[test]
    fn test_escapes_percent_first() {
        assert_eq!(error_command("100%\n"), "::error::100%25%0A");
    }
}
