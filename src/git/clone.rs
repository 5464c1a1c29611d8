//! Shallow cloning of remote repositories into a scratch directory.

use camino::Utf8Path;
use tokio::process::Command;
use url::Url;

const LOG_TARGET: &str = "       git";
const GITHUB_HOST: &str = "github.com";

/// Clone `url` into `dest` with depth 1.
///
/// When a token is supplied and the URL is an HTTPS GitHub URL, the token is
/// embedded as URL credentials for the clone itself; log output only ever
/// shows the credential-free URL. Returns `false` on failure, which the
/// caller treats as "skip this repository".
pub async fn clone_repository(url: &Url, dest: &Utf8Path, token: Option<&str>) -> bool {
    let fetch_url = authenticated_url(url, token);

    log::debug!(target: LOG_TARGET, "Running: git clone --depth 1 {url} {dest}");

    let result = Command::new("git")
        .arg("clone")
        .arg("--depth")
        .arg("1")
        .arg(fetch_url.as_str())
        .arg(dest.as_str())
        .output()
        .await;

    match result {
        Ok(output) if output.status.success() => true,
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::error!(target: LOG_TARGET, "Failed to clone {url}: {}", stderr.trim());
            false
        }
        Err(e) => {
            log::error!(target: LOG_TARGET, "Failed to clone {url}: {e}");
            false
        }
    }
}

/// Name of the checkout directory for a clone URL: the last path segment with
/// any `.git` suffix removed.
#[must_use]
pub fn repo_name_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .map(|segment| segment.trim_end_matches(".git"))
        .filter(|name| !name.is_empty())
        .unwrap_or("repository")
        .to_owned()
}

fn authenticated_url(url: &Url, token: Option<&str>) -> Url {
    let Some(token) = token else {
        return url.clone();
    };

    if url.scheme() != "https" || url.host_str() != Some(GITHUB_HOST) {
        return url.clone();
    }

    let mut authed = url.clone();
    if authed.set_username(token).is_err() {
        log::warn!(target: LOG_TARGET, "Could not embed access token into clone URL for {url}");
        return url.clone();
    }

    authed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_url_embeds_token_for_github_https() {
        let url = Url::parse("https://github.com/octocat/hello-world.git").unwrap();
        let authed = authenticated_url(&url, Some("sekrit"));
        assert_eq!(authed.as_str(), "https://sekrit@github.com/octocat/hello-world.git");

        // The original URL is untouched and token-free.
        assert!(!url.as_str().contains("sekrit"));
    }

    #[test]
    fn test_authenticated_url_without_token_is_identity() {
        let url = Url::parse("https://github.com/octocat/hello-world.git").unwrap();
        assert_eq!(authenticated_url(&url, None), url);
    }

    #[test]
    fn test_authenticated_url_leaves_other_hosts_alone() {
        let url = Url::parse("https://gitlab.com/octocat/hello-world.git").unwrap();
        assert_eq!(authenticated_url(&url, Some("sekrit")), url);

        let url = Url::parse("http://github.com/octocat/hello-world.git").unwrap();
        assert_eq!(authenticated_url(&url, Some("sekrit")), url);
    }

    #[test]
    fn test_repo_name_from_url() {
        let url = Url::parse("https://github.com/octocat/hello-world.git").unwrap();
        assert_eq!(repo_name_from_url(&url), "hello-world");

        let url = Url::parse("https://github.com/octocat/plain").unwrap();
        assert_eq!(repo_name_from_url(&url), "plain");

        let url = Url::parse("https://github.com/").unwrap();
        assert_eq!(repo_name_from_url(&url), "repository");
    }
}
