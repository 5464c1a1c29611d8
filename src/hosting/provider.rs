use crate::Result;
use octocrab::Octocrab;
use octocrab::models::Repository;
use url::Url;

const LOG_TARGET: &str = "   hosting";

/// One page of up to 100 repositories; anything beyond that is not fetched.
const REPO_PAGE_SIZE: u8 = 100;

/// GitHub API client for enumerating a user's repositories.
#[derive(Debug, Clone)]
pub struct Provider {
    octocrab: Octocrab,
}

impl Provider {
    /// Create a new GitHub API client. The token, when present, raises rate
    /// limits and makes private repositories visible.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder();

        if let Some(t) = token {
            builder = builder.personal_token(t.to_owned());
        }

        Ok(Self { octocrab: builder.build()? })
    }

    /// Clone URLs for `username`'s repositories, in API listing order.
    ///
    /// Returns an empty list on any failure (logged); the caller decides
    /// whether an empty list is fatal.
    pub async fn list_repos(&self, username: &str) -> Vec<Url> {
        let route = format!("/users/{username}/repos?per_page={REPO_PAGE_SIZE}");

        let repos: Vec<Repository> = match self.octocrab.get(route, None::<&()>).await {
            Ok(repos) => repos,
            Err(e) => {
                log::error!(target: LOG_TARGET, "Error fetching GitHub repositories for user '{username}': {e}");
                return Vec::new();
            }
        };

        let urls: Vec<Url> = repos.into_iter().filter_map(|repo| repo.clone_url).collect();
        log::info!(target: LOG_TARGET, "Found {} repositories for user {username}", urls.len());
        urls
    }
}
