use crate::error::{Error, Result};
use crate::runner::{CommandRunner, SiteContext, WpRequest, decode_list};
use crate::sites::list_site_urls;

/// The two families of spam-flagged content this tool purges: comments, and
/// Jetpack contact form submissions (stored as `feedback` posts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamCategory {
    Comment,
    Feedback,
}

impl SpamCategory {
    /// Parse the `--type` flag. Anything outside the two known categories is
    /// rejected before any remote call is made.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "comment" => Ok(Self::Comment),
            "feedback" => Ok(Self::Feedback),
            other => Err(Error::Validation(format!("Unknown type: {other}"))),
        }
    }

    /// Plural noun used in progress and success messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Comment => "comments",
            Self::Feedback => "feedback",
        }
    }

    fn list_request(self) -> WpRequest {
        match self {
            Self::Comment => WpRequest::new(["comment", "list"])
                .flag("status", "spam")
                .flag("field", "comment_ID")
                .flag("format", "json"),
            Self::Feedback => WpRequest::new(["post", "list"])
                .flag("post_type", "feedback")
                .flag("post_status", "spam")
                .flag("field", "ID")
                .flag("format", "json"),
        }
    }

    fn delete_request(self, ids: &[String]) -> WpRequest {
        match self {
            Self::Comment => WpRequest::new(["comment", "delete"])
                .args(ids.iter().cloned())
                .switch("force")
                .isolated(),
            Self::Feedback => WpRequest::new(["post", "delete"])
                .args(ids.iter().cloned())
                .switch("force")
                .switch("quiet")
                .isolated(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeOutcome {
    pub deleted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPurgeOutcome {
    pub sites: usize,
    pub deleted: usize,
}

/// List spam-flagged items of `category` in `context`, then delete them in a
/// single forced batch scoped to the same context.
///
/// The listing requests only the identifier field. An empty listing issues no
/// deletion call at all. The batch deletion always runs isolated; the listing
/// only needs isolation when it targets a remote site.
pub fn purge(
    category: SpamCategory,
    context: &SiteContext,
    runner: &dyn CommandRunner,
) -> Result<PurgeOutcome> {
    let mut listing = category.list_request();
    if context.url().is_some() {
        listing = listing.isolated();
    }
    let raw = runner.run(&listing, context)?;
    let ids = decode_list(&raw)?;

    if ids.is_empty() {
        return Ok(PurgeOutcome { deleted: 0 });
    }

    runner.run(&category.delete_request(&ids), context)?;
    Ok(PurgeOutcome {
        deleted: ids.len(),
    })
}

/// Purge every site the registry reports, in registry order.
///
/// `progress` fires with the site URL before each per-site purge. The first
/// failing site aborts the remaining iteration (fail-fast); a failed registry
/// lookup aborts before any site is processed.
pub fn purge_network(
    category: SpamCategory,
    runner: &dyn CommandRunner,
    mut progress: impl FnMut(&str),
) -> Result<NetworkPurgeOutcome> {
    let urls = list_site_urls(runner)?;
    let mut deleted = 0;
    for url in &urls {
        progress(url);
        let context = SiteContext::site(url);
        deleted += purge(category, &context, runner)?.deleted;
    }
    Ok(NetworkPurgeOutcome {
        sites: urls.len(),
        deleted,
    })
}
