use crate::error::{Error, Result};
use crate::runner::{CommandRunner, SiteContext, WpRequest, decode_list};

/// Ask the network registry for every site base URL, in registry order.
///
/// A failed call aborts the whole multi-site operation; there is no retry.
/// A malformed payload surfaces as a decode failure with the raw reason.
pub fn list_site_urls(runner: &dyn CommandRunner) -> Result<Vec<String>> {
    let request = WpRequest::new(["site", "list"])
        .flag("field", "url")
        .flag("format", "json");
    let raw = runner
        .run(&request, &SiteContext::Local)
        .map_err(|err| Error::DirectoryUnavailable {
            reason: err.to_string(),
        })?;
    decode_list(&raw)
}

#[cfg(test)]
mod tests {
    use super::list_site_urls;
    use crate::error::Error;
    use crate::testing::RecordingRunner;

    #[test]
    fn lists_urls_in_registry_order() {
        let runner = RecordingRunner::new();
        runner.push_ok(r#"["https://example.org","https://foobar.org"]"#);

        let urls = list_site_urls(&runner).expect("list");
        assert_eq!(urls, vec!["https://example.org", "https://foobar.org"]);

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].argv,
            vec!["site", "list", "--field=url", "--format=json"]
        );
    }

    #[test]
    fn failed_listing_is_directory_unavailable() {
        let runner = RecordingRunner::new();
        runner.push_err(Error::RemoteExecution {
            command: "wp site list --field=url --format=json".to_string(),
            reason: "connection refused".to_string(),
        });

        let error = list_site_urls(&runner).expect_err("must fail");
        assert!(matches!(error, Error::DirectoryUnavailable { .. }));
    }

    #[test]
    fn malformed_listing_is_a_decode_error() {
        let runner = RecordingRunner::new();
        runner.push_ok("<html>maintenance</html>");

        let error = list_site_urls(&runner).expect_err("must fail");
        assert!(matches!(error, Error::Decode { .. }));
    }
}
