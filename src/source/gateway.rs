//! Bible Gateway adapter. One GET of the print-friendly passage page; the body is returned as-is.

use crate::source::client::PassageClient;
use crate::source::error::FetchError;

/// Passage lookup endpoint.
pub const PASSAGE_URL: &str = "https://www.biblegateway.com/passage/";

const PRINT_INTERFACE: &str = "print";

/// Query pairs for one passage: `search`, `version`, and the print layout.
pub fn passage_query<'q>(reference: &'q str, version: &'q str) -> [(&'static str, &'q str); 3] {
    [
        ("search", reference),
        ("version", version),
        ("interface", PRINT_INTERFACE),
    ]
}

/// Fetch the print layout of `reference` in `version`. Transport failures and non-2xx statuses are errors.
pub fn fetch_passage(
    client: &PassageClient,
    reference: &str,
    version: &str,
) -> Result<String, FetchError> {
    let query = passage_query(reference, version);
    tracing::info!(url = PASSAGE_URL, reference, version, "Fetching passage");
    let response = client
        .get(PASSAGE_URL, &query)
        .map_err(|e| FetchError::Network {
            url: PASSAGE_URL.to_string(),
            source: e,
        })?;
    let body = check_response(response)?;
    tracing::info!(bytes = body.len(), "Received HTML");
    Ok(body)
}

/// Check response status and read body as UTF-8.
fn check_response(response: reqwest::blocking::Response) -> Result<String, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    response
        .text()
        .map_err(|e| FetchError::BodyRead { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_has_search_version_and_print_interface() {
        assert_eq!(
            passage_query("John 1", "NKJV"),
            [("search", "John 1"), ("version", "NKJV"), ("interface", "print")]
        );
    }

    #[test]
    fn passage_request_url() -> Result<(), reqwest::Error> {
        let client = PassageClient::new()?;
        let req = client.request(PASSAGE_URL, &passage_query("Genesis 1", "KJV"))?;
        let url = req.url();
        assert_eq!(url.host_str(), Some("www.biblegateway.com"));
        assert_eq!(url.path(), "/passage/");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("search".to_string(), "Genesis 1".to_string()),
                ("version".to_string(), "KJV".to_string()),
                ("interface".to_string(), "print".to_string()),
            ]
        );
        Ok(())
    }
}
