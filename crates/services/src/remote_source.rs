use reqwest::{Client, Url};

use quiz_core::model::{into_quizzes, Quiz, QuizRecord};

use crate::error::FetchError;

/// Downloads the quiz feed and maps it into domain quizzes.
///
/// One request per call: no retries, no caching, platform default timeouts.
#[derive(Clone, Debug, Default)]
pub struct RemoteQuizSource {
    client: Client,
}

impl RemoteQuizSource {
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch and decode the whole feed at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidEndpoint` if `endpoint` is not an absolute
    /// http(s) URL, `FetchError::NotConnected` if the request never reached the
    /// server, `FetchError::BadResponseStatus` for non-2xx replies,
    /// `FetchError::EmptyBody` for a zero-length body and
    /// `FetchError::MalformedPayload` if the body does not decode.
    pub async fn fetch(&self, endpoint: &str) -> Result<Vec<Quiz>, FetchError> {
        let url = parse_endpoint(endpoint)?;

        let response = self.client.get(url).send().await.map_err(|err| {
            tracing::debug!("quiz feed request to {endpoint} failed: {err}");
            FetchError::NotConnected
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadResponseStatus(status));
        }

        let body = response.bytes().await.map_err(|err| {
            tracing::debug!("reading quiz feed body from {endpoint} failed: {err}");
            FetchError::NotConnected
        })?;

        decode_catalog(&body)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, FetchError> {
    let url = Url::parse(endpoint.trim())
        .map_err(|_| FetchError::InvalidEndpoint(endpoint.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::InvalidEndpoint(endpoint.to_string()));
    }
    Ok(url)
}

/// Decode a feed body into quizzes.
///
/// # Errors
///
/// Returns `FetchError::EmptyBody` for empty input and
/// `FetchError::MalformedPayload` for invalid JSON or invalid records.
pub fn decode_catalog(body: &[u8]) -> Result<Vec<Quiz>, FetchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::EmptyBody);
    }

    let records: Vec<QuizRecord> = serde_json::from_slice(body)
        .map_err(|err| FetchError::MalformedPayload(err.to_string()))?;

    into_quizzes(records).map_err(|err| FetchError::MalformedPayload(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::IconTag;

    #[test]
    fn decodes_documented_feed_shape() {
        let body = br#"[
            {"title": "Geography of Europe", "desc": "Capitals",
             "questions": [
                {"text": "Capital of France?", "answer": "Paris",
                 "answers": ["London", "Paris", "Rome"]},
                {"text": "Capital of Spain?", "answer": "Lisbon",
                 "answers": ["Madrid", "Rome"]}
             ]}
        ]"#;

        let quizzes = decode_catalog(body).unwrap();
        assert_eq!(quizzes.len(), 1);
        let quiz = &quizzes[0];
        assert_eq!(quiz.icon(), IconTag::Globe);
        assert_eq!(quiz.questions()[0].correct_option_index(), 1);
        assert_eq!(quiz.questions()[1].correct_option_index(), 0);
    }

    #[test]
    fn empty_array_is_an_empty_catalog() {
        assert!(decode_catalog(b"[]").unwrap().is_empty());
    }

    #[test]
    fn blank_body_is_empty_body() {
        assert!(matches!(decode_catalog(b""), Err(FetchError::EmptyBody)));
        assert!(matches!(decode_catalog(b" \n"), Err(FetchError::EmptyBody)));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let err = decode_catalog(br#"{"title": "not an array"}"#).unwrap_err();
        let FetchError::MalformedPayload(reason) = &err else {
            panic!("expected MalformedPayload, got {err:?}");
        };
        assert!(reason.contains("invalid type"), "{reason}");

        let err = decode_catalog(br#"[{"title": "Missing fields"}]"#).unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
    }

    #[test]
    fn single_option_question_is_malformed() {
        let body = br#"[{"title": "T", "desc": "",
            "questions": [{"text": "Q", "answer": "a", "answers": ["a"]}]}]"#;
        assert!(matches!(
            decode_catalog(body),
            Err(FetchError::MalformedPayload(_))
        ));
    }

    #[tokio::test]
    async fn rejects_unparseable_endpoint_without_a_request() {
        let source = RemoteQuizSource::new();
        for endpoint in ["", "not a url", "ftp://example.com/q.json"] {
            let err = source.fetch(endpoint).await.unwrap_err();
            assert!(matches!(err, FetchError::InvalidEndpoint(_)), "{endpoint}");
        }
    }
}
