//! This module provides a client to connect to a Wasabicalendar server

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::RequestError;
use crate::ids::{CalendarId, TaskId, WeekMarker};
use crate::slot::SlotIndex;
use crate::task::TaskDetail;
use crate::traits::Transport;
use crate::week::WeekPayload;

static JSON_CONTENT_TYPE: &str = "application/json";

/// An HTTP answer, as seen by this crate
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    /// The HTTP status. `0` means the transfer never completed.
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn new<S: ToString>(status: u16, content_type: Option<&str>, body: S) -> Self {
        Self { status, content_type: content_type.map(String::from), body: body.to_string() }
    }

    /// A JSON answer
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, Some(JSON_CONTENT_TYPE), body)
    }

    fn has_json_content_type(&self) -> bool {
        match &self.content_type {
            None => false,
            Some(ct) => ct.split(';')
                .next()
                .map(|mime| mime.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
                .unwrap_or(false),
        }
    }
}


/// Which week to fetch, relative to the week marker that is sent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeekStep {
    Current,
    Previous,
    Next,
}

impl WeekStep {
    fn endpoint(&self) -> &'static str {
        match self {
            WeekStep::Current => "get-cal-list",
            WeekStep::Previous => "prev-week",
            WeekStep::Next => "next-week",
        }
    }
}


/// The form posted to `flip-block`
#[derive(Clone, Debug, PartialEq)]
pub struct FlipBlockForm {
    pub csrf_token: String,
    pub slot: SlotIndex,
    pub calendar: CalendarId,
    pub week: WeekMarker,
}

impl FlipBlockForm {
    fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("csrfmiddlewaretoken".to_string(), self.csrf_token.clone()),
            ("id".to_string(), self.slot.to_string()),
            ("cal_id".to_string(), self.calendar.to_string()),
            ("week".to_string(), self.week.to_string()),
        ]
    }
}


/// A client for the AJAX endpoints of the weekly view
pub struct Client<T: Transport> {
    base_url: Url,
    transport: T,
}

impl<T: Transport> Client<T> {
    /// Create a client. This does not start a connection.
    ///
    /// `base_url` is the directory the endpoints live in (e.g. `https://example.com/wasabicalendar/`).
    pub fn new<S: AsRef<str>>(base_url: S, transport: T) -> Result<Self, RequestError> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        if base_url.path().ends_with('/') == false {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { base_url, transport })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn endpoint(&self, name: &str, query: &[(&str, String)]) -> Result<Url, RequestError> {
        let mut url = self.base_url.join(name)?;
        if query.is_empty() == false {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Fetch the state of a week (or of the week before/after it)
    pub async fn fetch_week(&self, calendar: CalendarId, week: &WeekMarker, step: WeekStep) -> Result<WeekPayload, RequestError> {
        let url = self.endpoint(step.endpoint(), &[
            ("cal_id", calendar.to_string()),
            ("week", week.to_string()),
        ])?;
        log::debug!("Fetching week {} ({:?}) of calendar {}", week, step, calendar);

        let response = self.transport.get(url).await
            .map_err(|err| RequestError::Unreachable { detail: err.to_string() });
        decode(response)
    }

    /// Fetch the details of a task
    pub async fn fetch_task(&self, id: TaskId) -> Result<TaskDetail, RequestError> {
        let url = self.endpoint("get-task", &[("id", id.to_string())])?;
        log::debug!("Fetching task {}", id);

        let response = self.transport.get(url).await
            .map_err(|err| RequestError::Unreachable { detail: err.to_string() });
        decode(response)
    }

    /// Ask the server to flip the selection of a slot for the current user.
    ///
    /// Returns once the server has acknowledged the change.
    pub async fn flip_block(&self, form: &FlipBlockForm) -> Result<(), RequestError> {
        let url = self.endpoint("flip-block", &[])?;
        log::debug!("Flipping slot {} of calendar {} for week {}", form.slot, form.calendar, form.week);

        let response = self.transport.post_form(url, form.to_pairs()).await
            .map_err(|err| RequestError::Unreachable { detail: err.to_string() })?;
        check_acknowledgement(&response)
    }
}


/// Turn an answer into the expected type.
///
/// Checks are performed in this order, and the first one that fails wins:
/// transport failure, content type, server-provided error message, HTTP status, body shape.
pub fn decode<D: DeserializeOwned>(response: Result<RawResponse, RequestError>) -> Result<D, RequestError> {
    let response = response?;
    let body = check_envelope(&response)?;
    serde_json::from_value(body)
        .map_err(|source| RequestError::Malformed { status: response.status, source })
}

fn check_envelope(response: &RawResponse) -> Result<Value, RequestError> {
    if response.status == 0 {
        return Err(RequestError::Unreachable { detail: "transfer did not complete".to_string() });
    }
    if response.has_json_content_type() == false {
        return Err(RequestError::UnexpectedContentType { status: response.status });
    }

    let body: Value = serde_json::from_str(&response.body)
        .map_err(|source| RequestError::Malformed { status: response.status, source })?;
    if let Some(message) = server_error(&body) {
        return Err(RequestError::Server(message));
    }
    if response.status != 200 {
        return Err(RequestError::UnexpectedStatus { status: response.status });
    }
    Ok(body)
}

/// Acknowledgements are not decoded: only an explicit error (or a failed envelope) is a failure
fn check_acknowledgement(response: &RawResponse) -> Result<(), RequestError> {
    if response.status == 0 {
        return Err(RequestError::Unreachable { detail: "transfer did not complete".to_string() });
    }
    if response.has_json_content_type() == false {
        return Err(RequestError::UnexpectedContentType { status: response.status });
    }
    if let Ok(body) = serde_json::from_str::<Value>(&response.body) {
        if let Some(message) = server_error(&body) {
            return Err(RequestError::Server(message));
        }
    }
    if response.status != 200 {
        return Err(RequestError::UnexpectedStatus { status: response.status });
    }
    Ok(())
}

fn server_error(body: &Value) -> Option<String> {
    body.get("error").map(|error| match error {
        Value::String(message) => message.clone(),
        other => other.to_string(),
    })
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use serde_json::json;

    use super::*;
    use crate::mock_transport::MockTransport;

    fn client(mock: &Arc<MockTransport>) -> Client<Arc<MockTransport>> {
        Client::new("http://calendar.test/wasabicalendar", Arc::clone(mock)).unwrap()
    }

    #[test]
    fn classification_order() {
        // An unreachable server wins over everything else
        let err = decode::<Value>(Ok(RawResponse::new(0, None, ""))).unwrap_err();
        assert_eq!(err.to_string(), "Cannot connect to server");

        // The content type is checked regardless of the status
        let err = decode::<Value>(Ok(RawResponse::new(200, Some("text/html"), "<html>"))).unwrap_err();
        assert_eq!(err.to_string(), "Received status=200");
        let err = decode::<Value>(Ok(RawResponse::new(500, Some("text/html"), "<html>"))).unwrap_err();
        assert_eq!(err.to_string(), "Received status=500");
        let err = decode::<Value>(Ok(RawResponse::new(302, None, ""))).unwrap_err();
        assert_eq!(err.status(), Some(302));

        // The server message is shown as is, whatever the status
        let err = decode::<Value>(Ok(RawResponse::json(400, &json!({"error": "invalid week info"})))).unwrap_err();
        assert_eq!(err.to_string(), "invalid week info");
        let err = decode::<Value>(Ok(RawResponse::json(200, &json!({"error": "No access to the task."})))).unwrap_err();
        assert_eq!(err.to_string(), "No access to the task.");

        let err = decode::<Value>(Ok(RawResponse::json(404, &json!({})))).unwrap_err();
        assert_eq!(err.to_string(), "Received status=404");

        let err = decode::<WeekPayload>(Ok(RawResponse::json(200, &json!({"week": 3})))).unwrap_err();
        assert!(matches!(err, RequestError::Malformed { status: 200, .. }));

        let ok = decode::<Value>(Ok(RawResponse::new(200, Some("application/json; charset=utf-8"), "{}")));
        assert!(ok.is_ok());
    }

    #[test]
    fn acknowledgements() {
        assert!(check_acknowledgement(&RawResponse::new(200, Some("application/json"), "")).is_ok());
        assert!(check_acknowledgement(&RawResponse::new(200, Some("application/json"), "{}")).is_ok());
        let err = check_acknowledgement(&RawResponse::json(400, &json!({"error": "No access to the calendar"}))).unwrap_err();
        assert_eq!(err.to_string(), "No access to the calendar");
        assert!(check_acknowledgement(&RawResponse::new(0, None, "")).unwrap_err().is_transport_failure());
    }

    #[tokio::test]
    async fn week_requests() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, json!({"week": ["2021-12-06"], "tags": [], "data": []}));
        mock.push_json(200, json!({"week": ["2021-11-22"], "tags": [], "data": []}));

        let client = client(&mock);
        let week = WeekMarker::from("2021-11-29");
        let next = client.fetch_week(CalendarId::new(3), &week, WeekStep::Next).await.unwrap();
        assert_eq!(next.day_label(0), "2021-12-06");
        let prev = client.fetch_week(CalendarId::INVALID, &week, WeekStep::Previous).await.unwrap();
        assert_eq!(prev.day_label(0), "2021-11-22");

        let requests = mock.requests();
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url.as_str(), "http://calendar.test/wasabicalendar/next-week?cal_id=3&week=2021-11-29");
        assert_eq!(requests[1].url.as_str(), "http://calendar.test/wasabicalendar/prev-week?cal_id=0&week=2021-11-29");
    }

    #[tokio::test]
    async fn unreachable_server() {
        let mock = Arc::new(MockTransport::new());
        mock.push_unreachable();

        let err = client(&mock).fetch_task(TaskId::new(1)).await.unwrap_err();
        assert!(err.is_transport_failure());
        assert_eq!(err.to_string(), "Cannot connect to server");
    }

    #[tokio::test]
    async fn flip_block_form() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, json!({}));

        let form = FlipBlockForm {
            csrf_token: "s3cr3t".to_string(),
            slot: SlotIndex::new(1, 2).unwrap(),
            calendar: CalendarId::new(9),
            week: WeekMarker::from("2021-11-29"),
        };
        client(&mock).flip_block(&form).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url.as_str(), "http://calendar.test/wasabicalendar/flip-block");
        assert_eq!(requests[0].form, vec![
            ("csrfmiddlewaretoken".to_string(), "s3cr3t".to_string()),
            ("id".to_string(), "98".to_string()),
            ("cal_id".to_string(), "9".to_string()),
            ("week".to_string(), "2021-11-29".to_string()),
        ]);
    }
}
