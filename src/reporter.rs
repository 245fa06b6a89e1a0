//! Turns failed requests into something the user can see

use maud::html;

use crate::config::DEFAULT_HOME_HREF;
use crate::document::{element, Mutation};
use crate::error::RequestError;

/// Writes error messages to the status element, and sends the page home
#[derive(Clone, Debug, PartialEq)]
pub struct Reporter {
    status_element: String,
    home_href: String,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(element::STATUS, DEFAULT_HOME_HREF)
    }
}

impl Reporter {
    pub fn new<S: ToString, T: ToString>(status_element: S, home_href: T) -> Self {
        Self { status_element: status_element.to_string(), home_href: home_href.to_string() }
    }

    pub fn home_href(&self) -> &str {
        &self.home_href
    }

    /// Display the message of a failed request and leave the page
    pub fn report(&self, err: &RequestError) -> Vec<Mutation> {
        log::error!("Request failed: {} ({:?})", err, err);
        let mut mutations = self.notify(&err.to_string());
        mutations.push(Mutation::navigate(&self.home_href));
        mutations
    }

    /// Display a message, but stay on the page
    pub fn notify(&self, message: &str) -> Vec<Mutation> {
        let escaped = html! { (message) };
        vec![Mutation::set_inner_html(&self.status_element, escaped.into_string())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_end_with_navigation() {
        let reporter = Reporter::default();

        let mutations = reporter.report(&RequestError::Unreachable { detail: "refused".to_string() });
        assert_eq!(mutations, vec![
            Mutation::set_inner_html("id_message_msg", "Cannot connect to server"),
            Mutation::navigate("/"),
        ]);

        let mutations = reporter.report(&RequestError::UnexpectedContentType { status: 502 });
        assert_eq!(mutations[0], Mutation::set_inner_html("id_message_msg", "Received status=502"));

        let mutations = reporter.report(&RequestError::Server("You must log in".to_string()));
        assert_eq!(mutations[0], Mutation::set_inner_html("id_message_msg", "You must log in"));
        assert_eq!(mutations.len(), 2);
    }

    #[test]
    fn messages_are_escaped() {
        let reporter = Reporter::new("status", "/home");
        let mutations = reporter.report(&RequestError::Server("<i>nope</i>".to_string()));
        assert_eq!(mutations, vec![
            Mutation::set_inner_html("status", "&lt;i&gt;nope&lt;/i&gt;"),
            Mutation::navigate("/home"),
        ]);

        assert_eq!(reporter.notify("saved").len(), 1);
    }
}
