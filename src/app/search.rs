//! Search and reveal actions
//!
//! Turn model tickets into requests for the background worker.

use toptui::model::SearchTicket;

use crate::handlers::api::send_stat_request;
use crate::services::api::ApiRequest;
use crate::{log_debug, App};

impl App {
    /// Submit the query input and fire both profile fetches
    pub(crate) fn submit_search(&mut self) {
        let Some(ticket) = self.model.submit_search() else {
            return;
        };
        self.dispatch_search(ticket);
    }

    /// Search for `handle` directly, used for the startup handle
    pub(crate) fn search_handle(&mut self, handle: &str) {
        self.model.ui.input.text = handle.to_string();
        self.submit_search();
    }

    fn dispatch_search(&mut self, ticket: SearchTicket) {
        log_debug(&format!(
            "DEBUG [Search]: handle={} generation={}",
            ticket.handle, ticket.generation
        ));

        // Two independent fetches; either may land first
        let _ = self.api_tx.send(ApiRequest::GetProfileTags {
            handle: ticket.handle.clone(),
            generation: ticket.generation,
        });
        let _ = self.api_tx.send(ApiRequest::GetProfilePosts {
            handle: ticket.handle,
            generation: ticket.generation,
        });
    }

    /// Reveal the count of the tag under the selection
    pub(crate) fn reveal_selected_tag(&mut self) {
        if let Some(ticket) = self.model.reveal_selected() {
            send_stat_request(self, ticket);
        }
    }

    /// Reveal the counts of every tag on the selected post
    pub(crate) fn reveal_selected_post_tags(&mut self) {
        for ticket in self.model.reveal_selected_post_tags() {
            send_stat_request(self, ticket);
        }
    }
}
