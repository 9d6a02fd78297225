//! API Response Handler
//!
//! Applies responses from the background request worker to the model.
//! Failures never reach the screen: they are classified and written to the
//! debug log, and the affected slice simply stays empty.

use toptui::logic::errors::{classify_error, format_error_message};
use toptui::model::{ApplyOutcome, StatOutcome, StatTicket};

use crate::services::api::{ApiRequest, ApiResponse};
use crate::App;

/// Handle API response from background service
///
/// Response types:
/// - ProfileTagsResult: tag aggregation for the searched handle
/// - ProfilePostsResult: post listing for the searched handle
/// - TagStatResult: global count for one tag the user revealed
pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::ProfileTagsResult {
            handle,
            generation,
            tags,
        } => {
            let outcome = app.model.search.apply_tags(generation, tags);
            log_apply_outcome("ProfileTags", &handle, generation, &outcome);
            if matches!(outcome, ApplyOutcome::Applied(_)) {
                app.model.clamp_selections();
            }
        }

        ApiResponse::ProfilePostsResult {
            handle,
            generation,
            posts,
        } => {
            let outcome = app.model.search.apply_posts(generation, posts);
            log_apply_outcome("ProfilePosts", &handle, generation, &outcome);
            if matches!(outcome, ApplyOutcome::Applied(_)) {
                app.model.clamp_selections();
            }
        }

        ApiResponse::TagStatResult {
            tag,
            generation,
            attempt,
            count,
        } => match app.model.search.apply_tag_stat(generation, &tag, count) {
            StatOutcome::Resolved(count) => {
                crate::log_debug(&format!(
                    "DEBUG [TagStat]: tag={} resolved count={} attempt={}",
                    tag, count, attempt
                ));
            }
            StatOutcome::Retry(ticket, error) => {
                crate::log_debug(&format!(
                    "DEBUG [TagStat]: tag={} attempt={} failed ({:?}: {}), retrying in {:?}",
                    tag,
                    attempt,
                    classify_error(&error),
                    format_error_message(&error),
                    ticket.delay
                ));
                send_stat_request(app, ticket);
            }
            StatOutcome::Exhausted(error) => {
                crate::log_debug(&format!(
                    "DEBUG [TagStat]: tag={} gave up after attempt {} ({:?}: {})",
                    tag,
                    attempt,
                    classify_error(&error),
                    format_error_message(&error)
                ));
            }
            StatOutcome::Stale => {
                crate::log_debug(&format!(
                    "DEBUG [TagStat]: Skipping stale response for tag={} generation={}",
                    tag, generation
                ));
            }
            StatOutcome::Ignored => {}
        },
    }
}

/// Queue a tag stat fetch on the background worker
pub(crate) fn send_stat_request(app: &App, ticket: StatTicket) {
    let _ = app.api_tx.send(ApiRequest::GetTagStat {
        tag: ticket.tag,
        generation: ticket.generation,
        attempt: ticket.attempt,
        delay: ticket.delay,
    });
}

fn log_apply_outcome(kind: &str, handle: &str, generation: u64, outcome: &ApplyOutcome) {
    match outcome {
        ApplyOutcome::Applied(count) => {
            crate::log_debug(&format!(
                "DEBUG [{}]: handle={} generation={} applied {} entries",
                kind, handle, generation, count
            ));
        }
        ApplyOutcome::Rejected(error) => {
            crate::log_debug(&format!(
                "DEBUG [{}]: handle={} generation={} failed ({:?}: {})",
                kind,
                handle,
                generation,
                classify_error(error),
                format_error_message(error)
            ));
        }
        ApplyOutcome::Stale => {
            crate::log_debug(&format!(
                "DEBUG [{}]: Skipping stale response for handle={} generation={}",
                kind, handle, generation
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use toptui::api::{PostId, PostSummary, TagStat};
    use toptui::logic::retry::backoff_delay;
    use toptui::model::{Model, StatState};

    fn test_app(max_stat_attempts: u32) -> (App, mpsc::UnboundedReceiver<ApiRequest>) {
        let (api_tx, request_rx) = mpsc::unbounded_channel();
        let (_response_tx, api_rx) = mpsc::unbounded_channel();
        let app = App {
            model: Model::new(false, max_stat_attempts),
            api_tx,
            api_rx,
            open_command: None,
            clipboard_command: None,
            last_key_was_g: false,
        };
        (app, request_rx)
    }

    fn post(id: u64) -> PostSummary {
        PostSummary {
            id: PostId(id),
            short_code: format!("c{}", id),
            preview_link: String::new(),
            text: None,
            tags: vec![TagStat::unresolved("sunset")],
            likes: id,
        }
    }

    fn stat_failure(generation: u64, attempt: u32) -> ApiResponse {
        ApiResponse::TagStatResult {
            tag: "sunset".to_string(),
            generation,
            attempt,
            count: Err(anyhow::anyhow!("connection reset")),
        }
    }

    #[test]
    fn test_submit_sends_both_profile_fetches() {
        let (mut app, mut requests) = test_app(3);
        app.model.ui.input.text = "nasa".to_string();
        app.submit_search();

        assert!(matches!(
            requests.try_recv(),
            Ok(ApiRequest::GetProfileTags { handle, generation: 1 }) if handle == "nasa"
        ));
        assert!(matches!(
            requests.try_recv(),
            Ok(ApiRequest::GetProfilePosts { handle, generation: 1 }) if handle == "nasa"
        ));
        assert!(requests.try_recv().is_err());
    }

    #[test]
    fn test_failed_stat_is_resent_with_backoff() {
        let (mut app, mut requests) = test_app(3);
        let ticket = app.model.search.submit_search("nasa").unwrap();
        let first = app.model.search.request_stat("sunset").unwrap();
        send_stat_request(&app, first);
        assert!(matches!(
            requests.try_recv(),
            Ok(ApiRequest::GetTagStat { attempt: 1, delay, .. }) if delay.is_zero()
        ));

        handle_api_response(&mut app, stat_failure(ticket.generation, 1));

        match requests.try_recv() {
            Ok(ApiRequest::GetTagStat {
                tag,
                generation,
                attempt,
                delay,
            }) => {
                assert_eq!(tag, "sunset");
                assert_eq!(generation, ticket.generation);
                assert_eq!(attempt, 2);
                assert_eq!(delay, backoff_delay(2));
            }
            other => panic!("expected a retry, got {:?}", other),
        }
        assert_eq!(
            app.model.search.stats.state("sunset"),
            StatState::Pending { attempt: 2 }
        );
    }

    #[test]
    fn test_last_failed_attempt_sends_nothing() {
        let (mut app, mut requests) = test_app(1);
        let ticket = app.model.search.submit_search("nasa").unwrap();
        app.model.search.request_stat("sunset").unwrap();

        handle_api_response(&mut app, stat_failure(ticket.generation, 1));

        assert!(requests.try_recv().is_err());
        assert_eq!(app.model.search.stats.state("sunset"), StatState::Failed);
    }

    #[test]
    fn test_stale_stat_failure_is_not_retried() {
        let (mut app, mut requests) = test_app(3);
        let old = app.model.search.submit_search("old").unwrap();
        app.model.search.request_stat("sunset").unwrap();
        app.model.search.submit_search("new").unwrap();

        handle_api_response(&mut app, stat_failure(old.generation, 1));

        assert!(requests.try_recv().is_err());
        assert_eq!(app.model.search.stats.state("sunset"), StatState::Unfetched);
    }

    #[test]
    fn test_applied_posts_select_first_row() {
        let (mut app, _requests) = test_app(3);
        let ticket = app.model.search.submit_search("nasa").unwrap();
        assert_eq!(app.model.ui.posts_selection, None);

        handle_api_response(
            &mut app,
            ApiResponse::ProfilePostsResult {
                handle: ticket.handle,
                generation: ticket.generation,
                posts: Ok(vec![post(1), post(2)]),
            },
        );

        assert_eq!(app.model.ui.posts_selection, Some(0));
        assert_eq!(app.model.search.posts.len(), 2);
    }

    #[test]
    fn test_rejected_posts_leave_selection_alone() {
        let (mut app, _requests) = test_app(3);
        let ticket = app.model.search.submit_search("nasa").unwrap();
        app.model.ui.posts_selection = Some(4);
        app.model.ui.tag_cursor = 3;

        handle_api_response(
            &mut app,
            ApiResponse::ProfilePostsResult {
                handle: ticket.handle,
                generation: ticket.generation,
                posts: Err(anyhow::anyhow!("503 Service Unavailable")),
            },
        );

        assert_eq!(app.model.ui.posts_selection, Some(4));
        assert_eq!(app.model.ui.tag_cursor, 3);
        assert!(!app.model.search.posts_loading);
    }
}
