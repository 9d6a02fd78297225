use std::collections::{HashMap, VecDeque};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::{interval, Duration, Instant};

use toptui::api::{PostSummary, ProfileClient, TagStat};

use crate::log_debug;

/// Priority level for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High, // Profile fetches for a submitted search
    Low,  // Per-tag stats and their retries
}

/// Identifies a request while it is in flight
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum RequestKey {
    ProfileTags { handle: String, generation: u64 },
    ProfilePosts { handle: String, generation: u64 },
    TagStat { tag: String, generation: u64, attempt: u32 },
}

impl RequestKey {
    fn generation(&self) -> u64 {
        match self {
            RequestKey::ProfileTags { generation, .. }
            | RequestKey::ProfilePosts { generation, .. }
            | RequestKey::TagStat { generation, .. } => *generation,
        }
    }

    fn is_stat(&self) -> bool {
        matches!(self, RequestKey::TagStat { .. })
    }
}

/// API request types
///
/// Every request carries the search generation it was issued under so the
/// response can be matched against the current search.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// Tag aggregation for a profile
    GetProfileTags { handle: String, generation: u64 },

    /// Post listing for a profile
    GetProfilePosts { handle: String, generation: u64 },

    /// Global count for one tag, sent after `delay`
    GetTagStat {
        tag: String,
        generation: u64,
        attempt: u32,
        delay: Duration,
    },
}

impl ApiRequest {
    fn priority(&self) -> Priority {
        match self {
            ApiRequest::GetProfileTags { .. } | ApiRequest::GetProfilePosts { .. } => {
                Priority::High
            }
            ApiRequest::GetTagStat { .. } => Priority::Low,
        }
    }

    fn generation(&self) -> u64 {
        match self {
            ApiRequest::GetProfileTags { generation, .. }
            | ApiRequest::GetProfilePosts { generation, .. }
            | ApiRequest::GetTagStat { generation, .. } => *generation,
        }
    }

    fn without_delay(self) -> Self {
        match self {
            ApiRequest::GetTagStat {
                tag,
                generation,
                attempt,
                ..
            } => ApiRequest::GetTagStat {
                tag,
                generation,
                attempt,
                delay: Duration::ZERO,
            },
            other => other,
        }
    }

    fn key(&self) -> RequestKey {
        match self {
            ApiRequest::GetProfileTags { handle, generation } => RequestKey::ProfileTags {
                handle: handle.clone(),
                generation: *generation,
            },
            ApiRequest::GetProfilePosts { handle, generation } => RequestKey::ProfilePosts {
                handle: handle.clone(),
                generation: *generation,
            },
            ApiRequest::GetTagStat {
                tag,
                generation,
                attempt,
                ..
            } => RequestKey::TagStat {
                tag: tag.clone(),
                generation: *generation,
                attempt: *attempt,
            },
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    ProfileTagsResult {
        handle: String,
        generation: u64,
        tags: Result<Vec<TagStat>, anyhow::Error>,
    },

    ProfilePostsResult {
        handle: String,
        generation: u64,
        posts: Result<Vec<PostSummary>, anyhow::Error>,
    },

    TagStatResult {
        tag: String,
        generation: u64,
        attempt: u32,
        count: Result<u64, anyhow::Error>,
    },
}

/// Internal message for tracking completed requests
pub(crate) enum InternalMessage {
    Completed(RequestKey),
}

/// API service worker that processes requests in the background
///
/// Tag stats share `max_concurrent` slots. Profile fetches never wait for a
/// slot, so a new search starts even while every stat fetch hangs. Retries
/// wait out their backoff in `delayed` without holding a slot.
pub struct ApiService {
    client: ProfileClient,
    request_queue: VecDeque<(ApiRequest, Priority)>,
    delayed: Vec<(Instant, ApiRequest)>,
    in_flight: HashMap<RequestKey, AbortHandle>,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
    max_concurrent: usize,
    /// Newest search generation seen; older work is dropped
    generation: u64,
}

impl ApiService {
    pub fn new(
        client: ProfileClient,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            delayed: Vec::new(),
            in_flight: HashMap::new(),
            response_tx,
            completion_tx,
            max_concurrent: 10, // Limit concurrent stat calls
            generation: 0,
        }
    }

    /// Add a request to the queue
    fn enqueue(&mut self, request: ApiRequest) {
        let generation = request.generation();
        if generation < self.generation {
            log_debug(&format!(
                "DEBUG [API Service]: Dropping request from old generation {:?}",
                request.key()
            ));
            return;
        }
        if generation > self.generation {
            self.supersede(generation);
        }

        // Backoff is waited out here, not inside a slot
        if let ApiRequest::GetTagStat { delay, .. } = &request {
            if !delay.is_zero() {
                let due = Instant::now() + *delay;
                self.delayed.push((due, request.without_delay()));
                return;
            }
        }

        let priority = request.priority();

        // Insert based on priority (high priority at front, FIFO within a level)
        let insert_pos = self
            .request_queue
            .iter()
            .position(|(_, p)| *p > priority)
            .unwrap_or(self.request_queue.len());

        self.request_queue.insert(insert_pos, (request, priority));
    }

    /// Forget queued, delayed and running work of older generations
    fn supersede(&mut self, generation: u64) {
        self.generation = generation;
        self.request_queue
            .retain(|(request, _)| request.generation() >= generation);
        self.delayed
            .retain(|(_, request)| request.generation() >= generation);
        self.in_flight.retain(|key, handle| {
            if key.generation() < generation {
                handle.abort();
                false
            } else {
                true
            }
        });
    }

    /// Move retries whose backoff has elapsed into the queue
    fn promote_due(&mut self, now: Instant) {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.delayed.drain(..).partition(|(at, _)| *at <= now);
        self.delayed = waiting;
        for (_, request) in due {
            self.enqueue(request);
        }
    }

    fn stats_in_flight(&self) -> usize {
        self.in_flight.keys().filter(|key| key.is_stat()).count()
    }

    /// Process the next request from the queue
    ///
    /// Returns false when nothing could be started.
    fn process_next(&mut self) -> bool {
        let Some((_, priority)) = self.request_queue.front() else {
            return false;
        };
        if *priority == Priority::Low && self.stats_in_flight() >= self.max_concurrent {
            return false; // At capacity, wait for some to complete
        }

        let Some((request, _)) = self.request_queue.pop_front() else {
            return false;
        };

        let key = request.key();
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();
        let task_key = key.clone();

        let handle = tokio::spawn(async move {
            let response = Self::execute_request(&client, request).await;

            // The receiver is gone only when the app is shutting down
            let _ = response_tx.send(response);
            let _ = completion_tx.send(InternalMessage::Completed(task_key));
        });
        self.in_flight.insert(key, handle.abort_handle());
        true
    }

    /// Execute an API request and return the response
    async fn execute_request(client: &ProfileClient, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::GetProfileTags { handle, generation } => {
                log_debug(&format!(
                    "DEBUG [API Service]: GET profile tags handle={} generation={}",
                    handle, generation
                ));
                let tags = client.get_profile_tags(&handle).await;

                ApiResponse::ProfileTagsResult {
                    handle,
                    generation,
                    tags,
                }
            }

            ApiRequest::GetProfilePosts { handle, generation } => {
                log_debug(&format!(
                    "DEBUG [API Service]: GET profile posts handle={} generation={}",
                    handle, generation
                ));
                let posts = client.get_profile_posts(&handle).await;

                ApiResponse::ProfilePostsResult {
                    handle,
                    generation,
                    posts,
                }
            }

            ApiRequest::GetTagStat {
                tag,
                generation,
                attempt,
                ..
            } => {
                log_debug(&format!(
                    "DEBUG [API Service]: GET tag stat tag={} attempt={}",
                    tag, attempt
                ));
                let count = client.get_tag_stat(&tag).await;

                ApiResponse::TagStatResult {
                    tag,
                    generation,
                    attempt,
                    count,
                }
            }
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: ProfileClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);

        // Ticker for processing queue
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                maybe_request = request_rx.recv() => {
                    match maybe_request {
                        Some(request) => service.enqueue(request),
                        // App dropped its sender, nothing more will arrive
                        None => break,
                    }
                }

                Some(InternalMessage::Completed(key)) = completion_rx.recv() => {
                    service.in_flight.remove(&key);
                }

                _ = tick.tick() => {
                    service.promote_due(Instant::now());
                    for _ in 0..5 {
                        if !service.process_next() {
                            break;
                        }
                    }
                }
            }
        }
    });

    (request_tx, response_rx)
}
