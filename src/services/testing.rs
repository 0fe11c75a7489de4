use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use super::{Fetch, QueryParams, TransportError};

enum Reply {
    Respond(Result<String, TransportError>),
    Stall,
}

/// In-memory catalog endpoints: canned replies per URL, served in order.
#[derive(Default)]
pub struct FakeFetcher {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<(String, QueryParams)>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        FakeFetcher::default()
    }

    pub fn page(self, url: &str, response: Result<String, TransportError>) -> Self {
        self.reply(url, Reply::Respond(response))
    }

    /// The next request to `url` never completes.
    pub fn stall(self, url: &str) -> Self {
        self.reply(url, Reply::Stall)
    }

    fn reply(mut self, url: &str, reply: Reply) -> Self {
        self.replies
            .get_mut()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<(String, QueryParams)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetch for FakeFetcher {
    async fn fetch(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<String, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), query.to_vec()));

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(|queue| queue.pop_front());

        match reply {
            Some(Reply::Respond(response)) => response,
            Some(Reply::Stall) => std::future::pending().await,
            None => Err(TransportError::Connection(format!("no route to {}", url))),
        }
    }
}
