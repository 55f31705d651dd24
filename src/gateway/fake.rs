//! In-memory gateway for store tests.

use crate::error::{FavoritesError, FavoritesResult};
use crate::gateway::traits::FavoritesGateway;
use crate::gateway::types::RemoteFavorite;
use crate::models::{Property, RawId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Outcome queued for the next add/remove call
pub enum Reply {
    Ok,
    Fail(FavoritesError),
}

#[derive(Default)]
pub struct FakeGateway {
    /// Server-side favorites, shared by every email
    pub remote: Mutex<Vec<RemoteFavorite>>,
    /// Replaces the next `list` result when set
    pub list_reply: Mutex<Option<FavoritesResult<Vec<RemoteFavorite>>>>,
    /// How many times each `list` call yields before answering (default 1)
    pub list_yields: Mutex<VecDeque<usize>>,
    pub replies: Mutex<VecDeque<Reply>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn with_remote(properties: &[Property]) -> Self {
        let remote = properties
            .iter()
            .map(|p| RemoteFavorite {
                property_id: p.id.clone().or(p.mongo_id.clone()).unwrap_or(RawId::from("")),
                property: Some(p.clone()),
            })
            .collect();
        Self {
            remote: Mutex::new(remote),
            ..Default::default()
        }
    }

    pub fn reply_next(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remote_ids(&self) -> Vec<String> {
        self.remote
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.property_id.to_string())
            .collect()
    }

    fn next_reply(&self, call: String) -> Reply {
        self.calls.lock().unwrap().push(call);
        self.replies.lock().unwrap().pop_front().unwrap_or(Reply::Ok)
    }
}

#[async_trait]
impl FavoritesGateway for FakeGateway {
    async fn list(&self, email: &str) -> FavoritesResult<Vec<RemoteFavorite>> {
        self.calls.lock().unwrap().push(format!("list {email}"));
        let yields = self.list_yields.lock().unwrap().pop_front().unwrap_or(1);
        for _ in 0..yields {
            tokio::task::yield_now().await;
        }
        if let Some(reply) = self.list_reply.lock().unwrap().take() {
            return reply;
        }
        Ok(self.remote.lock().unwrap().clone())
    }

    async fn add(&self, email: &str, property_id: &str, property: &Property) -> FavoritesResult<()> {
        let reply = self.next_reply(format!("add {email} {property_id}"));
        // give other tasks a chance to run while this call is "in flight"
        tokio::task::yield_now().await;
        match reply {
            Reply::Fail(err) => Err(err),
            Reply::Ok => {
                let mut remote = self.remote.lock().unwrap();
                if !remote.iter().any(|f| f.property_id.to_string() == property_id) {
                    remote.push(RemoteFavorite {
                        property_id: RawId::from(property_id),
                        property: Some(property.clone()),
                    });
                }
                Ok(())
            }
        }
    }

    async fn remove(&self, email: &str, property_id: &str) -> FavoritesResult<()> {
        let reply = self.next_reply(format!("remove {email} {property_id}"));
        tokio::task::yield_now().await;
        match reply {
            Reply::Fail(err) => Err(err),
            Reply::Ok => {
                self.remote
                    .lock()
                    .unwrap()
                    .retain(|f| f.property_id.to_string() != property_id);
                Ok(())
            }
        }
    }
}
