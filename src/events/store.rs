//! Event store seam
//!
//! The engine treats event persistence as an external collaborator: it asks
//! for a user's `EventSet` and hands back nothing. `EventStore` is the trait
//! boundary for that collaborator, and `InMemoryEventStore` is the bundled
//! implementation used by the API server and tests.

use crate::events::types::{
    CravingEvent, EventSet, FoodEvent, MovementEvent, SleepEvent, StressEvent, Timestamped,
    WaterEvent,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// The six loggable event types, as a discriminant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Food,
    Water,
    Craving,
    Movement,
    Sleep,
    Stress,
}

impl EventKind {
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::Food,
            EventKind::Water,
            EventKind::Craving,
            EventKind::Movement,
            EventKind::Sleep,
            EventKind::Stress,
        ]
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Food => write!(f, "food"),
            EventKind::Water => write!(f, "water"),
            EventKind::Craving => write!(f, "craving"),
            EventKind::Movement => write!(f, "movement"),
            EventKind::Sleep => write!(f, "sleep"),
            EventKind::Stress => write!(f, "stress"),
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(EventKind::Food),
            "water" => Ok(EventKind::Water),
            "craving" | "cravings" => Ok(EventKind::Craving),
            "movement" => Ok(EventKind::Movement),
            "sleep" => Ok(EventKind::Sleep),
            "stress" => Ok(EventKind::Stress),
            other => Err(StoreError::UnknownKind(other.to_string())),
        }
    }
}

/// One event of any type, for inserts and single-event responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Food(FoodEvent),
    Water(WaterEvent),
    Craving(CravingEvent),
    Movement(MovementEvent),
    Sleep(SleepEvent),
    Stress(StressEvent),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Food(_) => EventKind::Food,
            Event::Water(_) => EventKind::Water,
            Event::Craving(_) => EventKind::Craving,
            Event::Movement(_) => EventKind::Movement,
            Event::Sleep(_) => EventKind::Sleep,
            Event::Stress(_) => EventKind::Stress,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Event::Food(e) => e.id,
            Event::Water(e) => e.id,
            Event::Craving(e) => e.id,
            Event::Movement(e) => e.id,
            Event::Sleep(e) => e.id,
            Event::Stress(e) => e.id,
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Event::Food(e) => &e.user_id,
            Event::Water(e) => &e.user_id,
            Event::Craving(e) => &e.user_id,
            Event::Movement(e) => &e.user_id,
            Event::Sleep(e) => &e.user_id,
            Event::Stress(e) => &e.user_id,
        }
    }
}

impl Timestamped for Event {
    fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Event::Food(e) => e.timestamp,
            Event::Water(e) => e.timestamp,
            Event::Craving(e) => e.timestamp,
            Event::Movement(e) => e.timestamp,
            Event::Sleep(e) => e.timestamp,
            Event::Stress(e) => e.timestamp,
        }
    }
}

/// Errors from the event store
#[derive(Error, Debug)]
pub enum StoreError {
    /// No event with that id for that user
    #[error("Event not found: {0}")]
    NotFound(Uuid),

    /// Unrecognized event kind in a request path
    #[error("Unknown event kind: {0}")]
    UnknownKind(String),

    /// Backend failure (remote store, serialization, ...)
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// The external persistence collaborator
///
/// Implementations return already-validated, typed records; the engine does
/// no schema validation of its own.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events for a user, across every type
    async fn events(&self, user_id: &str) -> StoreResult<EventSet>;

    /// Persist one event (id and timestamp already assigned by the caller)
    async fn insert(&self, event: Event) -> StoreResult<()>;

    /// Delete one event by kind and id
    async fn delete(&self, user_id: &str, kind: EventKind, id: Uuid) -> StoreResult<()>;
}

/// In-memory event store
///
/// Keeps each user's `EventSet` behind an async RwLock. Good enough for the
/// bundled API server and for tests; a remote store implements the same
/// trait.
#[derive(Default)]
pub struct InMemoryEventStore {
    users: RwLock<HashMap<String, EventSet>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with at least one event (for health reporting)
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn events(&self, user_id: &str) -> StoreResult<EventSet> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned().unwrap_or_default())
    }

    async fn insert(&self, event: Event) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let set = users.entry(event.user_id().to_string()).or_default();

        match event {
            Event::Food(e) => set.food.push(e),
            Event::Water(e) => set.water.push(e),
            Event::Craving(e) => set.cravings.push(e),
            Event::Movement(e) => set.movement.push(e),
            Event::Sleep(e) => set.sleep.push(e),
            Event::Stress(e) => set.stress.push(e),
        }

        Ok(())
    }

    async fn delete(&self, user_id: &str, kind: EventKind, id: Uuid) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let set = users.get_mut(user_id).ok_or(StoreError::NotFound(id))?;

        let removed = match kind {
            EventKind::Food => remove_by_id(&mut set.food, |e| e.id, id),
            EventKind::Water => remove_by_id(&mut set.water, |e| e.id, id),
            EventKind::Craving => remove_by_id(&mut set.cravings, |e| e.id, id),
            EventKind::Movement => remove_by_id(&mut set.movement, |e| e.id, id),
            EventKind::Sleep => remove_by_id(&mut set.sleep, |e| e.id, id),
            EventKind::Stress => remove_by_id(&mut set.stress, |e| e.id, id),
        };

        if removed {
            Ok(())
        } else {
            Err(StoreError::NotFound(id))
        }
    }
}

/// Remove the first element whose id matches; returns whether one was removed
fn remove_by_id<T>(events: &mut Vec<T>, id_of: impl Fn(&T) -> Uuid, id: Uuid) -> bool {
    let before = events.len();
    events.retain(|e| id_of(e) != id);
    events.len() < before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = InMemoryEventStore::new();
        store
            .insert(Event::Water(WaterEvent::new("u1", 16.0)))
            .await
            .unwrap();
        store
            .insert(Event::Sleep(SleepEvent::new("u1", 4)))
            .await
            .unwrap();

        let set = store.events("u1").await.unwrap();
        assert_eq!(set.water.len(), 1);
        assert_eq!(set.sleep.len(), 1);
        assert_eq!(set.len(), 2);
    }

    #[tokio::test]
    async fn test_events_for_unknown_user_is_empty() {
        let store = InMemoryEventStore::new();
        let set = store.events("nobody").await.unwrap();
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = InMemoryEventStore::new();
        store
            .insert(Event::Water(WaterEvent::new("u1", 16.0)))
            .await
            .unwrap();

        assert!(store.events("u2").await.unwrap().is_empty());
        assert_eq!(store.events("u1").await.unwrap().water.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let store = InMemoryEventStore::new();
        let keep = WaterEvent::new("u1", 8.0);
        let drop = WaterEvent::new("u1", 12.0);
        let drop_id = drop.id;

        store.insert(Event::Water(keep.clone())).await.unwrap();
        store.insert(Event::Water(drop)).await.unwrap();

        store
            .delete("u1", EventKind::Water, drop_id)
            .await
            .unwrap();

        let set = store.events("u1").await.unwrap();
        assert_eq!(set.water.len(), 1);
        assert_eq!(set.water[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_delete_missing_event_errors() {
        let store = InMemoryEventStore::new();
        store
            .insert(Event::Water(WaterEvent::new("u1", 8.0)))
            .await
            .unwrap();

        let err = store
            .delete("u1", EventKind::Water, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_event_kind_parsing() {
        assert_eq!("food".parse::<EventKind>().unwrap(), EventKind::Food);
        assert_eq!(
            "cravings".parse::<EventKind>().unwrap(),
            EventKind::Craving
        );
        assert!("weather".parse::<EventKind>().is_err());
    }

    #[test]
    fn test_event_enum_tagging() {
        let event = Event::Stress(StressEvent::new("u1", 2));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"stress\""));
    }
}
