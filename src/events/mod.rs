//! Event model and store seam
//!
//! - [`types`]: the six typed event records and `EventSet`
//! - [`store`]: the `EventStore` trait plus the in-memory implementation

pub mod store;
pub mod types;

pub use store::{Event, EventKind, EventStore, InMemoryEventStore, StoreError, StoreResult};
pub use types::{
    Confidence, CravingEvent, EventSet, FoodEvent, MealTag, MovementEvent, MovementIntensity,
    SleepEvent, StressEvent, Timestamped, WaterEvent,
};
