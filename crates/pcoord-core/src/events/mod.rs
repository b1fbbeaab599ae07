use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

/// Chart-wide event bus
///
/// Handlers run synchronously inside `publish`. A handler must not publish
/// on the same bus, the handler table is locked for the whole dispatch.
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Events published while rendering and interacting with a chart
pub mod events {
    use serde::{Deserialize, Serialize};
    use super::Event;
    use crate::state::ChartId;

    /// The kind of element a draw event describes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum DrawKind {
        Grid,
        Label,
        Line,
        Rect,
    }

    /// Which axis a grid line or label belongs to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum AxisKind {
        X,
        Y,
    }

    /// Geometry carried by a draw event
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub enum DrawGeometry {
        Line { x1: f64, y1: f64, x2: f64, y2: f64 },
        Rect { x: f64, y: f64, width: f64, height: f64 },
        Label { x: f64, y: f64, width: f64, height: f64, text: String },
    }

    /// Published once for every element drawn during a render pass
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct DrawEvent {
        pub chart_id: ChartId,
        pub kind: DrawKind,
        pub axis: Option<AxisKind>,
        /// Tick, segment or bucket index inside the owning group
        pub index: usize,
        /// Record index for series segments
        pub series: Option<usize>,
        /// Original dimension index the element is attached to
        pub dimension: Option<usize>,
        /// Class names of the drawn element
        pub class_name: String,
        pub geometry: DrawGeometry,
    }

    /// A render pass was abandoned before anything was drawn
    #[derive(Debug, Clone)]
    pub struct RenderAborted {
        pub chart_id: ChartId,
        pub reason: String,
    }

    /// A render pass finished
    #[derive(Debug, Clone)]
    pub struct RenderCompleted {
        pub chart_id: ChartId,
        pub displayed_dimensions: usize,
        pub records: usize,
        pub segments: usize,
    }

    /// Record visibility was recomputed from the ruler thresholds
    #[derive(Debug, Clone)]
    pub struct RecordsFiltered {
        pub chart_id: ChartId,
        pub visible: usize,
        pub hidden: usize,
    }

    // Implement Event trait for all event types
    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        DrawEvent,
        RenderAborted,
        RenderCompleted,
        RecordsFiltered
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Subscribe a closure that receives the concrete event type
    pub fn subscribe_fn<E, F>(&self, mut f: F)
    where
        E: Event,
        F: FnMut(&E) + Send + Sync + 'static,
    {
        self.subscribe::<E>(handler_from_fn(move |event| {
            if let Some(event) = event.as_any().downcast_ref::<E>() {
                f(event);
            }
        }));
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }

    /// Whether anyone listens for events of this type
    pub fn has_subscribers<E: Event>(&self) -> bool {
        let type_id = std::any::TypeId::of::<E>();
        self.handlers
            .lock()
            .get(&type_id)
            .map(|h| !h.is_empty())
            .unwrap_or(false)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}
