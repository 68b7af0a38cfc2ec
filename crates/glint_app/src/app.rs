//! The application's handle on the shell

use crate::error::Result;
use crate::events::{EventReceiver, EventSender};
use crate::publish::{PublishResult, PublishSender};
use glint_platform::{Event, ResizeEvent};

/// Event filter, applied by [`App::filter`]
pub type Filter = Box<dyn FnMut(Event) -> Event + Send + 'static>;

/// Handle given to the application callback
///
/// Owns the receiving end of the event stream and the publish path. The
/// blocking methods must be called from the application task, never from
/// async code.
pub struct App {
    events: EventReceiver,
    paint: EventSender,
    publisher: PublishSender,
    filters: Vec<Filter>,
    size: Option<ResizeEvent>,
}

impl App {
    pub(crate) fn new(events: EventReceiver, paint: EventSender, publisher: PublishSender) -> Self {
        Self {
            events,
            paint,
            publisher,
            filters: Vec::new(),
            size: None,
        }
    }

    /// Block until the next event
    ///
    /// The handle keeps its own sender for paint requests, so the stream
    /// never ends while the handle is alive. After [`Event::Stop`] this
    /// blocks until another event arrives; return from the application
    /// callback instead of waiting.
    pub fn next_event(&mut self) -> Option<Event> {
        let event = self.events.blocking_recv();
        self.observe(event)
    }

    /// Take the next event if one is already queued
    pub fn try_next_event(&mut self) -> Option<Event> {
        let event = self.events.try_recv();
        self.observe(event)
    }

    /// Wait asynchronously for the next event
    pub async fn recv_event(&mut self) -> Option<Event> {
        let event = self.events.recv().await;
        self.observe(event)
    }

    fn observe(&mut self, event: Option<Event>) -> Option<Event> {
        if let Some(Event::Resize(resize)) = event {
            self.size = Some(resize);
        }
        event
    }

    /// Publish the current frame and block until the shell acknowledges it
    ///
    /// The acknowledgment arrives after the buffer swap and the next vsync
    /// tick, which paces a render loop to the configured frame rate.
    pub fn publish(&self) -> Result<PublishResult> {
        self.publisher.publish()
    }

    /// Asynchronous form of [`App::publish`]
    pub async fn publish_async(&self) -> Result<PublishResult> {
        self.publisher.publish_async().await
    }

    /// Queue a [`Event::Paint`] hint behind any pending events
    pub fn request_paint(&self) {
        self.paint.send(Event::Paint);
    }

    /// Register a filter run by [`App::filter`]
    pub fn register_filter<F>(&mut self, filter: F)
    where
        F: FnMut(Event) -> Event + Send + 'static,
    {
        self.filters.push(Box::new(filter));
    }

    /// Pass an event through every registered filter, in registration order
    pub fn filter(&mut self, event: Event) -> Event {
        self.filters
            .iter_mut()
            .fold(event, |event, filter| filter(event))
    }

    /// The most recent resize seen by this handle
    pub fn size(&self) -> Option<ResizeEvent> {
        self.size
    }
}
