//! Name-keyed publish/subscribe registry with per-name enable gating.
//!
//! Handlers are invoked synchronously in registration order. The bus is a
//! cheap, cloneable handle over shared single-threaded state, so a handler
//! may call back into the bus (subscribe, unsubscribe, emit, toggle state)
//! while an emission is in flight.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use orbis::events::{EventBus, Handler};
//!
//! let bus: EventBus<i32> = EventBus::new();
//! let seen = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&seen);
//! let handler = Handler::new(move |_bus, value: &i32| sink.set(*value));
//!
//! let _sub = bus.on("x", handler.clone());
//! let _ = bus.emit("x", &7);
//! assert_eq!(seen.get(), 7);
//!
//! let _ = bus.off("x", Some(&handler));
//! let _ = bus.emit("x", &9);
//! assert_eq!(seen.get(), 7);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::{FxHashMap, FxHashSet};

type HandlerFn<A> = dyn Fn(&EventBus<A>, &A);

/// A reference-counted event callback.
///
/// Identity is by allocation: two `Handler`s are the same handler when one
/// was cloned from the other. [`EventBus::off`] matches on that identity.
pub struct Handler<A>(Rc<HandlerFn<A>>);

impl<A> Handler<A> {
    /// Wrap a closure as a handler.
    pub fn new(f: impl Fn(&EventBus<A>, &A) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Whether both values refer to the same underlying callback.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }

    fn call(&self, bus: &EventBus<A>, payload: &A) {
        (self.0)(bus, payload);
    }
}

impl<A> Clone for Handler<A> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<A> fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

impl<A, F> From<F> for Handler<A>
where
    F: Fn(&EventBus<A>, &A) + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

/// One or more event names accepted by [`EventBus::on`].
pub trait EventNames {
    /// Flatten into owned names.
    fn into_names(self) -> Vec<String>;
}

impl EventNames for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl EventNames for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl EventNames for &[&str] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|name| (*name).to_owned()).collect()
    }
}

impl<const N: usize> EventNames for [&str; N] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|name| (*name).to_owned()).collect()
    }
}

impl EventNames for Vec<&str> {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(str::to_owned).collect()
    }
}

impl EventNames for Vec<String> {
    fn into_names(self) -> Vec<String> {
        self
    }
}

/// How many times a registration may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delivery {
    /// Fires on every emission until removed.
    Every,
    /// Removed from the list right before its first invocation.
    Once,
}

/// A single subscription record.
struct Registration<A> {
    id: u64,
    handler: Handler<A>,
    delivery: Delivery,
}

struct Registry<A> {
    handlers: FxHashMap<String, Vec<Registration<A>>>,
    /// Absent means enabled.
    enabled: FxHashMap<String, bool>,
    emitted: FxHashSet<String>,
    next_id: u64,
}

impl<A> Registry<A> {
    fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
            enabled: FxHashMap::default(),
            emitted: FxHashSet::default(),
            next_id: 0,
        }
    }

    fn register(&mut self, name: String, handler: Handler<A>, delivery: Delivery) {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.entry(name).or_default().push(Registration {
            id,
            handler,
            delivery,
        });
    }

    fn remove_handler(&mut self, name: &str, handler: &Handler<A>) {
        if let Some(list) = self.handlers.get_mut(name) {
            list.retain(|reg| !reg.handler.same(handler));
        }
    }

    /// Consume a pending invocation: returns whether the registration is
    /// still live, dropping one-shot registrations as they fire.
    fn claim(&mut self, name: &str, id: u64) -> bool {
        let Some(list) = self.handlers.get_mut(name) else {
            return false;
        };
        let Some(pos) = list.iter().position(|reg| reg.id == id) else {
            return false;
        };
        if list[pos].delivery == Delivery::Once {
            let _ = list.remove(pos);
        }
        true
    }
}

/// Publish/subscribe register keyed by event name.
///
/// Cloning an `EventBus` yields another handle to the same registry.
pub struct EventBus<A> {
    registry: Rc<RefCell<Registry<A>>>,
}

impl<A> EventBus<A> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new())),
        }
    }

    /// Register `handler` under one or more names.
    ///
    /// The returned [`Subscription`] removes exactly this handler from
    /// exactly these names when [`unsubscribe`](Subscription::unsubscribe)
    /// is called. Dropping it leaves the registration in place.
    pub fn on(
        &self,
        names: impl EventNames,
        handler: impl Into<Handler<A>>,
    ) -> Subscription<A> {
        let names = names.into_names();
        let handler = handler.into();
        {
            let mut registry = self.registry.borrow_mut();
            for name in &names {
                registry.register(name.clone(), handler.clone(), Delivery::Every);
            }
        }
        Subscription {
            registry: Rc::downgrade(&self.registry),
            names,
            handler,
        }
    }

    /// Register `handler` to run at most once for `name`.
    ///
    /// The registration is removed just before it is invoked. It can also
    /// be removed beforehand with `off(name, Some(&handler))`.
    pub fn once(
        &self,
        name: &str,
        handler: impl Into<Handler<A>>,
    ) -> Subscription<A> {
        let handler = handler.into();
        self.registry.borrow_mut().register(
            name.to_owned(),
            handler.clone(),
            Delivery::Once,
        );
        Subscription {
            registry: Rc::downgrade(&self.registry),
            names: vec![name.to_owned()],
            handler,
        }
    }

    /// Remove registrations for `name`.
    ///
    /// With a handler, every registration of that handler (persistent or
    /// one-shot) is removed. Without one, the whole entry goes, including
    /// its enabled flag. Unknown names are ignored.
    pub fn off(&self, name: &str, handler: Option<&Handler<A>>) -> &Self {
        let mut registry = self.registry.borrow_mut();
        match handler {
            Some(handler) => registry.remove_handler(name, handler),
            None => {
                let _ = registry.handlers.remove(name);
                let _ = registry.enabled.remove(name);
            }
        }
        drop(registry);
        self
    }

    /// Invoke every handler registered for `name`, in registration order.
    ///
    /// Disabled names return immediately and are not recorded as emitted.
    /// Handlers added during this call wait for the next emission; handlers
    /// removed during this call are skipped if not yet reached.
    pub fn emit(&self, name: &str, payload: &A) -> &Self {
        let pending: Vec<(u64, Handler<A>)> = {
            let mut registry = self.registry.borrow_mut();
            if registry.enabled.get(name) == Some(&false) {
                return self;
            }
            let _ = registry.emitted.insert(name.to_owned());
            registry
                .handlers
                .get(name)
                .map(|list| {
                    list.iter()
                        .map(|reg| (reg.id, reg.handler.clone()))
                        .collect()
                })
                .unwrap_or_default()
        };

        for (id, handler) in pending {
            let live = self.registry.borrow_mut().claim(name, id);
            if live {
                handler.call(self, payload);
            }
        }
        self
    }

    /// Enable or disable emission for `name`, independent of registration.
    pub fn set_event_state(&self, name: &str, enabled: bool) {
        let _ = self
            .registry
            .borrow_mut()
            .enabled
            .insert(name.to_owned(), enabled);
    }

    /// Whether `name` is enabled. Names never configured read as enabled.
    #[must_use]
    pub fn event_state(&self, name: &str) -> bool {
        self.registry.borrow().enabled.get(name) != Some(&false)
    }

    /// Drop handlers and enabled flag for `name`, or for every name when
    /// `None`.
    pub fn clear_handlers(&self, name: Option<&str>) {
        let mut registry = self.registry.borrow_mut();
        match name {
            Some(name) => {
                let _ = registry.handlers.remove(name);
                let _ = registry.enabled.remove(name);
            }
            None => {
                registry.handlers.clear();
                registry.enabled.clear();
            }
        }
    }

    /// Number of live registrations under `name`.
    #[must_use]
    pub fn handler_count(&self, name: &str) -> usize {
        self.registry.borrow().handlers.get(name).map_or(0, Vec::len)
    }

    /// Whether `name` has been emitted at least once while enabled.
    #[must_use]
    pub fn has_emitted(&self, name: &str) -> bool {
        self.registry.borrow().emitted.contains(name)
    }

    /// Every name emitted so far, sorted.
    #[must_use]
    pub fn emitted_events(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.registry.borrow().emitted.iter().cloned().collect();
        names.sort();
        names
    }
}

impl<A> Default for EventBus<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for EventBus<A> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<A> fmt::Debug for EventBus<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("EventBus")
            .field("names", &registry.handlers.len())
            .field("disabled", &registry.enabled.values().filter(|e| !**e).count())
            .field("emitted", &registry.emitted.len())
            .finish()
    }
}

/// Handle returned by [`EventBus::on`] and [`EventBus::once`].
#[must_use = "dropping a Subscription keeps the handler registered"]
pub struct Subscription<A> {
    registry: Weak<RefCell<Registry<A>>>,
    names: Vec<String>,
    handler: Handler<A>,
}

impl<A> Subscription<A> {
    /// Remove the subscribed handler from the names it was registered
    /// under. A no-op if the bus has been dropped.
    pub fn unsubscribe(self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        for name in &self.names {
            registry.remove_handler(name, &self.handler);
        }
    }

    /// The handler this subscription registered.
    #[must_use]
    pub fn handler(&self) -> &Handler<A> {
        &self.handler
    }

    /// Names this subscription registered under.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<A> fmt::Debug for Subscription<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("names", &self.names)
            .field("handler", &self.handler)
            .finish()
    }
}
