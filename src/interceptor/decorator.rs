//! Decorator construction and per-instance instrumentation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use super::dispatch::Chain;
use super::intercepted::{Intercepted, StandIn};
use super::table::{Member, MethodTable};
use super::{Interceptable, CONSTRUCTOR};
use crate::interfaces::{SourceName, Wrapper};

/// Ordered wrapper chain, outermost first.
///
/// Every wrapper observes every call: the first wrapper's `run_*` receives
/// an original that runs the second wrapper, and so on down to the method.
#[derive(Clone, Default)]
pub struct Decorator {
    chain: Vec<Arc<dyn Wrapper>>,
}

/// Build a decorator from one wrapper or an outer-to-inner list.
pub fn decorate(wrappers: impl Into<Decorator>) -> Decorator {
    wrappers.into()
}

impl Decorator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a wrapper inside the existing ones.
    pub fn then(mut self, wrapper: Arc<dyn Wrapper>) -> Self {
        self.chain.push(wrapper);
        self
    }

    /// Wrapper names, outermost first.
    pub fn wrapper_names(&self) -> Vec<&str> {
        self.chain.iter().map(|w| w.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Produce the decorated form of `T`, building its prototype table once.
    pub fn apply<T: Interceptable>(&self) -> DecoratedClass<T> {
        let mut prototype = MethodTable::new(T::CLASS_NAME);
        T::prototype(&mut prototype);

        debug!(
            class = T::CLASS_NAME,
            members = prototype.len(),
            wrappers = ?self.wrapper_names(),
            "Decorated class"
        );

        DecoratedClass {
            chain: self.chain.clone().into(),
            prototype: Arc::new(prototype),
        }
    }
}

impl From<Arc<dyn Wrapper>> for Decorator {
    fn from(wrapper: Arc<dyn Wrapper>) -> Self {
        Self {
            chain: vec![wrapper],
        }
    }
}

impl From<Vec<Arc<dyn Wrapper>>> for Decorator {
    fn from(chain: Vec<Arc<dyn Wrapper>>) -> Self {
        Self { chain }
    }
}

/// A type with its interception applied.
///
/// Holds the wrapper chain and the type-level method table. Each call to
/// [`construct`](Self::construct) instruments one new instance.
pub struct DecoratedClass<T> {
    chain: Chain,
    prototype: Arc<MethodTable<T>>,
}

impl<T> Clone for DecoratedClass<T> {
    fn clone(&self) -> Self {
        Self {
            chain: Arc::clone(&self.chain),
            prototype: Arc::clone(&self.prototype),
        }
    }
}

impl<T: Interceptable> DecoratedClass<T> {
    /// Reported name, identical to the base type's.
    pub fn name(&self) -> &'static str {
        T::CLASS_NAME
    }

    /// Apply one more wrapper on the outside of the existing chain.
    pub fn decorate(self, wrapper: Arc<dyn Wrapper>) -> Self {
        let chain: Vec<Arc<dyn Wrapper>> = std::iter::once(wrapper)
            .chain(self.chain.iter().cloned())
            .collect();
        Self {
            chain: chain.into(),
            prototype: self.prototype,
        }
    }

    /// Wrapper names, outermost first.
    pub fn wrapper_names(&self) -> Vec<&str> {
        self.chain.iter().map(|w| w.name()).collect()
    }

    /// Instrument a freshly built instance.
    ///
    /// The instance is constructed by the caller, so construction logic
    /// never runs through the wrappers. Candidate members are the
    /// instance's own members followed by the prototype's; data fields
    /// are recorded and left alone.
    pub fn construct(&self, instance: T) -> Intercepted<T> {
        let mut own = MethodTable::new(T::CLASS_NAME);
        instance.own_members(&mut own);

        let mut stand_ins = HashMap::new();
        let mut fields = HashSet::new();
        let mut order = Vec::new();

        for (name, member) in own.iter().chain(self.prototype.iter()) {
            if name == CONSTRUCTOR || stand_ins.contains_key(name) || fields.contains(name) {
                continue;
            }
            match member {
                Member::Method(method) => {
                    stand_ins.insert(
                        name.to_string(),
                        StandIn {
                            label: SourceName::new(T::CLASS_NAME, name),
                            method: method.clone(),
                        },
                    );
                    order.push(name.to_string());
                }
                Member::Field => {
                    fields.insert(name.to_string());
                }
            }
        }

        debug!(
            class = T::CLASS_NAME,
            own = own.len(),
            intercepted = stand_ins.len(),
            skipped = fields.len(),
            "Instrumented instance"
        );

        Intercepted::new(Arc::new(instance), Arc::clone(&self.chain), stand_ins, fields, order)
    }
}
