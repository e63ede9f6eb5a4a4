//! A single owned component value behind a uniform interface.
//!
//! An [`ErasedComponent`] moves through three states:
//!
//! ```text
//! Empty --create()--> Live --destroy()--> Destroyed
//! ```
//!
//! Only a live component has a value. Every transition other than the two
//! above is rejected with an error instead of touching freed or missing
//! memory.

use std::any::Any;
use std::fmt;
use std::io::{Read, Write};

use crate::component::{Component, ComponentMeta, ComponentValue};
use crate::error::EcsError;
use crate::kind::ComponentKind;

enum Slot {
    Empty,
    Live(Box<dyn ComponentValue>),
    Destroyed,
}

/// One type-erased component value, owned by exactly one array entry.
pub struct ErasedComponent {
    meta: ComponentMeta,
    slot: Slot,
}

impl ErasedComponent {
    /// An empty component of `kind`. Call [`ErasedComponent::create`] before
    /// use.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            meta: kind.meta(),
            slot: Slot::Empty,
        }
    }

    /// A live component holding `value`.
    #[must_use]
    pub fn from_value<T: Component>(value: T) -> Self {
        Self {
            meta: T::meta(),
            slot: Slot::Live(Box::new(value)),
        }
    }

    /// The kind this component is filed under.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.meta.kind
    }

    /// Returns `true` between `create()` and `destroy()`.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self.slot, Slot::Live(_))
    }

    /// Allocate and default-initialise the value.
    pub fn create(&mut self) -> Result<(), EcsError> {
        match self.slot {
            Slot::Empty => {
                self.slot = Slot::Live((self.meta.create_fn)());
                Ok(())
            }
            Slot::Live(_) | Slot::Destroyed => Err(EcsError::AlreadyCreated(self.kind())),
        }
    }

    /// Release the value.
    pub fn destroy(&mut self) -> Result<(), EcsError> {
        match self.slot {
            Slot::Live(_) => {
                self.slot = Slot::Destroyed;
                Ok(())
            }
            Slot::Empty => Err(EcsError::NotCreated(self.kind())),
            Slot::Destroyed => Err(EcsError::AlreadyDestroyed(self.kind())),
        }
    }

    /// Drop the value if there is one, without treating a missing value as
    /// misuse. Returns `true` if it was live.
    pub(crate) fn release(&mut self) -> bool {
        let live = self.is_live();
        if live {
            self.slot = Slot::Destroyed;
        }
        live
    }

    fn value(&self) -> Result<&dyn ComponentValue, EcsError> {
        match &self.slot {
            Slot::Live(value) => Ok(&**value),
            _ => Err(EcsError::NotCreated(self.kind())),
        }
    }

    fn value_mut(&mut self) -> Result<&mut dyn ComponentValue, EcsError> {
        let kind = self.kind();
        match &mut self.slot {
            Slot::Live(value) => Ok(&mut **value),
            _ => Err(EcsError::NotCreated(kind)),
        }
    }

    /// The live value as opaque memory.
    pub fn pointer(&self) -> Result<&dyn Any, EcsError> {
        self.value().map(|value| value.as_any())
    }

    /// The live value as mutable opaque memory.
    pub fn pointer_mut(&mut self) -> Result<&mut dyn Any, EcsError> {
        self.value_mut().map(|value| value.as_any_mut())
    }

    /// The live value as its concrete type.
    pub fn downcast_ref<T: Component>(&self) -> Result<&T, EcsError> {
        let actual = self.kind();
        self.pointer()?
            .downcast_ref::<T>()
            .ok_or(EcsError::KindMismatch {
                expected: T::KIND,
                actual,
            })
    }

    /// The live value as its concrete type, mutably.
    pub fn downcast_mut<T: Component>(&mut self) -> Result<&mut T, EcsError> {
        let actual = self.kind();
        self.pointer_mut()?
            .downcast_mut::<T>()
            .ok_or(EcsError::KindMismatch {
                expected: T::KIND,
                actual,
            })
    }

    /// Write the value's fixed-layout payload.
    pub fn encode(&self, sink: &mut dyn Write) -> Result<(), EcsError> {
        self.value()?.encode(sink)
    }

    /// Overwrite the live value from the stream.
    pub fn decode(&mut self, source: &mut dyn Read) -> Result<(), EcsError> {
        self.value_mut()?.decode(source)
    }
}

impl Clone for ErasedComponent {
    fn clone(&self) -> Self {
        let slot = match &self.slot {
            Slot::Empty => Slot::Empty,
            Slot::Live(value) => Slot::Live(value.clone_value()),
            Slot::Destroyed => Slot::Destroyed,
        };
        Self {
            meta: self.meta,
            slot,
        }
    }
}

impl PartialEq for ErasedComponent {
    fn eq(&self, other: &Self) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        match (&self.slot, &other.slot) {
            (Slot::Live(a), Slot::Live(b)) => a.eq_value(&**b),
            (Slot::Empty, Slot::Empty) | (Slot::Destroyed, Slot::Destroyed) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for ErasedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Slot::Live(value) => fmt::Debug::fmt(value, f),
            Slot::Empty => write!(f, "{}(<empty>)", self.kind()),
            Slot::Destroyed => write!(f, "{}(<destroyed>)", self.kind()),
        }
    }
}
