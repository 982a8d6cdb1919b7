//! Capabilities and overrides.
//!
//! A [`Role`] is a zero-sized marker naming an abstract capability ("build cost
//! calculator", "urbanize action handler"). It fixes the service type callers
//! receive and supplies the generic default. An [`Override`] pairs a role with
//! a variant-specific factory.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use super::injector::Injector;
use crate::core::ConfigError;

/// An abstract capability resolvable through the [`Injector`].
///
/// ```
/// use std::rc::Rc;
/// use rail_rules::context::{Injector, Role};
/// use rail_rules::core::ConfigError;
///
/// trait Greeter {
///     fn greet(&self) -> String;
/// }
///
/// struct Plain;
/// impl Greeter for Plain {
///     fn greet(&self) -> String {
///         "hello".into()
///     }
/// }
///
/// struct GreeterRole;
/// impl Role for GreeterRole {
///     type Service = dyn Greeter;
///     const NAME: &'static str = "Greeter";
///
///     fn generic(_: &mut Injector) -> Result<Rc<dyn Greeter>, ConfigError> {
///         Ok(Rc::new(Plain))
///     }
/// }
/// ```
pub trait Role: 'static {
    /// What resolving this role hands out, usually `dyn SomeTrait`.
    type Service: ?Sized + 'static;

    /// Name used in diagnostics and cycle reports.
    const NAME: &'static str;

    /// Build the generic default implementation.
    fn generic(injector: &mut Injector) -> Result<Rc<Self::Service>, ConfigError>;
}

/// Factory producing a role's service.
pub type Factory<R> = fn(&mut Injector) -> Result<Rc<<R as Role>::Service>, ConfigError>;

/// A variant-declared substitute for a role's generic default.
#[derive(Clone)]
pub struct Override {
    role: TypeId,
    role_name: &'static str,
    label: &'static str,
    factory: Arc<dyn Any + Send + Sync>,
}

impl Override {
    /// Substitute `factory` for role `R`. `label` names the implementation.
    #[must_use]
    pub fn of<R: Role>(label: &'static str, factory: Factory<R>) -> Self {
        Self {
            role: TypeId::of::<R>(),
            role_name: R::NAME,
            label,
            factory: Arc::new(factory),
        }
    }

    /// Whether this entry targets role `R`.
    #[must_use]
    pub fn targets<R: Role>(&self) -> bool {
        self.role == TypeId::of::<R>()
    }

    pub(crate) fn role_id(&self) -> TypeId {
        self.role
    }

    #[must_use]
    pub fn role_name(&self) -> &'static str {
        self.role_name
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub(crate) fn factory<R: Role>(&self) -> Result<Factory<R>, ConfigError> {
        self.factory
            .downcast_ref::<Factory<R>>()
            .copied()
            .ok_or(ConfigError::OverrideTypeMismatch(R::NAME))
    }
}

impl fmt::Debug for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Override")
            .field("role", &self.role_name)
            .field("label", &self.label)
            .finish()
    }
}
