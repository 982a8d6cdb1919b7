//! Per-game dependency resolver.

use std::any::{Any, TypeId};
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::role::Role;
use crate::core::ConfigError;
use crate::variants::GameSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Frame {
    role: TypeId,
    name: &'static str,
    generic: bool,
}

/// Execution context for one game instance.
///
/// Resolves each [`Role`] to a memoized singleton: the last override in the
/// settings bundle targeting the role wins, otherwise the role's generic
/// default is built. Resolution is lazy and recursive; a factory may resolve
/// its own dependencies, and a dependency cycle is reported as
/// [`ConfigError::CyclicDependency`].
///
/// Everything depending on a role sees only the role's service type, so an
/// override is invisible to the rest of the engine.
pub struct Injector {
    settings: Arc<GameSettings>,
    player_count: usize,
    cache: FxHashMap<TypeId, Box<dyn Any>>,
    resolved: Vec<&'static str>,
    stack: Vec<Frame>,
}

impl Injector {
    /// Create a context for a game using `settings`.
    #[must_use]
    pub fn new(settings: Arc<GameSettings>, player_count: usize) -> Self {
        Self {
            settings,
            player_count,
            cache: FxHashMap::default(),
            resolved: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// The settings bundle this game was built from.
    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Shared handle to the settings bundle.
    #[must_use]
    pub fn settings_arc(&self) -> Arc<GameSettings> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Resolve role `R`, building it on first use.
    pub fn resolve<R: Role>(&mut self) -> Result<Rc<R::Service>, ConfigError> {
        let id = TypeId::of::<R>();
        if let Some(cached) = self.cache.get(&id) {
            return cached
                .downcast_ref::<Rc<R::Service>>()
                .cloned()
                .ok_or(ConfigError::OverrideTypeMismatch(R::NAME));
        }

        let frame = Frame {
            role: id,
            name: R::NAME,
            generic: false,
        };
        self.enter(frame)?;
        let built = self.build::<R>();
        self.stack.pop();
        let service = built?;

        self.cache.insert(id, Box::new(Rc::clone(&service)));
        self.resolved.push(R::NAME);
        Ok(service)
    }

    /// Build a fresh generic implementation of `R`, ignoring overrides.
    ///
    /// Decorating overrides use this to wrap the behaviour they extend.
    pub fn generic<R: Role>(&mut self) -> Result<Rc<R::Service>, ConfigError> {
        let frame = Frame {
            role: TypeId::of::<R>(),
            name: R::NAME,
            generic: true,
        };
        self.enter(frame)?;
        let built = R::generic(self);
        self.stack.pop();
        built
    }

    /// Whether the settings bundle overrides role `R`.
    #[must_use]
    pub fn is_overridden<R: Role>(&self) -> bool {
        self.settings.override_for(TypeId::of::<R>()).is_some()
    }

    /// Roles resolved so far, in resolution order.
    #[must_use]
    pub fn resolved_roles(&self) -> &[&'static str] {
        &self.resolved
    }

    fn enter(&mut self, frame: Frame) -> Result<(), ConfigError> {
        if let Some(start) = self.stack.iter().position(|f| *f == frame) {
            let mut path: Vec<_> = self.stack[start..].iter().map(|f| f.name).collect();
            path.push(frame.name);
            return Err(ConfigError::CyclicDependency(path));
        }
        self.stack.push(frame);
        Ok(())
    }

    fn build<R: Role>(&mut self) -> Result<Rc<R::Service>, ConfigError> {
        let chosen = self
            .settings
            .override_for(TypeId::of::<R>())
            .map(|o| (o.label(), o.factory::<R>()));

        match chosen {
            Some((label, factory)) => {
                debug!(role = R::NAME, implementation = label, "resolving override");
                factory?(self)
            }
            None => {
                debug!(role = R::NAME, "resolving generic default");
                R::generic(self)
            }
        }
    }
}

impl std::fmt::Debug for Injector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injector")
            .field("variant", &self.settings.id())
            .field("player_count", &self.player_count)
            .field("resolved", &self.resolved)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Override;
    use crate::map::Grid;

    trait Label {
        fn label(&self) -> String;
    }

    struct Fixed(&'static str);

    impl Label for Fixed {
        fn label(&self) -> String {
            self.0.to_string()
        }
    }

    struct Wrapped(Rc<dyn Label>);

    impl Label for Wrapped {
        fn label(&self) -> String {
            format!("wrapped {}", self.0.label())
        }
    }

    struct LabelRole;

    impl Role for LabelRole {
        type Service = dyn Label;
        const NAME: &'static str = "Label";

        fn generic(_: &mut Injector) -> Result<Rc<dyn Label>, ConfigError> {
            Ok(Rc::new(Fixed("generic")))
        }
    }

    struct LoopA;
    struct LoopB;

    impl Role for LoopA {
        type Service = dyn Label;
        const NAME: &'static str = "LoopA";

        fn generic(inj: &mut Injector) -> Result<Rc<dyn Label>, ConfigError> {
            inj.resolve::<LoopB>()
        }
    }

    impl Role for LoopB {
        type Service = dyn Label;
        const NAME: &'static str = "LoopB";

        fn generic(inj: &mut Injector) -> Result<Rc<dyn Label>, ConfigError> {
            inj.resolve::<LoopA>()
        }
    }

    fn injector(overrides: Vec<Override>) -> Injector {
        let settings = GameSettings::builder("test", "Test")
            .with_grid(Grid::default())
            .with_overrides(overrides)
            .build()
            .unwrap();
        Injector::new(Arc::new(settings), 3)
    }

    #[test]
    fn test_generic_when_not_overridden() {
        let mut inj = injector(vec![]);
        assert_eq!(inj.resolve::<LabelRole>().unwrap().label(), "generic");
        assert!(!inj.is_overridden::<LabelRole>());
    }

    #[test]
    fn test_last_override_wins() {
        let mut inj = injector(vec![
            Override::of::<LabelRole>("a", |_| Ok(Rc::new(Fixed("A")))),
            Override::of::<LabelRole>("b", |_| Ok(Rc::new(Fixed("B")))),
        ]);
        assert_eq!(inj.resolve::<LabelRole>().unwrap().label(), "B");
    }

    #[test]
    fn test_singleton_is_memoized() {
        let mut inj = injector(vec![]);
        let first = inj.resolve::<LabelRole>().unwrap();
        let second = inj.resolve::<LabelRole>().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(inj.resolved_roles(), &["Label"]);
    }

    #[test]
    fn test_decorator_wraps_generic() {
        let mut inj = injector(vec![Override::of::<LabelRole>("wrap", |inj| {
            Ok(Rc::new(Wrapped(inj.generic::<LabelRole>()?)))
        })]);
        assert_eq!(inj.resolve::<LabelRole>().unwrap().label(), "wrapped generic");
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut inj = injector(vec![]);
        let err = inj.resolve::<LoopA>().err().unwrap();
        assert_eq!(
            err,
            ConfigError::CyclicDependency(vec!["LoopA", "LoopB", "LoopA"])
        );
        // the failed attempt leaves nothing half-resolved
        assert!(inj.resolved_roles().is_empty());
    }
}
