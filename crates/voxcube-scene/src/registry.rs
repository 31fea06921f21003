//! Name-keyed scene factories.

use std::fmt;

use indexmap::IndexMap;

use crate::error::SceneError;
use crate::plane_shift::PlaneShift;
use crate::rain::Rain;
use crate::scene::Scene;

/// Builds a fresh scene from a seed.
pub type SceneFactory = Box<dyn Fn(u64) -> Result<Box<dyn Scene>, SceneError> + Send + Sync>;

/// Registered scenes, in registration order.
///
/// ```
/// use voxcube_scene::{Scene, SceneRegistry};
///
/// let registry = SceneRegistry::builtin();
/// assert_eq!(registry.names().collect::<Vec<_>>(), ["plane_shift", "rain"]);
/// let scene = registry.build("rain", 7).unwrap();
/// assert_eq!(scene.name(), "rain");
/// assert!(registry.build("fireworks", 7).is_err());
/// ```
#[derive(Default)]
pub struct SceneRegistry {
    factories: IndexMap<String, SceneFactory>,
}

impl SceneRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `plane_shift` and `rain` with default parameters.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("plane_shift", |seed| {
            let scene = PlaneShift::builder().seed(seed).build()?;
            Ok(Box::new(scene) as Box<dyn Scene>)
        });
        registry.register("rain", |seed| {
            let scene = Rain::builder().seed(seed).build()?;
            Ok(Box::new(scene) as Box<dyn Scene>)
        });
        registry
    }

    /// Register `factory` under `name`, replacing any previous entry in
    /// place.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(u64) -> Result<Box<dyn Scene>, SceneError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
        self
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Number of registered scenes.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Construct the scene registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownScene`] if `name` is not registered, or
    /// whatever the factory returns.
    pub fn build(&self, name: &str, seed: u64) -> Result<Box<dyn Scene>, SceneError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SceneError::UnknownScene {
                name: name.to_string(),
            })?;
        factory(seed)
    }
}

impl fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneRegistry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
