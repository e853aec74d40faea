//! Registry of feature onboarding plugins.
//!
//! The registry never fails: duplicate registrations replace the previous
//! entry, dependencies on unregistered feature codes are ignored, and
//! dependency cycles are broken at the repeated node. Each case is logged.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use feature_onboarding_sdk::FeatureOnboardingPlugin;
use parking_lot::RwLock;
use tracing::{debug, warn};

/// Shared handle to a registered plugin.
pub type PluginRef = Arc<dyn FeatureOnboardingPlugin>;

/// Plugins keyed by feature code, kept in registration order.
///
/// Built once at bootstrap and shared through `Arc`; reads vastly outnumber
/// writes.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: RwLock<Vec<PluginRef>>,
}

impl PluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the plugin keyed by its feature code.
    ///
    /// A replacement keeps the original registration position.
    pub fn register(&self, plugin: PluginRef) {
        let code = plugin.feature_code().to_owned();
        let mut plugins = self.plugins.write();

        if let Some(slot) = plugins.iter_mut().find(|p| p.feature_code() == code) {
            warn!(
                feature_code = %code,
                previous = %slot.descriptor().name,
                replacement = %plugin.descriptor().name,
                "Feature plugin already registered, replacing"
            );
            *slot = plugin;
        } else {
            debug!(
                feature_code = %code,
                priority = plugin.descriptor().priority,
                "Registered feature plugin"
            );
            plugins.push(plugin);
        }
    }

    /// Remove a plugin. Returns whether one was registered.
    pub fn unregister(&self, feature_code: &str) -> bool {
        let mut plugins = self.plugins.write();
        if let Some(idx) = plugins.iter().position(|p| p.feature_code() == feature_code) {
            plugins.remove(idx);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn get(&self, feature_code: &str) -> Option<PluginRef> {
        self.plugins
            .read()
            .iter()
            .find(|p| p.feature_code() == feature_code)
            .cloned()
    }

    #[must_use]
    pub fn has(&self, feature_code: &str) -> bool {
        self.plugins
            .read()
            .iter()
            .any(|p| p.feature_code() == feature_code)
    }

    /// All plugins in registration order.
    #[must_use]
    pub fn get_all(&self) -> Vec<PluginRef> {
        self.plugins.read().clone()
    }

    /// All plugins in execution order: ascending priority, then moved so that
    /// every plugin follows the plugins it depends on.
    #[must_use]
    pub fn get_all_sorted(&self) -> Vec<PluginRef> {
        sort_by_priority_and_dependencies(self.get_all())
    }

    /// The execution-ordered subset whose feature codes are in `feature_codes`.
    #[must_use]
    pub fn get_plugins_for_features<S: AsRef<str>>(&self, feature_codes: &[S]) -> Vec<PluginRef> {
        let wanted: HashSet<&str> = feature_codes.iter().map(AsRef::as_ref).collect();
        self.get_all_sorted()
            .into_iter()
            .filter(|p| wanted.contains(p.feature_code()))
            .collect()
    }

    #[must_use]
    pub fn registered_feature_codes(&self) -> Vec<String> {
        self.plugins
            .read()
            .iter()
            .map(|p| p.feature_code().to_owned())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.read().is_empty()
    }

    pub fn clear(&self) {
        self.plugins.write().clear();
    }
}

fn sort_by_priority_and_dependencies(mut plugins: Vec<PluginRef>) -> Vec<PluginRef> {
    // Stable: equal priorities keep registration order.
    plugins.sort_by_key(|p| p.descriptor().priority);

    let mut sort = TopoSort {
        by_code: plugins.iter().map(|p| (p.feature_code(), p)).collect(),
        visited: HashSet::new(),
        visiting: HashSet::new(),
        result: Vec::with_capacity(plugins.len()),
    };
    for plugin in &plugins {
        sort.visit(plugin);
    }
    sort.result
}

/// Depth-first topological pass over the priority-ordered plugins.
struct TopoSort<'a> {
    by_code: HashMap<&'a str, &'a PluginRef>,
    visited: HashSet<&'a str>,
    visiting: HashSet<&'a str>,
    result: Vec<PluginRef>,
}

impl<'a> TopoSort<'a> {
    fn visit(&mut self, plugin: &'a PluginRef) {
        let code = plugin.feature_code();
        if self.visited.contains(code) {
            return;
        }
        if self.visiting.contains(code) {
            warn!(
                feature_code = %code,
                "Circular plugin dependency detected, breaking cycle"
            );
            return;
        }

        self.visiting.insert(code);
        for dependency in &plugin.descriptor().dependencies {
            let target = self.by_code.get(dependency.as_str()).copied();
            if let Some(target) = target {
                self.visit(target);
            } else {
                debug!(
                    feature_code = %code,
                    dependency = %dependency,
                    "Ignoring dependency on unregistered feature"
                );
            }
        }
        self.visiting.remove(code);

        self.visited.insert(code);
        self.result.push(Arc::clone(plugin));
    }
}
