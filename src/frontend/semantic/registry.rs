//! Program-wide registry of published names
//!
//! One registry is created per compile and passed explicitly through the
//! analyzer, so concurrent compiles never share it.

use super::symbols::Symbol;
use indexmap::IndexMap;

/// Published name -> (owning feature set, symbol), in registration order
#[derive(Debug, Clone, Default)]
pub struct GlobalSymbolRegistry {
    entries: IndexMap<String, (String, Symbol)>,
}

impl GlobalSymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` for `feature_set`. The first publisher keeps the
    /// name; a later publisher gets the earlier owner back as `Err`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        feature_set: impl Into<String>,
        symbol: Symbol,
    ) -> Result<(), String> {
        let name = name.into();
        let feature_set = feature_set.into();

        if let Some((owner, _)) = self.entries.get(&name) {
            if *owner != feature_set {
                return Err(owner.clone());
            }
        }

        tracing::trace!("registered '{}' published by '{}'", name, feature_set);
        self.entries.insert(name, (feature_set, symbol));
        Ok(())
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&Symbol> {
        self.entries.get(name).map(|(_, symbol)| symbol)
    }

    /// Feature set that published `name`
    pub fn owner(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.entries.get(name).map(|(owner, _)| owner.as_str())
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.entries.contains_key(name)
    }

    /// `(name, owner, symbol)` in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Symbol)> {
        self.entries
            .iter()
            .map(|(name, (owner, symbol))| (name.as_str(), owner.as_str(), symbol))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::semantic::symbols::{DataType, SymbolSource};
    use crate::util::span::Span;

    fn alias(of: &str) -> Symbol {
        Symbol::new(
            "current-user",
            Span::dummy(),
            SymbolSource::AliasOf(of.to_string()),
            DataType::Unresolved,
        )
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = GlobalSymbolRegistry::new();
        assert!(registry.register("current-user", "Login", alias("user")).is_ok());
        assert!(registry.contains("current-user"));
        assert_eq!(registry.owner("current-user"), Some("Login"));
        assert_eq!(
            registry.get("current-user").map(|s| s.source.clone()),
            Some(SymbolSource::AliasOf("user".to_string()))
        );
    }

    #[test]
    fn test_first_publisher_wins() {
        let mut registry = GlobalSymbolRegistry::new();
        registry.register("current-user", "Login", alias("user")).unwrap();
        let err = registry.register("current-user", "Signup", alias("account"));
        assert_eq!(err, Err("Login".to_string()));
        assert_eq!(registry.owner("current-user"), Some("Login"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_same_owner_may_republish() {
        let mut registry = GlobalSymbolRegistry::new();
        registry.register("current-user", "Login", alias("user")).unwrap();
        assert!(registry.register("current-user", "Login", alias("admin")).is_ok());
        assert_eq!(
            registry.get("current-user").map(|s| s.source.clone()),
            Some(SymbolSource::AliasOf("admin".to_string()))
        );
    }
}
