//! Package identifiers derived from the company and package name
//!
//! The fully qualified name, display name and root namespace all follow the
//! company/package fields until the user pins them with an override.

/// `com.<company>.<package>`, lowercased.
pub fn derive_fully_qualified_name(company: &str, package: &str) -> String {
    format!("com.{}.{}", company, package).to_lowercase()
}

/// `<Company>.<Package>`, case preserved.
pub fn derive_display_name(company: &str, package: &str) -> String {
    format!("{}.{}", company, package)
}

/// A derived string that can be pinned to a user-supplied value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overridable {
    derived: String,
    overridden: bool,
    cached: Option<String>,
}

impl Overridable {
    pub fn new(derived: String) -> Self {
        Self {
            derived,
            overridden: false,
            cached: None,
        }
    }

    /// Effective value: the override while pinned, the derived value otherwise
    pub fn value(&self) -> &str {
        match (&self.cached, self.overridden) {
            (Some(cached), true) => cached,
            _ => &self.derived,
        }
    }

    pub fn derived(&self) -> &str {
        &self.derived
    }

    pub fn is_overridden(&self) -> bool {
        self.overridden
    }

    /// Recompute the derived value. The effective value only follows while unpinned.
    pub fn rederive(&mut self, derived: String) {
        self.derived = derived;
    }

    /// Toggle the override. Turning it on with nothing cached seeds the cache
    /// from the current derived value; turning it off keeps the cache for later.
    pub fn set_overridden(&mut self, on: bool) {
        if on && self.cached.as_deref().is_none_or(str::is_empty) {
            self.cached = Some(self.derived.clone());
        }
        self.overridden = on;
    }

    /// Edit the pinned value. Ignored while the override is off.
    pub fn set_override_value(&mut self, value: String) -> bool {
        if !self.overridden {
            return false;
        }
        self.cached = Some(value);
        true
    }
}

/// Company and package fields plus the three identifiers derived from them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageIdentity {
    company_name: String,
    package_name: String,
    pub fully_qualified_name: Overridable,
    pub display_name: Overridable,
    pub root_namespace: Overridable,
}

impl PackageIdentity {
    pub fn new(company_name: impl Into<String>, package_name: impl Into<String>) -> Self {
        let mut identity = Self {
            company_name: company_name.into(),
            package_name: package_name.into(),
            ..Default::default()
        };
        identity.rederive();
        identity
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn set_company_name(&mut self, company_name: impl Into<String>) {
        self.company_name = company_name.into();
        self.rederive();
    }

    pub fn set_package_name(&mut self, package_name: impl Into<String>) {
        self.package_name = package_name.into();
        self.rederive();
    }

    fn rederive(&mut self) {
        let display = derive_display_name(&self.company_name, &self.package_name);
        self.fully_qualified_name
            .rederive(derive_fully_qualified_name(&self.company_name, &self.package_name));
        self.root_namespace.rederive(display.clone());
        self.display_name.rederive(display);
    }

    /// `Company.Package`, the stem of both assembly names
    pub fn assembly_stem(&self) -> String {
        derive_display_name(&self.company_name, &self.package_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_names() {
        assert_eq!(derive_fully_qualified_name("Acme", "Foo"), "com.acme.foo");
        assert_eq!(derive_display_name("Acme", "Foo"), "Acme.Foo");
    }

    #[test]
    fn test_empty_inputs_are_degenerate() {
        assert_eq!(derive_fully_qualified_name("", ""), "com..");
        assert_eq!(derive_display_name("", ""), ".");
    }

    #[test]
    fn test_identity_follows_edits() {
        let mut identity = PackageIdentity::new("Acme", "Foo");
        assert_eq!(identity.fully_qualified_name.value(), "com.acme.foo");
        assert_eq!(identity.root_namespace.value(), "Acme.Foo");

        identity.set_package_name("Bar");
        assert_eq!(identity.fully_qualified_name.value(), "com.acme.bar");
        assert_eq!(identity.display_name.value(), "Acme.Bar");
    }

    #[test]
    fn test_override_is_sticky() {
        let mut identity = PackageIdentity::new("Acme", "Foo");
        identity.fully_qualified_name.set_overridden(true);
        assert_eq!(identity.fully_qualified_name.value(), "com.acme.foo");
        assert!(identity.fully_qualified_name.set_override_value("org.custom.id".into()));

        identity.set_company_name("Globex");
        identity.set_package_name("Baz");
        assert_eq!(identity.fully_qualified_name.value(), "org.custom.id");

        identity.fully_qualified_name.set_overridden(false);
        assert_eq!(identity.fully_qualified_name.value(), "com.globex.baz");
    }

    #[test]
    fn test_override_cache_restored_on_second_toggle() {
        let mut identity = PackageIdentity::new("Acme", "Foo");
        identity.display_name.set_overridden(true);
        identity.display_name.set_override_value("Custom".into());
        identity.display_name.set_overridden(false);
        assert_eq!(identity.display_name.value(), "Acme.Foo");

        identity.display_name.set_overridden(true);
        assert_eq!(identity.display_name.value(), "Custom");
    }

    #[test]
    fn test_override_value_ignored_while_off() {
        let mut value = Overridable::new("derived".into());
        assert!(!value.set_override_value("pinned".into()));
        assert_eq!(value.value(), "derived");
    }
}
