use std::collections::HashSet;

/// Which kind of package list a universe entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageOrigin {
    /// Source packages shipped directly in the view
    Source,
    /// Source packages only needed in the buildroot
    BuildrootSource,
}

impl PackageOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageOrigin::Source => "source",
            PackageOrigin::BuildrootSource => "buildroot-source",
        }
    }
}

impl std::str::FromStr for PackageOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" => Ok(PackageOrigin::Source),
            "buildroot-source" | "buildroot" => Ok(PackageOrigin::BuildrootSource),
            _ => Err(format!(
                "Invalid package origin: {}. Please specify 'source' or 'buildroot-source'",
                s
            )),
        }
    }
}

impl std::fmt::Display for PackageOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared set of packages a comparison run covers.
///
/// Keeps the order packages were given in; duplicates are dropped on
/// insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageUniverse {
    names: Vec<String>,
    index: HashSet<String>,
}

impl PackageUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a universe sorted by name, as produced by merged package lists
    pub fn sorted<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.into_iter().collect()
    }

    /// Adds a package, returning false if it was already present
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.index.contains(&name) {
            return false;
        }
        self.index.insert(name.clone());
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for PackageUniverse {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut universe = PackageUniverse::new();
        for name in iter {
            universe.insert(name);
        }
        universe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_from_str() {
        assert_eq!("source".parse::<PackageOrigin>().unwrap(), PackageOrigin::Source);
        assert_eq!(
            "buildroot-source".parse::<PackageOrigin>().unwrap(),
            PackageOrigin::BuildrootSource
        );
        assert!("binary".parse::<PackageOrigin>().is_err());
        assert_eq!(PackageOrigin::BuildrootSource.to_string(), "buildroot-source");
    }

    #[test]
    fn test_preserves_given_order_and_dedups() {
        let universe: PackageUniverse = ["zsh", "bash", "zsh", "acl"].into_iter().collect();
        assert_eq!(universe.names(), &["zsh", "bash", "acl"]);
        assert_eq!(universe.len(), 3);
    }

    #[test]
    fn test_sorted() {
        let universe = PackageUniverse::sorted(vec!["zsh", "bash", "acl", "bash"]);
        let names: Vec<&str> = universe.iter().collect();
        assert_eq!(names, vec!["acl", "bash", "zsh"]);
    }

    #[test]
    fn test_contains() {
        let mut universe = PackageUniverse::new();
        assert!(universe.is_empty());
        assert!(universe.insert("bash"));
        assert!(!universe.insert("bash"));
        assert!(universe.contains("bash"));
        assert!(!universe.contains("zsh"));
    }
}
