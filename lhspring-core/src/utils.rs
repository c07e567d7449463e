//! Utility functions for the container
//!
//! Naming rules for beans and path helpers for package-style scan roots.

/// Naming convention utilities for bean names
pub mod naming {
    /// Lower-cases only the first character of a type name.
    ///
    /// This is the default bean naming strategy: `UserMapper` becomes
    /// `userMapper`. The remainder is left untouched, so `URLParser` becomes
    /// `uRLParser`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lhspring_core::utils::naming::decapitalize;
    ///
    /// assert_eq!(decapitalize("UserMapper"), "userMapper");
    /// assert_eq!(decapitalize("A"), "a");
    /// assert_eq!(decapitalize(""), "");
    /// ```
    pub fn decapitalize(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => {
                let mut result = String::with_capacity(s.len());
                result.extend(first.to_lowercase());
                result.push_str(chars.as_str());
                result
            }
        }
    }

    /// Resolves the bean name for a component.
    ///
    /// A non-empty declared name wins; otherwise the simple type name is
    /// decapitalized.
    pub fn bean_name_for(declared: &str, simple_type_name: &str) -> String {
        if declared.is_empty() {
            decapitalize(simple_type_name)
        } else {
            declared.to_string()
        }
    }
}

/// Package path helpers
pub mod path {
    use crate::constants::PATH_SEPARATOR;

    /// Normalizes a scan root: trims whitespace, accepts both `a.b` and
    /// `a::b`, and drops empty segments.
    ///
    /// ```
    /// use lhspring_core::utils::path::normalize_package;
    ///
    /// assert_eq!(normalize_package("pkg.mapper"), "pkg::mapper");
    /// assert_eq!(normalize_package(" pkg::mapper "), "pkg::mapper");
    /// ```
    pub fn normalize_package(root: &str) -> String {
        root.trim()
            .replace('.', PATH_SEPARATOR)
            .split(PATH_SEPARATOR)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR)
    }

    /// Joins a module path and a type name into a fully-qualified name.
    pub fn qualify(package: &str, name: &str) -> String {
        if package.is_empty() {
            name.to_string()
        } else {
            format!("{}{}{}", package, PATH_SEPARATOR, name)
        }
    }

    /// Every ancestor of a package including itself, outermost first.
    ///
    /// `a::b::c` yields `a`, `a::b`, `a::b::c`.
    pub fn ancestors(package: &str) -> Vec<String> {
        let mut result = Vec::new();
        let mut current = String::new();
        for segment in package.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            if !current.is_empty() {
                current.push_str(PATH_SEPARATOR);
            }
            current.push_str(segment);
            result.push(current.clone());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    mod naming_tests {
        use super::super::naming::*;

        #[test]
        fn test_decapitalize() {
            assert_eq!(decapitalize("UserMapper"), "userMapper");
            assert_eq!(decapitalize("UserService"), "userService");
            assert_eq!(decapitalize("A"), "a");
            assert_eq!(decapitalize("AB"), "aB");
            assert_eq!(decapitalize("URLParser"), "uRLParser");
            assert_eq!(decapitalize(""), "");
            assert_eq!(decapitalize("lowerCase"), "lowerCase");
        }

        #[test]
        fn test_bean_name_for() {
            assert_eq!(bean_name_for("", "UserMapper"), "userMapper");
            assert_eq!(bean_name_for("widgetFactory", "WidgetFactoryImpl"), "widgetFactory");
        }
    }

    mod path_tests {
        use super::super::path::*;

        #[test]
        fn test_normalize_package() {
            assert_eq!(normalize_package("pkg.mapper"), "pkg::mapper");
            assert_eq!(normalize_package("pkg::mapper"), "pkg::mapper");
            assert_eq!(normalize_package("  pkg.sub::leaf "), "pkg::sub::leaf");
            assert_eq!(normalize_package("pkg..mapper."), "pkg::mapper");
            assert_eq!(normalize_package("   "), "");
        }

        #[test]
        fn test_qualify() {
            assert_eq!(qualify("pkg::mapper", "UserMapper"), "pkg::mapper::UserMapper");
            assert_eq!(qualify("", "UserMapper"), "UserMapper");
        }

        #[test]
        fn test_ancestors() {
            assert_eq!(ancestors("a::b::c"), vec!["a", "a::b", "a::b::c"]);
            assert_eq!(ancestors("a"), vec!["a"]);
            assert!(ancestors("").is_empty());
        }
    }
}
