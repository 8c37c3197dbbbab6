/// A trait to abstract over environment variable access.
///
/// Options only ever need the value of a variable as a string, if it is
/// defined and valid Unicode. So this trait requires just one method.
pub(crate) trait Environment {
    /// Try reading the environment variable as a string.
    fn read(&self, key: &str) -> Option<String>;

    /// Try reading the environment variable as a string with surrounding white
    /// space removed, treating empty values as undefined.
    fn read_non_empty(&self, key: &str) -> Option<String> {
        self.read(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Default)]
pub(crate) struct Env();

impl Environment for Env {
    fn read(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod test {
    use super::Environment;
    use std::collections::HashMap;

    pub(crate) struct FakeEnv {
        bindings: HashMap<String, String>,
    }

    impl FakeEnv {
        /// Create a new fake environment.
        pub(crate) fn new() -> FakeEnv {
            FakeEnv {
                bindings: HashMap::new(),
            }
        }

        /// Set the fake environment variable.
        pub(crate) fn set(&mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> &mut Self {
            self.bindings
                .insert(key.as_ref().to_owned(), value.as_ref().to_owned());
            self
        }
    }

    impl Environment for FakeEnv {
        fn read(&self, key: &str) -> Option<String> {
            self.bindings.get(key).cloned()
        }
    }

    #[test]
    fn test_read_non_empty() {
        let mut env = FakeEnv::new();
        env.set("A", "  value ").set("B", "   ");
        assert_eq!(env.read_non_empty("A").as_deref(), Some("value"));
        assert_eq!(env.read_non_empty("B"), None);
        assert_eq!(env.read_non_empty("C"), None);
    }
}

#[cfg(test)]
pub(crate) use test::FakeEnv;
