//! Functions callable from formulas

pub mod arithmetic;

use crate::evaluator::Value;
use ahash::AHashMap;
use std::fmt;
use std::sync::Arc;

/// Function implementation signature
///
/// Receives every argument already evaluated, left to right. Arguments are
/// not type-checked beforehand; each function filters what it accepts.
pub type FunctionImpl = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Function registry, keyed by upper-cased name
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: AHashMap<String, FunctionImpl>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the default arithmetic functions
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_arithmetic_functions();
        registry
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&FunctionImpl> {
        self.functions.get(&name.to_uppercase())
    }

    /// Register a function, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.functions.insert(name.to_uppercase(), Arc::new(func));
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.register(name, func);
        self
    }

    /// Make `alias` call the function registered as `target`
    ///
    /// Returns `false` when `target` is not registered.
    pub fn alias(&mut self, alias: &str, target: &str) -> bool {
        match self.get(target).cloned() {
            Some(func) => {
                self.functions.insert(alias.to_uppercase(), func);
                true
            }
            None => false,
        }
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn register_arithmetic_functions(&mut self) {
        self.register("ADD", arithmetic::fn_add);
        self.alias("SUM", "ADD");
        self.alias("+", "ADD");

        self.register("MINUS", arithmetic::fn_minus);
        self.alias("-", "MINUS");

        self.register("TIMES", arithmetic::fn_times);
        self.alias("PRODUCT", "TIMES");
        self.alias("*", "TIMES");
        self.alias("X", "TIMES");

        self.register("DIVIDE", arithmetic::fn_divide);
        self.alias("/", "DIVIDE");
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}
