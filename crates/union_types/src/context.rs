use std::collections::HashMap;

use crate::stack::StackFrame;
use crate::value::Value;

/// A registered host class: identity plus inheritance edges.
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub name: String,
    pub parent: Option<String>,
    pub interfaces: Vec<String>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDef {
            name: name.into(),
            parent: None,
            interfaces: Vec::new(),
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }
}

/// One declared parameter of a registered callable.
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    pub name: String,
    pub default_value: Option<Value>,
}

impl ParameterInfo {
    pub fn required(name: impl Into<String>) -> Self {
        ParameterInfo {
            name: name.into(),
            default_value: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default_value: Value) -> Self {
        ParameterInfo {
            name: name.into(),
            default_value: Some(default_value),
        }
    }
}

/// Ordered parameter list of a registered function or method.
#[derive(Debug, Clone, Default)]
pub struct FuncSignature {
    pub parameters: Vec<ParameterInfo>,
}

impl FuncSignature {
    pub fn new(parameters: Vec<ParameterInfo>) -> Self {
        FuncSignature { parameters }
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CallableKey {
    class: Option<String>,
    function: String,
}

/// The host-runtime capability backend.
///
/// Rust has no ambient reflection, so the classes and callable signatures the
/// engine introspects are registered explicitly, typically once at startup by
/// the runtime integration. During validation the context is read-only.
///
/// The optional `path_prefix` shortens file paths in diagnostics (editor
/// friendly `src/Math.php` instead of `/path/to/app/src/Math.php`); it is
/// threaded into the trace formatters rather than living in ambient state.
#[derive(Debug, Default)]
pub struct TypeContext {
    classes: HashMap<String, ClassDef>,
    callables: HashMap<CallableKey, FuncSignature>,
    path_prefix: Option<String>,
}

impl TypeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_class(&mut self, def: ClassDef) {
        self.classes.insert(def.name.clone(), def);
    }

    pub fn class_exists(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Whether `class` is, extends, or implements `candidate`, walking the
    /// registered parent chain and interface lists transitively.
    pub fn instance_of(&self, class: &str, candidate: &str) -> bool {
        if class == candidate {
            return true;
        }
        let Some(def) = self.classes.get(class) else {
            return false;
        };
        if def
            .parent
            .as_deref()
            .is_some_and(|parent| self.instance_of(parent, candidate))
        {
            return true;
        }
        def.interfaces
            .iter()
            .any(|interface| self.instance_of(interface, candidate))
    }

    pub fn register_function(&mut self, name: impl Into<String>, signature: FuncSignature) {
        let key = CallableKey {
            class: None,
            function: name.into(),
        };
        self.callables.insert(key, signature);
    }

    pub fn register_method(
        &mut self,
        class: impl Into<String>,
        name: impl Into<String>,
        signature: FuncSignature,
    ) {
        let key = CallableKey {
            class: Some(class.into()),
            function: name.into(),
        };
        self.callables.insert(key, signature);
    }

    /// Resolve the signature of the callable a frame identifies, qualified by
    /// its owning class when present.
    pub fn signature_of(&self, frame: &StackFrame) -> Option<&FuncSignature> {
        let key = CallableKey {
            class: frame.class.clone(),
            function: frame.function.clone(),
        };
        self.callables.get(&key)
    }

    pub fn set_path_prefix(&mut self, prefix: impl Into<String>) {
        self.path_prefix = Some(prefix.into());
    }

    pub fn path_prefix(&self) -> Option<&str> {
        self.path_prefix.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> TypeContext {
        let mut ctx = TypeContext::new();
        ctx.register_class(ClassDef::new("DateTimeInterface"));
        ctx.register_class(ClassDef::new("DateTime").implements("DateTimeInterface"));
        ctx.register_class(ClassDef::new(r"App\Time").extends("DateTime"));
        ctx
    }

    #[test]
    fn class_exists_only_for_registered_names() {
        let ctx = context();
        assert!(ctx.class_exists("DateTime"));
        assert!(!ctx.class_exists(r"MyNamespace\InexistentClassName"));
    }

    #[test]
    fn instance_of_walks_parents_and_interfaces() {
        let ctx = context();
        assert!(ctx.instance_of(r"App\Time", r"App\Time"));
        assert!(ctx.instance_of(r"App\Time", "DateTime"));
        assert!(ctx.instance_of(r"App\Time", "DateTimeInterface"));
        assert!(!ctx.instance_of("DateTime", r"App\Time"));
        assert!(!ctx.instance_of("Unregistered", "DateTime"));
    }

    #[test]
    fn signature_lookup_is_qualified_by_class() {
        let mut ctx = context();
        ctx.register_method(
            r"App\Math",
            "add",
            FuncSignature::new(vec![
                ParameterInfo::required("a"),
                ParameterInfo::required("b"),
            ]),
        );
        ctx.register_function("add", FuncSignature::new(vec![ParameterInfo::required("x")]));

        let method_frame = StackFrame::new("src/App.php", 10, "add").in_class(r"App\Math");
        let func_frame = StackFrame::new("src/App.php", 12, "add");

        assert_eq!(
            ctx.signature_of(&method_frame).map(|s| s.param_names()),
            Some(vec!["a", "b"])
        );
        assert_eq!(
            ctx.signature_of(&func_frame).map(|s| s.param_names()),
            Some(vec!["x"])
        );
        assert!(
            ctx.signature_of(&StackFrame::new("src/App.php", 14, "sub"))
                .is_none()
        );
    }
}
