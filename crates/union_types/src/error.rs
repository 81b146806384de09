use thiserror::Error;

use crate::context::TypeContext;
use crate::stack::CallStack;
use crate::trace;

/// The four terminal assertion failures.
///
/// Every message ends with a ``called in #<i> `file:line` `` suffix computed
/// at construction from the explicit call stack, so a reader can locate the
/// offending source line without a full trace. Which frame index the suffix
/// points at depends on the condition: vocabulary misuse points at the
/// raiser's own call site (index 0); a missing class and an argument
/// mismatch point one frame further up (index 1), where the real fault lies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnionTypeError {
    /// A declared type name is not part of the union-type vocabulary.
    #[error("Invalid union type `{invalid_type}`, use {suggestion} instead, {called_in}")]
    InvalidUnionType {
        invalid_type: String,
        suggestion: String,
        called_in: String,
    },

    /// A classname-shaped type does not resolve to a registered class.
    #[error("Class `{class_name}` not found, {called_in}")]
    ClassNotFound {
        class_name: String,
        called_in: String,
    },

    /// A value failed its union-type membership check.
    #[error("{message}, {called_in}")]
    Type { message: String, called_in: String },

    /// Misuse of the introspection entry point itself: invoked outside a
    /// function, unknown argument name, zero-parameter target.
    #[error("{message}, {called_in}")]
    Fatal { message: String, called_in: String },
}

impl UnionTypeError {
    pub fn invalid_union_type(
        ctx: &TypeContext,
        stack: &CallStack,
        invalid_type: &str,
        use_instead: &[&str],
    ) -> Self {
        let suggestion = if use_instead.len() > 1 {
            format!(
                "one of those types `{}`",
                trace::quoted_list(use_instead)
            )
        } else {
            format!("`{}`", use_instead.first().copied().unwrap_or_default())
        };
        UnionTypeError::InvalidUnionType {
            invalid_type: invalid_type.to_string(),
            suggestion,
            called_in: trace::called_in(ctx.path_prefix(), stack, 0),
        }
    }

    pub fn class_not_found(ctx: &TypeContext, stack: &CallStack, class_name: &str) -> Self {
        // the real fault lives one frame above the declaration site
        UnionTypeError::ClassNotFound {
            class_name: class_name.to_string(),
            called_in: trace::called_in(ctx.path_prefix(), stack, 1),
        }
    }

    pub fn type_error(
        ctx: &TypeContext,
        stack: &CallStack,
        stack_index: usize,
        message: String,
    ) -> Self {
        UnionTypeError::Type {
            message,
            called_in: trace::called_in(ctx.path_prefix(), stack, stack_index),
        }
    }

    pub fn fatal(
        ctx: &TypeContext,
        stack: &CallStack,
        stack_index: usize,
        message: String,
    ) -> Self {
        UnionTypeError::Fatal {
            message,
            called_in: trace::called_in(ctx.path_prefix(), stack, stack_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::StackFrame;

    fn two_frame_stack() -> CallStack {
        CallStack::new()
            .with(StackFrame::new("src/Math.php", 34, "assert_func_arg"))
            .with(StackFrame::new("src/App.php", 10, "add").in_class(r"App\Math"))
    }

    #[test]
    fn single_suggestion_is_rendered_bare() {
        let ctx = TypeContext::new();
        let err = UnionTypeError::invalid_union_type(&ctx, &two_frame_stack(), "NULL", &["null"]);
        assert_eq!(
            err.to_string(),
            "Invalid union type `NULL`, use `null` instead, called in #0 `src/Math.php:34`"
        );
    }

    #[test]
    fn multiple_suggestions_are_quoted_and_joined() {
        let ctx = TypeContext::new();
        let err = UnionTypeError::invalid_union_type(
            &ctx,
            &two_frame_stack(),
            "whatever",
            &["int", "float"],
        );
        assert_eq!(
            err.to_string(),
            "Invalid union type `whatever`, use one of those types `'int', 'float'` instead, \
             called in #0 `src/Math.php:34`"
        );
    }

    #[test]
    fn class_not_found_points_one_frame_up() {
        let ctx = TypeContext::new();
        let err =
            UnionTypeError::class_not_found(&ctx, &two_frame_stack(), r"MyNamespace\Missing");
        assert_eq!(
            err.to_string(),
            r"Class `MyNamespace\Missing` not found, called in #1 `src/App.php:10`"
        );
    }

    #[test]
    fn path_prefix_is_threaded_into_the_suffix() {
        let mut ctx = TypeContext::new();
        ctx.set_path_prefix("/path/to/app/");
        let stack = CallStack::new().with(StackFrame::new(
            "/path/to/app/src/Math.php",
            34,
            "assert_func_arg",
        ));
        let err = UnionTypeError::fatal(&ctx, &stack, 0, "boom".to_string());
        assert_eq!(err.to_string(), "boom, called in #0 `src/Math.php:34`");
    }
}
