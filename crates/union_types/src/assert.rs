//! The assertion engine: union vocabulary validation, value membership, and
//! named-argument introspection over an explicit call stack.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::TypeContext;
use crate::error::UnionTypeError;
use crate::stack::{CallStack, StackFrame};
use crate::trace;
use crate::value::Value;

/// Documentation placeholder for the classname type; any registered
/// fully-qualified class name can stand in for it, e.g. `Cake\ORM\Table`.
pub const CLASSNAME_PATTERN: &str = r"{Namespace}\{ClassName}";

/// The canonical union-type vocabulary, without the classname pattern.
///
/// Strict spellings only: `int` not `integer`, `bool` not `boolean`. A
/// closure value classifies as the `Closure` class, which is matched the way
/// any other classname is.
pub const UNION_TYPES: [&str; 7] = ["int", "float", "string", "bool", "array", "null", "resource"];

static CLASSNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][_A-Za-z0-9]*(?:\\[A-Z][_A-Za-z0-9]*)*$").expect("classname pattern")
});

/// The full vocabulary: canonical set plus the classname-pattern placeholder.
pub fn full_union_types() -> Vec<&'static str> {
    UNION_TYPES.iter().copied().chain([CLASSNAME_PATTERN]).collect()
}

/// Options for [`is_with`].
#[derive(Debug, Clone, Copy)]
pub struct IsOptions {
    /// When set, an object value also matches a declared classname it is an
    /// instance of (per the registered parent/interface chains), not only its
    /// exact runtime class. On by default.
    pub instance_of: bool,
}

impl Default for IsOptions {
    fn default() -> Self {
        IsOptions { instance_of: true }
    }
}

/// Validate every declared type name, failing fast on the first invalid one
/// in list order.
///
/// Accepted: the canonical [`UNION_TYPES`], the literal `stdClass`, and any
/// classname-shaped token that resolves through `ctx.class_exists`. Legacy
/// spellings (`NULL`, `integer`, `double`, `decimal`, `boolean`, `object`)
/// are rejected with a specific replacement suggestion.
pub fn assert_types(
    ctx: &TypeContext,
    stack: &CallStack,
    types: &[&str],
) -> Result<(), UnionTypeError> {
    for &ty in types {
        if ty == "stdClass" {
            continue;
        }

        // `NULL` parses as a classname, reject it before the pattern check
        if ty == "NULL" {
            return Err(UnionTypeError::invalid_union_type(ctx, stack, ty, &["null"]));
        }

        // classname, e.g. `Cake\ORM\Table`
        if CLASSNAME_RE.is_match(ty) {
            if !ctx.class_exists(ty) {
                return Err(UnionTypeError::class_not_found(ctx, stack, ty));
            }
            continue;
        }

        if ty == "integer" || ty == "double" {
            return Err(UnionTypeError::invalid_union_type(ctx, stack, ty, &["int"]));
        }

        if ty == "decimal" {
            return Err(UnionTypeError::invalid_union_type(ctx, stack, ty, &["float"]));
        }

        if ty == "boolean" {
            return Err(UnionTypeError::invalid_union_type(ctx, stack, ty, &["bool"]));
        }

        if ty == "object" {
            let use_instead = format!("{{ClassName}}::class or '{CLASSNAME_PATTERN}' format");
            return Err(UnionTypeError::invalid_union_type(
                ctx,
                stack,
                ty,
                &[&use_instead],
            ));
        }

        if !UNION_TYPES.contains(&ty) {
            return Err(UnionTypeError::invalid_union_type(
                ctx,
                stack,
                ty,
                &full_union_types(),
            ));
        }
    }

    Ok(())
}

fn matches_union(ctx: &TypeContext, value: &Value, types: &[&str], options: IsOptions) -> bool {
    let tag = value.type_name();
    if types.iter().any(|&ty| ty == tag) {
        return true;
    }
    if options.instance_of && matches!(value, Value::Object { .. } | Value::Closure) {
        return types
            .iter()
            .any(|&ty| CLASSNAME_RE.is_match(ty) && ctx.instance_of(&tag, ty));
    }
    false
}

/// Whether the value's type is one of the declared types.
///
/// ```
/// # use union_types::{is, CallStack, StackFrame, TypeContext, Value};
/// let ctx = TypeContext::new();
/// let stack = CallStack::new().with(StackFrame::new("src/App.php", 10, "main"));
/// assert_eq!(is(&ctx, &stack, &Value::Float(1.2), &["int", "float"]), Ok(true));
/// assert_eq!(is(&ctx, &stack, &Value::from("1.2"), &["int", "float"]), Ok(false));
/// ```
pub fn is(
    ctx: &TypeContext,
    stack: &CallStack,
    value: &Value,
    types: &[&str],
) -> Result<bool, UnionTypeError> {
    is_with(ctx, stack, value, types, IsOptions::default())
}

/// [`is`] with explicit [`IsOptions`], e.g. to disable subclass matching.
pub fn is_with(
    ctx: &TypeContext,
    stack: &CallStack,
    value: &Value,
    types: &[&str],
    options: IsOptions,
) -> Result<bool, UnionTypeError> {
    assert_types(ctx, stack, types)?;
    Ok(matches_union(ctx, value, types, options))
}

/// Raise a type-mismatch error when the value is not of the declared union.
pub fn assert(
    ctx: &TypeContext,
    stack: &CallStack,
    value: &Value,
    types: &[&str],
) -> Result<(), UnionTypeError> {
    assert_types(ctx, stack, types)?;

    if !matches_union(ctx, value, types, IsOptions::default()) {
        return Err(UnionTypeError::type_error(
            ctx,
            stack,
            0,
            format!(
                "`{}` must be of the union type `{}`, `{}` given",
                value.stringify(),
                types.join("|"),
                value.type_name()
            ),
        ));
    }

    Ok(())
}

fn callable_kind(frame: &StackFrame) -> &'static str {
    if frame.class.is_some() { "method" } else { "function" }
}

/// Check a named argument of the immediate caller against a declared union.
///
/// The engine works purely over the explicit `stack`: frame 0 is the
/// assertion call site inside the checked callable, frame 1 the invocation
/// record of that callable. The caller's signature is resolved through the
/// context registry, `arg_name` is mapped to its position, and the actual
/// value (explicit or declared default) is validated. Mismatch and
/// zero-parameter diagnostics report their call site one frame up, at the
/// caller of the checked callable.
pub fn assert_func_arg(
    ctx: &TypeContext,
    stack: &CallStack,
    arg_name: &str,
    types: &[&str],
) -> Result<(), UnionTypeError> {
    assert_types(ctx, stack, types)?;

    let prefix = ctx.path_prefix();

    let Some(callee) = stack.frame(1) else {
        let entry = stack
            .frame(0)
            .unwrap_or_else(|| panic!("no stack frame at index #0"));
        return Err(UnionTypeError::fatal(
            ctx,
            stack,
            0,
            format!(
                "The `{}` must be invoked **INSIDE** a function or method",
                trace::the_func(prefix, entry, true)
            ),
        ));
    };

    let Some(signature) = ctx.signature_of(callee) else {
        return Err(UnionTypeError::fatal(
            ctx,
            stack,
            0,
            format!(
                "The `{}` {} has no registered signature",
                trace::the_func(prefix, callee, true),
                callable_kind(callee)
            ),
        ));
    };

    if signature.parameters.is_empty() {
        // the fault is at the caller of the zero-parameter callable
        return Err(UnionTypeError::fatal(
            ctx,
            stack,
            1,
            format!(
                "The `{}` {} doesn't accept any argument",
                trace::the_func(prefix, callee, true),
                callable_kind(callee)
            ),
        ));
    }

    let func_args = signature.param_names();
    let Some(arg_index) = func_args.iter().position(|&name| name == arg_name) else {
        return Err(UnionTypeError::fatal(
            ctx,
            stack,
            0,
            format!(
                "Invalid argument name `{}` for `{}`, try one of those values `{}`",
                arg_name,
                trace::the_func(prefix, callee, true),
                trace::quoted_list(&func_args)
            ),
        ));
    };

    // explicit value if one was passed at that position, declared default
    // otherwise
    let arg_value = match callee.args.get(arg_index) {
        Some(value) => value,
        None => match &signature.parameters[arg_index].default_value {
            Some(default) => default,
            None => {
                return Err(UnionTypeError::fatal(
                    ctx,
                    stack,
                    0,
                    format!(
                        "Argument `{}` of `{}` was not passed and declares no default value",
                        arg_name,
                        trace::the_func(prefix, callee, true)
                    ),
                ));
            }
        },
    };

    let arg_offset = arg_index + 1;
    tracing::trace!(
        "checking argument `{}` (#{}) of `{}` against `{}`",
        arg_name,
        arg_offset,
        trace::the_func(prefix, callee, true),
        types.join("|")
    );

    if !matches_union(ctx, arg_value, types, IsOptions::default()) {
        tracing::debug!(
            "argument `{}` of `{}` is `{}`, not in `{}`",
            arg_name,
            trace::the_func(prefix, callee, true),
            arg_value.type_name(),
            types.join("|")
        );
        return Err(UnionTypeError::type_error(
            ctx,
            stack,
            1,
            format!(
                "Argument `{}` passed to `{}({})` must be of the union type `{}`, `{}` given",
                arg_offset,
                trace::the_func(prefix, callee, false),
                trace::func_args_ellipsis(arg_name, &func_args, types),
                types.join("|"),
                arg_value.type_name()
            ),
        ));
    }

    Ok(())
}
