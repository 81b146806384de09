//! Read-only formatting over captured call frames.
//!
//! Everything here is pure: the workspace path prefix is an explicit
//! argument (threaded from [`TypeContext::path_prefix`]) rather than ambient
//! state.
//!
//! [`TypeContext::path_prefix`]: crate::context::TypeContext::path_prefix

use crate::stack::{CallStack, StackFrame};

/// Strip the configured workspace prefix from a file path, e.g.
/// `/path/to/app/src/Math.php` to `src/Math.php`. Identity when no prefix is
/// configured or the path lies outside it.
pub fn file_relative_to_workspace<'a>(prefix: Option<&str>, file: &'a str) -> &'a str {
    match prefix {
        Some(prefix) => file.strip_prefix(prefix).unwrap_or(file),
        None => file,
    }
}

/// Render a frame's callable as `Class::function()`, or
/// `file:line::function()` when the callable has no owning class. The
/// trailing parentheses are suppressible for call-signature renderings.
pub fn the_func(prefix: Option<&str>, frame: &StackFrame, parentheses: bool) -> String {
    let qualifier = match &frame.class {
        Some(class) => class.clone(),
        None => format!(
            "{}:{}",
            file_relative_to_workspace(prefix, &frame.file),
            frame.line
        ),
    };
    format!(
        "{}::{}{}",
        qualifier,
        frame.function,
        if parentheses { "()" } else { "" }
    )
}

/// Render the declared union and target argument with its neighbours
/// compressed to `...`, e.g. `..., string|array $data` for the last of
/// several arguments.
///
/// An argument name absent from `func_args` degrades to the bare rendering;
/// callers validate the name before formatting.
pub fn func_args_ellipsis(arg_name: &str, func_args: &[&str], types: &[&str]) -> String {
    let the_arg = format!("{} ${}", types.join("|"), arg_name);
    let args_count = func_args.len();

    let Some(position) = func_args.iter().position(|&name| name == arg_name) else {
        return the_arg;
    };
    if args_count == 1 {
        return the_arg;
    }
    if position == 0 {
        return format!("{the_arg}, ...");
    }
    if position + 1 == args_count {
        return format!("..., {the_arg}");
    }
    format!("..., {the_arg}, ...")
}

/// A frame merged with its computed renderings.
#[derive(Debug)]
pub struct LocatedFrame<'a> {
    pub frame: &'a StackFrame,
    pub file_relative: String,
    pub the_func: String,
}

/// Locate a frame by index, returning `None` when the index is out of range.
pub fn find_frame<'a>(
    prefix: Option<&str>,
    stack: &'a CallStack,
    index: usize,
) -> Option<LocatedFrame<'a>> {
    let frame = stack.frame(index)?;
    Some(LocatedFrame {
        frame,
        file_relative: file_relative_to_workspace(prefix, &frame.file).to_string(),
        the_func: the_func(prefix, frame, true),
    })
}

/// Render the call-site suffix, e.g. ``called in #0 `src/Math.php:34` ``.
///
/// # Panics
///
/// Panics when `index` is out of range. Raise sites locate their frame before
/// formatting; an absent index is a violated precondition, not a recoverable
/// condition.
pub fn called_in(prefix: Option<&str>, stack: &CallStack, index: usize) -> String {
    let located = find_frame(prefix, stack, index)
        .unwrap_or_else(|| panic!("no stack frame at index #{index}"));
    format!(
        "called in #{} `{}:{}`",
        index, located.file_relative, located.frame.line
    )
}

/// Comma-join items with each one single-quoted: `'a', 'b'`.
pub(crate) fn quoted_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::CallStack;

    #[test]
    fn relative_path_without_prefix_is_identity() {
        let file = "/path/to/app/src/Table/PostsTable.php";
        assert_eq!(file_relative_to_workspace(None, file), file);
    }

    #[test]
    fn relative_path_strips_the_configured_prefix() {
        let file = "/path/to/app/src/Table/PostsTable.php";
        assert_eq!(
            file_relative_to_workspace(Some("/path/to/app/"), file),
            "src/Table/PostsTable.php"
        );
        assert_eq!(file_relative_to_workspace(Some("/elsewhere/"), file), file);
    }

    #[test]
    fn the_func_renders_class_or_file_qualifier() {
        let method = StackFrame::new("src/App.php", 10, "add").in_class(r"App\Math");
        assert_eq!(the_func(None, &method, true), r"App\Math::add()");
        assert_eq!(the_func(None, &method, false), r"App\Math::add");

        let func = StackFrame::new("index.php", 25, "add");
        assert_eq!(the_func(None, &func, true), "index.php:25::add()");
    }

    #[test]
    fn ellipsis_for_a_sole_argument() {
        assert_eq!(
            func_args_ellipsis("x", &["x"], &["int", "float"]),
            "int|float $x"
        );
    }

    #[test]
    fn ellipsis_for_the_first_of_several_arguments() {
        assert_eq!(
            func_args_ellipsis("a", &["a", "b"], &["int", "float"]),
            "int|float $a, ..."
        );
    }

    #[test]
    fn ellipsis_for_the_last_argument() {
        assert_eq!(
            func_args_ellipsis("b", &["a", "b"], &["int", "float"]),
            "..., int|float $b"
        );
    }

    #[test]
    fn ellipsis_for_an_interior_argument() {
        assert_eq!(
            func_args_ellipsis("b", &["a", "b", "c"], &["int", "float"]),
            "..., int|float $b, ..."
        );
    }

    #[test]
    fn find_frame_out_of_range_is_none() {
        let stack = CallStack::new()
            .with(StackFrame::new("src/Math.php", 34, "assert_func_arg"))
            .with(StackFrame::new("src/App.php", 10, "add").in_class(r"App\Math"));
        assert!(find_frame(None, &stack, 2).is_none());

        let located = find_frame(None, &stack, 1).unwrap();
        assert_eq!(located.file_relative, "src/App.php");
        assert_eq!(located.the_func, r"App\Math::add()");
    }

    #[test]
    fn called_in_renders_index_path_and_line() {
        let stack = CallStack::new()
            .with(StackFrame::new("/path/to/app/src/Math.php", 34, "assert_func_arg"));
        assert_eq!(
            called_in(Some("/path/to/app/"), &stack, 0),
            "called in #0 `src/Math.php:34`"
        );
    }

    #[test]
    #[should_panic(expected = "no stack frame at index #1")]
    fn called_in_panics_on_an_absent_index() {
        let stack =
            CallStack::new().with(StackFrame::new("src/Math.php", 34, "assert_func_arg"));
        called_in(None, &stack, 1);
    }

    #[test]
    fn quoted_list_quotes_each_item() {
        assert_eq!(quoted_list(&["a", "b"]), "'a', 'b'");
    }
}
