//! Path normalization shared by the reader and the writer.
//!
//! A path is either a `.`-delimited string or an ordered sequence of step
//! tokens. Sequences may contain holes (`None`), the analogue of a sparse
//! slot. Nothing here consumes the caller's input: tokens borrow from it.

use crate::value::Value;
use std::borrow::Cow;

/// Suffix that turns a step into an invocation of a niladic member.
pub const INVOKE_MARKER: &str = "()";

/// One interpreted path step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'p> {
    /// Read the named member.
    Member(&'p str),
    /// Read the named member and call it with no arguments.
    Invoke(&'p str),
    /// Missing token in a sparse sequence.
    Hole,
}

impl<'p> Step<'p> {
    pub fn from_token(token: Option<&'p str>) -> Self {
        match token {
            None => Step::Hole,
            Some(t) => match t.strip_suffix(INVOKE_MARKER) {
                Some(name) => Step::Invoke(name),
                None => Step::Member(t),
            },
        }
    }
}

/// A normalized path: ordered tokens, `None` marking a hole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path<'a> {
    tokens: Vec<Option<Cow<'a, str>>>,
}

impl<'a> Path<'a> {
    /// Splits on `.` only; brackets and commas are ordinary characters.
    pub fn parse(s: &'a str) -> Self {
        Self {
            tokens: s.split('.').map(|t| Some(Cow::Borrowed(t))).collect(),
        }
    }

    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
        T: Into<Cow<'a, str>>,
    {
        Self {
            tokens: tokens.into_iter().map(|t| t.map(Into::into)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Raw tokens, without interpreting invocation markers.
    pub fn tokens(&self) -> impl DoubleEndedIterator<Item = Option<&str>> + '_ {
        self.tokens.iter().map(|t| t.as_deref())
    }

    pub fn steps(&self) -> impl Iterator<Item = Step<'_>> + '_ {
        self.tokens().map(Step::from_token)
    }
}

/// Anything that can be read as a path.
///
/// `to_path` returns `None` when the input has no path shape at all; callers
/// treat that as a soft failure.
pub trait ToPath {
    fn to_path(&self) -> Option<Path<'_>>;
}

impl<T: ToPath + ?Sized> ToPath for &T {
    fn to_path(&self) -> Option<Path<'_>> {
        (**self).to_path()
    }
}

impl ToPath for str {
    fn to_path(&self) -> Option<Path<'_>> {
        Some(Path::parse(self))
    }
}

impl ToPath for String {
    fn to_path(&self) -> Option<Path<'_>> {
        Some(Path::parse(self))
    }
}

impl ToPath for [&str] {
    fn to_path(&self) -> Option<Path<'_>> {
        Some(Path::from_tokens(self.iter().map(|t| Some(*t))))
    }
}

impl ToPath for [String] {
    fn to_path(&self) -> Option<Path<'_>> {
        Some(Path::from_tokens(self.iter().map(|t| Some(t.as_str()))))
    }
}

impl ToPath for [Option<&str>] {
    fn to_path(&self) -> Option<Path<'_>> {
        Some(Path::from_tokens(self.iter().copied()))
    }
}

impl<const N: usize> ToPath for [&str; N] {
    fn to_path(&self) -> Option<Path<'_>> {
        self.as_slice().to_path()
    }
}

impl<const N: usize> ToPath for [Option<&str>; N] {
    fn to_path(&self) -> Option<Path<'_>> {
        self.as_slice().to_path()
    }
}

impl ToPath for Vec<&str> {
    fn to_path(&self) -> Option<Path<'_>> {
        self.as_slice().to_path()
    }
}

impl ToPath for Vec<String> {
    fn to_path(&self) -> Option<Path<'_>> {
        self.as_slice().to_path()
    }
}

impl ToPath for Vec<Option<&str>> {
    fn to_path(&self) -> Option<Path<'_>> {
        self.as_slice().to_path()
    }
}

impl ToPath for Path<'_> {
    fn to_path(&self) -> Option<Path<'_>> {
        Some(self.clone())
    }
}

/// Strings split on `.`; arrays become token sequences where `Undefined`
/// is a hole and non-string elements are stringified like property keys.
/// Every other kind is not a path.
impl ToPath for Value {
    fn to_path(&self) -> Option<Path<'_>> {
        match self {
            Value::Str(s) => Some(Path::parse(s)),
            Value::Array(items) => Some(Path::from_tokens(items.iter().map(|item| match item {
                Value::Undefined => None,
                Value::Str(s) => Some(Cow::Borrowed(&**s)),
                other => Some(Cow::Owned(other.to_js_string())),
            }))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collect(path: &impl ToPath) -> Option<Vec<Option<String>>> {
        path.to_path()
            .map(|p| p.tokens().map(|t| t.map(str::to_string)).collect())
    }

    #[test]
    fn string_paths_split_on_dots_only() {
        assert_eq!(
            collect(&"bar.arr[1]"),
            Some(vec![Some("bar".into()), Some("arr[1]".into())])
        );
        assert_eq!(collect(&"bar,arr,1"), Some(vec![Some("bar,arr,1".into())]));
        assert_eq!(collect(&""), Some(vec![Some(String::new())]));
    }

    #[test]
    fn sequences_keep_holes() {
        let sparse = [Some("a"), None, Some("b")];
        assert_eq!(
            collect(&sparse),
            Some(vec![Some("a".into()), None, Some("b".into())])
        );
    }

    #[test]
    fn caller_sequence_is_left_intact() {
        let steps = vec!["bar".to_string(), "bin".to_string()];
        let path = steps.to_path().unwrap();
        assert_eq!(path.len(), 2);
        drop(path);
        assert_eq!(steps, vec!["bar", "bin"]);
    }

    #[test]
    fn dynamic_values_as_paths() {
        let path = Value::from(json!(["jobs", 0, "getStatus()"]));
        assert_eq!(
            collect(&path),
            Some(vec![Some("jobs".into()), Some("0".into()), Some("getStatus()".into())])
        );
        assert_eq!(collect(&Value::from("a.b")).map(|t| t.len()), Some(2));
        assert_eq!(collect(&Value::object()), None);
        assert_eq!(collect(&Value::from(42)), None);
        assert_eq!(collect(&Value::Bool(true)), None);
        assert_eq!(collect(&Value::accessor(|| Value::from("boom"))), None);
    }

    #[test]
    fn steps_recognize_invocation_marker() {
        let path = Path::parse("bar.getSome().name.()");
        let steps: Vec<_> = path.steps().collect();
        assert_eq!(
            steps,
            vec![
                Step::Member("bar"),
                Step::Invoke("getSome"),
                Step::Member("name"),
                Step::Invoke(""),
            ]
        );
        assert_eq!(Step::from_token(None), Step::Hole);
    }
}
