/// Per-capability arguments passed to a policy's resolver.
///
/// A policy declares one enum `X` with a variant per capability that takes
/// arguments. `Args<X>` holds the values supplied for a single query, in the
/// order they were supplied. The empty value is what a resolver sees when the
/// caller passes nothing, so resolvers can always look arguments up without
/// special-casing their absence.
///
/// # Example
///
/// ```
/// use capgate::Args;
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum UserArg {
///     Delete { delayed: bool },
///     SetRole { role: String },
/// }
///
/// let args = Args::new()
///     .with(UserArg::Delete { delayed: true })
///     .with(UserArg::SetRole { role: "moderator".into() });
///
/// let delayed = args.find_map(|arg| match arg {
///     UserArg::Delete { delayed } => Some(*delayed),
///     _ => None,
/// });
/// assert_eq!(delayed, Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Args<X> {
    values: Vec<X>,
}

/// Argument type for policies whose capabilities take no arguments.
///
/// Uninhabited, so `Args<NoArgs>` is always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoArgs {}

impl<X> Args<X> {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Adds an argument value.
    pub fn with(mut self, arg: X) -> Self {
        self.values.push(arg);
        self
    }

    /// Returns `true` if no arguments were supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of supplied argument values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates over the supplied argument values in order.
    pub fn iter(&self) -> std::slice::Iter<'_, X> {
        self.values.iter()
    }

    /// Returns the first argument for which `f` returns `Some`.
    ///
    /// This is the usual way for a resolver to pick out the payload of one
    /// variant.
    pub fn find_map<'a, T, F>(&'a self, f: F) -> Option<T>
    where
        F: FnMut(&'a X) -> Option<T>,
    {
        self.values.iter().find_map(f)
    }

    /// Returns `true` if any supplied argument satisfies `predicate`.
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&X) -> bool,
    {
        self.values.iter().any(predicate)
    }
}

impl<X> Default for Args<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X> From<X> for Args<X> {
    fn from(arg: X) -> Self {
        Self { values: vec![arg] }
    }
}

impl<X> FromIterator<X> for Args<X> {
    fn from_iter<I: IntoIterator<Item = X>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a, X> IntoIterator for &'a Args<X> {
    type Item = &'a X;
    type IntoIter = std::slice::Iter<'a, X>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
