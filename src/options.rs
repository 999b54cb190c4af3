use std::collections::BTreeSet;

/// The set of string flags controlling which session id is active for a
/// request.
///
/// The set is persisted as a literal comma-joined string in a dedicated
/// cookie, e.g. `"perm,customFlag"`. The two reserved flags
/// [`SessionOptions::TEMPORARY`] and [`SessionOptions::PERMANENT`] are
/// mutually exclusive: inserting one removes the other. All other flags are
/// application-defined and coexist untouched.
///
/// The backing set is ordered, so the serialized form is deterministic.
///
/// # Example
///
/// ```
/// # use session_identity::SessionOptions;
/// let mut options = SessionOptions::new();
/// options.insert(SessionOptions::TEMPORARY);
/// options.insert(SessionOptions::PERMANENT);
/// assert!(options.contains(SessionOptions::PERMANENT));
/// assert!(!options.contains(SessionOptions::TEMPORARY));
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SessionOptions(BTreeSet<String>);

impl SessionOptions {
    /// The reserved flag selecting the temporary session id.
    pub const TEMPORARY: &'static str = "temp";

    /// The reserved flag selecting the permanent session id.
    pub const PERMANENT: &'static str = "perm";

    /// Create an empty option set.
    pub fn new() -> Self {
        Default::default()
    }

    /// Parse an option set from its cookie representation.
    ///
    /// Missing or empty input yields an empty set, as does any input without
    /// flags between the commas. Unexpected formats never fail; they fall
    /// open to the default temporary-session behavior.
    ///
    /// # Example
    ///
    /// ```
    /// # use session_identity::SessionOptions;
    /// let options = SessionOptions::from_cookie_value("perm,customFlag");
    /// assert!(options.contains("customFlag"));
    /// assert!(options.is_permanent());
    /// assert!(SessionOptions::from_cookie_value("").is_empty());
    /// ```
    pub fn from_cookie_value(value: &str) -> Self {
        Self(
            value
                .split(',')
                .filter(|flag| !flag.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        )
    }

    /// Serialize the option set to its cookie representation, joining the
    /// flags with commas.
    pub fn to_cookie_value(&self) -> String {
        self.0.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }

    /// Insert a flag into the set.
    ///
    /// Inserting [`SessionOptions::PERMANENT`] removes
    /// [`SessionOptions::TEMPORARY`] and vice versa. Empty flags are ignored,
    /// as they cannot survive the comma-joined cookie round trip.
    pub fn insert(&mut self, option: &str) {
        if option.is_empty() {
            return;
        }
        if option == Self::PERMANENT {
            self.0.remove(Self::TEMPORARY);
        } else if option == Self::TEMPORARY {
            self.0.remove(Self::PERMANENT);
        }
        self.0.insert(option.to_owned());
    }

    /// Returns true if the set contains the given flag.
    pub fn contains(&self, option: &str) -> bool {
        self.0.contains(option)
    }

    /// Returns true if the set selects the permanent session id.
    pub fn is_permanent(&self) -> bool {
        self.contains(Self::PERMANENT)
    }

    /// Returns the number of flags in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set contains no flags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the flags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
