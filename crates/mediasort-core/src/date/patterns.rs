use regex::Regex;
use std::sync::LazyLock;

/// One recognized filename date convention: the shape a timestamp takes
/// inside a name, and the layout that parses it.
pub struct DateConvention {
    pub name: &'static str,
    regex: &'static LazyLock<Regex>,
    pub layout: &'static str,
}

impl DateConvention {
    /// First substring of `name` matching this convention, if any.
    pub fn find<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.regex.find(name).map(|m| m.as_str())
    }
}

static RE_IOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(20|19|18)\d{2}(01|02|03|04|05|06|07|08|09|10|11|12)[0-3]\d_\d{6}").unwrap()
});
static RE_DASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(20|19|18)\d{2}(01|02|03|04|05|06|07|08|09|10|11|12)[0-3]\d-\d{6}").unwrap()
});

/// Registration order doubles as match priority: the underscore convention
/// came first historically and wins when a name could carry both.
static CONVENTIONS: &[DateConvention] = &[
    DateConvention { name: "ios", regex: &RE_IOS, layout: "%Y%m%d_%H%M%S" },
    DateConvention { name: "dash", regex: &RE_DASH, layout: "%Y%m%d-%H%M%S" },
];

/// All registered conventions, in priority order.
pub fn all() -> &'static [DateConvention] {
    CONVENTIONS
}

/// Look up a convention by registered name.
pub fn get(name: &str) -> Option<&'static DateConvention> {
    CONVENTIONS.iter().find(|c| c.name == name)
}
