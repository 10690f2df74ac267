//! Parser configuration.

/// Default bound on expression and block nesting.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Knobs for a single parse.
///
/// Passed explicitly to [`parse_with_config`](crate::parse_with_config);
/// there is no process-wide parser state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Diagnostic verbosity. `1` traces scope and registration events,
    /// `2` additionally traces every token pulled from the lexer.
    pub debug: u8,
    /// Deepest expression or block nesting accepted before the parser
    /// reports `expression nested too deeply`.
    pub max_nesting_depth: usize,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_debug(mut self, debug: u8) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub(crate) fn traces_events(&self) -> bool {
        self.debug >= 1
    }

    pub(crate) fn traces_tokens(&self) -> bool {
        self.debug >= 2
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            debug: 0,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}
