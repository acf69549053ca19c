/// Abstract error categories (§7). Not exhaustive of every possible message,
/// just enough to let callers branch on failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LexicalMalformed,
    GrammarViolation,
    LimitExceeded,
    NumericOutOfRange,
    NumericDomain,
    EncodingError,
    Internal,
}
