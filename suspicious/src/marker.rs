//! Marker payloads for results that carry no value.
//!
//! Use `Suspicious<Ok>` or `Suspicious<Success>` when an operation only
//! reports whether it worked. These are not re-exported at the crate root
//! so they never shadow the prelude's `Ok`.

use std::fmt;

/// "It worked" without a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ok;

/// "It succeeded" without a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Success;

impl fmt::Display for Ok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ok")
    }
}

impl fmt::Display for Success {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Success")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(Ok, Ok::default());
        assert_eq!(Success.to_string(), "Success");
        assert_eq!(Ok.to_string(), "Ok");
    }
}
